//! Marker resolution and substitution

use std::collections::BTreeMap;

use tracing::debug;

use crate::catalog::{Catalog, InputKind, Template};
use crate::config::Configuration;

use super::error::ResolveError;

/// A fully substituted license document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Identifier of the template the text came from
    pub spdx_id: String,
    pub text: String,
    /// The template's note, passed through untouched
    pub note: Option<String>,
}

/// Find the template for `spdx_id`, ignoring case
pub fn lookup<'a>(catalog: &'a Catalog, spdx_id: &str) -> Result<&'a Template, ResolveError> {
    catalog
        .find(spdx_id)
        .ok_or_else(|| ResolveError::UnknownLicense {
            spdx_id: spdx_id.to_string(),
        })
}

/// Look up the template named by `config` and resolve it
pub fn generate(catalog: &Catalog, config: &Configuration) -> Result<Resolved, ResolveError> {
    let template = lookup(catalog, &config.spdx_id)?;
    resolve(template, config)
}

/// Format a copyright year range
///
/// The start year stands alone when the end year is absent, empty, or equal to it.
pub fn year_range(start: &str, end: Option<&str>) -> String {
    match end {
        Some(end) if !end.is_empty() && end != start => format!("{start}-{end}"),
        _ => start.to_string(),
    }
}

/// Compute the value of every input kind `template` references
///
/// Kinds are checked in the order the template's entries mention them; the first one
/// without a value is reported.
pub fn check_inputs(
    template: &Template,
    config: &Configuration,
) -> Result<BTreeMap<InputKind, String>, ResolveError> {
    let mut values = BTreeMap::new();
    for entry in template.replace_entries() {
        if values.contains_key(&entry.kind) {
            continue;
        }
        let raw = config
            .value(entry.kind)
            .ok_or(ResolveError::MissingInputElement { kind: entry.kind })?;
        let value = match entry.kind {
            InputKind::CopyrightYearRange => {
                year_range(raw, config.copyright_year_end.as_deref())
            }
            _ => raw.to_string(),
        };
        values.insert(entry.kind, value);
    }
    Ok(values)
}

/// Substitute every marker of `template` with its value from `config`
///
/// Entries are applied in template order and each replaces all literal occurrences of its
/// marker. The configuration's identifier is not consulted.
pub fn resolve(template: &Template, config: &Configuration) -> Result<Resolved, ResolveError> {
    let values = check_inputs(template, config)?;

    let mut text = template.body().to_string();
    for entry in template.replace_entries() {
        if let Some(value) = values.get(&entry.kind) {
            text = text.replace(&entry.marker, value);
        }
    }

    debug!(
        spdx_id = template.spdx_id(),
        substitutions = template.replace_entries().len(),
        "resolved license"
    );
    Ok(Resolved {
        spdx_id: template.spdx_id().to_string(),
        text,
        note: template.note().map(str::to_string),
    })
}

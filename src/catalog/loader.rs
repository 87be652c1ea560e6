//! Reading template documents from a directory

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::debug;

use crate::error::ParseError;

use super::error::{CatalogError, SchemaError};
use super::schema::TEMPLATE_SCHEMA;
use super::template::{InputKind, ReplaceEntry, Template};

/// Extension that marks a file as a template document
pub const TEMPLATE_EXTENSION: &str = "toml";

/// List the template documents in `dir`, as absolute paths sorted by name
///
/// Only regular files with the template extension are returned; everything else in the
/// directory is ignored.
pub fn template_paths(dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    if !dir.is_dir() {
        return Err(CatalogError::InvalidDirectory {
            path: dir.to_path_buf(),
        });
    }
    let dir = dir
        .canonicalize()
        .map_err(|e| CatalogError::read(dir, e))?;

    let mut paths = Vec::new();
    for entry in fs::read_dir(&dir).map_err(|e| CatalogError::read(&dir, e))? {
        let path = entry.map_err(|e| CatalogError::read(&dir, e))?.path();
        let is_template = path.extension().is_some_and(|ext| ext == TEMPLATE_EXTENSION);
        if is_template && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Read and validate the template document at `path`
pub fn load_template(path: &Path) -> Result<Template, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|e| CatalogError::read(path, e))?;
    parse_template(path, &contents)
}

/// Validate template document `contents`, reporting errors against `path`
///
/// Checks run in a fixed order: TOML syntax, known fields, `replace` entries (keys,
/// input kind, marker presence), then unknown top-level keys.
pub fn parse_template(path: &Path, contents: &str) -> Result<Template, CatalogError> {
    let table: Table =
        toml::from_str(contents).map_err(|e| ParseError::from_toml(path, contents, &e))?;

    TEMPLATE_SCHEMA
        .check_fields(&table)
        .map_err(|v| SchemaError::violation(path, &v))?;

    let body = string_field(&table, "body");
    let replace_entries = match table.get("replace").and_then(Value::as_array) {
        Some(items) => replace_entries(path, body, items)?,
        None => Vec::new(),
    };

    TEMPLATE_SCHEMA
        .check_closed(&table)
        .map_err(|v| SchemaError::violation(path, &v))?;

    let template = Template {
        full_name: string_field(&table, "full_name").to_string(),
        spdx_id: string_field(&table, "spdx_id").to_string(),
        body: body.to_string(),
        replace_entries,
        note: table.get("note").and_then(Value::as_str).map(str::to_string),
        source_path: path.to_path_buf(),
    };
    debug!(
        spdx_id = template.spdx_id(),
        markers = template.replace_entries().len(),
        path = %path.display(),
        "loaded license template"
    );
    Ok(template)
}

fn replace_entries(
    path: &Path,
    body: &str,
    items: &[Value],
) -> Result<Vec<ReplaceEntry>, CatalogError> {
    let mut entries = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let index = i + 1;
        let Some(record) = item.as_table() else {
            continue;
        };
        let marker = string_field(record, "string");
        let element = string_field(record, "element");

        let kind: InputKind = element
            .parse()
            .map_err(|_| SchemaError::invalid_element(path, element, index))?;
        if !body.contains(marker) {
            return Err(SchemaError::marker_not_in_body(path, marker, index).into());
        }
        entries.push(ReplaceEntry::new(marker, kind));
    }
    Ok(entries)
}

/// Read a string field that the schema has already checked
fn string_field<'a>(table: &'a Table, key: &str) -> &'a str {
    table.get(key).and_then(Value::as_str).unwrap_or_default()
}

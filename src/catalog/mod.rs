//! License template catalog
//!
//! A catalog is the full set of validated templates found in one directory. Loading is
//! all-or-nothing: the first invalid document aborts the load, and two documents with the
//! same identifier (ignoring case) are rejected.
//!
//! # Example
//!
//! ```text
//! full_name = "Minimal license"
//! spdx_id = "ML"
//! body = "This is the minimal license. (c) (year) (holders)\n"
//!
//! [[replace]]
//! string = "(year)"
//! element = "copyright_year_range"
//!
//! [[replace]]
//! string = "(holders)"
//! element = "copyright_holders"
//! ```

mod error;
mod loader;
pub mod schema;
pub mod template;

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

pub use error::{CatalogError, SchemaError};
pub use loader::{load_template, parse_template, template_paths, TEMPLATE_EXTENSION};
pub use template::{InputKind, ReplaceEntry, Template};

/// Read-only collection of license templates
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    templates: Vec<Template>,
}

impl Catalog {
    /// Load every template document in `dir`
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let templates = template_paths(dir)?
            .iter()
            .map(|path| load_template(path))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = templates.len(), dir = %dir.display(), "loaded license catalog");
        Self::from_templates(templates)
    }

    /// Build a catalog from already validated templates
    pub fn from_templates(templates: Vec<Template>) -> Result<Self, CatalogError> {
        let mut seen: HashMap<String, &Template> = HashMap::new();
        for template in &templates {
            if let Some(first) = seen.insert(template.spdx_id().to_lowercase(), template) {
                return Err(CatalogError::DuplicateLicense {
                    spdx_id: template.spdx_id().to_string(),
                    first: first.source_path().to_path_buf(),
                    second: template.source_path().to_path_buf(),
                });
            }
        }
        Ok(Self { templates })
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Find the first template whose identifier matches `spdx_id`, ignoring case
    pub fn find(&self, spdx_id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.matches_id(spdx_id))
    }

    /// Templates ordered by lowercased identifier, for display
    pub fn sorted(&self) -> Vec<&Template> {
        let mut sorted: Vec<&Template> = self.templates.iter().collect();
        sorted.sort_by_key(|t| t.spdx_id().to_lowercase());
        sorted
    }

    /// One `id: full name` line per template, ids lowercased and padded to a common width
    pub fn listing(&self) -> String {
        let width = self
            .templates
            .iter()
            .map(|t| t.spdx_id().chars().count())
            .max()
            .unwrap_or(0);
        self.sorted()
            .iter()
            .map(|t| {
                format!(
                    "{:width$}: {}",
                    t.spdx_id().to_lowercase(),
                    t.full_name(),
                    width = width
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(file: &str, id: &str, name: &str) -> Template {
        let contents = format!("full_name = \"{name}\"\nspdx_id = \"{id}\"\nbody = \"text\"\n");
        parse_template(Path::new(file), &contents).expect("Should parse")
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let catalog = Catalog::from_templates(vec![
            template("/l/mit.toml", "MIT", "MIT License"),
            template("/l/isc.toml", "ISC", "ISC License"),
        ])
        .expect("Should build");
        assert_eq!(catalog.find("mit").map(Template::spdx_id), Some("MIT"));
        assert_eq!(catalog.find("Isc").map(Template::spdx_id), Some("ISC"));
        assert!(catalog.find("gpl").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Catalog::from_templates(vec![
            template("/l/a.toml", "MIT", "MIT License"),
            template("/l/b.toml", "mit", "Other MIT"),
        ])
        .unwrap_err();
        match err {
            CatalogError::DuplicateLicense { first, second, .. } => {
                assert_eq!(first, Path::new("/l/a.toml"));
                assert_eq!(second, Path::new("/l/b.toml"));
            }
            other => panic!("expected a duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn test_listing_is_sorted_and_aligned() {
        let catalog = Catalog::from_templates(vec![
            template("/l/zlib.toml", "Zlib", "zlib License"),
            template("/l/apache.toml", "Apache-2.0", "Apache License 2.0"),
            template("/l/mit.toml", "MIT", "MIT License"),
        ])
        .expect("Should build");
        insta::assert_snapshot!(catalog.listing(), @r"
apache-2.0: Apache License 2.0
mit       : MIT License
zlib      : zlib License
");
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(Catalog::default().listing(), "");
    }
}

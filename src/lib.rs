//! License Forge - generate license files from a catalog of templates
//!
//! This library loads license templates from a directory, validates them against a closed
//! schema, and fills their markers with project data.
//!
//! # Example
//!
//! ```rust,no_run
//! use license_forge::{generate_all, Catalog, Configuration, OutputSink, ProjectConfig};
//!
//! let catalog = Catalog::load("licenses").unwrap();
//! let project = ProjectConfig::new(vec![Configuration::new("mit")
//!     .with_copyright_year_start("2024")
//!     .with_copyright_holders("Jane Doe")]);
//!
//! let mut sink = OutputSink::new(Vec::new());
//! generate_all(&catalog, &project, &mut sink).unwrap();
//! assert!(String::from_utf8(sink.into_inner()).unwrap().contains("Jane Doe"));
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;

use std::io::Write;
use std::path::PathBuf;

pub use catalog::{Catalog, CatalogError, InputKind, ReplaceEntry, SchemaError, Template};
pub use config::{ConfigError, Configuration, ProjectConfig};
pub use engine::{resolve, ResolveError, Resolved};
pub use error::{Error, ParseError};
pub use output::{OutputSink, WriteError};

/// Outcome of generating one license of a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub spdx_id: String,
    /// File the document was written to; `None` for the sink's stream
    pub target: Option<PathBuf>,
    pub note: Option<String>,
}

/// Generate every license of `project`
///
/// All documents are resolved before anything is written, so an unknown license or a
/// missing input leaves no output behind.
pub fn generate_all<W: Write>(
    catalog: &Catalog,
    project: &ProjectConfig,
    sink: &mut OutputSink<W>,
) -> Result<Vec<Generated>, Error> {
    let resolved = project
        .licenses
        .iter()
        .map(|config| engine::generate(catalog, config).map(|doc| (config, doc)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut generated = Vec::with_capacity(resolved.len());
    for (config, doc) in resolved {
        sink.emit(config.license_file.as_deref(), &doc.text)?;
        if let Some(note) = &doc.note {
            tracing::debug!(spdx_id = %doc.spdx_id, note = %note, "license carries a note");
        }
        generated.push(Generated {
            spdx_id: doc.spdx_id,
            target: config.license_file.clone(),
            note: doc.note,
        });
    }
    Ok(generated)
}

//! Project configuration
//!
//! A project configuration holds one [`Configuration`] per license to generate. It comes
//! from a `.license-forge.toml` file in the project directory, from command-line flags,
//! or from an interactive session. Every source fills in defaults (current year, default
//! license file) and checks each entry against the catalog before handing it over.

pub mod file;
pub mod interactive;

use std::path::{Path, PathBuf};

use chrono::Datelike;
use thiserror::Error;

use crate::catalog::schema::Violation;
use crate::catalog::{Catalog, InputKind};
use crate::engine::{self, ResolveError};
use crate::error::ParseError;

pub use interactive::Prompter;

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = ".license-forge.toml";

/// License file written when a configuration does not name one
pub const DEFAULT_LICENSE_FILE_NAME: &str = "LICENSE";

/// Origin reported for configurations collected from standard input
pub const STDIN_ORIGIN: &str = "<stdin>";

/// The current year in local time
pub fn current_year() -> String {
    chrono::Local::now().year().to_string()
}

/// Errors raised while building a project configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{}: {violation}", .path.display())]
    Schema { path: PathBuf, violation: Violation },

    /// An entry names an unknown license or lacks a required input
    #[error("{origin}: {source}")]
    Invalid {
        origin: String,
        #[source]
        source: ResolveError,
    },

    #[error("Cannot read answer to '{question}': {source}")]
    Prompt {
        question: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot save configuration file {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    pub fn resolve_error(&self) -> Option<&ResolveError> {
        match self {
            Self::Invalid { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Everything needed to generate one license document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Configuration {
    /// Identifier of the license, matched case-insensitively
    pub spdx_id: String,
    /// Where to write the document; standard output when absent
    pub license_file: Option<PathBuf>,
    pub copyright_year_start: Option<String>,
    pub copyright_year_end: Option<String>,
    pub copyright_holders: Option<String>,
    pub project_name: Option<String>,
    pub organization: Option<String>,
    pub homepage: Option<String>,
}

impl Configuration {
    /// Create a configuration for `spdx_id` with no values set
    pub fn new(spdx_id: impl Into<String>) -> Self {
        Self {
            spdx_id: spdx_id.into(),
            ..Self::default()
        }
    }

    pub fn with_license_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.license_file = Some(path.into());
        self
    }

    /// Send the document to standard output instead of a file
    pub fn without_license_file(mut self) -> Self {
        self.license_file = None;
        self
    }

    pub fn with_copyright_year_start(mut self, year: impl Into<String>) -> Self {
        self.copyright_year_start = Some(year.into());
        self
    }

    pub fn with_copyright_year_end(mut self, year: impl Into<String>) -> Self {
        self.copyright_year_end = Some(year.into());
        self
    }

    pub fn with_copyright_holders(mut self, holders: impl Into<String>) -> Self {
        self.copyright_holders = Some(holders.into());
        self
    }

    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn with_homepage(mut self, homepage: impl Into<String>) -> Self {
        self.homepage = Some(homepage.into());
        self
    }

    /// Fill unset copyright years with `year`
    pub fn with_default_years(mut self, year: &str) -> Self {
        self.copyright_year_start
            .get_or_insert_with(|| year.to_string());
        self.copyright_year_end.get_or_insert_with(|| year.to_string());
        self
    }

    /// The configured value a marker of `kind` needs
    ///
    /// For a year range this is the start year alone.
    pub fn value(&self, kind: InputKind) -> Option<&str> {
        match kind {
            InputKind::CopyrightYearRange => self.copyright_year_start.as_deref(),
            InputKind::CopyrightHolders => self.copyright_holders.as_deref(),
            InputKind::Organization => self.organization.as_deref(),
            InputKind::ProjectName => self.project_name.as_deref(),
            InputKind::Homepage => self.homepage.as_deref(),
        }
    }

    /// Check that the license exists in `catalog` and every input it needs is set
    pub fn validate(&self, catalog: &Catalog) -> Result<(), ResolveError> {
        let template = engine::lookup(catalog, &self.spdx_id)?;
        engine::check_inputs(template, self).map(|_| ())
    }
}

/// All licenses configured for one project
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectConfig {
    pub licenses: Vec<Configuration>,
}

impl ProjectConfig {
    pub fn new(licenses: Vec<Configuration>) -> Self {
        Self { licenses }
    }

    /// Redirect every license to standard output
    pub fn to_stdout(self) -> Self {
        Self {
            licenses: self
                .licenses
                .into_iter()
                .map(Configuration::without_license_file)
                .collect(),
        }
    }

    /// Validate every entry, reporting failures against `origin`
    pub fn validate(&self, catalog: &Catalog, origin: &str) -> Result<(), ConfigError> {
        for config in &self.licenses {
            config
                .validate(catalog)
                .map_err(|source| ConfigError::Invalid {
                    origin: origin.to_string(),
                    source,
                })?;
        }
        Ok(())
    }
}

/// Resolve `file` against the project directory
pub(crate) fn license_path(project_dir: &Path, file: Option<&str>) -> PathBuf {
    project_dir.join(file.unwrap_or(DEFAULT_LICENSE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_template;

    fn catalog() -> Catalog {
        let t = parse_template(
            Path::new("/l/needs_homepage.toml"),
            "full_name = \"H\"\nspdx_id = \"needs_homepage\"\nbody = \"see (url)\"\n[[replace]]\nstring = \"(url)\"\nelement = \"homepage\"\n",
        )
        .expect("Should parse");
        Catalog::from_templates(vec![t]).expect("Should build")
    }

    #[test]
    fn test_default_years_only_fill_unset() {
        let config = Configuration::new("mit")
            .with_copyright_year_start("1999")
            .with_default_years("2023");
        assert_eq!(config.copyright_year_start.as_deref(), Some("1999"));
        assert_eq!(config.copyright_year_end.as_deref(), Some("2023"));
    }

    #[test]
    fn test_value_for_year_range_is_start() {
        let config = Configuration::new("mit")
            .with_copyright_year_start("1999")
            .with_copyright_year_end("2001");
        assert_eq!(config.value(InputKind::CopyrightYearRange), Some("1999"));
        assert_eq!(config.value(InputKind::Homepage), None);
    }

    #[test]
    fn test_project_validate_prefixes_origin() {
        let project = ProjectConfig::new(vec![Configuration::new("NEEDS_HOMEPAGE")]);
        let err = project.validate(&catalog(), STDIN_ORIGIN).unwrap_err();
        assert_eq!(
            err.to_string(),
            "<stdin>: Missing license input element: 'homepage'."
        );
    }

    #[test]
    fn test_to_stdout_clears_files() {
        let project = ProjectConfig::new(vec![
            Configuration::new("a").with_license_file("/p/LICENSE"),
            Configuration::new("b").with_license_file("/p/COPYING"),
        ])
        .to_stdout();
        assert!(project.licenses.iter().all(|c| c.license_file.is_none()));
    }

    #[test]
    fn test_license_path_default() {
        assert_eq!(
            license_path(Path::new("/p"), None),
            PathBuf::from("/p/LICENSE")
        );
        assert_eq!(
            license_path(Path::new("/p"), Some("COPYING")),
            PathBuf::from("/p/COPYING")
        );
    }
}

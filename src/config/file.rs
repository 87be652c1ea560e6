//! Project configuration files
//!
//! ```toml
//! [[licenses]]
//! license = "mit"
//! file = "LICENSE"
//! copyright_holders = "Jane Doe"
//! copyright_year_start = "2019"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::schema::Violation;
use crate::catalog::Catalog;
use crate::error::ParseError;

use super::{current_year, license_path, ConfigError, Configuration, ProjectConfig, CONFIG_FILE_NAME};

/// TOML structure of a configuration file
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    licenses: Vec<LicenseEntry>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LicenseEntry {
    license: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    copyright_holders: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    copyright_year_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    copyright_year_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    homepage: Option<String>,
}

/// Location of the configuration file for `project_dir`
pub fn config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(CONFIG_FILE_NAME)
}

/// Load the project's configuration file, if there is one
pub fn load(project_dir: &Path, catalog: &Catalog) -> Result<Option<ProjectConfig>, ConfigError> {
    let path = config_path(project_dir);
    if !path.is_file() {
        debug!(path = %path.display(), "no configuration file");
        return Ok(None);
    }
    let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    parse(&path, &contents, project_dir, catalog, &current_year()).map(Some)
}

/// Parse configuration file `contents` read from `path`
///
/// License files are resolved against `project_dir`; unset years become `year`.
pub fn parse(
    path: &Path,
    contents: &str,
    project_dir: &Path,
    catalog: &Catalog,
    year: &str,
) -> Result<ProjectConfig, ConfigError> {
    let file: ConfigFile =
        toml::from_str(contents).map_err(|e| ParseError::from_toml(path, contents, &e))?;
    if file.licenses.is_empty() {
        return Err(ConfigError::Schema {
            path: path.to_path_buf(),
            violation: Violation::Empty { field: "licenses" },
        });
    }

    let project = ProjectConfig::new(
        file.licenses
            .into_iter()
            .map(|entry| entry.into_configuration(project_dir, year))
            .collect(),
    );
    project.validate(catalog, &path.display().to_string())?;
    Ok(project)
}

/// Render `project` as configuration file contents
///
/// Years equal to `year` and unset values are left out, so the file parses back to the
/// same configuration in the same year.
pub fn to_toml(project: &ProjectConfig, project_dir: &Path, year: &str) -> Result<String, ConfigError> {
    let file = ConfigFile {
        licenses: project
            .licenses
            .iter()
            .map(|config| LicenseEntry::from_configuration(config, project_dir, year))
            .collect(),
    };
    Ok(toml::to_string(&file)?)
}

/// Write `project` to the configuration file of `project_dir`
pub fn save(project: &ProjectConfig, project_dir: &Path, year: &str) -> Result<PathBuf, ConfigError> {
    let path = config_path(project_dir);
    let contents = to_toml(project, project_dir, year)?;
    fs::write(&path, contents).map_err(|source| ConfigError::Save {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "saved configuration");
    Ok(path)
}

impl LicenseEntry {
    fn into_configuration(self, project_dir: &Path, year: &str) -> Configuration {
        Configuration {
            spdx_id: self.license,
            license_file: Some(license_path(project_dir, self.file.as_deref())),
            copyright_year_start: self.copyright_year_start,
            copyright_year_end: self.copyright_year_end,
            copyright_holders: self.copyright_holders,
            project_name: self.project_name,
            organization: self.organization,
            homepage: self.homepage,
        }
        .with_default_years(year)
    }

    fn from_configuration(config: &Configuration, project_dir: &Path, year: &str) -> Self {
        let not_current = |value: &Option<String>| value.clone().filter(|v| v != year);
        Self {
            license: config.spdx_id.clone(),
            file: config.license_file.as_ref().map(|path| {
                path.strip_prefix(project_dir)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .into_owned()
            }),
            copyright_holders: config.copyright_holders.clone(),
            copyright_year_start: not_current(&config.copyright_year_start),
            copyright_year_end: not_current(&config.copyright_year_end),
            organization: config.organization.clone(),
            project_name: config.project_name.clone(),
            homepage: config.homepage.clone(),
        }
    }
}

//! Interactive configuration sessions
//!
//! The session asks for a license first and then only for the inputs that license's
//! template needs, in a fixed order: copyright years, holders, organization, project
//! name, homepage. An empty answer means "use the default" for years and "not set" for
//! everything else.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, InputKind};
use crate::engine;

use super::{file, license_path, ConfigError, Configuration, ProjectConfig, CONFIG_FILE_NAME, DEFAULT_LICENSE_FILE_NAME, STDIN_ORIGIN};

/// Result of an interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub project: ProjectConfig,
    /// Configuration file written at the end of the session, if the user asked for one
    pub saved: Option<PathBuf>,
}

/// Asks questions on `output` and reads answers from `input`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output, e.g. to inspect what was asked
    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask one question and return the trimmed answer
    ///
    /// Running out of input is an error rather than an empty answer.
    pub fn ask(&mut self, question: &str) -> Result<String, ConfigError> {
        let prompt_error = |source| ConfigError::Prompt {
            question: question.to_string(),
            source,
        };

        write!(self.output, "{question}> ").map_err(prompt_error)?;
        self.output.flush().map_err(prompt_error)?;

        let mut answer = String::new();
        let read = self.input.read_line(&mut answer).map_err(prompt_error)?;
        if read == 0 {
            return Err(prompt_error(std::io::ErrorKind::UnexpectedEof.into()));
        }
        Ok(answer.trim().to_string())
    }

    /// Ask a question whose empty answer means "not set"
    fn ask_optional(&mut self, question: &str) -> Result<Option<String>, ConfigError> {
        let answer = self.ask(question)?;
        Ok(Some(answer).filter(|a| !a.is_empty()))
    }

    /// Ask a question whose empty answer means `default`
    fn ask_with_default(&mut self, question: &str, default: &str) -> Result<String, ConfigError> {
        let answer = self.ask(&format!("{question}?[default: {default}]"))?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    /// Run a full session: collect one license configuration, validate it, and offer to
    /// save it in `project_dir`
    pub fn session(
        &mut self,
        catalog: &Catalog,
        project_dir: &Path,
        year: &str,
    ) -> Result<Session, ConfigError> {
        let invalid = |source| ConfigError::Invalid {
            origin: STDIN_ORIGIN.to_string(),
            source,
        };

        let spdx_id = self.ask("License (SPDX ID)?")?;
        let template = engine::lookup(catalog, &spdx_id).map_err(invalid)?;
        let file = self.ask_with_default("License file", DEFAULT_LICENSE_FILE_NAME)?;

        let mut config = Configuration::new(spdx_id)
            .with_license_file(license_path(project_dir, Some(file.as_str())));
        for kind in template.referenced_kinds() {
            match kind {
                InputKind::CopyrightYearRange => {
                    config.copyright_year_start =
                        Some(self.ask_with_default("Copyright year start", year)?);
                    config.copyright_year_end =
                        Some(self.ask_with_default("Copyright year end", year)?);
                }
                InputKind::CopyrightHolders => {
                    config.copyright_holders = self.ask_optional("Copyright holder(s)?")?;
                }
                InputKind::Organization => {
                    config.organization = self.ask_optional("Organization?")?;
                }
                InputKind::ProjectName => {
                    config.project_name = self.ask_optional("Project name?")?;
                }
                InputKind::Homepage => {
                    config.homepage = self.ask_optional("Homepage?")?;
                }
            }
        }
        let config = config.with_default_years(year);
        engine::check_inputs(template, &config).map_err(invalid)?;

        let project = ProjectConfig::new(vec![config]);
        let saved = if self.confirm_save()? {
            Some(file::save(&project, project_dir, year)?)
        } else {
            None
        };
        Ok(Session { project, saved })
    }

    fn confirm_save(&mut self) -> Result<bool, ConfigError> {
        writeln!(self.output, "----").map_err(|source| ConfigError::Prompt {
            question: "----".to_string(),
            source,
        })?;
        let answer = self.ask(&format!(
            "Save these settings in a config file (`{CONFIG_FILE_NAME}`)?[default: y]"
        ))?;
        Ok(answer.is_empty() || answer.to_lowercase().starts_with('y'))
    }
}

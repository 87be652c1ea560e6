//! Error types shared across the crate

use std::path::{Path, PathBuf};

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::engine::ResolveError;
use crate::output::WriteError;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Malformed TOML in a template or configuration document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}:{line}:{column}: {message}", .path.display())]
pub struct ParseError {
    pub path: PathBuf,
    pub span: Span,
    /// 1-based line of the error
    pub line: usize,
    /// 1-based column of the error, in characters
    pub column: usize,
    pub message: String,
}

impl ParseError {
    /// Build a parse error for `path` from a TOML deserialization failure
    pub fn from_toml(path: &Path, contents: &str, err: &toml::de::Error) -> Self {
        let span = err.span().unwrap_or(0..0);
        let (line, column) = line_column(contents, span.start);
        Self {
            path: path.to_path_buf(),
            span,
            line,
            column,
            message: err.message().trim_end().to_string(),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str) -> String {
        let filename = self.path.display().to_string();
        let filename = filename.as_str();
        let mut buf = Vec::new();

        let written = Report::build(ReportKind::Error, filename, self.span.start)
            .with_message(&self.message)
            .with_label(
                Label::new((filename, self.span.clone()))
                    .with_message(&self.message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written.ok().and_then(|_| String::from_utf8(buf).ok()) {
            Some(report) => report,
            None => self.to_string(),
        }
    }
}

/// Locate a byte offset as a 1-based (line, column) pair
fn line_column(contents: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(contents.len());
    let before = contents.get(..offset).unwrap_or(contents);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// Every failure the generation pipeline can report
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

impl Error {
    /// Process exit code for this error
    ///
    /// Code 2 is left to clap for usage errors.
    pub fn exit_code(&self) -> i32 {
        let resolve = match self {
            Error::Catalog(_) => return 3,
            Error::Write(_) => return 7,
            Error::Resolve(e) => e,
            Error::Config(e) => match e.resolve_error() {
                Some(e) => e,
                None => return 4,
            },
        };
        match resolve {
            ResolveError::UnknownLicense { .. } => 5,
            ResolveError::MissingInputElement { .. } => 6,
        }
    }

    /// The resolve failure behind this error, wherever it was raised
    pub fn resolve_error(&self) -> Option<&ResolveError> {
        match self {
            Error::Resolve(e) => Some(e),
            Error::Config(e) => e.resolve_error(),
            _ => None,
        }
    }
}

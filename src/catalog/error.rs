//! Errors raised while loading the template catalog

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::ParseError;

use super::schema::Violation;

/// A template document that breaks the structural contract
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}: {message}", .path.display())]
pub struct SchemaError {
    pub path: PathBuf,
    pub message: String,
}

impl SchemaError {
    pub fn new(path: &Path, message: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Wrap a schema violation found in the document at `path`
    pub fn violation(path: &Path, violation: &Violation) -> Self {
        Self::new(path, violation.to_string())
    }

    /// An `element` value that names no input kind
    pub fn invalid_element(path: &Path, value: &str, entry: usize) -> Self {
        Self::new(
            path,
            format!("Invalid license input element '{value}' for 'replace' entry {entry}"),
        )
    }

    /// A marker that does not occur in the license body
    pub fn marker_not_in_body(path: &Path, marker: &str, entry: usize) -> Self {
        Self::new(
            path,
            format!("Cannot find string '{marker}' of 'replace' entry {entry} in license body"),
        )
    }
}

/// Errors that abort a catalog load
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog path is missing or not a directory
    #[error("Invalid licenses directory {}", .path.display())]
    InvalidDirectory { path: PathBuf },

    /// A directory listing or template file could not be read
    #[error("Error reading license file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Two documents claim the same identifier (compared case-insensitively)
    #[error(
        "duplicate license id '{spdx_id}' in {} (already defined in {})",
        .second.display(),
        .first.display()
    )]
    DuplicateLicense {
        spdx_id: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl CatalogError {
    pub fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Path of the document or directory the error is about
    pub fn path(&self) -> &Path {
        match self {
            Self::InvalidDirectory { path } | Self::Read { path, .. } => path,
            Self::Parse(e) => &e.path,
            Self::Schema(e) => &e.path,
            Self::DuplicateLicense { second, .. } => second,
        }
    }
}

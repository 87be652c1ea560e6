//! Errors raised while resolving a license document

use thiserror::Error;

use crate::catalog::InputKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No template in the catalog carries the requested identifier
    #[error(
        "Unknown license '{spdx_id}'. Run `license-forge list` to get a full list of available licenses."
    )]
    UnknownLicense { spdx_id: String },

    /// The template needs a value the configuration does not provide
    #[error("Missing license input element: '{}'.", .kind.field_name())]
    MissingInputElement { kind: InputKind },
}

impl ResolveError {
    /// Configuration field that was missing, if that is what went wrong
    pub fn missing_field(&self) -> Option<&'static str> {
        match self {
            Self::MissingInputElement { kind } => Some(kind.field_name()),
            Self::UnknownLicense { .. } => None,
        }
    }
}

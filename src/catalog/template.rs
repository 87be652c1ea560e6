//! License template records

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A category of project data that a marker in a license body asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputKind {
    CopyrightYearRange,
    CopyrightHolders,
    Organization,
    ProjectName,
    Homepage,
}

impl InputKind {
    /// All kinds, in the order an interactive session asks for them
    pub const PROMPT_ORDER: [InputKind; 5] = [
        InputKind::CopyrightYearRange,
        InputKind::CopyrightHolders,
        InputKind::Organization,
        InputKind::ProjectName,
        InputKind::Homepage,
    ];

    /// Name used for this kind in template documents
    pub fn as_str(self) -> &'static str {
        match self {
            InputKind::CopyrightYearRange => "copyright_year_range",
            InputKind::CopyrightHolders => "copyright_holders",
            InputKind::Organization => "organization",
            InputKind::ProjectName => "project_name",
            InputKind::Homepage => "homepage",
        }
    }

    /// Name of the configuration field that must be set for this kind
    ///
    /// A year range only needs its start year, so it maps to `copyright_year_start`.
    pub fn field_name(self) -> &'static str {
        match self {
            InputKind::CopyrightYearRange => "copyright_year_start",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no [`InputKind`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownInputKind(pub String);

impl FromStr for InputKind {
    type Err = UnknownInputKind;

    // Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputKind::PROMPT_ORDER
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownInputKind(s.to_string()))
    }
}

/// One substitution point: every occurrence of `marker` is replaced by the value of `kind`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceEntry {
    pub marker: String,
    pub kind: InputKind,
}

impl ReplaceEntry {
    pub fn new(marker: impl Into<String>, kind: InputKind) -> Self {
        Self {
            marker: marker.into(),
            kind,
        }
    }
}

/// A validated license template
///
/// Templates are only built by the catalog loader, which guarantees that every marker
/// occurs in the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub(crate) full_name: String,
    pub(crate) spdx_id: String,
    pub(crate) body: String,
    pub(crate) replace_entries: Vec<ReplaceEntry>,
    pub(crate) note: Option<String>,
    pub(crate) source_path: PathBuf,
}

impl Template {
    /// Human-readable license name
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Canonical identifier, as written in the template
    pub fn spdx_id(&self) -> &str {
        &self.spdx_id
    }

    /// Raw license text, markers included
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn replace_entries(&self) -> &[ReplaceEntry] {
        &self.replace_entries
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Document this template was loaded from
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Check whether `id` names this template, ignoring case
    pub fn matches_id(&self, id: &str) -> bool {
        self.spdx_id.to_lowercase() == id.to_lowercase()
    }

    /// Input kinds referenced by this template, in prompt order, without repeats
    pub fn referenced_kinds(&self) -> Vec<InputKind> {
        InputKind::PROMPT_ORDER
            .into_iter()
            .filter(|kind| self.replace_entries.iter().any(|e| e.kind == *kind))
            .collect()
    }
}

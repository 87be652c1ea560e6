//! Declarative closed schemas for TOML documents
//!
//! A [`RecordSchema`] lists the fields a table may carry, which of them are required, and
//! what type each must have. Arrays of records are validated against their own schema,
//! including rejection of unknown keys inside every record.

use std::fmt;

use toml::{Table, Value};

/// Type a field's value must have
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    String,
    /// A string with at least one character
    NonEmptyString,
    /// A non-empty array whose items are tables following the given schema
    Records(&'static RecordSchema),
}

impl FieldType {
    fn name(self) -> &'static str {
        match self {
            FieldType::String | FieldType::NonEmptyString => "string",
            FieldType::Records(_) => "array",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: false,
        }
    }
}

/// The set of fields a table is allowed to contain
#[derive(Debug)]
pub struct RecordSchema {
    pub fields: &'static [FieldSpec],
}

/// One entry of a template's `replace` list
pub static REPLACE_ENTRY_SCHEMA: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::required("string", FieldType::NonEmptyString),
        FieldSpec::required("element", FieldType::String),
    ],
};

/// A license template document
pub static TEMPLATE_SCHEMA: RecordSchema = RecordSchema {
    fields: &[
        FieldSpec::required("full_name", FieldType::NonEmptyString),
        FieldSpec::required("spdx_id", FieldType::NonEmptyString),
        FieldSpec::required("body", FieldType::String),
        FieldSpec::optional("note", FieldType::String),
        FieldSpec::optional("replace", FieldType::Records(&REPLACE_ENTRY_SCHEMA)),
    ],
};

/// Reasons a table does not follow its schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Missing {
        field: &'static str,
    },
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    Blank {
        field: &'static str,
    },
    Empty {
        field: &'static str,
    },
    UnknownKey {
        key: String,
    },
    /// A problem inside the `index`-th (1-based) record of an array field
    InEntry {
        field: &'static str,
        index: usize,
        inner: Box<Violation>,
    },
    EntryNotTable {
        field: &'static str,
        index: usize,
        found: &'static str,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Missing { field } => write!(f, "'{field}' is a required property"),
            Violation::WrongType {
                field,
                expected,
                found,
            } => write!(f, "'{field}' must be a {expected}, found {found}"),
            Violation::Blank { field } => write!(f, "'{field}' must not be empty"),
            Violation::Empty { field } => {
                write!(f, "'{field}' must contain at least one entry")
            }
            Violation::UnknownKey { key } => write!(f, "unknown key '{key}'"),
            Violation::InEntry {
                field,
                index,
                inner,
            } => match inner.as_ref() {
                Violation::Missing { field: key } => {
                    write!(f, "'{field}' entry {index}: missing key '{key}'")
                }
                other => write!(f, "'{field}' entry {index}: {other}"),
            },
            Violation::EntryNotTable {
                field,
                index,
                found,
            } => write!(f, "'{field}' entry {index} must be a table, found {found}"),
        }
    }
}

impl RecordSchema {
    /// Check presence and type of every known field, recursing into records
    ///
    /// Keys the schema does not know about are ignored here; see [`Self::check_closed`].
    pub fn check_fields(&self, table: &Table) -> Result<(), Violation> {
        for spec in self.fields {
            match table.get(spec.name) {
                None if spec.required => return Err(Violation::Missing { field: spec.name }),
                None => {}
                Some(value) => check_value(spec, value)?,
            }
        }
        Ok(())
    }

    /// Reject the first key that the schema does not describe
    pub fn check_closed(&self, table: &Table) -> Result<(), Violation> {
        match table
            .keys()
            .find(|key| !self.fields.iter().any(|spec| spec.name == key.as_str()))
        {
            Some(key) => Err(Violation::UnknownKey { key: key.clone() }),
            None => Ok(()),
        }
    }

    /// Run both checks
    pub fn validate(&self, table: &Table) -> Result<(), Violation> {
        self.check_fields(table)?;
        self.check_closed(table)
    }
}

fn check_value(spec: &FieldSpec, value: &Value) -> Result<(), Violation> {
    let wrong_type = || Violation::WrongType {
        field: spec.name,
        expected: spec.ty.name(),
        found: value.type_str(),
    };

    match spec.ty {
        FieldType::String => value.as_str().map(|_| ()).ok_or_else(wrong_type),
        FieldType::NonEmptyString => match value.as_str() {
            Some("") => Err(Violation::Blank { field: spec.name }),
            Some(_) => Ok(()),
            None => Err(wrong_type()),
        },
        FieldType::Records(schema) => {
            let items = value.as_array().ok_or_else(wrong_type)?;
            if items.is_empty() {
                return Err(Violation::Empty { field: spec.name });
            }
            for (i, item) in items.iter().enumerate() {
                let index = i + 1;
                let record = item.as_table().ok_or(Violation::EntryNotTable {
                    field: spec.name,
                    index,
                    found: item.type_str(),
                })?;
                schema
                    .validate(record)
                    .map_err(|inner| Violation::InEntry {
                        field: spec.name,
                        index,
                        inner: Box::new(inner),
                    })?;
            }
            Ok(())
        }
    }
}

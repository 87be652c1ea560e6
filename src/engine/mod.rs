//! Substitution engine
//!
//! Turns a validated [`Template`](crate::catalog::Template) and a
//! [`Configuration`](crate::config::Configuration) into the final license text. Every
//! required input is checked before any substitution happens, so a failure never leaves a
//! partially substituted document behind.

mod error;
mod resolve;

pub use error::ResolveError;
pub use resolve::{check_inputs, generate, lookup, resolve, year_range, Resolved};

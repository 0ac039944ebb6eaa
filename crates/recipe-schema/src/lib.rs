//! # recipe-schema — Recipe Validation Engine
//!
//! Enforces the structural invariants of a Recipe document before it is
//! accepted into the system of record.
//!
//! ## Rules
//!
//! - [`unique`] — names are pairwise unique within each sibling collection:
//!   groups, hooks and workflows of the recipe, and the ops and checks of
//!   every hook. Each collection is its own namespace.
//! - [`leaf`] — an operation's `command` carries at least one token.
//!
//! ## Reporting
//!
//! [`errors`] accumulates every violation of a pass as a [`FieldError`]
//! tagged with its [`recipe_core::FieldPath`]. [`Validator::validate`]
//! never stops at the first error and returns a [`Verdict`]: either
//! `Accepted` or `Rejected` with the full, deterministically ordered list.
//!
//! ## Loading
//!
//! [`load`] parses YAML or JSON into the document model. Parsing is separate
//! from validation: a document that parses may still be rejected.
//!
//! ## Crate Policy
//!
//! - Depends only on `recipe-core` internally.
//! - Validation is pure: no I/O, no shared mutable state, safe to run on
//!   many documents concurrently.

pub mod config;
pub mod errors;
pub mod leaf;
pub mod load;
pub mod unique;
pub mod validate;

pub use config::{ConfigError, ValidatorConfig};
pub use errors::{FieldError, FieldErrors, ValidationErrors, ViolationKind};
pub use load::{load_file, load_str, DocumentFormat, DocumentLoadError};
pub use unique::{find_duplicates, Duplicate};
pub use validate::{validate, Validator, Verdict};

//! # recipe-core — Foundational Types for Recipe Validation
//!
//! Defines the typed document model for a disaster-recovery Recipe and the
//! field-path addressing scheme used to report where in that document a
//! violation occurred. Every other crate in the workspace depends on
//! `recipe-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Read-only tree.** [`Recipe`] owns its groups, hooks and workflows;
//!    a [`Hook`] owns its operations and checks. Nothing is shared and there
//!    are no back-references, so a validation pass is a plain top-down walk.
//!
//! 2. **One naming trait.** Every element that lives in a name-unique sibling
//!    collection implements [`Named`]. The uniqueness rule is written once
//!    against that trait.
//!
//! 3. **Null sequences are empty sequences.** A `null` list in the input
//!    deserializes to an empty `Vec`, so downstream rules see a length of 0
//!    instead of failing to parse.
//!
//! 4. **Addressable paths.** [`FieldPath`] renders as
//!    `spec.hooks[0].ops[0].command`: dot notation for record fields,
//!    zero-based brackets for list elements.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `recipe-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod model;
pub mod path;

// Re-export primary types for ergonomic imports.
pub use model::{
    Check, Group, Hook, LabelSelector, LabelSelectorRequirement, Named, ObjectMeta, Operation,
    Recipe, RecipeSpec, Workflow, API_GROUP, API_VERSION, KIND,
};
pub use path::FieldPath;

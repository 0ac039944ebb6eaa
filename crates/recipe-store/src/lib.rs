//! # recipe-store — Admission-Gated Recipe Store
//!
//! A thread-safe, in-memory system of record for Recipe documents. Every
//! create and update passes through the validation engine synchronously,
//! under the store's write lock, before anything is committed. A document
//! with violations is never stored.
//!
//! Rejections surface as [`AdmissionError::Invalid`], which lists every
//! field error of the pass rather than only the first:
//!
//! ```text
//! Recipe.ramendr.openshift.io "test-recipe" is invalid: [spec.groups[1]: Duplicate value: {"name":"group-1"}, ...]
//! ```

pub mod error;
pub mod store;

pub use error::AdmissionError;
pub use store::{ObjectKey, RecipeStore, DEFAULT_NAMESPACE};

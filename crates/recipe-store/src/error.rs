//! # Admission Errors
//!
//! Failure modes of store operations. Only [`AdmissionError::Invalid`]
//! carries validation output; the rest are bookkeeping conflicts.

use recipe_core::{API_GROUP, KIND};
use recipe_schema::ValidationErrors;
use thiserror::Error;

use crate::store::ObjectKey;

/// A store operation was refused.
#[derive(Error, Debug)]
pub enum AdmissionError {
    /// The document has no `metadata.name`.
    #[error(
        "{}.{} is invalid: metadata.name: Required value: name is required",
        KIND,
        API_GROUP
    )]
    MissingName,

    /// A create targeted a key that is already stored.
    #[error(
        "recipes.{} \"{}\" already exists in namespace \"{}\"",
        API_GROUP,
        key.name,
        key.namespace
    )]
    AlreadyExists { key: ObjectKey },

    /// An update or delete targeted a key that is not stored.
    #[error(
        "recipes.{} \"{}\" not found in namespace \"{}\"",
        API_GROUP,
        key.name,
        key.namespace
    )]
    NotFound { key: ObjectKey },

    /// An update carried a stale `resourceVersion`.
    #[error(
        "operation cannot be fulfilled on recipes.{} \"{}\": \
         resourceVersion {submitted} does not match current {current}",
        API_GROUP,
        key.name
    )]
    Conflict {
        key: ObjectKey,
        submitted: u64,
        current: u64,
    },

    /// The document failed structural validation.
    #[error(
        "{}.{} \"{name}\" is invalid: {}",
        KIND,
        API_GROUP,
        render_error_list(errors)
    )]
    Invalid {
        name: String,
        errors: ValidationErrors,
    },
}

impl AdmissionError {
    /// Machine-readable reason, one per variant.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingName | Self::Invalid { .. } => "Invalid",
            Self::AlreadyExists { .. } => "AlreadyExists",
            Self::NotFound { .. } => "NotFound",
            Self::Conflict { .. } => "Conflict",
        }
    }

    /// The field errors of a validation rejection, if this is one.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Invalid { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

/// One error renders bare; several render as a bracketed, comma-separated
/// list.
fn render_error_list(errors: &ValidationErrors) -> String {
    let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();
    match rendered.as_slice() {
        [single] => single.clone(),
        many => format!("[{}]", many.join(", ")),
    }
}

//! # Field Errors
//!
//! Structured, path-qualified violations and the accumulator that collects
//! them over a single validation pass.
//!
//! Each [`FieldError`] carries:
//! - `path`: where the violation is, e.g. `spec.hooks[0].ops[0].command`
//! - `kind`: `duplicate-name` or `too-few-items`
//! - `value`: a snapshot of the offending value (`{"name": ...}` for
//!   duplicates, the sequence length for cardinality violations)
//! - `detail`: the human-readable rule that was broken
//!
//! The accumulator preserves insertion order. Ordering across the document
//! is the walker's responsibility.

use std::fmt;

use recipe_core::FieldPath;
use serde::Serialize;
use serde_json::{json, Value};

/// The rule a [`FieldError`] violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    /// A named item repeats the name of an earlier sibling.
    DuplicateName,
    /// A sequence-valued field has fewer items than its required minimum.
    TooFewItems,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DuplicateName => "duplicate-name",
            Self::TooFewItems => "too-few-items",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single violation, addressed by field path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub path: FieldPath,
    pub kind: ViolationKind,
    pub value: Value,
    pub detail: String,
}

impl FieldError {
    /// The item at `path` repeats the name `name`.
    pub fn duplicate_name(path: FieldPath, name: &str) -> Self {
        let value = json!({ "name": name });
        let detail = format!("Duplicate value: {value}");
        Self {
            path,
            kind: ViolationKind::DuplicateName,
            value,
            detail,
        }
    }

    /// The sequence at `path` has `len` items where `min` are required.
    pub fn too_few_items(path: FieldPath, len: usize, min: usize) -> Self {
        let detail =
            format!("Invalid value: {len}: {path} in body should have at least {min} items");
        Self {
            path,
            kind: ViolationKind::TooFewItems,
            value: json!(len),
            detail,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.detail)
    }
}

/// Accumulator for the violations of one validation pass.
///
/// One instance per pass; never shared between documents.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Close the pass: `Ok` when nothing was recorded, otherwise the
    /// non-empty error list in insertion order.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                errors: self.errors,
            })
        }
    }
}

/// Non-empty, ordered list of violations from a rejected pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Returns the number of violations. Always at least 1.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    fn command_path() -> FieldPath {
        FieldPath::root("spec")
            .child("hooks")
            .index(0)
            .child("ops")
            .index(0)
            .child("command")
    }

    #[test]
    fn test_too_few_items_message() {
        let e = FieldError::too_few_items(command_path(), 0, 1);
        assert_eq!(e.kind, ViolationKind::TooFewItems);
        assert_eq!(e.value, json!(0));
        assert_eq!(
            e.to_string(),
            "spec.hooks[0].ops[0].command: Invalid value: 0: \
             spec.hooks[0].ops[0].command in body should have at least 1 items"
        );
    }

    #[test]
    fn test_duplicate_name_message() {
        let path = FieldPath::root("spec").child("groups").index(1);
        let e = FieldError::duplicate_name(path, "group-1");
        assert_eq!(e.kind, ViolationKind::DuplicateName);
        assert_eq!(e.value, json!({"name": "group-1"}));
        assert_eq!(
            e.to_string(),
            r#"spec.groups[1]: Duplicate value: {"name":"group-1"}"#
        );
    }

    #[test]
    fn test_kind_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(ViolationKind::DuplicateName).unwrap(),
            json!("duplicate-name")
        );
        assert_eq!(
            serde_json::to_value(ViolationKind::TooFewItems).unwrap(),
            json!("too-few-items")
        );
    }

    #[test]
    fn test_field_error_serializes_path_as_string() {
        let e = FieldError::too_few_items(command_path(), 0, 1);
        let value = serde_json::to_value(&e).unwrap();
        assert_eq!(value["path"], "spec.hooks[0].ops[0].command");
        assert_eq!(value["kind"], "too-few-items");
        assert_eq!(value["value"], 0);
    }

    #[test]
    fn test_empty_accumulator_finishes_ok() {
        assert!(FieldErrors::new().finish().is_ok());
    }

    #[test]
    fn test_accumulator_preserves_order() {
        let mut acc = FieldErrors::new();
        acc.push(FieldError::duplicate_name(
            FieldPath::root("spec").child("hooks").index(2),
            "b",
        ));
        acc.push(FieldError::duplicate_name(
            FieldPath::root("spec").child("groups").index(1),
            "a",
        ));
        assert_eq!(acc.len(), 2);

        let errors = acc.finish().unwrap_err();
        let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["spec.hooks[2]", "spec.groups[1]"]);
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_validation_errors_display_one_per_line() {
        let mut acc = FieldErrors::new();
        acc.push(FieldError::duplicate_name(
            FieldPath::root("spec").child("groups").index(1),
            "g",
        ));
        acc.push(FieldError::too_few_items(command_path(), 0, 1));
        let display = acc.finish().unwrap_err().to_string();
        assert_eq!(display.lines().count(), 2);
        assert!(display.starts_with("  spec.groups[1]"));
    }
}

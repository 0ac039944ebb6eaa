//! # Leaf Constraints
//!
//! Minimum-cardinality rules on sequence-valued leaf fields.
//!
//! `Operation.command` is an argv-style token sequence with a minimum of one
//! item. Only the number of tokens is checked: `[""]` satisfies the rule,
//! `[]` (or a `null`/missing command, which loads as `[]`) does not.

use recipe_core::{FieldPath, Operation};

use crate::errors::{FieldError, FieldErrors};

/// Minimum number of tokens in an operation's command.
pub const MIN_COMMAND_TOKENS: usize = 1;

/// Record a `too-few-items` error at `path` if `items` is shorter than `min`.
pub fn check_min_items<T>(items: &[T], min: usize, path: &FieldPath, errors: &mut FieldErrors) {
    if items.len() < min {
        errors.push(FieldError::too_few_items(path.clone(), items.len(), min));
    }
}

/// Check the leaf fields of one operation addressed by `path`.
pub fn check_operation(op: &Operation, path: &FieldPath, errors: &mut FieldErrors) {
    check_min_items(
        &op.command,
        MIN_COMMAND_TOKENS,
        &path.child("command"),
        errors,
    );
}

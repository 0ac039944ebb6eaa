//! # Name Uniqueness
//!
//! One rule, applied at every level of the document that holds a named
//! collection: within a single sibling collection, no two items share a
//! name.
//!
//! - Comparison is exact, case-sensitive string equality.
//! - The empty name is an ordinary value: two items named `""` collide.
//! - The first occurrence of a name is never flagged; every later occurrence
//!   is, and each is paired with the index of that first occurrence.
//! - Results are in ascending index order.

use std::collections::HashMap;

use recipe_core::{FieldPath, Named};

use crate::errors::{FieldError, FieldErrors};

/// A later item whose name repeats an earlier sibling's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duplicate {
    /// Position of the repeating item.
    pub index: usize,
    /// Position of the first item with the same name.
    pub first: usize,
}

/// Find every item whose name was already used by an earlier sibling.
pub fn find_duplicates<T: Named>(items: &[T]) -> Vec<Duplicate> {
    let mut first_seen: HashMap<&str, usize> = HashMap::with_capacity(items.len());
    let mut duplicates = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match first_seen.get(item.name()) {
            Some(&first) => duplicates.push(Duplicate { index, first }),
            None => {
                first_seen.insert(item.name(), index);
            }
        }
    }

    duplicates
}

/// Record a `duplicate-name` error at `path[i]` for every repeated name in
/// `items`, where `path` addresses the collection itself.
pub fn check_unique<T: Named>(items: &[T], path: &FieldPath, errors: &mut FieldErrors) {
    for dup in find_duplicates(items) {
        let name = items[dup.index].name();
        tracing::trace!(
            path = %path,
            index = dup.index,
            first = dup.first,
            name,
            "duplicate name"
        );
        errors.push(FieldError::duplicate_name(path.index(dup.index), name));
    }
}

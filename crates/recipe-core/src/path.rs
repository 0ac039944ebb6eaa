//! # Field Paths
//!
//! Hierarchical addresses of values within a Recipe, used to tag every
//! violation with the location it was found at.
//!
//! Rendering rules:
//! - record fields are joined with `.` (`spec.hooks`)
//! - list elements append a zero-based `[i]` to the preceding field
//!   (`spec.hooks[1].ops[0].command`)
//!
//! Paths are built by extension: each call returns a new path and leaves the
//! receiver untouched, so a walker can hand the parent path to several
//! children without cloning by hand.

use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Field(String),
    Index(usize),
}

/// Address of a value in the document tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// A path with a single root field, e.g. `spec`.
    pub fn root(field: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::Field(field.into())],
        }
    }

    /// Extend with a record field.
    pub fn child(&self, field: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Field(field.into()));
        Self { segments }
    }

    /// Extend with a list index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }

    /// Number of segments (fields and indices) in the path.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => write!(f, "{name}")?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

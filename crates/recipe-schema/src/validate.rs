//! # Validation Orchestrator
//!
//! Walks a Recipe top-down in one pass, applying the uniqueness rule to every
//! named collection and the leaf rules to every operation, and returns a
//! [`Verdict`].
//!
//! ## Ordering
//!
//! Errors follow document declaration order:
//!
//! 1. duplicate groups, `spec.groups[i]`
//! 2. duplicate hooks, `spec.hooks[i]`
//! 3. per hook `h`, in order: duplicate ops `spec.hooks[h].ops[i]`, then
//!    empty commands `spec.hooks[h].ops[i].command`, then duplicate checks
//!    `spec.hooks[h].chks[i]`
//! 4. duplicate workflows, `spec.workflows[i]` (when enabled)
//!
//! A duplicate at an outer level never suppresses the checks of the levels
//! below it: a hook that repeats a sibling's name still has its ops and
//! checks inspected.
//!
//! ## Thread Safety
//!
//! [`Validator`] is `Copy + Send + Sync` and holds only its configuration.
//! Each call allocates its own accumulator.

use recipe_core::{FieldPath, Hook, Recipe};

use crate::config::ValidatorConfig;
use crate::errors::{FieldError, FieldErrors, ValidationErrors};
use crate::leaf::check_operation;
use crate::unique::check_unique;

/// Outcome of a validation pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// No violations anywhere in the document.
    Accepted,
    /// At least one violation; the document must not be stored.
    Rejected(ValidationErrors),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// The violations of a rejected document; empty when accepted.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Accepted => &[],
            Self::Rejected(errors) => errors.errors(),
        }
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        match self {
            Self::Accepted => Ok(()),
            Self::Rejected(errors) => Err(errors),
        }
    }
}

impl From<Result<(), ValidationErrors>> for Verdict {
    fn from(result: Result<(), ValidationErrors>) -> Self {
        match result {
            Ok(()) => Self::Accepted,
            Err(errors) => Self::Rejected(errors),
        }
    }
}

/// Structural validator for Recipe documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Run a full pass over `recipe` and collect every violation.
    ///
    /// Pure and idempotent: the document is not modified and the same input
    /// always yields the same verdict.
    pub fn validate(&self, recipe: &Recipe) -> Verdict {
        let mut errors = FieldErrors::new();
        let spec = FieldPath::root("spec");

        check_unique(&recipe.spec.groups, &spec.child("groups"), &mut errors);

        let hooks = spec.child("hooks");
        check_unique(&recipe.spec.hooks, &hooks, &mut errors);
        for (i, hook) in recipe.spec.hooks.iter().enumerate() {
            check_hook(hook, &hooks.index(i), &mut errors);
        }

        if self.config.unique_workflow_names {
            check_unique(
                &recipe.spec.workflows,
                &spec.child("workflows"),
                &mut errors,
            );
        }

        tracing::debug!(
            recipe = %recipe.metadata.name,
            groups = recipe.spec.groups.len(),
            hooks = recipe.spec.hooks.len(),
            workflows = recipe.spec.workflows.len(),
            errors = errors.len(),
            "validation pass complete"
        );

        errors.finish().into()
    }
}

/// Validate a Recipe with the default configuration.
pub fn validate(recipe: &Recipe) -> Verdict {
    Validator::default().validate(recipe)
}

fn check_hook(hook: &Hook, path: &FieldPath, errors: &mut FieldErrors) {
    let ops = path.child("ops");
    check_unique(&hook.ops, &ops, errors);
    for (i, op) in hook.ops.iter().enumerate() {
        check_operation(op, &ops.index(i), errors);
    }

    check_unique(&hook.chks, &path.child("chks"), errors);
}

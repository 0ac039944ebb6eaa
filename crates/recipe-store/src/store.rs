//! # Recipe Store
//!
//! Thread-safe, cloneable in-memory store of Recipe documents keyed by
//! namespace and name.
//!
//! All operations are synchronous. The lock is `parking_lot::RwLock`, which
//! is non-poisoning, and it is never held across an `.await`. Validation runs
//! while the write lock is held, so the existence check, the validation gate
//! and the commit form one atomic step: two racing creates of the same key
//! cannot both succeed, and a rejected document is never visible to readers.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use recipe_core::Recipe;
use recipe_schema::{Validator, ValidatorConfig, Verdict};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AdmissionError;

/// Namespace assigned to documents submitted without one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Identity of a stored Recipe.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ObjectKey {
    pub namespace: String,
    pub name: String,
}

impl ObjectKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    fn of(recipe: &Recipe) -> Result<Self, AdmissionError> {
        if recipe.metadata.name.is_empty() {
            return Err(AdmissionError::MissingName);
        }
        let namespace = recipe
            .metadata
            .namespace
            .as_deref()
            .filter(|ns| !ns.is_empty())
            .unwrap_or(DEFAULT_NAMESPACE);
        Ok(Self::new(namespace, recipe.metadata.name.clone()))
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// In-memory system of record for Recipes with a validation gate on every
/// write.
#[derive(Debug, Clone)]
pub struct RecipeStore {
    data: Arc<RwLock<BTreeMap<ObjectKey, Recipe>>>,
    validator: Validator,
}

impl Default for RecipeStore {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

impl RecipeStore {
    /// Create an empty store that validates with `config`.
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
            validator: Validator::new(config),
        }
    }

    /// Validate and store a new Recipe.
    ///
    /// Assigns `uid`, `resourceVersion` 1, `creationTimestamp`, and the
    /// default namespace if none was given. Returns the stored object.
    pub fn create(&self, mut recipe: Recipe) -> Result<Recipe, AdmissionError> {
        let key = ObjectKey::of(&recipe)?;
        let mut guard = self.data.write();

        if guard.contains_key(&key) {
            return Err(AdmissionError::AlreadyExists { key });
        }
        self.admit(&key, &recipe)?;

        recipe.metadata.namespace = Some(key.namespace.clone());
        recipe.metadata.uid = Some(Uuid::new_v4());
        recipe.metadata.resource_version = Some(1);
        recipe.metadata.creation_timestamp = Some(Utc::now());

        tracing::info!(key = %key, "recipe created");
        guard.insert(key, recipe.clone());
        Ok(recipe)
    }

    /// Validate and replace an existing Recipe.
    ///
    /// If the submission carries a `resourceVersion`, it must match the
    /// stored one. Identity fields (`uid`, `creationTimestamp`) are kept from
    /// the stored object and `resourceVersion` is incremented.
    pub fn update(&self, mut recipe: Recipe) -> Result<Recipe, AdmissionError> {
        let key = ObjectKey::of(&recipe)?;
        let mut guard = self.data.write();

        let current = guard
            .get(&key)
            .ok_or_else(|| AdmissionError::NotFound { key: key.clone() })?;
        self.admit(&key, &recipe)?;

        let current_version = current.metadata.resource_version.unwrap_or(0);
        if let Some(submitted) = recipe.metadata.resource_version {
            if submitted != current_version {
                return Err(AdmissionError::Conflict {
                    key,
                    submitted,
                    current: current_version,
                });
            }
        }

        recipe.metadata.namespace = Some(key.namespace.clone());
        recipe.metadata.uid = current.metadata.uid;
        recipe.metadata.creation_timestamp = current.metadata.creation_timestamp;
        recipe.metadata.resource_version = Some(current_version + 1);

        tracing::info!(
            key = %key,
            resource_version = current_version + 1,
            "recipe updated"
        );
        guard.insert(key, recipe.clone());
        Ok(recipe)
    }

    /// Remove a Recipe, returning the stored object.
    pub fn delete(&self, namespace: &str, name: &str) -> Result<Recipe, AdmissionError> {
        let key = ObjectKey::new(namespace, name);
        let removed = self.data.write().remove(&key);
        match removed {
            Some(recipe) => {
                tracing::info!(key = %key, "recipe deleted");
                Ok(recipe)
            }
            None => Err(AdmissionError::NotFound { key }),
        }
    }

    /// Retrieve a Recipe by namespace and name.
    pub fn get(&self, namespace: &str, name: &str) -> Option<Recipe> {
        self.data
            .read()
            .get(&ObjectKey::new(namespace, name))
            .cloned()
    }

    /// All Recipes in `namespace`, sorted by name.
    pub fn list(&self, namespace: &str) -> Vec<Recipe> {
        self.data
            .read()
            .iter()
            .filter(|(key, _)| key.namespace == namespace)
            .map(|(_, recipe)| recipe.clone())
            .collect()
    }

    /// Return the number of stored Recipes across all namespaces.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The validation gate. Runs before any mutation of the map.
    fn admit(&self, key: &ObjectKey, recipe: &Recipe) -> Result<(), AdmissionError> {
        match self.validator.validate(recipe) {
            Verdict::Accepted => Ok(()),
            Verdict::Rejected(errors) => {
                tracing::warn!(key = %key, errors = errors.len(), "recipe rejected");
                Err(AdmissionError::Invalid {
                    name: key.name.clone(),
                    errors,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_core::{Check, Group, Hook, Operation, RecipeSpec, Workflow};
    use recipe_schema::ViolationKind;

    fn groups_recipe(names: &[&str]) -> Recipe {
        Recipe::new(
            "test-recipe",
            RecipeSpec {
                groups: names.iter().map(|n| Group::new(*n, "resource")).collect(),
                ..RecipeSpec::default()
            },
        )
        .in_namespace("recipe-test-ns")
    }

    #[test]
    fn test_create_assigns_metadata() {
        let store = RecipeStore::default();
        let recipe = groups_recipe(&["group-1", "group-2"]);
        let stored = store.create(recipe).unwrap();
        assert!(stored.metadata.uid.is_some());
        assert_eq!(stored.metadata.resource_version, Some(1));
        assert!(stored.metadata.creation_timestamp.is_some());
        assert_eq!(store.get("recipe-test-ns", "test-recipe"), Some(stored));
    }

    #[test]
    fn test_create_defaults_namespace() {
        let store = RecipeStore::default();
        let stored = store
            .create(Recipe::new("r", RecipeSpec::default()))
            .unwrap();
        assert_eq!(stored.metadata.namespace.as_deref(), Some(DEFAULT_NAMESPACE));
        assert!(store.get(DEFAULT_NAMESPACE, "r").is_some());
    }

    #[test]
    fn test_create_without_name_rejected() {
        let store = RecipeStore::default();
        let err = store
            .create(Recipe::new("", RecipeSpec::default()))
            .unwrap_err();
        assert!(matches!(err, AdmissionError::MissingName));
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_create_is_not_stored() {
        let store = RecipeStore::default();
        let recipe = groups_recipe(&["group-1", "group-1"]);
        let err = store.create(recipe).unwrap_err();
        assert_eq!(err.reason(), "Invalid");
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].path.to_string(), "spec.groups[1]");
        assert!(store.get("recipe-test-ns", "test-recipe").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_duplicate_key_already_exists() {
        let store = RecipeStore::default();
        store.create(groups_recipe(&["a"])).unwrap();
        let err = store.create(groups_recipe(&["b"])).unwrap_err();
        assert!(matches!(err, AdmissionError::AlreadyExists { .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_same_name_in_different_namespaces() {
        let store = RecipeStore::default();
        for ns in ["ns-1", "ns-2"] {
            store.create(groups_recipe(&["a"]).in_namespace(ns)).unwrap();
        }
        assert_eq!(store.len(), 2);
        assert_eq!(store.list("ns-1").len(), 1);
    }

    #[test]
    fn test_update_increments_version_and_keeps_identity() {
        let store = RecipeStore::default();
        let created = store.create(groups_recipe(&["a"])).unwrap();
        let updated = store.update(groups_recipe(&["a", "b"])).unwrap();
        assert_eq!(updated.metadata.resource_version, Some(2));
        assert_eq!(updated.metadata.uid, created.metadata.uid);
        assert_eq!(
            updated.metadata.creation_timestamp,
            created.metadata.creation_timestamp
        );
        let stored = store.get("recipe-test-ns", "test-recipe").unwrap();
        assert_eq!(stored.spec.groups.len(), 2);
    }

    #[test]
    fn test_invalid_update_keeps_previous_version() {
        let store = RecipeStore::default();
        store.create(groups_recipe(&["a"])).unwrap();
        let err = store.update(groups_recipe(&["a", "a"])).unwrap_err();
        assert!(matches!(err, AdmissionError::Invalid { .. }));

        let stored = store.get("recipe-test-ns", "test-recipe").unwrap();
        assert_eq!(stored.metadata.resource_version, Some(1));
        assert_eq!(stored.spec.groups.len(), 1);
    }

    #[test]
    fn test_update_stale_version_conflicts() {
        let store = RecipeStore::default();
        store.create(groups_recipe(&["a"])).unwrap();
        store.update(groups_recipe(&["a", "b"])).unwrap();

        let mut stale = groups_recipe(&["a", "c"]);
        stale.metadata.resource_version = Some(1);
        let err = store.update(stale).unwrap_err();
        match err {
            AdmissionError::Conflict {
                submitted, current, ..
            } => {
                assert_eq!(submitted, 1);
                assert_eq!(current, 2);
            }
            other => panic!("expected Conflict, got: {other}"),
        }
    }

    #[test]
    fn test_update_missing_not_found() {
        let store = RecipeStore::default();
        let err = store.update(groups_recipe(&["a"])).unwrap_err();
        assert_eq!(err.reason(), "NotFound");
    }

    #[test]
    fn test_delete() {
        let store = RecipeStore::default();
        store.create(groups_recipe(&["a"])).unwrap();
        let removed = store.delete("recipe-test-ns", "test-recipe").unwrap();
        assert_eq!(removed.metadata.name, "test-recipe");
        assert!(store.is_empty());
        assert!(matches!(
            store.delete("recipe-test-ns", "test-recipe"),
            Err(AdmissionError::NotFound { .. })
        ));
    }

    #[test]
    fn test_list_sorted_by_name() {
        let store = RecipeStore::default();
        for name in ["zeta", "alpha", "mid"] {
            store
                .create(Recipe::new(name, RecipeSpec::default()).in_namespace("ns"))
                .unwrap();
        }
        let names: Vec<String> = store
            .list("ns")
            .into_iter()
            .map(|r| r.metadata.name)
            .collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_workflow_uniqueness_follows_config() {
        let recipe = Recipe::new(
            "wf",
            RecipeSpec {
                workflows: vec![Workflow::new("workflow-1"), Workflow::new("workflow-1")],
                ..RecipeSpec::default()
            },
        );

        let strict = RecipeStore::default();
        let err = strict.create(recipe.clone()).unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.errors()[0].path.to_string(), "spec.workflows[1]");

        let lenient = RecipeStore::new(ValidatorConfig {
            unique_workflow_names: false,
        });
        assert!(lenient.create(recipe).is_ok());
    }

    #[test]
    fn test_invalid_error_lists_every_violation() {
        let store = RecipeStore::default();
        let hook = Hook::new("hook-1", "exec")
            .with_ops(vec![Operation::new("op-1", Vec::<String>::new())])
            .with_checks(vec![Check::new("c"), Check::new("c")]);
        let recipe = Recipe::new(
            "test-recipe",
            RecipeSpec {
                groups: vec![Group::new("g", "resource"), Group::new("g", "resource")],
                hooks: vec![hook],
                ..RecipeSpec::default()
            },
        );
        let err = store.create(recipe).unwrap_err();
        let kinds: Vec<ViolationKind> = err
            .validation_errors()
            .unwrap()
            .iter()
            .map(|e| e.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::DuplicateName,
                ViolationKind::TooFewItems,
                ViolationKind::DuplicateName,
            ]
        );

        let message = err.to_string();
        assert!(message.starts_with(r#"Recipe.ramendr.openshift.io "test-recipe" is invalid: ["#));
        assert!(message.contains("spec.groups[1]"));
        assert!(message.contains("spec.hooks[0].ops[0].command"));
        assert!(message.contains("spec.hooks[0].chks[1]"));
        assert!(message.ends_with(']'));
    }

    #[test]
    fn test_single_error_message_is_unbracketed() {
        let store = RecipeStore::default();
        let empty = Operation::new("op-1", Vec::<String>::new());
        let recipe = Recipe::new(
            "test-recipe",
            RecipeSpec {
                hooks: vec![Hook::new("hook-1", "exec").with_ops(vec![empty])],
                ..RecipeSpec::default()
            },
        );
        let err = store.create(recipe).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Recipe.ramendr.openshift.io \"test-recipe\" is invalid: \
             spec.hooks[0].ops[0].command: Invalid value: 0: \
             spec.hooks[0].ops[0].command in body should have at least 1 items"
        );
    }

    #[test]
    fn test_clones_share_state() {
        let store = RecipeStore::default();
        let handle = store.clone();
        handle.create(groups_recipe(&["a"])).unwrap();
        assert_eq!(store.len(), 1);
    }
}

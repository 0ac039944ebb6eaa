//! # Recipe Document Model
//!
//! Typed representation of a Recipe: groups of resources, hooks with nested
//! operations and checks, and workflows that sequence hooks and groups.
//!
//! The model is a read-only view for traversal. Field names serialize in the
//! camelCase wire format of the document (`apiVersion`, `selectResource`,
//! `onError`, ...), and the short collection names `ops` and `chks` match the
//! field paths reported by validation.
//!
//! Fields that the validation rules never inspect (selectors, timeouts,
//! error policies) are carried as-is. They are part of a complete document
//! and must survive a load/store round trip, but no coercion or defaulting is
//! applied to them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// API group that owns the Recipe kind.
pub const API_GROUP: &str = "ramendr.openshift.io";

/// Served API version of the Recipe kind.
pub const API_VERSION: &str = "ramendr.openshift.io/v1alpha1";

/// Kind name of the root document.
pub const KIND: &str = "Recipe";

/// An element of a sibling collection whose names must be pairwise unique.
pub trait Named {
    /// The element's name as written in the document.
    fn name(&self) -> &str;
}

/// Deserialize a possibly-null sequence, mapping `null` to an empty `Vec`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Root Recipe document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: RecipeSpec,
}

impl Recipe {
    /// Build a Recipe with the served API version and kind filled in.
    pub fn new(name: impl Into<String>, spec: RecipeSpec) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ObjectMeta {
                name: name.into(),
                ..ObjectMeta::default()
            },
            spec,
        }
    }

    /// Place the Recipe in a namespace.
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.metadata.namespace = Some(namespace.into());
        self
    }
}

/// Object identity and bookkeeping owned by the store.
///
/// Only `name` and `namespace` are meaningful on submission. The remaining
/// fields are assigned by the admission store and ignored by validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,
}

/// Desired state of a Recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSpec {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub groups: Vec<Group>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hooks: Vec<Hook>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub workflows: Vec<Workflow>,
}

/// Named reference to a set of resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub name: String,
    /// Free-form tag such as `resource` or `volume`.
    #[serde(rename = "type")]
    pub group_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_namespaces: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_resource_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_resource_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_selector: Option<LabelSelector>,
}

impl Group {
    pub fn new(name: impl Into<String>, group_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group_type: group_type.into(),
            ..Self::default()
        }
    }
}

/// Named container of operations and checks run at a workflow step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hook {
    pub name: String,
    /// Free-form tag such as `exec` or `check`.
    #[serde(rename = "type")]
    pub hook_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_selector: Option<LabelSelector>,
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_error: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ops: Vec<Operation>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub chks: Vec<Check>,
}

impl Hook {
    pub fn new(name: impl Into<String>, hook_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hook_type: hook_type.into(),
            ..Self::default()
        }
    }

    pub fn with_ops(mut self, ops: Vec<Operation>) -> Self {
        self.ops = ops;
        self
    }

    pub fn with_checks(mut self, chks: Vec<Check>) -> Self {
        self.chks = chks;
        self
    }
}

/// Named command invocation within a hook.
///
/// `command` is an argv-style token sequence. It must contain at least one
/// token; the token contents themselves are not inspected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub command: Vec<String>,
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_error: Option<String>,
    /// Name of the operation that undoes this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse_op: Option<String>,
}

impl Operation {
    pub fn new<I, S>(name: impl Into<String>, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            command: command.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Named verification step within a hook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Check {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_error: Option<String>,
}

impl Check {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Named ordered sequence of steps referencing hooks and groups.
///
/// Each step is an opaque mapping (for example `{"hook": "db/quiesce"}` or
/// `{"group": "config"}`). References are not resolved here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sequence: Vec<BTreeMap<String, String>>,
}

impl Workflow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sequence: Vec::new(),
        }
    }
}

/// Label query over a set of resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub match_labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub match_expressions: Vec<LabelSelectorRequirement>,
}

/// A single `key <operator> values` requirement of a [`LabelSelector`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelectorRequirement {
    pub key: String,
    pub operator: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl Named for Group {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Hook {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Operation {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Check {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Workflow {
    fn name(&self) -> &str {
        &self.name
    }
}

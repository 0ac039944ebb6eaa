//! # Validator Configuration
//!
//! Switches for rules whose canonical behavior differs between document
//! revisions. Loaded from YAML by the CLI, passed by value to the store.
//!
//! ```yaml
//! unique_workflow_names: false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunable rules of the validation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Reject documents whose workflows share a name. On by default.
    pub unique_workflow_names: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            unique_workflow_names: true,
        }
    }
}

/// Error loading a [`ValidatorConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not a valid configuration document.
    #[error("invalid config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ValidatorConfig {
    /// Parse a YAML configuration document. Missing keys take their defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        // A comment-only document parses as null: all defaults.
        let value: Option<Self> = serde_yaml::from_str(content)?;
        Ok(value.unwrap_or_default())
    }

    /// Load a YAML configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

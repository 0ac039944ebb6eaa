//! # Document Loading
//!
//! Parses YAML or JSON text into a [`Recipe`]. The format of a file is
//! chosen by extension: `.yaml`/`.yml` are YAML, anything else is JSON.
//!
//! Loading only checks shape (types of fields, required `name`/`type`
//! keys). Structural rules are [`crate::validate`]'s job, so a document that
//! loads cleanly can still be rejected.

use std::path::Path;

use recipe_core::Recipe;
use thiserror::Error;

/// Serialization format of a Recipe document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Error loading a Recipe document.
#[derive(Error, Debug)]
pub enum DocumentLoadError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The content is not a well-formed Recipe document.
    #[error("invalid {format:?} in '{path}': {reason}")]
    Parse {
        path: String,
        format: DocumentFormat,
        reason: String,
    },
}

/// Parse a Recipe from text. `origin` names the source in error messages.
pub fn load_str(
    content: &str,
    format: DocumentFormat,
    origin: &str,
) -> Result<Recipe, DocumentLoadError> {
    let parsed = match format {
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|reason| DocumentLoadError::Parse {
        path: origin.to_string(),
        format,
        reason,
    })
}

/// Read and parse a Recipe file.
pub fn load_file(path: &Path) -> Result<Recipe, DocumentLoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentLoadError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let recipe = load_str(
        &content,
        DocumentFormat::from_path(path),
        &path.display().to_string(),
    )?;

    tracing::debug!(
        path = %path.display(),
        recipe = %recipe.metadata.name,
        "loaded recipe document"
    );

    Ok(recipe)
}

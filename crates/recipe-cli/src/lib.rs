//! # recipe-cli — CLI Tool for Recipe Documents
//!
//! Provides the `recipe` command-line interface.
//!
//! ## Subcommands
//!
//! - `recipe validate` — validate one or more Recipe files and report every
//!   violation with its field path.
//!
//! ```bash
//! recipe validate app/recipe.yaml
//! recipe validate --format json recipes/*.yaml
//! recipe --config validator.yaml validate --allow-duplicate-workflows r.yaml
//! ```
//!
//! ## Exit Codes
//!
//! - `0` every document accepted
//! - `1` at least one document rejected
//! - `2` operational error (unreadable file, malformed document, bad config)

pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use recipe_schema::ValidatorConfig;

/// Exit code when every document was accepted.
pub const EXIT_OK: u8 = 0;
/// Exit code when at least one document was rejected.
pub const EXIT_REJECTED: u8 = 1;
/// Exit code for operational errors.
pub const EXIT_ERROR: u8 = 2;

/// Load the validator configuration, falling back to defaults when no file
/// is given.
pub fn load_config(path: Option<&Path>) -> Result<ValidatorConfig> {
    match path {
        Some(path) => {
            let config = ValidatorConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            tracing::debug!(path = %path.display(), ?config, "loaded validator config");
            Ok(config)
        }
        None => Ok(ValidatorConfig::default()),
    }
}

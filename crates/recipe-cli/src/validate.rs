//! # Validate Subcommand
//!
//! Loads each Recipe file, runs the validation engine over it and prints a
//! per-file report. Every violation in a rejected document is listed, not
//! just the first.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, ValueEnum};
use recipe_schema::{load_file, FieldError, Validator, ValidatorConfig, Verdict};
use serde::Serialize;

use crate::{EXIT_ERROR, EXIT_OK, EXIT_REJECTED};

/// Report format.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `OK:`/`FAIL:` line per file, one indented line per violation.
    #[default]
    Text,
    /// A JSON array with one report object per file.
    Json,
}

/// Arguments for the `recipe validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Recipe files to validate (.yaml/.yml or .json).
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Accept recipes whose workflows share a name.
    #[arg(long)]
    pub allow_duplicate_workflows: bool,
}

/// Outcome for one file.
#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    accepted: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    load_error: Option<String>,
}

/// Execute the validate subcommand, writing the report to `out`.
///
/// Returns exit code: 0 if all accepted, 1 if any rejected, 2 if any file
/// could not be loaded.
pub fn run_validate(
    args: &ValidateArgs,
    mut config: ValidatorConfig,
    out: &mut impl Write,
) -> Result<u8> {
    if args.allow_duplicate_workflows {
        config.unique_workflow_names = false;
    }
    let validator = Validator::new(config);

    let reports: Vec<FileReport> = args
        .paths
        .iter()
        .map(|path| validate_path(&validator, path))
        .collect();

    match args.format {
        OutputFormat::Text => write_text(&reports, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &reports)?;
            writeln!(out)?;
        }
    }

    let rejected = reports.iter().filter(|r| !r.accepted).count();
    tracing::info!(files = reports.len(), rejected, "validation finished");

    if reports.iter().any(|r| r.load_error.is_some()) {
        Ok(EXIT_ERROR)
    } else if rejected > 0 {
        Ok(EXIT_REJECTED)
    } else {
        Ok(EXIT_OK)
    }
}

fn validate_path(validator: &Validator, path: &Path) -> FileReport {
    let shown = path.display().to_string();
    let recipe = match load_file(path) {
        Ok(recipe) => recipe,
        Err(e) => {
            tracing::warn!(path = %shown, error = %e, "failed to load recipe");
            return FileReport {
                path: shown,
                accepted: false,
                errors: Vec::new(),
                load_error: Some(e.to_string()),
            };
        }
    };

    match validator.validate(&recipe) {
        Verdict::Accepted => FileReport {
            path: shown,
            accepted: true,
            errors: Vec::new(),
            load_error: None,
        },
        Verdict::Rejected(errors) => FileReport {
            path: shown,
            accepted: false,
            errors: errors.into_inner(),
            load_error: None,
        },
    }
}

fn write_text(reports: &[FileReport], out: &mut impl Write) -> Result<()> {
    for report in reports {
        if let Some(ref reason) = report.load_error {
            writeln!(out, "ERROR: {} — {}", report.path, reason)?;
        } else if report.accepted {
            writeln!(out, "OK: {}", report.path)?;
        } else {
            writeln!(
                out,
                "FAIL: {} — {} violation(s)",
                report.path,
                report.errors.len()
            )?;
            for e in &report.errors {
                writeln!(out, "  [{}] {}", e.kind, e)?;
            }
        }
    }
    Ok(())
}

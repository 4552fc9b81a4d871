//! Error handling for the Lattice CLI.
//!
//! `CliError` is the top-level error returned by commands; core errors
//! convert in via `From`, and `to_report` turns the final error into a
//! miette diagnostic for display.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading or validation failed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fatal error from the core orchestrator.
    #[error(transparent)]
    Build(#[from] lattice_build::Error),

    /// The run completed but some artifacts failed.
    #[error("Build failed: {failed} of {total} artifacts did not build cleanly")]
    BuildFailed { failed: usize, total: usize },

    /// File or directory not found.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert a CLI error to a miette Report for display.
pub fn to_report(err: CliError) -> miette::Report {
    match err {
        CliError::Build(core) => miette::Report::new(core),
        CliError::Config(msg) => miette::miette!(
            help = "Check lattice.toml syntax and field types.",
            "Configuration error: {msg}"
        ),
        CliError::BuildFailed { failed, total } => miette::miette!(
            help = "Failing artifacts are listed above with their reasons.",
            "Build failed: {failed} of {total} artifacts did not build cleanly"
        ),
        other => miette::miette!("{other}"),
    }
}

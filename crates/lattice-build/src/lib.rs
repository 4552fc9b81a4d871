//! # lattice-build
//!
//! Build-matrix orchestration for JavaScript library artifacts.
//!
//! Given a source tree with one fixed entry file and any number of
//! discoverable sub-module entries, this crate produces the complete matrix
//! of distributable artifacts: every entry, in every module format
//! (CommonJS, ESM, IIFE), both minified and unminified, with deterministic
//! output naming and a post-processing minification pass.
//!
//! The actual bundling and minification are external collaborators reached
//! through the [`Bundler`] and [`Minifier`] traits; this crate only
//! schedules and names the work.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lattice_build::{BuildProfile, EsbuildBundler, Orchestrator, TerserMinifier};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let profile = BuildProfile {
//!     display_name: "Foobar".into(),
//!     ..BuildProfile::default()
//! };
//!
//! let report = Orchestrator::new(
//!     profile,
//!     Arc::new(EsbuildBundler::new("esbuild")),
//!     Arc::new(TerserMinifier::new("terser")),
//! )
//! .run()
//! .await?;
//!
//! assert!(report.is_success());
//! # Ok(()) }
//! ```

pub mod bundler;
pub mod entry;
pub mod executor;
pub mod global;
pub mod matrix;
pub mod minifier;
pub mod minify_pass;
pub mod name;
pub mod orchestrator;
pub mod profile;
pub mod task;

pub use bundler::{BundleError, Bundler, EsbuildBundler};
pub use entry::{Entry, discover};
pub use executor::execute;
pub use global::derive_global_name;
pub use matrix::expand;
pub use minifier::{Minifier, MinifyError, TerserMinifier};
pub use minify_pass::{MinifyResult, minify_in_place};
pub use name::{ArtifactName, format_artifact, parse_artifact};
pub use orchestrator::{BuildReport, Orchestrator};
pub use profile::BuildProfile;
pub use task::{BuildResult, BuildTask, ModuleFormat, TaskOutcome};

/// Error types for lattice-build operations.
///
/// These are the fatal errors that abort a run before or during matrix
/// expansion. Per-task bundling and minification failures are not `Error`s;
/// they are recorded as [`TaskOutcome::Failed`] in the aggregate report so
/// sibling tasks keep running.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source root or main entry could not be read.
    #[error("Discovery failed for {}: {reason}", .path.display())]
    Discovery {
        path: std::path::PathBuf,
        reason: String,
    },

    /// Two tasks in the expanded matrix would write the same file.
    #[error("Duplicate output path in build matrix: {}", .path.display())]
    DuplicateOutput { path: std::path::PathBuf },

    /// Invalid build profile (bad glob pattern, empty display name, ...).
    #[error("Invalid build profile: {0}")]
    InvalidProfile(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for lattice-build operations.
pub type Result<T> = std::result::Result<T, Error>;

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Discovery { .. } => "DISCOVERY_ERROR",
            Error::DuplicateOutput { .. } => "DUPLICATE_OUTPUT",
            Error::InvalidProfile(_) => "INVALID_PROFILE",
            Error::Io(_) => "IO_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::Discovery { path, .. } => Some(Box::new(format!(
                "Check that '{}' exists and is readable, or adjust source_root in your configuration.",
                path.display()
            ))),
            Error::DuplicateOutput { path } => Some(Box::new(format!(
                "Two entries map to '{}'. Rename one of the source files or tighten the exclude patterns.",
                path.display()
            ))),
            Error::InvalidProfile(msg) => Some(Box::new(format!(
                "Fix the configuration and re-run.\nError: {}",
                msg
            ))),
            Error::Io(_) => None,
        }
    }
}

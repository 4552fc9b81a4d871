//! Build command implementation.
//!
//! Loads and validates configuration, optionally cleans the output
//! directory, drives the orchestrator, and reports every failed artifact
//! before exiting non-zero.

use std::sync::Arc;
use std::time::Instant;

use lattice_build::{EsbuildBundler, Orchestrator, TerserMinifier};

use crate::cli::BuildArgs;
use crate::config::LatticeConfig;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the build command.
///
/// # Build Process
///
/// 1. Load configuration (CLI > env > file > defaults) and validate it
/// 2. Clean the output directory if requested
/// 3. Run the orchestrator: discover, expand, bundle, post-minify
/// 4. Display the build summary and map failures to a non-zero exit
pub async fn execute(args: BuildArgs) -> Result<()> {
    let start_time = Instant::now();

    let mut config = LatticeConfig::load(args.config.as_deref())?;
    config.apply_overrides(&args);
    tracing::debug!(?config, "configuration resolved");

    let profile = config.to_profile();
    profile.validate()?;

    if config.clean && config.out_dir.exists() {
        ui::info(&format!(
            "Cleaning output directory: {}",
            config.out_dir.display()
        ));
        tokio::fs::remove_dir_all(&config.out_dir).await?;
    }

    ui::info(&format!(
        "Building {} from {}",
        profile.display_name,
        profile.source_root.display()
    ));

    let orchestrator = Orchestrator::new(
        profile,
        Arc::new(EsbuildBundler::new(&config.bundler_bin)),
        Arc::new(TerserMinifier::new(&config.minifier_bin)),
    );
    let report = orchestrator.run().await?;

    if report.is_success() {
        ui::success(&format!(
            "Built {} artifacts to {} in {}",
            report.artifact_count(),
            config.out_dir.display(),
            ui::format_duration(start_time.elapsed())
        ));
        return Ok(());
    }

    let failures: Vec<_> = report.failures().collect();
    for (path, reason) in &failures {
        ui::error(&format!("{}: {}", path.display(), reason));
    }
    Err(CliError::BuildFailed {
        failed: failures.len(),
        total: report.bundle_results.len() + report.minify_results.len(),
    })
}

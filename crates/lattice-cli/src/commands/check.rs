//! Check command implementation.
//!
//! Validates configuration and source layout without invoking the bundler:
//! profile validation, main entry presence, and a dry discovery pass that
//! reports what a build would compile.

use lattice_build::{ModuleFormat, discover};

use crate::cli::CheckArgs;
use crate::config::LatticeConfig;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the check command.
pub async fn execute(args: CheckArgs) -> Result<()> {
    let config = LatticeConfig::load(args.config.as_deref())?;

    let profile = config.to_profile();
    profile.validate()?;

    let main_entry = profile.main_entry_path();
    if !main_entry.is_file() {
        return Err(CliError::FileNotFound(main_entry));
    }
    ui::info(&format!("Main entry: {}", main_entry.display()));

    let sub_entries = discover(&profile.source_root, &profile.include, &profile.exclude)?;
    let sub_entries: Vec<_> = sub_entries
        .iter()
        .filter(|e| {
            main_entry
                .canonicalize()
                .map(|main| e.absolute_path != main)
                .unwrap_or(true)
        })
        .collect();

    for entry in &sub_entries {
        let label = if entry.group_path.is_empty() {
            entry.logical_name.clone()
        } else {
            format!("{}/{}", entry.group_path, entry.logical_name)
        };
        ui::info(&format!("Sub-module: {label}"));
    }

    let entries = 1 + sub_entries.len();
    let tasks = entries * ModuleFormat::ALL.len() * 2;
    ui::success(&format!(
        "Configuration OK: {} entries, {} build tasks",
        entries, tasks
    ));
    Ok(())
}

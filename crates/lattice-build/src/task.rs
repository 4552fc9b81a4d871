//! Build task data model.
//!
//! A [`BuildTask`] describes one unit of work for the external bundler:
//! one source entry, one output artifact. Tasks are pure data, created by
//! matrix expansion and consumed exactly once by the executor.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Module packaging convention of an output artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    /// CommonJS (`require`/`module.exports`), emitted as `.js`.
    Cjs,
    /// ECMAScript modules, emitted as `.mjs`.
    Esm,
    /// Immediately-invoked browser bundle exposing one global symbol,
    /// emitted as `.iife.js`.
    Iife,
}

impl ModuleFormat {
    /// Every format, in the order the matrix expands them.
    pub const ALL: [ModuleFormat; 3] = [ModuleFormat::Cjs, ModuleFormat::Esm, ModuleFormat::Iife];

    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ModuleFormat::Cjs => "js",
            ModuleFormat::Esm => "mjs",
            ModuleFormat::Iife => "js",
        }
    }

    /// Filename suffix distinguishing formats that share an extension.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            ModuleFormat::Iife => Some("iife"),
            ModuleFormat::Cjs | ModuleFormat::Esm => None,
        }
    }

    /// The format name as the bundler's `--format` flag expects it.
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleFormat::Cjs => "cjs",
            ModuleFormat::Esm => "esm",
            ModuleFormat::Iife => "iife",
        }
    }
}

impl std::fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of bundling work.
///
/// `global_name` is `Some` exactly when `format` is [`ModuleFormat::Iife`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTask {
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    pub format: ModuleFormat,
    pub minify: bool,
    pub target: Option<String>,
    pub global_name: Option<String>,
}

/// Outcome of one task or post-pass file operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failed { reason: String },
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success)
    }

    /// The failure reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            TaskOutcome::Success => None,
            TaskOutcome::Failed { reason } => Some(reason),
        }
    }
}

/// A task paired with how it went.
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub task: BuildTask,
    pub outcome: TaskOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_extensions_and_suffixes() {
        assert_eq!(ModuleFormat::Cjs.extension(), "js");
        assert_eq!(ModuleFormat::Esm.extension(), "mjs");
        assert_eq!(ModuleFormat::Iife.extension(), "js");
        assert_eq!(ModuleFormat::Iife.suffix(), Some("iife"));
        assert_eq!(ModuleFormat::Cjs.suffix(), None);
        assert_eq!(ModuleFormat::Esm.suffix(), None);
    }

    #[test]
    fn format_display_matches_flag() {
        assert_eq!(ModuleFormat::Cjs.to_string(), "cjs");
        assert_eq!(ModuleFormat::Esm.to_string(), "esm");
        assert_eq!(ModuleFormat::Iife.to_string(), "iife");
    }

    #[test]
    fn outcome_helpers() {
        assert!(TaskOutcome::Success.is_success());
        let failed = TaskOutcome::Failed {
            reason: "exit 1".into(),
        };
        assert!(!failed.is_success());
        assert_eq!(failed.reason(), Some("exit 1"));
    }
}

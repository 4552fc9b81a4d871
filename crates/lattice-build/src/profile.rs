//! Build profile: the process-wide constants of one build, made explicit.
//!
//! The display name, compatibility target, source layout and discovery
//! patterns are injected into the [`Orchestrator`](crate::Orchestrator) as
//! one struct rather than read from globals, so the core stays testable
//! with synthetic profiles.

use ignore::overrides::OverrideBuilder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Configuration for one build run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildProfile {
    /// Brand string used as the main IIFE global and as the first token of
    /// every derived sub-module global.
    pub display_name: String,
    /// Language-level compatibility target passed to the bundler (e.g.
    /// `es2018`). Empty disables the flag.
    pub target: String,
    /// Root of the library source tree.
    pub source_root: PathBuf,
    /// Root of the emitted artifact tree.
    pub out_dir: PathBuf,
    /// Main entry file name, relative to `source_root`.
    pub main_entry: String,
    /// Gitignore-style globs selecting sub-module entry files.
    pub include: Vec<String>,
    /// Gitignore-style globs excluded from discovery. Aggregator `index`
    /// files are excluded here so they never join the sub-module set.
    pub exclude: Vec<String>,
    /// Upper bound on concurrently running bundler invocations.
    /// Defaults to `min(logical cores, 8)` when unset.
    pub max_parallel_builds: Option<usize>,
}

impl Default for BuildProfile {
    fn default() -> Self {
        Self {
            display_name: "Library".to_string(),
            target: "es2018".to_string(),
            source_root: PathBuf::from("src"),
            out_dir: PathBuf::from("dist"),
            main_entry: "index.ts".to_string(),
            include: vec!["**/*.ts".to_string()],
            exclude: vec!["**/index.ts".to_string(), "**/*.d.ts".to_string()],
            max_parallel_builds: None,
        }
    }
}

impl BuildProfile {
    /// Validate the profile before any task runs.
    ///
    /// Checks that the display name is a usable JavaScript identifier, that
    /// the discovery pattern sets are well-formed, and that a main entry
    /// file name is present. Filesystem state is deliberately not checked
    /// here; discovery reports that with more context.
    pub fn validate(&self) -> Result<()> {
        if self.display_name.is_empty() {
            return Err(Error::InvalidProfile(
                "display_name must not be empty".to_string(),
            ));
        }
        if !is_identifier_safe(&self.display_name) {
            return Err(Error::InvalidProfile(format!(
                "display_name '{}' is not a valid global symbol (letters, digits, '_' and '$' only, no leading digit)",
                self.display_name
            )));
        }
        if self.main_entry.is_empty() {
            return Err(Error::InvalidProfile(
                "main_entry must not be empty".to_string(),
            ));
        }
        if self.include.is_empty() {
            return Err(Error::InvalidProfile(
                "at least one include pattern is required".to_string(),
            ));
        }
        if let Some(0) = self.max_parallel_builds {
            return Err(Error::InvalidProfile(
                "max_parallel_builds must be at least 1".to_string(),
            ));
        }
        compile_patterns(Path::new("."), &self.include, &self.exclude).map(|_| ())
    }

    /// Absolute-or-relative path of the main entry file.
    pub fn main_entry_path(&self) -> PathBuf {
        self.source_root.join(&self.main_entry)
    }

    /// Effective bundler concurrency bound.
    pub fn effective_parallelism(&self) -> usize {
        self.max_parallel_builds
            .unwrap_or_else(|| num_cpus::get().min(8))
            .max(1)
    }
}

/// Compile include/exclude globs into one override set rooted at `root`.
///
/// Shared by validation and discovery so both reject the same patterns.
pub(crate) fn compile_patterns(
    root: &Path,
    include: &[String],
    exclude: &[String],
) -> Result<ignore::overrides::Override> {
    let mut builder = OverrideBuilder::new(root);
    for pattern in include {
        builder.add(pattern).map_err(|e| {
            Error::InvalidProfile(format!("invalid include pattern '{}': {}", pattern, e))
        })?;
    }
    for pattern in exclude {
        builder.add(&format!("!{}", pattern)).map_err(|e| {
            Error::InvalidProfile(format!("invalid exclude pattern '{}': {}", pattern, e))
        })?;
    }
    builder
        .build()
        .map_err(|e| Error::InvalidProfile(format!("invalid pattern set: {}", e)))
}

fn is_identifier_safe(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

//! Top-level build sequencing.
//!
//! Discover entries, expand the matrix, execute the whole task set
//! concurrently, then run the post-minify pass as a strict barrier once all
//! bundling has settled. Fatal errors (unreadable source root, duplicate
//! output paths) abort before any task runs; per-task failures are carried
//! through to the final [`BuildReport`].

use std::path::Path;
use std::sync::Arc;

use crate::bundler::Bundler;
use crate::entry::{self, Entry};
use crate::matrix;
use crate::minifier::Minifier;
use crate::minify_pass::{self, MinifyResult};
use crate::profile::BuildProfile;
use crate::task::BuildResult;
use crate::{Error, Result, executor};

/// Aggregate outcome of one full run.
#[derive(Debug)]
pub struct BuildReport {
    pub bundle_results: Vec<BuildResult>,
    pub minify_results: Vec<MinifyResult>,
}

impl BuildReport {
    /// True when every bundling task and every post-pass file succeeded.
    pub fn is_success(&self) -> bool {
        self.bundle_results.iter().all(|r| r.outcome.is_success())
            && self.minify_results.iter().all(|r| r.outcome.is_success())
    }

    /// Every failed output path with its reason, bundling first.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &str)> {
        let bundles = self
            .bundle_results
            .iter()
            .filter_map(|r| Some((r.task.output_path.as_path(), r.outcome.reason()?)));
        let minifies = self
            .minify_results
            .iter()
            .filter_map(|r| Some((r.path.as_path(), r.outcome.reason()?)));
        bundles.chain(minifies)
    }

    /// Number of artifacts the bundling phase produced.
    pub fn artifact_count(&self) -> usize {
        self.bundle_results
            .iter()
            .filter(|r| r.outcome.is_success())
            .count()
    }
}

/// Drives one build from discovery through the post-minify pass.
pub struct Orchestrator {
    profile: BuildProfile,
    bundler: Arc<dyn Bundler>,
    minifier: Arc<dyn Minifier>,
}

impl Orchestrator {
    pub fn new(
        profile: BuildProfile,
        bundler: Arc<dyn Bundler>,
        minifier: Arc<dyn Minifier>,
    ) -> Self {
        Self {
            profile,
            bundler,
            minifier,
        }
    }

    pub fn profile(&self) -> &BuildProfile {
        &self.profile
    }

    /// Run the full build.
    ///
    /// Fails fast on profile, discovery and matrix errors; bundling and
    /// minification failures are recorded in the report instead, so one
    /// broken entry still leaves every sibling artifact on disk.
    pub async fn run(&self) -> Result<BuildReport> {
        self.profile.validate()?;

        let (main_entry, sub_entries) = self.discover_entries()?;
        tracing::info!(
            sub_modules = sub_entries.len(),
            "building {}",
            self.profile.display_name
        );

        let tasks = matrix::expand(&self.profile, &main_entry, &sub_entries)?;
        let parallelism = self.profile.effective_parallelism();

        let bundle_results =
            executor::execute(tasks, Arc::clone(&self.bundler), parallelism).await;

        // Barrier: the post pass must only ever see the settled output set.
        let minify_results = minify_pass::minify_in_place(
            &self.profile.out_dir,
            Arc::clone(&self.minifier),
            parallelism,
        )
        .await?;

        Ok(BuildReport {
            bundle_results,
            minify_results,
        })
    }

    fn discover_entries(&self) -> Result<(Entry, Vec<Entry>)> {
        let main_path = self.profile.main_entry_path();
        let main_path = main_path.canonicalize().map_err(|e| Error::Discovery {
            path: main_path.clone(),
            reason: format!("main entry not readable: {e}"),
        })?;
        if !main_path.is_file() {
            return Err(Error::Discovery {
                path: main_path,
                reason: "main entry is not a file".to_string(),
            });
        }
        let main_entry = Entry::main(main_path);

        let mut sub_entries = entry::discover(
            &self.profile.source_root,
            &self.profile.include,
            &self.profile.exclude,
        )?;
        // The main entry is never also a sub-module, whatever the patterns say.
        sub_entries.retain(|e| e.absolute_path != main_entry.absolute_path);

        Ok((main_entry, sub_entries))
    }
}

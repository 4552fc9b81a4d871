//! Post-build in-place minification pass.
//!
//! After bundling completes, every artifact whose name carries the `.min`
//! marker is read back, pushed through the external [`Minifier`] and
//! overwritten in place. This layers a second, independent minifier over
//! the bundler's own minification; running the pass twice on the same
//! output set must produce identical bytes.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use walkdir::WalkDir;

use crate::minifier::Minifier;
use crate::name::is_declared_minified;
use crate::task::TaskOutcome;
use crate::{Error, Result};

/// Outcome of re-minifying one artifact.
#[derive(Debug, Clone)]
pub struct MinifyResult {
    pub path: PathBuf,
    pub outcome: TaskOutcome,
}

/// Re-minify every declared-minified artifact under `out_root` in place.
///
/// A missing output root yields an empty result (nothing was bundled).
/// Per-file failures are recorded without stopping the rest of the pass.
/// Results come back sorted by path.
pub async fn minify_in_place(
    out_root: &Path,
    minifier: Arc<dyn Minifier>,
    max_parallel: usize,
) -> Result<Vec<MinifyResult>> {
    if !out_root.exists() {
        return Ok(Vec::new());
    }

    let mut targets = Vec::new();
    for dirent in WalkDir::new(out_root) {
        let dirent = dirent.map_err(|e| Error::Io(e.into()))?;
        if !dirent.file_type().is_file() {
            continue;
        }
        let declared = dirent
            .file_name()
            .to_str()
            .is_some_and(is_declared_minified);
        if declared {
            targets.push(dirent.into_path());
        }
    }
    targets.sort();
    tracing::debug!(files = targets.len(), "post-minify pass");

    let semaphore = Arc::new(Semaphore::new(max_parallel.max(1)));
    let mut join_set = JoinSet::new();
    let mut results: Vec<Option<MinifyResult>> = targets.iter().map(|_| None).collect();

    for (index, path) in targets.into_iter().enumerate() {
        let minifier = Arc::clone(&minifier);
        let permit = Arc::clone(&semaphore);
        join_set.spawn(async move {
            let _permit = permit
                .acquire()
                .await
                .expect("semaphore closed unexpectedly");
            let outcome = minify_file(minifier.as_ref(), &path).await;
            (index, MinifyResult { path, outcome })
        });
    }

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, result)) => results[index] = Some(result),
            Err(join_err) => tracing::error!("minify task panicked: {join_err}"),
        }
    }

    Ok(results.into_iter().flatten().collect())
}

async fn minify_file(minifier: &dyn Minifier, path: &Path) -> TaskOutcome {
    let source = match tokio::fs::read_to_string(path).await {
        Ok(source) => source,
        Err(e) => {
            return TaskOutcome::Failed {
                reason: format!("read failed: {e}"),
            };
        }
    };
    let minified = match minifier.minify(&source).await {
        Ok(minified) => minified,
        Err(e) => {
            tracing::warn!(path = %path.display(), "minification failed: {e}");
            return TaskOutcome::Failed {
                reason: e.to_string(),
            };
        }
    };
    match tokio::fs::write(path, minified).await {
        Ok(()) => TaskOutcome::Success,
        Err(e) => TaskOutcome::Failed {
            reason: format!("write failed: {e}"),
        },
    }
}

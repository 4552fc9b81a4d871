//! Concurrent execution of the build matrix.
//!
//! Every task is independent: output paths are disjoint by construction and
//! the bundler is a stateless per-call service, so the whole batch runs
//! concurrently, bounded by a semaphore. Failure policy is full-batch: a
//! failed task never cancels in-flight siblings, and every failure is
//! collected into the aggregate so the caller can report all of them at
//! once.

use rustc_hash::FxHashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::bundler::Bundler;
use crate::task::{BuildResult, BuildTask, TaskOutcome};

/// Execute every task, returning results in the original task order.
///
/// `max_parallel` bounds how many bundler invocations run at once; values
/// below 1 are clamped up. Task panics are converted into failed results.
pub async fn execute(
    tasks: Vec<BuildTask>,
    bundler: Arc<dyn Bundler>,
    max_parallel: usize,
) -> Vec<BuildResult> {
    let semaphore = Arc::new(Semaphore::new(max_parallel.max(1)));
    let mut join_set = JoinSet::new();
    let mut index_of = FxHashMap::default();

    let mut results: Vec<Option<BuildResult>> = tasks.iter().map(|_| None).collect();
    let task_copies: Vec<BuildTask> = tasks.clone();

    for (index, task) in tasks.into_iter().enumerate() {
        let bundler = Arc::clone(&bundler);
        let permit = Arc::clone(&semaphore);
        let handle = join_set.spawn(async move {
            let _permit = permit
                .acquire()
                .await
                .expect("semaphore closed unexpectedly");
            let outcome = run_task(bundler.as_ref(), &task).await;
            (index, task, outcome)
        });
        index_of.insert(handle.id(), index);
    }

    while let Some(joined) = join_set.join_next_with_id().await {
        match joined {
            Ok((_, (index, task, outcome))) => {
                results[index] = Some(BuildResult { task, outcome });
            }
            Err(join_err) => {
                // A panicking task still produces a failed result for its slot.
                tracing::error!("build task panicked: {join_err}");
                if let Some(&index) = index_of.get(&join_err.id()) {
                    results[index] = Some(BuildResult {
                        task: task_copies[index].clone(),
                        outcome: TaskOutcome::Failed {
                            reason: format!("build task panicked: {join_err}"),
                        },
                    });
                }
            }
        }
    }

    results.into_iter().flatten().collect()
}

async fn run_task(bundler: &dyn Bundler, task: &BuildTask) -> TaskOutcome {
    if let Some(parent) = task.output_path.parent() {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            return TaskOutcome::Failed {
                reason: format!("failed to create output directory: {e}"),
            };
        }
    }

    match bundler.bundle(task).await {
        Ok(()) => {
            tracing::debug!(output = %task.output_path.display(), "bundled");
            TaskOutcome::Success
        }
        Err(e) => {
            tracing::warn!(output = %task.output_path.display(), "bundling failed: {e}");
            TaskOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

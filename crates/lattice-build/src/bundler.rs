//! The external bundling collaborator.
//!
//! Bundling is a black box to the orchestrator: one [`BuildTask`] in, one
//! artifact on disk out, or a failure. The production implementation shells
//! out to an esbuild binary; tests substitute fakes through the trait.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use crate::task::BuildTask;

/// One bundling invocation failed.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    /// The bundler binary could not be started.
    #[error("failed to launch bundler '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The bundler ran and reported failure.
    #[error("bundler exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

/// Bundling capability consumed by the executor.
///
/// Implementations must be safe to invoke concurrently; each call is
/// treated as a stateless, independent unit of work.
#[async_trait]
pub trait Bundler: Send + Sync {
    /// Bundle one task, writing (or truncating) `task.output_path`.
    async fn bundle(&self, task: &BuildTask) -> Result<(), BundleError>;
}

/// Production bundler invoking an esbuild binary per task.
#[derive(Debug, Clone)]
pub struct EsbuildBundler {
    command: PathBuf,
}

impl EsbuildBundler {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn args_for(task: &BuildTask) -> Vec<String> {
        let mut args = vec![
            task.source_path.to_string_lossy().into_owned(),
            "--bundle".to_string(),
            format!("--format={}", task.format),
            format!("--outfile={}", task.output_path.display()),
            "--log-level=warning".to_string(),
        ];
        if let Some(target) = &task.target {
            args.push(format!("--target={}", target));
        }
        if task.minify {
            args.push("--minify".to_string());
        }
        if let Some(global) = &task.global_name {
            args.push(format!("--global-name={}", global));
        }
        args
    }
}

#[async_trait]
impl Bundler for EsbuildBundler {
    async fn bundle(&self, task: &BuildTask) -> Result<(), BundleError> {
        let output = Command::new(&self.command)
            .args(Self::args_for(task))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| BundleError::Launch {
                command: self.command.display().to_string(),
                source,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(BundleError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

//! The external minification collaborator.
//!
//! The post pass re-minifies already-minified artifacts through a second,
//! independent tool. Text in, text out. The production implementation pipes
//! source through a terser-style binary on stdin/stdout.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// One minification call failed.
#[derive(Debug, thiserror::Error)]
pub enum MinifyError {
    /// The minifier binary could not be started.
    #[error("failed to launch minifier '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The minifier ran and reported failure.
    #[error("minifier exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    /// Piping source text to or from the minifier failed.
    #[error("minifier I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Minification capability consumed by the post pass.
#[async_trait]
pub trait Minifier: Send + Sync {
    /// Minify source text, preserving behavior.
    async fn minify(&self, source: &str) -> Result<String, MinifyError>;
}

/// Production minifier piping text through a terser-style binary.
#[derive(Debug, Clone)]
pub struct TerserMinifier {
    command: PathBuf,
}

impl TerserMinifier {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

#[async_trait]
impl Minifier for TerserMinifier {
    async fn minify(&self, source: &str) -> Result<String, MinifyError> {
        let mut child = Command::new(&self.command)
            .arg("--compress")
            .arg("--mangle")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| MinifyError::Launch {
                command: self.command.display().to_string(),
                source,
            })?;

        // Write the source, then close stdin so the tool sees EOF.
        let mut stdin = child.stdin.take().ok_or_else(|| {
            MinifyError::Io(std::io::Error::other("minifier stdin unavailable"))
        })?;
        stdin.write_all(source.as_bytes()).await?;
        drop(stdin);

        let output = child.wait_with_output().await?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(MinifyError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

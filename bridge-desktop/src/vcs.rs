//! Version Control Implementation shelling out to Git
//!
//! Runs `git` in the repository directory via `tokio::process` and maps
//! non-zero exit statuses into `BridgeError` with the trimmed stderr as
//! diagnostic text.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    vcs::Vcs,
};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, warn};

/// Git CLI implementation of the [`Vcs`] capability.
pub struct GitCli {
    repo_dir: PathBuf,
}

impl GitCli {
    /// Create a Git CLI wrapper operating in `repo_dir`.
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<()> {
        debug!(args = ?args, "Running git");

        let output = Command::new("git")
            .current_dir(&self.repo_dir)
            .args(args)
            .output()
            .await
            .map_err(|e| {
                BridgeError::OperationFailed(format!(
                    "Failed to launch git (is it installed and in PATH?): {}",
                    e
                ))
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!(output = %stdout.trim(), "git output");
        }

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = ?output.status.code(), stderr = %stderr.trim(), "git command failed");
            Err(BridgeError::OperationFailed(format!(
                "git {} failed ({}): {}",
                args.first().copied().unwrap_or(""),
                output.status,
                stderr.trim()
            )))
        }
    }
}

#[async_trait]
impl Vcs for GitCli {
    async fn stage(&self, paths: &[&Path]) -> Result<()> {
        for path in paths {
            let path_str = path.to_str().ok_or_else(|| {
                BridgeError::OperationFailed(format!("Non-UTF-8 path cannot be staged: {:?}", path))
            })?;
            self.run(&["add", "--", path_str]).await?;
        }
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-m", message]).await
    }

    async fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["push", remote, branch]).await
    }
}

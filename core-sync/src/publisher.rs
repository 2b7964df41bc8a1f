//! Commit publishing
//!
//! Optionally records a cycle's downloads as one version-control commit
//! pushed upstream. Any step failure halts the remaining steps of this
//! publish attempt but never the sync cycle; the files stay on disk and
//! remain eligible for re-staging on a later cycle.

use bridge_traits::time::Clock;
use bridge_traits::vcs::Vcs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::error::{Result, SyncError};

/// Publishes downloaded files as a single commit.
pub struct CommitPublisher {
    vcs: Arc<dyn Vcs>,
    clock: Arc<dyn Clock>,
    /// Mirror directory path relative to the repository root, prefixed
    /// onto each staged name.
    stage_prefix: PathBuf,
    remote: String,
    branch: String,
}

impl CommitPublisher {
    pub fn new(
        vcs: Arc<dyn Vcs>,
        clock: Arc<dyn Clock>,
        stage_prefix: impl Into<PathBuf>,
        remote: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            vcs,
            clock,
            stage_prefix: stage_prefix.into(),
            remote: remote.into(),
            branch: branch.into(),
        }
    }

    /// Stage, commit, and push the given downloads.
    ///
    /// An empty list performs no version-control calls at all.
    pub async fn publish(&self, downloaded: &[String]) -> Result<()> {
        if downloaded.is_empty() {
            return Ok(());
        }

        info!(count = downloaded.len(), "Publishing downloaded files");

        let paths: Vec<PathBuf> = downloaded
            .iter()
            .map(|name| self.stage_prefix.join(name))
            .collect();
        let path_refs: Vec<&Path> = paths.iter().map(PathBuf::as_path).collect();

        self.vcs
            .stage(&path_refs)
            .await
            .map_err(|e| SyncError::Publish {
                step: "stage".to_string(),
                message: e.to_string(),
            })?;

        let message = self.commit_message(downloaded);
        self.vcs
            .commit(&message)
            .await
            .map_err(|e| SyncError::Publish {
                step: "commit".to_string(),
                message: e.to_string(),
            })?;

        self.vcs
            .push(&self.remote, &self.branch)
            .await
            .map_err(|e| SyncError::Publish {
                step: "push".to_string(),
                message: e.to_string(),
            })?;

        info!(count = downloaded.len(), "Pushed commit upstream");
        Ok(())
    }

    fn commit_message(&self, downloaded: &[String]) -> String {
        let list = downloaded
            .iter()
            .map(|name| format!("  - {}", name))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Auto-sync: add {} file(s)\n\nSynced at: {}\n\nFiles added:\n{}",
            downloaded.len(),
            self.clock.now().to_rfc3339(),
            list
        )
    }
}

//! Transfer execution
//!
//! Streams each planned download into the mirror directory with
//! per-entry failure isolation: one failed transfer never aborts the
//! rest of the cycle, and a partially written destination is removed so
//! a later cycle cannot misclassify it by coincidence of size.

use bridge_traits::http::HttpClient;
use bridge_traits::storage::FileSystemAccess;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::plan::{SyncAction, SyncDecision};

/// One failed transfer within a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTransfer {
    pub name: String,
    pub reason: String,
}

/// Outcome of one sync cycle's transfer phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Names downloaded this cycle, in transfer order
    pub downloaded: Vec<String>,
    /// Number of entries already up to date
    pub skipped: usize,
    /// Entries that failed, with diagnostic text
    pub failed: Vec<FailedTransfer>,
}

/// Downloads planned entries into the mirror directory.
pub struct TransferExecutor {
    http: Arc<dyn HttpClient>,
    fs: Arc<dyn FileSystemAccess>,
    mirror_dir: PathBuf,
}

impl TransferExecutor {
    pub fn new(
        http: Arc<dyn HttpClient>,
        fs: Arc<dyn FileSystemAccess>,
        mirror_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            http,
            fs,
            mirror_dir: mirror_dir.into(),
        }
    }

    /// Execute all decisions sequentially in listing order.
    pub async fn run(&self, decisions: Vec<SyncDecision>) -> CycleReport {
        let mut report = CycleReport::default();

        for decision in decisions {
            match decision.action {
                SyncAction::Skip => {
                    debug!(name = %decision.file.name, "Skipping up-to-date file");
                    report.skipped += 1;
                }
                SyncAction::Download => {
                    let name = decision.file.name.clone();

                    if !is_safe_name(&name) {
                        warn!(name = %name, "Rejecting remote name that would escape the mirror directory");
                        report.failed.push(FailedTransfer {
                            name,
                            reason: "unsafe file name".to_string(),
                        });
                        continue;
                    }

                    info!(
                        name = %name,
                        size_mb = format_args!("{:.2}", decision.file.size as f64 / (1024.0 * 1024.0)),
                        "Downloading"
                    );

                    let dest = self.mirror_dir.join(&name);
                    match self.download_one(&decision.file.download_url, &dest).await {
                        Ok(()) => {
                            info!(name = %name, "Downloaded");
                            report.downloaded.push(name);
                        }
                        Err(reason) => {
                            warn!(name = %name, error = %reason, "Download failed");
                            self.remove_partial(&dest).await;
                            report.failed.push(FailedTransfer { name, reason });
                        }
                    }
                }
            }
        }

        report
    }

    async fn download_one(&self, url: &str, dest: &Path) -> std::result::Result<(), String> {
        let mut reader = self
            .http
            .download_stream(url.to_string())
            .await
            .map_err(|e| e.to_string())?;

        let mut writer = self
            .fs
            .open_write_stream(dest)
            .await
            .map_err(|e| e.to_string())?;

        tokio::io::copy(&mut reader, &mut writer)
            .await
            .map_err(|e| e.to_string())?;

        writer.shutdown().await.map_err(|e| e.to_string())?;
        Ok(())
    }

    async fn remove_partial(&self, dest: &Path) {
        match self.fs.exists(dest).await {
            Ok(true) => {
                if let Err(e) = self.fs.delete_file(dest).await {
                    warn!(path = ?dest, error = %e, "Failed to remove partial download");
                }
            }
            Ok(false) => {}
            Err(e) => {
                warn!(path = ?dest, error = %e, "Could not check for partial download");
            }
        }
    }
}

/// A remote name must stay within the mirror directory.
fn is_safe_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains('\\') && name != "." && name != ".."
}

//! Sync coordination
//!
//! Runs one full cycle: fetch the remote manifest, read the local
//! inventory, plan, transfer, and optionally publish. The coordinator
//! holds a single-flight guard so two cycles can never run concurrently
//! against the mirror directory.

use bridge_traits::http::HttpClient;
use bridge_traits::source::SourceProvider;
use bridge_traits::storage::FileSystemAccess;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::{Result, SyncError};
use crate::local::read_local_inventory;
use crate::manifest::{ManifestFetcher, MediaFilter, DEFAULT_MEDIA_EXTENSIONS};
use crate::plan::plan_sync;
use crate::publisher::CommitPublisher;
use crate::transfer::{CycleReport, TransferExecutor};

/// Sync engine configuration
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Remote source paths, fetched in order each cycle
    pub source_paths: Vec<String>,

    /// Local mirror directory
    pub mirror_dir: PathBuf,

    /// Extension allow-list (without leading dots)
    pub media_extensions: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            source_paths: vec!["videos".to_string()],
            mirror_dir: PathBuf::from("videos"),
            media_extensions: DEFAULT_MEDIA_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Orchestrates one sync cycle end to end.
pub struct SyncCoordinator {
    config: SyncConfig,
    fetcher: ManifestFetcher,
    fs: Arc<dyn FileSystemAccess>,
    transfer: TransferExecutor,
    publisher: Option<CommitPublisher>,
    cycle_running: AtomicBool,
}

impl SyncCoordinator {
    pub fn new(
        config: SyncConfig,
        provider: Arc<dyn SourceProvider>,
        http: Arc<dyn HttpClient>,
        fs: Arc<dyn FileSystemAccess>,
        publisher: Option<CommitPublisher>,
    ) -> Self {
        let filter = MediaFilter::new(&config.media_extensions);
        let fetcher = ManifestFetcher::new(provider, filter);
        let transfer = TransferExecutor::new(http, Arc::clone(&fs), config.mirror_dir.clone());

        Self {
            config,
            fetcher,
            fs,
            transfer,
            publisher,
            cycle_running: AtomicBool::new(false),
        }
    }

    /// Run one full sync cycle.
    ///
    /// Returns [`SyncError::CycleInProgress`] if a cycle is already
    /// running; overlap is structurally impossible, not merely unlikely.
    /// The only other error is an unusable mirror directory. Listing,
    /// transfer, and publish failures are absorbed into the report and
    /// the log.
    #[instrument(skip(self))]
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        if self
            .cycle_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SyncError::CycleInProgress);
        }

        let result = self.cycle_inner().await;
        self.cycle_running.store(false, Ordering::SeqCst);
        result
    }

    async fn cycle_inner(&self) -> Result<CycleReport> {
        info!(paths = ?self.config.source_paths, "Starting sync cycle");

        let manifest = self.fetcher.fetch(&self.config.source_paths).await;
        let local = read_local_inventory(self.fs.as_ref(), &self.config.mirror_dir).await?;

        info!(
            remote = manifest.len(),
            local = local.len(),
            "Comparing remote manifest against local mirror"
        );

        let decisions = plan_sync(manifest, &local);
        let report = self.transfer.run(decisions).await;

        if let Some(publisher) = &self.publisher {
            if let Err(e) = publisher.publish(&report.downloaded).await {
                warn!(error = %e, "Publish failed; downloaded files remain on disk");
            }
        }

        info!(
            downloaded = report.downloaded.len(),
            skipped = report.skipped,
            failed = report.failed.len(),
            "Sync cycle complete"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_desktop::TokioFileSystem;
    use bridge_traits::error::BridgeError;
    use bridge_traits::http::{HttpRequest, HttpResponse};
    use bridge_traits::source::RemoteFile;

    struct EmptyProvider;

    #[async_trait]
    impl SourceProvider for EmptyProvider {
        async fn list_dir(&self, _path: &str) -> bridge_traits::error::Result<Vec<RemoteFile>> {
            Ok(Vec::new())
        }
    }

    struct NoHttp;

    #[async_trait]
    impl HttpClient for NoHttp {
        async fn execute(&self, _request: HttpRequest) -> bridge_traits::error::Result<HttpResponse> {
            Err(BridgeError::NotAvailable("execute".into()))
        }

        async fn download_stream(
            &self,
            _url: String,
        ) -> bridge_traits::error::Result<Box<dyn tokio::io::AsyncRead + Send + Unpin>> {
            Err(BridgeError::NotAvailable("download_stream".into()))
        }
    }

    #[tokio::test]
    async fn test_second_cycle_while_running_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = SyncConfig {
            mirror_dir: dir.path().join("mirror"),
            ..SyncConfig::default()
        };
        let coordinator = SyncCoordinator::new(
            config,
            Arc::new(EmptyProvider),
            Arc::new(NoHttp),
            Arc::new(TokioFileSystem::new()),
            None,
        );

        coordinator.cycle_running.store(true, Ordering::SeqCst);
        let err = coordinator.run_cycle().await.unwrap_err();
        assert!(matches!(err, SyncError::CycleInProgress));

        // Once released, cycles run again.
        coordinator.cycle_running.store(false, Ordering::SeqCst);
        let report = coordinator.run_cycle().await.unwrap();
        assert!(report.downloaded.is_empty());
    }
}

//! Mirror service binary.
//!
//! Wires the desktop bridges, the GitHub provider, and the sync engine
//! together from environment configuration, then runs the scheduler
//! until Ctrl-C.

use anyhow::Context;
use bridge_desktop::{GitCli, ReqwestHttpClient, TokioFileSystem};
use bridge_traits::http::HttpClient;
use bridge_traits::time::SystemClock;
use bridge_traits::vcs::Vcs;
use core_runtime::{init_logging, LoggingConfig, MirrorConfig};
use core_sync::{
    CommitPublisher, SyncConfig, SyncCoordinator, SyncScheduler, DEFAULT_MEDIA_EXTENSIONS,
};
use provider_github::GitHubConnector;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default())
        .context("Failed to initialize logging")?;

    let config = MirrorConfig::from_env().context("Invalid configuration")?;

    info!(
        source = format!("{}/{}@{}", config.source_owner, config.source_repo, config.source_branch),
        mirror = %config.mirror_dir.display(),
        interval_secs = config.sync_interval.as_secs(),
        publish = config.publish.is_some(),
        "Starting media mirror"
    );

    let http: Arc<dyn HttpClient> = match &config.user_agent {
        Some(user_agent) => Arc::new(ReqwestHttpClient::with_user_agent(user_agent)?),
        None => Arc::new(ReqwestHttpClient::new()?),
    };

    let provider = Arc::new(GitHubConnector::new(
        Arc::clone(&http),
        config.source_owner.clone(),
        config.source_repo.clone(),
        config.source_branch.clone(),
    ));

    let publisher = config.publish.as_ref().map(|publish| {
        // Stage paths are relative to the repository root.
        let stage_prefix = config
            .mirror_dir
            .strip_prefix(&publish.repo_dir)
            .unwrap_or(&config.mirror_dir)
            .to_path_buf();

        CommitPublisher::new(
            Arc::new(GitCli::new(&publish.repo_dir)) as Arc<dyn Vcs>,
            Arc::new(SystemClock),
            stage_prefix,
            publish.remote.clone(),
            publish.branch.clone(),
        )
    });

    let sync_config = SyncConfig {
        source_paths: config.source_paths.clone(),
        mirror_dir: config.mirror_dir.clone(),
        media_extensions: config.media_extensions.clone().unwrap_or_else(|| {
            DEFAULT_MEDIA_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect()
        }),
    };

    let coordinator = Arc::new(SyncCoordinator::new(
        sync_config,
        provider,
        http,
        Arc::new(TokioFileSystem::new()),
        publisher,
    ));

    let scheduler = SyncScheduler::start(coordinator, config.sync_interval);

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    info!("Shutdown signal received");
    scheduler.shutdown().await;

    Ok(())
}

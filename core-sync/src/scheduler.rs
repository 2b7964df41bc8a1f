//! Interval scheduling
//!
//! Owns the "run forever on a fixed interval" loop as an explicit,
//! cancellable task instead of ambient process timers, so tests can
//! drive cycles directly through the coordinator without wall-clock
//! delays.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::coordinator::SyncCoordinator;
use crate::error::SyncError;

/// Handle to the repeating sync task.
pub struct SyncScheduler {
    handle: JoinHandle<()>,
    cancel: oneshot::Sender<()>,
}

impl SyncScheduler {
    /// Spawn the sync loop: one cycle immediately, then one per interval.
    ///
    /// A failed cycle is logged and the loop continues; nothing here
    /// terminates the service. Missed ticks delay rather than burst.
    pub fn start(coordinator: Arc<SyncCoordinator>, interval: Duration) -> Self {
        let (cancel_tx, cancel_rx) = oneshot::channel();

        info!(interval_secs = interval.as_secs(), "Starting sync scheduler");
        let handle = tokio::spawn(run_loop(coordinator, interval, cancel_rx));

        Self {
            handle,
            cancel: cancel_tx,
        }
    }

    /// Cancel the repeating task and wait for the loop to exit.
    pub async fn shutdown(self) {
        let _ = self.cancel.send(());
        let _ = self.handle.await;
        info!("Sync scheduler stopped");
    }
}

async fn run_loop(
    coordinator: Arc<SyncCoordinator>,
    interval: Duration,
    mut cancel_rx: oneshot::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut cancel_rx => {
                debug!("Sync loop cancelled");
                break;
            }
            // The first tick completes immediately, giving the
            // run-once-at-startup behavior.
            _ = ticker.tick() => {
                match coordinator.run_cycle().await {
                    Ok(report) => {
                        debug!(
                            downloaded = report.downloaded.len(),
                            skipped = report.skipped,
                            failed = report.failed.len(),
                            "Scheduled cycle finished"
                        );
                    }
                    Err(SyncError::CycleInProgress) => {
                        warn!("Previous cycle still running; waiting for next interval");
                    }
                    Err(e) => {
                        error!(error = %e, "Sync cycle failed; will retry at next interval");
                    }
                }
            }
        }
    }
}

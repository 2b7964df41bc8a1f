//! # Sync Engine
//!
//! One-way, polling replication of a remote media directory into a local
//! mirror, with optional publishing of each cycle's additions as a
//! version-control commit.
//!
//! ## Components
//!
//! - **Manifest Fetcher** (`manifest`): lists the configured remote
//!   paths and filters entries to media files
//! - **Local State Reader** (`local`): enumerates the mirror directory
//! - **Diff Engine** (`plan`): pure classification of every remote file
//!   as skip or download, by name and size
//! - **Transfer Executor** (`transfer`): streaming downloads with
//!   per-entry failure isolation and partial-file cleanup
//! - **Commit Publisher** (`publisher`): stage/commit/push pipeline that
//!   halts on first failure without failing the cycle
//! - **Sync Coordinator** (`coordinator`): runs one full cycle behind a
//!   single-flight guard
//! - **Scheduler** (`scheduler`): cancellable fixed-interval loop
//!
//! All in-memory state is cycle-scoped; only the mirror directory
//! persists between cycles.

pub mod coordinator;
pub mod error;
pub mod local;
pub mod manifest;
pub mod plan;
pub mod publisher;
pub mod scheduler;
pub mod transfer;

pub use coordinator::{SyncConfig, SyncCoordinator};
pub use error::{Result, SyncError};
pub use local::read_local_inventory;
pub use manifest::{ManifestFetcher, MediaFilter, DEFAULT_MEDIA_EXTENSIONS};
pub use plan::{plan_sync, LocalEntry, SyncAction, SyncDecision};
pub use publisher::CommitPublisher;
pub use scheduler::SyncScheduler;
pub use transfer::{CycleReport, FailedTransfer, TransferExecutor};

//! # Host Bridge Traits
//!
//! Platform abstraction traits that the sync engine depends on.
//!
//! ## Overview
//!
//! This crate defines the contract between the core sync crates and the
//! environment they run in. Each trait represents an external collaborator
//! the engine needs but does not own:
//!
//! - [`HttpClient`](http::HttpClient) - async HTTP with streaming downloads
//! - [`FileSystemAccess`](storage::FileSystemAccess) - mirror directory I/O
//! - [`SourceProvider`](source::SourceProvider) - remote manifest listing
//! - [`Vcs`](vcs::Vcs) - stage/commit/push capability
//! - [`Clock`](time::Clock) - time source for deterministic testing
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Implementations
//! convert their platform-specific errors into it and keep messages
//! actionable.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so they can be shared across
//! async tasks behind `Arc<dyn Trait>`.

pub mod error;
pub mod http;
pub mod source;
pub mod storage;
pub mod time;
pub mod vcs;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use source::{RemoteFile, SourceProvider};
pub use storage::{FileMetadata, FileSystemAccess};
pub use time::{Clock, SystemClock};
pub use vcs::Vcs;

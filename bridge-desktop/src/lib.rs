//! # Desktop Bridge Implementations
//!
//! Tokio/reqwest-backed implementations of the bridge traits:
//!
//! - [`ReqwestHttpClient`] - HTTP with streaming downloads
//! - [`TokioFileSystem`] - async mirror directory I/O
//! - [`GitCli`] - version control by shelling out to `git`

pub mod filesystem;
pub mod http;
pub mod vcs;

pub use filesystem::TokioFileSystem;
pub use http::ReqwestHttpClient;
pub use vcs::GitCli;

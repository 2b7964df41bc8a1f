//! Remote Source Abstraction
//!
//! Contract for the remote manifest provider: a directory-listing API
//! that reports file name, size, and a direct fetch URL per entry.

use async_trait::async_trait;

use crate::error::Result;

/// A file descriptor from a remote directory listing.
///
/// Sourced fresh every sync cycle and never persisted; the local mirror
/// directory is the only durable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// File name, unique within one listing
    pub name: String,

    /// Size in bytes as reported by the remote
    pub size: u64,

    /// Direct fetch URL for the file contents
    pub download_url: String,

    /// Whether the entry is a regular file (directories and symlinks are not)
    pub is_file: bool,
}

/// Remote manifest provider trait
///
/// # Contract
///
/// - A path that does not exist remotely yields `Ok(vec![])`: absent
///   directories are a normal state, not an error.
/// - Any other non-success response is an error for that path; the
///   caller decides whether the cycle continues.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    /// List the contents of one remote directory path.
    async fn list_dir(&self, path: &str) -> Result<Vec<RemoteFile>>;
}

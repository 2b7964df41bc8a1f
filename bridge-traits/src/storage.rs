//! File System Abstraction
//!
//! Platform-agnostic async file I/O for the mirror directory.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// File metadata information
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub size: u64,
    pub is_directory: bool,
}

/// File system access trait
///
/// Covers exactly the operations the sync engine performs against the
/// mirror directory: ensure it exists, enumerate it, stream files into
/// it, and remove partially written entries.
#[async_trait]
pub trait FileSystemAccess: Send + Sync {
    /// Check if a file or directory exists
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// Get metadata for a file or directory
    async fn metadata(&self, path: &Path) -> Result<FileMetadata>;

    /// Create a directory and all parent directories if they don't exist
    async fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// List all entries in a directory (non-recursive)
    async fn list_directory(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Delete a file
    async fn delete_file(&self, path: &Path) -> Result<()>;

    /// Open a file for streaming writes, truncating any existing content
    async fn open_write_stream(
        &self,
        path: &Path,
    ) -> Result<Box<dyn tokio::io::AsyncWrite + Send + Unpin>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_metadata() {
        let metadata = FileMetadata {
            size: 1024,
            is_directory: false,
        };

        assert_eq!(metadata.size, 1024);
        assert!(!metadata.is_directory);
    }
}

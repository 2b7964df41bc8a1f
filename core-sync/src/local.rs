//! Local state reading
//!
//! Enumerates the mirror directory each cycle. The filesystem is the only
//! durable state; nothing here is cached across cycles.

use bridge_traits::storage::FileSystemAccess;
use std::path::Path;
use tracing::warn;

use crate::error::{Result, SyncError};
use crate::plan::LocalEntry;

/// Read the flat inventory of the mirror directory.
///
/// Ensures the directory exists first (idempotent). Subdirectories are
/// not recursed into; entries without a UTF-8 file name or whose
/// metadata cannot be read are skipped with a warning.
///
/// Failure to create or enumerate the directory itself is the one
/// condition that makes a cycle unusable.
pub async fn read_local_inventory(
    fs: &dyn FileSystemAccess,
    mirror_dir: &Path,
) -> Result<Vec<LocalEntry>> {
    fs.create_dir_all(mirror_dir)
        .await
        .map_err(|e| SyncError::MirrorUnusable(format!("{}: {}", mirror_dir.display(), e)))?;

    let paths = fs
        .list_directory(mirror_dir)
        .await
        .map_err(|e| SyncError::MirrorUnusable(format!("{}: {}", mirror_dir.display(), e)))?;

    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                warn!(path = ?path, "Skipping entry without UTF-8 file name");
                continue;
            }
        };

        match fs.metadata(&path).await {
            Ok(meta) if meta.is_directory => continue,
            Ok(meta) => entries.push(LocalEntry {
                name,
                size: meta.size,
            }),
            Err(e) => {
                warn!(path = ?path, error = %e, "Skipping unreadable entry");
            }
        }
    }

    Ok(entries)
}

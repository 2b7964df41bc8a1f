//! Sync planning
//!
//! The pure decision point of the engine: given the remote manifest and
//! the local inventory, decide per remote file whether to download or
//! skip. No I/O happens here.

use bridge_traits::source::RemoteFile;
use std::collections::HashMap;

/// One file currently present in the mirror directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEntry {
    pub name: String,
    pub size: u64,
}

/// Action decided for one remote file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// A local entry with the same name and size exists.
    Skip,
    /// The entry is missing locally or its size differs (stale).
    Download,
}

/// Decision for one remote file within a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncDecision {
    pub file: RemoteFile,
    pub action: SyncAction,
}

/// Classify every remote file against the local inventory.
///
/// Total and deterministic: exactly one decision per remote file, output
/// order preserving the manifest order. Size equality is the sole
/// identity proxy; no content hash is computed.
pub fn plan_sync(remote: Vec<RemoteFile>, local: &[LocalEntry]) -> Vec<SyncDecision> {
    let sizes_by_name: HashMap<&str, u64> = local
        .iter()
        .map(|entry| (entry.name.as_str(), entry.size))
        .collect();

    remote
        .into_iter()
        .map(|file| {
            let action = match sizes_by_name.get(file.name.as_str()) {
                Some(&size) if size == file.size => SyncAction::Skip,
                _ => SyncAction::Download,
            };
            SyncDecision { file, action }
        })
        .collect()
}

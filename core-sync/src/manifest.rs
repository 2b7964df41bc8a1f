//! Manifest fetching
//!
//! Retrieves the remote directory listings for the configured source
//! paths and filters them down to media files.

use bridge_traits::source::{RemoteFile, SourceProvider};
use std::sync::Arc;
use tracing::{debug, warn};

/// Media container extensions mirrored by default.
pub const DEFAULT_MEDIA_EXTENSIONS: &[&str] =
    &["mp4", "avi", "mov", "wmv", "flv", "mkv", "webm"];

/// Case-insensitive extension allow-list.
#[derive(Debug, Clone)]
pub struct MediaFilter {
    suffixes: Vec<String>,
}

impl MediaFilter {
    /// Create a filter from a list of extensions (without leading dots).
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            suffixes: extensions
                .into_iter()
                .map(|ext| format!(".{}", ext.as_ref().to_ascii_lowercase()))
                .collect(),
        }
    }

    /// Whether `name` carries one of the allowed extensions.
    ///
    /// The match is a case-insensitive suffix check, so `clip.mp4.part`
    /// does not pass for `mp4`.
    pub fn matches(&self, name: &str) -> bool {
        let lower = name.to_ascii_lowercase();
        self.suffixes.iter().any(|suffix| lower.ends_with(suffix))
    }
}

impl Default for MediaFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_EXTENSIONS.iter().copied())
    }
}

/// Fetches and filters remote manifests for one or more source paths.
pub struct ManifestFetcher {
    provider: Arc<dyn SourceProvider>,
    filter: MediaFilter,
}

impl ManifestFetcher {
    pub fn new(provider: Arc<dyn SourceProvider>, filter: MediaFilter) -> Self {
        Self { provider, filter }
    }

    /// Fetch all configured paths in order and concatenate their entries.
    ///
    /// A listing error for one path is logged and contributes zero
    /// entries for this cycle; remaining paths are still fetched. Name
    /// collisions across paths are not deduplicated; the later entry
    /// wins at write time.
    pub async fn fetch(&self, paths: &[String]) -> Vec<RemoteFile> {
        let mut manifest = Vec::new();

        for path in paths {
            debug!(path = %path, "Fetching remote listing");
            match self.provider.list_dir(path).await {
                Ok(entries) => {
                    let before = entries.len();
                    let mut files: Vec<RemoteFile> = entries
                        .into_iter()
                        .filter(|f| f.is_file && self.filter.matches(&f.name))
                        .collect();
                    debug!(
                        path = %path,
                        listed = before,
                        matched = files.len(),
                        "Filtered remote listing"
                    );
                    manifest.append(&mut files);
                }
                Err(e) => {
                    warn!(path = %path, error = %e, "Failed to list remote path; skipping for this cycle");
                }
            }
        }

        manifest
    }
}

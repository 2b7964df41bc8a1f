//! GitHub contents API response types
//!
//! Data structures for deserializing repository contents listings.

use serde::Deserialize;

/// One entry of a repository contents listing.
///
/// See: https://docs.github.com/en/rest/repos/contents
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    /// Entry name within the directory
    pub name: String,

    /// Size in bytes (0 for directories and submodules)
    #[serde(default)]
    pub size: u64,

    /// Entry kind: "file", "dir", "symlink", or "submodule"
    #[serde(rename = "type")]
    pub entry_type: String,

    /// Direct raw-content URL; null for non-file entries
    #[serde(default)]
    pub download_url: Option<String>,
}

impl ContentEntry {
    /// Whether this entry is a regular file with a fetchable URL.
    pub fn is_file(&self) -> bool {
        self.entry_type == "file" && self.download_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_file_entry() {
        let json = r#"{
            "name": "clip.mp4",
            "path": "videos/clip.mp4",
            "sha": "abc123",
            "size": 1048576,
            "type": "file",
            "download_url": "https://raw.githubusercontent.com/o/r/main/videos/clip.mp4"
        }"#;

        let entry: ContentEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.name, "clip.mp4");
        assert_eq!(entry.size, 1048576);
        assert!(entry.is_file());
    }

    #[test]
    fn test_deserialize_dir_entry() {
        let json = r#"{
            "name": "thumbnails",
            "path": "videos/thumbnails",
            "sha": "def456",
            "size": 0,
            "type": "dir",
            "download_url": null
        }"#;

        let entry: ContentEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.entry_type, "dir");
        assert!(!entry.is_file());
    }

    #[test]
    fn test_file_without_download_url_is_not_fetchable() {
        let json = r#"{
            "name": "module",
            "size": 0,
            "type": "submodule"
        }"#;

        let entry: ContentEntry = serde_json::from_str(json).unwrap();
        assert!(!entry.is_file());
    }
}

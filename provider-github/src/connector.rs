//! GitHub contents API connector
//!
//! Implements the `SourceProvider` trait over the repository contents
//! endpoint.

use async_trait::async_trait;
use bridge_traits::error::Result;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use bridge_traits::source::{RemoteFile, SourceProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::error::GitHubError;
use crate::types::ContentEntry;

/// GitHub API base URL
const API_BASE: &str = "https://api.github.com";

/// Request timeout for listing calls
const LIST_TIMEOUT: Duration = Duration::from_secs(30);

/// GitHub contents API connector
///
/// Lists a directory of a repository at a fixed branch. A listing of a
/// path that does not exist in the repository yields an empty manifest,
/// because absent directories are a normal state for the mirror.
pub struct GitHubConnector {
    http_client: Arc<dyn HttpClient>,
    owner: String,
    repo: String,
    branch: String,
}

impl GitHubConnector {
    /// Create a new connector for `owner/repo` at `branch`.
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            API_BASE,
            self.owner,
            self.repo,
            path.trim_matches('/'),
            urlencoding::encode(&self.branch)
        )
    }

    fn convert_entry(entry: ContentEntry) -> Option<RemoteFile> {
        let is_file = entry.is_file();
        let download_url = entry.download_url?;
        Some(RemoteFile {
            name: entry.name,
            size: entry.size,
            download_url,
            is_file,
        })
    }
}

#[async_trait]
impl SourceProvider for GitHubConnector {
    #[instrument(skip(self), fields(owner = %self.owner, repo = %self.repo, path = %path))]
    async fn list_dir(&self, path: &str) -> Result<Vec<RemoteFile>> {
        let url = self.contents_url(path);

        let request = HttpRequest::new(HttpMethod::Get, url)
            .header("Accept", "application/vnd.github+json")
            .timeout(LIST_TIMEOUT);

        let response = self.http_client.execute(request).await?;

        match response.status {
            200 => {
                let entries: Vec<ContentEntry> =
                    serde_json::from_slice(&response.body).map_err(|e| {
                        GitHubError::Parse(format!(
                            "contents listing for '{}' is not a directory array: {}",
                            path, e
                        ))
                    })?;

                let files: Vec<RemoteFile> = entries
                    .into_iter()
                    .filter_map(Self::convert_entry)
                    .collect();

                info!(count = files.len(), "Listed remote directory");
                Ok(files)
            }
            // An absent directory is a normal, expected state.
            404 => {
                debug!("Remote path not found; treating as empty");
                Ok(Vec::new())
            }
            status => Err(GitHubError::Api {
                status_code: status,
                message: String::from_utf8_lossy(&response.body).into_owned(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::http::HttpResponse;
    use bytes::Bytes;
    use mockall::mock;
    use std::collections::HashMap;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
            async fn download_stream(&self, url: String) -> Result<Box<dyn tokio::io::AsyncRead + Send + Unpin>>;
        }
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.as_bytes().to_vec()),
        }
    }

    #[test]
    fn test_contents_url() {
        let connector = GitHubConnector::new(
            Arc::new(MockHttpClient::new()),
            "Wigdos-Inc",
            "wigdosXP",
            "main",
        );

        assert_eq!(
            connector.contents_url("apps/wigtube/videos"),
            "https://api.github.com/repos/Wigdos-Inc/wigdosXP/contents/apps/wigtube/videos?ref=main"
        );
    }

    #[tokio::test]
    async fn test_list_dir_success() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|req| {
            assert!(req.url.contains("/contents/videos?ref=main"));
            assert_eq!(
                req.headers.get("Accept"),
                Some(&"application/vnd.github+json".to_string())
            );

            Ok(response(
                200,
                r#"[
                    {
                        "name": "a.mp4",
                        "size": 100,
                        "type": "file",
                        "download_url": "https://raw.example.com/a.mp4"
                    },
                    {
                        "name": "thumbs",
                        "size": 0,
                        "type": "dir",
                        "download_url": null
                    }
                ]"#,
            ))
        });

        let connector = GitHubConnector::new(Arc::new(mock_http), "owner", "repo", "main");
        let files = connector.list_dir("videos").await.unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "a.mp4");
        assert_eq!(files[0].size, 100);
        assert!(files[0].is_file);
    }

    #[tokio::test]
    async fn test_list_dir_not_found_is_empty() {
        let mut mock_http = MockHttpClient::new();

        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| Ok(response(404, r#"{"message": "Not Found"}"#)));

        let connector = GitHubConnector::new(Arc::new(mock_http), "owner", "repo", "main");
        let files = connector.list_dir("videos").await.unwrap();

        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn test_list_dir_error_status() {
        let mut mock_http = MockHttpClient::new();

        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| Ok(response(403, r#"{"message": "rate limit"}"#)));

        let connector = GitHubConnector::new(Arc::new(mock_http), "owner", "repo", "main");
        let result = connector.list_dir("videos").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_dir_file_response_is_error() {
        let mut mock_http = MockHttpClient::new();

        // Listing a path that is a file returns an object, not an array.
        mock_http.expect_execute().times(1).returning(|_| {
            Ok(response(
                200,
                r#"{"name": "a.mp4", "size": 100, "type": "file"}"#,
            ))
        });

        let connector = GitHubConnector::new(Arc::new(mock_http), "owner", "repo", "main");
        let result = connector.list_dir("videos/a.mp4").await;

        assert!(result.is_err());
    }
}

//! Error types for the GitHub provider

use thiserror::Error;

/// GitHub provider errors
#[derive(Error, Debug)]
pub enum GitHubError {
    /// API request returned an error status
    #[error("GitHub API error (status {status_code}): {message}")]
    Api { status_code: u16, message: String },

    /// Failed to parse API response
    #[error("Failed to parse API response: {0}")]
    Parse(String),

    /// Bridge error
    #[error(transparent)]
    Bridge(#[from] bridge_traits::error::BridgeError),
}

/// Result type for GitHub provider operations
pub type Result<T> = std::result::Result<T, GitHubError>;

impl From<GitHubError> for bridge_traits::error::BridgeError {
    fn from(error: GitHubError) -> Self {
        match error {
            GitHubError::Api {
                status_code,
                message,
            } => bridge_traits::error::BridgeError::OperationFailed(format!(
                "GitHub API error (status {}): {}",
                status_code, message
            )),
            GitHubError::Parse(msg) => {
                bridge_traits::error::BridgeError::OperationFailed(format!("Parse error: {}", msg))
            }
            GitHubError::Bridge(e) => e,
        }
    }
}

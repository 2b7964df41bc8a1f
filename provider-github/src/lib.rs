//! # GitHub Provider
//!
//! Implements the `SourceProvider` trait for the GitHub repository
//! contents API.
//!
//! ## Overview
//!
//! - Directory listing of a repository path at a fixed branch
//! - Absent paths (HTTP 404) map to an empty listing
//! - Static identifying header only; no token handling

pub mod connector;
pub mod error;
pub mod types;

pub use connector::GitHubConnector;
pub use error::{GitHubError, Result};
pub use types::ContentEntry;

//! Version Control Abstraction
//!
//! Capability interface for publishing downloaded files as a commit.
//! Keeps the commit publisher free of process-invocation detail so tests
//! can inject a fake implementation.

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;

/// Version control capability trait
///
/// Each operation is synchronous from the caller's point of view and
/// reports failure with diagnostic text. Implementations typically shell
/// out to an external tool and interpret its exit status.
#[async_trait]
pub trait Vcs: Send + Sync {
    /// Stage the given paths (relative to the repository root).
    async fn stage(&self, paths: &[&Path]) -> Result<()>;

    /// Create a single commit with the given message.
    async fn commit(&self, message: &str) -> Result<()>;

    /// Push the current branch to the given remote/branch.
    async fn push(&self, remote: &str, branch: &str) -> Result<()>;
}

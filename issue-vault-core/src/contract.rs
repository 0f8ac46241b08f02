//! # contract: the two seams between the pipeline and the outside world
//!
//! - [`IssueSource`]: a paginated "list issues for repository" capability. The real
//!   implementation is the GitHub REST client in the CLI crate; tests use [`MockIssueSource`].
//! - [`DocumentWriter`]: the "write text to path" primitive. [`FsWriter`] writes through
//!   `tokio::fs`.
//!
//! Both traits are annotated for `mockall` so consumers can generate deterministic mocks for
//! unit and integration tests (enabled by the `test-export-mocks` feature).

use std::path::Path;

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::model::ApiIssue;

/// Error type reported by an [`IssueSource`] (simple boxed error, like the HTTP layer produces).
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Paginated access to a repository's issue listing.
///
/// Implementations return entries in ascending creation order, pull requests included;
/// filtering is the caller's job. A page shorter than `per_page` is the last one.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Fetch one page (1-based) of at most `per_page` entries.
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<ApiIssue>, SourceError>;
}

/// Persists fully rendered documents.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait DocumentWriter: Send + Sync {
    /// Create `path` and any missing parents. Succeeds if it already exists.
    async fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;

    /// Write `contents` to `path`, replacing any previous file.
    async fn write_text(&self, path: &Path, contents: &str) -> std::io::Result<()>;
}

/// [`DocumentWriter`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWriter;

#[async_trait]
impl DocumentWriter for FsWriter {
    async fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    async fn write_text(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        tokio::fs::write(path, contents).await
    }
}

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(250);
pub const DEFAULT_WRITE_CONCURRENCY: usize = 16;
/// Maximum length, in characters, of the title part of an issue file name.
pub const TITLE_MAX_LEN: usize = 80;

/// Pagination settings for [`crate::fetch::fetch_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub page_size: u32,
    /// Pause between consecutive page requests.
    pub page_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }
}

/// Everything one export run needs besides its two collaborators.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub owner: String,
    pub repo: String,
    pub output_dir: PathBuf,
    pub fetch: FetchConfig,
    /// Upper bound on document writes in flight at once.
    pub write_concurrency: usize,
}

impl ExportConfig {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            output_dir: output_dir.into(),
            fetch: FetchConfig::default(),
            write_concurrency: DEFAULT_WRITE_CONCURRENCY,
        }
    }

    /// `owner/repo`, as shown in the root index heading.
    pub fn repo_label(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    pub fn trace_loaded(&self) {
        info!(
            repo = %self.repo_label(),
            output_dir = %self.output_dir.display(),
            page_size = self.fetch.page_size,
            page_delay_ms = self.fetch.page_delay.as_millis() as u64,
            write_concurrency = self.write_concurrency,
            "Loaded ExportConfig"
        );
        debug!(?self, "ExportConfig loaded (full debug)");
    }
}

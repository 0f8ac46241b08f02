use std::path::PathBuf;

use crate::contract::SourceError;

/// Every way an export run can fail. All variants are fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The remote source failed while serving a page. No retry is attempted.
    #[error("failed to fetch issue page {page}: {source}")]
    Fetch {
        page: u32,
        #[source]
        source: SourceError,
    },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid export configuration: {0}")]
    InvalidConfig(String),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

//! Paginated retrieval of the complete issue set.

use std::collections::HashSet;

use tracing::{debug, error, info, warn};

use crate::config::FetchConfig;
use crate::contract::IssueSource;
use crate::error::ExportError;
use crate::model::IssueRecord;

/// Fetch every issue, page by page, until a page comes back short.
///
/// Pull requests are dropped, as are repeated issue numbers (keeping the first). Pages are
/// requested strictly one after another with `config.page_delay` between them. The first
/// failing page aborts the whole fetch.
pub async fn fetch_all<S>(source: &S, config: &FetchConfig) -> Result<Vec<IssueRecord>, ExportError>
where
    S: IssueSource + ?Sized,
{
    if config.page_size == 0 {
        return Err(ExportError::InvalidConfig("page_size must be at least 1".into()));
    }

    let mut records = Vec::new();
    let mut seen = HashSet::new();
    let mut page = 1u32;

    loop {
        let batch = match source.fetch_page(page, config.page_size).await {
            Ok(batch) => batch,
            Err(e) => {
                error!(page, error = %e, "Failed to fetch issue page");
                return Err(ExportError::Fetch { page, source: e });
            }
        };
        let raw_len = batch.len();
        let mut pull_requests = 0usize;

        for item in batch {
            if item.is_pull_request() {
                pull_requests += 1;
                continue;
            }
            if !seen.insert(item.number) {
                warn!(number = item.number, page, "Dropping repeated issue number");
                continue;
            }
            records.push(item.into_record());
        }
        debug!(page, raw_len, pull_requests, total = records.len(), "Fetched issue page");

        if raw_len < config.page_size as usize {
            break;
        }
        tokio::time::sleep(config.page_delay).await;
        page += 1;
    }

    info!(pages = page, issues = records.len(), "Fetched all issues");
    Ok(records)
}

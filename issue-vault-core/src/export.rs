//! High-level pipeline: orchestrates fetch → index → name → render → write.
//!
//! # Responsibilities
//! - Fail-fast orchestration: the first fetch or write error ends the run, files already
//!   written stay where they are.
//! - Every document is rendered in memory and handed to the writer exactly once.
//! - Indices and names are complete before any category document is written; writes within a
//!   phase run concurrently, bounded by [`ExportConfig::write_concurrency`].
//!
//! # Navigation
//! - Main entrypoint: [`export`]
//! - Output summary: [`ExportReport`]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, error, info};

use crate::config::ExportConfig;
use crate::contract::{DocumentWriter, IssueSource};
use crate::error::ExportError;
use crate::fetch::fetch_all;
use crate::index::{build_index, CategoryIndex};
use crate::model::FilenameMeta;
use crate::namer::{CategoryNamer, Facet};
use crate::render::{
    render_category_index, render_issue, render_root_index, ISSUES_DIR, ROOT_INDEX_FILE,
};

/// What one export run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub output_dir: PathBuf,
    pub issues: usize,
    pub labels: usize,
    pub milestones: usize,
    /// Every file written, including `index.md`.
    pub documents_written: usize,
}

/// A rendered document waiting to be persisted.
struct Document {
    path: PathBuf,
    contents: String,
}

async fn write_document<W>(writer: &W, doc: Document) -> Result<(), ExportError>
where
    W: DocumentWriter + ?Sized,
{
    match writer.write_text(&doc.path, &doc.contents).await {
        Ok(()) => {
            debug!(path = %doc.path.display(), bytes = doc.contents.len(), "Wrote document");
            Ok(())
        }
        Err(e) => {
            error!(path = %doc.path.display(), error = ?e, "Failed to write document");
            Err(ExportError::io(doc.path, e))
        }
    }
}

async fn write_all<W>(writer: &W, docs: Vec<Document>, concurrency: usize) -> Result<usize, ExportError>
where
    W: DocumentWriter + ?Sized,
{
    let written: Vec<()> = stream::iter(docs)
        .map(|doc| write_document(writer, doc))
        .buffer_unordered(concurrency.max(1))
        .try_collect()
        .await?;
    Ok(written.len())
}

async fn ensure_dir<W>(writer: &W, path: &Path) -> Result<(), ExportError>
where
    W: DocumentWriter + ?Sized,
{
    writer.create_dir_all(path).await.map_err(|e| {
        error!(path = %path.display(), error = ?e, "Failed to create output directory");
        ExportError::io(path, e)
    })
}

fn category_documents(
    facet: Facet,
    categories: &CategoryIndex,
    namer: &CategoryNamer,
    meta: &BTreeMap<u64, FilenameMeta>,
    root: &Path,
) -> Vec<Document> {
    let dir = root.join(facet.dir_name());
    categories
        .iter()
        .filter_map(|(key, members)| {
            let stem = namer.get(facet, key)?;
            Some(Document {
                path: dir.join(format!("{stem}.md")),
                contents: render_category_index(facet, key, members, meta),
            })
        })
        .collect()
}

/// Run the whole export against `source`, persisting through `writer`.
pub async fn export<S, W>(
    source: &S,
    writer: &W,
    config: &ExportConfig,
) -> Result<ExportReport, ExportError>
where
    S: IssueSource + ?Sized,
    W: DocumentWriter + ?Sized,
{
    let root = config.output_dir.as_path();
    info!(repo = %config.repo_label(), output_dir = %root.display(), "[EXPORT] Starting export");

    // Step 1: Fetch
    let issues = fetch_all(source, &config.fetch).await?;
    info!(issues = issues.len(), "[EXPORT] Fetch complete");

    // Step 2: Output directories
    let issues_dir = root.join(ISSUES_DIR);
    let label_dir = root.join(Facet::Label.dir_name());
    let milestone_dir = root.join(Facet::Milestone.dir_name());
    futures::try_join!(
        ensure_dir(writer, &issues_dir),
        ensure_dir(writer, &label_dir),
        ensure_dir(writer, &milestone_dir),
    )?;

    // Step 3: Index
    let index = build_index(&issues);

    // Step 4: Issue documents
    let issue_docs: Vec<Document> = issues
        .iter()
        .filter_map(|issue| {
            let meta = index.meta.get(&issue.number)?;
            Some(Document {
                path: issues_dir.join(format!("{}.md", meta.base_name)),
                contents: render_issue(issue),
            })
        })
        .collect();
    let mut written = write_all(writer, issue_docs, config.write_concurrency).await?;
    info!(documents = written, "[EXPORT] Wrote issue documents");

    // Step 5: Category documents. Labels claim names before milestones, each in first-seen order.
    let mut namer = CategoryNamer::new();
    for key in index.labels.keys() {
        namer.resolve(Facet::Label, key);
    }
    for key in index.milestones.keys() {
        namer.resolve(Facet::Milestone, key);
    }

    let mut category_docs =
        category_documents(Facet::Label, &index.labels, &namer, &index.meta, root);
    category_docs.extend(category_documents(
        Facet::Milestone,
        &index.milestones,
        &namer,
        &index.meta,
        root,
    ));
    let category_count = write_all(writer, category_docs, config.write_concurrency).await?;
    written += category_count;
    info!(documents = category_count, "[EXPORT] Wrote category documents");

    // Step 6: Root index
    let label_keys: Vec<&str> = index.labels.keys().collect();
    let milestone_keys: Vec<&str> = index.milestones.keys().collect();
    let root_doc = Document {
        path: root.join(ROOT_INDEX_FILE),
        contents: render_root_index(
            &config.repo_label(),
            issues.len(),
            &milestone_keys,
            &label_keys,
            &namer,
        ),
    };
    write_document(writer, root_doc).await?;
    written += 1;

    let report = ExportReport {
        output_dir: config.output_dir.clone(),
        issues: issues.len(),
        labels: index.labels.len(),
        milestones: index.milestones.len(),
        documents_written: written,
    };
    info!(?report, "[EXPORT] Export complete");
    Ok(report)
}

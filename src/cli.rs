/// This module implements the CLI interface for issue-vault: argument parsing, the async `run`
/// entrypoint, and user-visible progress output.
///
/// All pipeline logic (fetching, indexing, naming, rendering) lives in the
/// [`issue-vault-core`] crate; this module only wires the GitHub client and the filesystem
/// writer into it.
///
/// [`issue-vault-core`]: ../../issue_vault_core/
use anyhow::{Context, Result};
use clap::Parser;
use issue_vault_core::contract::FsWriter;
use issue_vault_core::export::{export, ExportReport};
use std::path::PathBuf;

use crate::github::GitHubClient;
use crate::load_config::load_config;

/// Export a GitHub repository's issues into a linked Markdown vault.
#[derive(Debug, Parser)]
#[clap(
    name = "issue-vault",
    version,
    about = "Export a repository's issues as an offline vault browsable by label and milestone"
)]
pub struct Cli {
    /// Repository owner [default: pro-collection]
    #[clap(env = "OWNER")]
    pub owner: Option<String>,

    /// Repository name [default: interview-question]
    #[clap(env = "REPO")]
    pub repo: Option<String>,

    /// Output directory [default: out]
    #[clap(env = "OUT_DIR")]
    pub output_dir: Option<String>,

    /// Optional YAML file with defaults and tuning (page_size, page_delay_ms, ...)
    #[clap(long)]
    pub config: Option<PathBuf>,
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<ExportReport> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    let settings = load_config(&cli)?;
    let config = settings.export_config();
    config.trace_loaded();

    println!("Repo: {}", config.repo_label());
    println!("Output: {}", config.output_dir.display());

    let client = GitHubClient::new(&settings).context("Failed to construct GitHub client")?;
    let report = match export(&client, &FsWriter, &config).await {
        Ok(report) => {
            tracing::info!(?report, "Export complete");
            report
        }
        Err(e) => {
            tracing::error!(error = %e, "Export failed");
            return Err(e).with_context(|| format!("Export of {} failed", config.repo_label()));
        }
    };

    println!("Total issues fetched: {}", report.issues);
    println!("Done.");
    println!(
        "Put the '{}' folder into your vault and open 'index.md'.",
        report.output_dir.display()
    );
    Ok(report)
}

/// `load_config` module: merges command-line arguments, environment and an optional YAML file
/// into the typed [`Settings`] a run needs.
///
/// Precedence for every value, highest first:
///   1. positional argument
///   2. environment (`OWNER`, `REPO`, `OUT_DIR`; resolved by clap)
///   3. the YAML file passed with `--config`
///   4. built-in defaults
///
/// Secrets are never read from the file: `GH_TOKEN` only comes from the environment (a `.env`
/// file is loaded by `main` before arguments are parsed).
///
/// # Errors
/// All errors in this module use `anyhow::Error` for context-rich diagnostics, and are surfaced
/// at the CLI boundary.
use anyhow::{bail, Result};
use issue_vault_core::config::{
    ExportConfig, FetchConfig, DEFAULT_PAGE_DELAY, DEFAULT_PAGE_SIZE, DEFAULT_WRITE_CONCURRENCY,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

use crate::cli::Cli;
use crate::github::DEFAULT_API_BASE_URL;

pub const DEFAULT_OWNER: &str = "pro-collection";
pub const DEFAULT_REPO: &str = "interview-question";
pub const DEFAULT_OUT_DIR: &str = "out";

pub const TOKEN_ENV: &str = "GH_TOKEN";
pub const API_URL_ENV: &str = "GITHUB_API_URL";

/// Optional YAML config file. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub api_base_url: Option<String>,
    pub page_size: Option<u32>,
    pub page_delay_ms: Option<u64>,
    pub write_concurrency: Option<usize>,
}

/// Fully resolved settings for one run.
#[derive(Clone)]
pub struct Settings {
    pub owner: String,
    pub repo: String,
    pub output_dir: PathBuf,
    pub token: Option<String>,
    pub api_base_url: String,
    pub fetch: FetchConfig,
    pub write_concurrency: usize,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("output_dir", &self.output_dir)
            .field("token_set", &self.token.is_some())
            .field("api_base_url", &self.api_base_url)
            .field("fetch", &self.fetch)
            .field("write_concurrency", &self.write_concurrency)
            .finish()
    }
}

impl Settings {
    pub fn export_config(&self) -> ExportConfig {
        let mut config = ExportConfig::new(&self.owner, &self.repo, &self.output_dir);
        config.fetch = self.fetch.clone();
        config.write_concurrency = self.write_concurrency;
        config
    }
}

/// Reads and parses the YAML config file at `path`.
pub fn load_file_config<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    match serde_yaml::from_str::<Option<FileConfig>>(&content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            Ok(conf.unwrap_or_default())
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}

/// Blank values (e.g. `OWNER=` in a `.env`) count as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty_env(name: &str) -> Option<String> {
    non_empty(std::env::var(name).ok())
}

/// Merges the parsed command line with the environment and optional config file.
pub fn load_config(cli: &Cli) -> Result<Settings> {
    let file = match &cli.config {
        Some(path) => load_file_config(path)?,
        None => FileConfig::default(),
    };

    let owner = non_empty(cli.owner.clone())
        .or(non_empty(file.owner))
        .unwrap_or_else(|| DEFAULT_OWNER.to_string());
    let repo = non_empty(cli.repo.clone())
        .or(non_empty(file.repo))
        .unwrap_or_else(|| DEFAULT_REPO.to_string());
    let output_dir = non_empty(cli.output_dir.clone())
        .map(PathBuf::from)
        .or(file.output_dir.filter(|p| !p.as_os_str().is_empty()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
    let api_base_url = non_empty_env(API_URL_ENV)
        .or(non_empty(file.api_base_url))
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    let page_size = file.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if page_size == 0 || page_size > 100 {
        error!(page_size, "page_size out of range");
        bail!("page_size must be between 1 and 100, got {page_size}");
    }
    let write_concurrency = file.write_concurrency.unwrap_or(DEFAULT_WRITE_CONCURRENCY);
    if write_concurrency == 0 {
        bail!("write_concurrency must be at least 1");
    }
    let page_delay = file
        .page_delay_ms
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_PAGE_DELAY);

    let token = non_empty_env(TOKEN_ENV);
    if token.is_some() {
        info!("{TOKEN_ENV} found in env");
    } else {
        info!("{TOKEN_ENV} not set, using unauthenticated requests");
    }

    let settings = Settings {
        owner,
        repo,
        output_dir,
        token,
        api_base_url,
        fetch: FetchConfig {
            page_size,
            page_delay,
        },
        write_concurrency,
    };
    info!(?settings, "Config loaded and merged successfully");
    Ok(settings)
}

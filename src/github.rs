#![doc = "GitHub REST client implementing the core's `IssueSource` capability."]
//
//! # GitHub issue listing
//!
//! This module bridges the CLI to [`issue_vault_core::contract::IssueSource`]. It issues
//! `GET /repos/{owner}/{repo}/issues` with `state=all`, ascending creation order, and the
//! requested page, and decodes the response into [`ApiIssue`]s. Pull requests come back from
//! the same endpoint; the core filters them.
//!
//! - Construct [`GitHubClient`] from loaded [`Settings`].
//! - `GH_TOKEN` is optional: without it requests are unauthenticated and rate limited harder.
//! - Non-2xx responses are returned as errors carrying the status and response body.

use std::fmt;

use async_trait::async_trait;
use issue_vault_core::contract::{IssueSource, SourceError};
use issue_vault_core::model::ApiIssue;
use reqwest::header::ACCEPT;
use reqwest::Client;

use crate::load_config::Settings;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("issue-vault/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

pub struct GitHubClient {
    http: Client,
    base_url: String,
    owner: String,
    repo: String,
    token: Option<String>,
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token_set", &self.token.is_some())
            .finish()
    }
}

impl GitHubClient {
    pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        tracing::info!(
            base_url = %settings.api_base_url,
            owner = %settings.owner,
            repo = %settings.repo,
            authenticated = settings.token.is_some(),
            "Initialized GitHubClient"
        );
        Ok(Self {
            http,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            owner: settings.owner.clone(),
            repo: settings.repo.clone(),
            token: settings.token.clone(),
        })
    }

    fn issues_url(&self) -> String {
        format!("{}/repos/{}/{}/issues", self.base_url, self.owner, self.repo)
    }
}

#[async_trait]
impl IssueSource for GitHubClient {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<ApiIssue>, SourceError> {
        let url = self.issues_url();
        tracing::debug!(url = %url, page, per_page, "Requesting issue page");

        let mut request = self
            .http
            .get(&url)
            .query(&[("state", "all"), ("sort", "created"), ("direction", "asc")])
            .query(&[("per_page", per_page), ("page", page)])
            .header(ACCEPT, GITHUB_JSON)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = ?e, url = %url, page, "GitHub request failed");
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<Failed to decode response body>"));
            tracing::error!(status = %status, url = %url, page, "GitHub API returned error. Response body: {body}");
            return Err(format!("GitHub API returned {status} for {url} (page {page}): {body}").into());
        }

        let issues = response.json::<Vec<ApiIssue>>().await.map_err(|e| {
            tracing::error!(error = ?e, url = %url, page, "Failed to decode issue page JSON");
            e
        })?;
        tracing::info!(page, entries = issues.len(), "Fetched issue page from GitHub");
        Ok(issues)
    }
}

//! Data model: the wire shape of a listed issue and the immutable records derived from it.

use serde::{Deserialize, Serialize};

use crate::config::TITLE_MAX_LEN;
use crate::sanitize::{sanitize, truncate_for_name};

/// One entry of the GitHub "list repository issues" response.
///
/// Only the fields the exporter reads are declared; everything else is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiIssue {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub user: Option<ApiUser>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub labels: Vec<ApiLabel>,
    #[serde(default)]
    pub milestone: Option<ApiMilestone>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub body: Option<String>,
    /// Present only on pull requests, which share the issues listing endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiUser {
    pub login: String,
}

/// Labels arrive either as bare names or as label objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiLabel {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
    },
}

impl ApiLabel {
    pub fn name(&self) -> Option<&str> {
        match self {
            ApiLabel::Name(name) => Some(name.as_str()),
            ApiLabel::Object { name } => name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMilestone {
    pub title: String,
}

impl ApiIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    pub fn into_record(self) -> IssueRecord {
        let labels = self
            .labels
            .iter()
            .filter_map(ApiLabel::name)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect();
        IssueRecord {
            number: self.number,
            title: self.title,
            state: self.state,
            author: self.user.map(|u| u.login),
            created_at: self.created_at,
            updated_at: self.updated_at,
            labels,
            milestone: self
                .milestone
                .map(|m| m.title)
                .filter(|title| !title.is_empty()),
            url: self.html_url,
            body: self.body.unwrap_or_default(),
        }
    }
}

/// Immutable snapshot of one issue as fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRecord {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub author: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub labels: Vec<String>,
    pub milestone: Option<String>,
    pub url: String,
    pub body: String,
}

/// Names derived once per issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameMeta {
    /// File stem under `issues/`, also the wiki-link target.
    pub base_name: String,
    /// Link text used wherever the issue is referenced.
    pub display: String,
}

impl FilenameMeta {
    pub fn for_issue(number: u64, title: &str) -> Self {
        Self {
            base_name: format!("{number}. {}", truncate_for_name(title, TITLE_MAX_LEN)),
            display: format!("#{number} {}", sanitize(title)),
        }
    }
}

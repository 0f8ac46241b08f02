#![allow(dead_code)]

use issue_vault_core::model::{ApiIssue, ApiLabel, ApiMilestone, ApiUser};

pub fn issue(number: u64, title: &str) -> ApiIssue {
    ApiIssue {
        number,
        title: title.to_string(),
        state: "open".to_string(),
        user: Some(ApiUser {
            login: "octocat".to_string(),
        }),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        updated_at: "2024-01-02T00:00:00Z".to_string(),
        labels: Vec::new(),
        milestone: None,
        html_url: format!("https://github.com/acme/questions/issues/{number}"),
        body: Some(format!("Body of {number}")),
        pull_request: None,
    }
}

pub fn labelled(number: u64, title: &str, labels: &[&str], milestone: Option<&str>) -> ApiIssue {
    let mut it = issue(number, title);
    it.labels = labels
        .iter()
        .map(|name| ApiLabel::Object {
            name: Some(name.to_string()),
        })
        .collect();
    it.milestone = milestone.map(|title| ApiMilestone {
        title: title.to_string(),
    });
    it
}

pub fn pull_request(number: u64) -> ApiIssue {
    let mut it = issue(number, "A pull request");
    it.pull_request = Some(serde_json::json!({ "url": "https://api.github.com/pulls/1" }));
    it
}

/// `count` plain issues numbered from `first`.
pub fn page_of(first: u64, count: u64) -> Vec<ApiIssue> {
    (first..first + count)
        .map(|n| issue(n, &format!("Question {n}")))
        .collect()
}

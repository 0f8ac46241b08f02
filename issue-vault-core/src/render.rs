//! Markdown rendering for the three document kinds. Everything here is pure.
//!
//! Cross references use vault wiki links, `[[dir/stem|text]]`, relative to the output root.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use serde_json::Value;
use tracing::warn;

use crate::model::{FilenameMeta, IssueRecord};
use crate::namer::{CategoryNamer, Facet};

/// Directory holding per-issue documents, relative to the output root.
pub const ISSUES_DIR: &str = "issues";
pub const ROOT_INDEX_FILE: &str = "index.md";

fn json_string(s: &str) -> String {
    Value::String(s.to_owned()).to_string()
}

fn json_or_null(s: Option<&str>) -> String {
    s.map(json_string).unwrap_or_else(|| "null".to_owned())
}

fn json_list(items: &[String]) -> String {
    let inner: Vec<String> = items.iter().map(|s| json_string(s)).collect();
    format!("[{}]", inner.join(", "))
}

fn frontmatter(issue: &IssueRecord) -> String {
    let fields = [
        ("number", issue.number.to_string()),
        ("title", json_string(&issue.title)),
        ("state", json_string(&issue.state)),
        ("author", json_or_null(issue.author.as_deref())),
        ("created_at", json_string(&issue.created_at)),
        ("updated_at", json_string(&issue.updated_at)),
        ("labels", json_list(&issue.labels)),
        ("milestone", json_or_null(issue.milestone.as_deref())),
        ("url", json_string(&issue.url)),
    ];

    let mut out = String::from("---\n");
    for (key, value) in fields {
        let _ = writeln!(out, "{key}: {value}");
    }
    out.push_str("---\n");
    out
}

/// Per-issue document: frontmatter, title heading, provenance line, body verbatim.
pub fn render_issue(issue: &IssueRecord) -> String {
    format!(
        "{}\n# {}\n\n> #{} · Source: {}\n\n{}\n",
        frontmatter(issue),
        issue.title,
        issue.number,
        issue.url,
        issue.body
    )
}

fn issue_link(meta: &FilenameMeta) -> String {
    format!("- [[{ISSUES_DIR}/{}|{}]]", meta.base_name, meta.display)
}

fn count_line(n: usize) -> String {
    if n == 1 {
        "1 issue".to_owned()
    } else {
        format!("{n} issues")
    }
}

/// Category document: heading, member count, one link per member in ascending number order.
pub fn render_category_index(
    facet: Facet,
    key: &str,
    members: &BTreeSet<u64>,
    meta: &BTreeMap<u64, FilenameMeta>,
) -> String {
    let lines: Vec<String> = members
        .iter()
        .filter_map(|number| match meta.get(number) {
            Some(m) => Some(issue_link(m)),
            None => {
                warn!(%facet, key, number, "No file name recorded for category member");
                None
            }
        })
        .collect();

    format!(
        "# {facet}: {key}\n\n{}\n\n{}\n",
        count_line(members.len()),
        lines.join("\n")
    )
}

fn facet_section(facet: Facet, keys: &[&str], names: &CategoryNamer, empty: &str) -> String {
    let mut sorted = keys.to_vec();
    sorted.sort_by(|a, b| natural_cmp(a, b));
    sorted.dedup();

    let lines: Vec<String> = sorted
        .into_iter()
        .filter_map(|key| match names.get(facet, key) {
            Some(file) => Some(format!("- [[{}/{file}|{key}]]", facet.dir_name())),
            None => {
                warn!(%facet, key, "Category has no resolved file name");
                None
            }
        })
        .collect();

    if lines.is_empty() {
        empty.to_owned()
    } else {
        lines.join("\n")
    }
}

/// Root document: repository, exported total, and both facet listings in collation order.
pub fn render_root_index(
    repo_label: &str,
    total: usize,
    milestone_keys: &[&str],
    label_keys: &[&str],
    names: &CategoryNamer,
) -> String {
    format!(
        "# {repo_label} offline issue index\n\n\
         - Issues exported: **{total}**\n\
         - Two views: milestone & label\n\n\
         ## Milestone view\n{}\n\n\
         ## Label view\n{}\n",
        facet_section(Facet::Milestone, milestone_keys, names, "_No milestones_"),
        facet_section(Facet::Label, label_keys, names, "_No labels_"),
    )
}

/// Case-insensitive ordering that compares digit runs by value, so `p2` sorts before `p10`.
/// Ties fall back to plain string order to keep the result total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let l = take_digits(&mut left);
                let r = take_digits(&mut right);
                let ord = compare_digit_runs(&l, &r);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = x.to_lowercase().cmp(y.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
        run.push(c);
        chars.next();
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

//! Turns arbitrary text into names that are safe as file stems.

use once_cell::sync::Lazy;
use regex::Regex;

static ILLEGAL_PATH_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\\/:*?"<>|]"#).expect("valid regex"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

const ELLIPSIS: char = '…';

/// Replace path-illegal characters with `_`, collapse whitespace runs and trim.
pub fn sanitize(text: &str) -> String {
    let replaced = ILLEGAL_PATH_CHARS.replace_all(text, "_");
    let collapsed = WHITESPACE_RUN.replace_all(&replaced, " ");
    collapsed.trim().to_string()
}

/// [`sanitize`], then cut to at most `max_len` characters, marking a cut with `…`.
pub fn truncate_for_name(text: &str, max_len: usize) -> String {
    let clean = sanitize(text);
    if clean.chars().count() <= max_len {
        return clean;
    }
    if max_len == 0 {
        return String::new();
    }
    let mut cut: String = clean.chars().take(max_len - 1).collect();
    cut.push(ELLIPSIS);
    cut
}

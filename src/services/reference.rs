//! GitHub commit reference extraction from NVD CVE documents.
//!
//! Only direct commit permalinks count. Pull requests, advisories, tags and
//! any other link shape are ignored.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static COMMIT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https://github\.com/(?P<owner>[^/]+)/(?P<repo>[^/]+)/commit/(?P<sha>[0-9a-fA-F]{7,40})$",
    )
    .expect("commit URL pattern is valid")
});

/// Owner, repository and commit sha parsed out of a commit permalink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    pub owner: String,
    pub repo: String,
    pub sha: String,
}

/// Parse a GitHub commit permalink. Returns `None` unless the whole URL
/// matches.
pub fn parse_commit_url(url: &str) -> Option<CommitRef> {
    let caps = COMMIT_URL.captures(url)?;
    Some(CommitRef {
        owner: caps["owner"].to_string(),
        repo: caps["repo"].to_string(),
        sha: caps["sha"].to_string(),
    })
}

/// Find the first direct GitHub commit URL among the references of the
/// first vulnerability entry.
///
/// Later vulnerability entries are never examined. Returns `None` when the
/// document has no entries, no references, or no commit-shaped URL.
pub fn find_commit_url(nvd: &Value) -> Option<String> {
    let references = nvd
        .get("vulnerabilities")?
        .as_array()?
        .first()?
        .get("cve")?
        .get("references")?
        .as_array()?;

    references
        .iter()
        .filter_map(|r| r.get("url").and_then(Value::as_str))
        .find(|url| COMMIT_URL.is_match(url))
        .map(str::to_string)
}

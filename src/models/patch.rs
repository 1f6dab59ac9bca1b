//! Patch record model linking a CVE to the commit diff that fixes it.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored row of the `patches` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Patch {
    pub id: i64,
    pub cve_id: String,
    pub source_url: String,
    pub repo_owner: String,
    pub repo_name: String,
    pub commit_sha: String,
    pub diff_text: String,
}

/// Fields required to insert a new patch record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePatch {
    pub cve_id: String,
    pub source_url: String,
    pub repo_owner: String,
    pub repo_name: String,
    pub commit_sha: String,
    pub diff_text: String,
}

/// Compact view of a record, without the diff body.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct PatchSummary {
    pub id: i64,
    pub cve_id: String,
    pub repo_owner: String,
    pub repo_name: String,
    pub commit_sha: String,
    pub diff_length: i64,
}

impl std::fmt::Display for PatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} {}/{}@{} ({} bytes of diff)",
            self.id, self.cve_id, self.repo_owner, self.repo_name, self.commit_sha, self.diff_length
        )
    }
}

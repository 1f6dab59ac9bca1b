//! Patch record persistence: insert and read-back queries.

use sqlx::SqlitePool;

use crate::errors::PipelineError;
use crate::models::patch::{CreatePatch, Patch, PatchSummary};

/// Insert a new patch record and return it with its assigned id.
///
/// Autocommitted immediately. No duplicate check: the same CVE and sha may be
/// stored any number of times.
pub async fn insert(pool: &SqlitePool, input: &CreatePatch) -> Result<Patch, PipelineError> {
    let patch = sqlx::query_as::<_, Patch>(
        r#"
        INSERT INTO patches (cve_id, source_url, repo_owner, repo_name, commit_sha, diff_text)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, cve_id, source_url, repo_owner, repo_name, commit_sha, diff_text
        "#,
    )
    .bind(&input.cve_id)
    .bind(&input.source_url)
    .bind(&input.repo_owner)
    .bind(&input.repo_name)
    .bind(&input.commit_sha)
    .bind(&input.diff_text)
    .fetch_one(pool)
    .await?;

    Ok(patch)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Patch>, PipelineError> {
    let patch = sqlx::query_as::<_, Patch>("SELECT * FROM patches WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(patch)
}

/// All records stored for a CVE, oldest first.
pub async fn list_by_cve(pool: &SqlitePool, cve_id: &str) -> Result<Vec<Patch>, PipelineError> {
    let patches = sqlx::query_as::<_, Patch>("SELECT * FROM patches WHERE cve_id = ? ORDER BY id")
        .bind(cve_id)
        .fetch_all(pool)
        .await?;
    Ok(patches)
}

/// Summary of the most recently inserted record.
pub async fn latest(pool: &SqlitePool) -> Result<Option<PatchSummary>, PipelineError> {
    let summary = sqlx::query_as::<_, PatchSummary>(
        r#"
        SELECT id, cve_id, repo_owner, repo_name, commit_sha, LENGTH(diff_text) AS diff_length
        FROM patches
        ORDER BY id DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;
    Ok(summary)
}

pub async fn count(pool: &SqlitePool) -> Result<i64, PipelineError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM patches")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

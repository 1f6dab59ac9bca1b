//! Fetch-and-store pipeline orchestrating NVD lookup, reference extraction,
//! diff download and persistence for a single CVE.
//!
//! Stages run strictly in order and the first failure ends the run. The store
//! pool is closed whether the run succeeds or not.

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::db;
use crate::errors::PipelineError;
use crate::models::patch::{CreatePatch, Patch};
use crate::services::github::GithubClient;
use crate::services::nvd::NvdClient;
use crate::services::{patch, reference};

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    InitStore,
    FetchNvd,
    ExtractReference,
    FetchDiff,
    Persist,
}

impl Stage {
    /// One-based position used for progress lines.
    pub fn number(self) -> u8 {
        match self {
            Self::InitStore => 1,
            Self::FetchNvd => 2,
            Self::ExtractReference => 3,
            Self::FetchDiff => 4,
            Self::Persist => 5,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InitStore => write!(f, "init_store"),
            Self::FetchNvd => write!(f, "fetch_nvd"),
            Self::ExtractReference => write!(f, "extract_reference"),
            Self::FetchDiff => write!(f, "fetch_diff"),
            Self::Persist => write!(f, "persist"),
        }
    }
}

fn progress(stage: Stage, message: &str) {
    println!("[{}] {message}", stage.number());
    tracing::info!(stage = %stage, "{message}");
}

/// Run the whole pipeline for one CVE and return the stored record.
pub async fn run(config: &AppConfig, cve_id: &str) -> Result<Patch, PipelineError> {
    let nvd = NvdClient::new(config)?;
    let github = GithubClient::new(config)?;

    progress(
        Stage::InitStore,
        &format!("Creating/opening database: {}", config.db_path),
    );
    let pool = db::open_store(&config.db_path).await.inspect_err(|e| {
        tracing::error!(stage = %Stage::InitStore, error = %e, "Pipeline failed");
    })?;

    let result = run_stages(&pool, &nvd, &github, cve_id).await;
    pool.close().await;

    match result {
        Ok(patch) => {
            println!("Done. Check the database file: {}", config.db_path);
            tracing::info!(id = patch.id, cve_id, "Patch stored");
            Ok(patch)
        }
        Err((stage, e)) => {
            if e.is_no_reference() {
                tracing::warn!(stage = %stage, error = %e, "Pipeline stopped");
            } else {
                tracing::error!(stage = %stage, error = %e, "Pipeline failed");
            }
            Err(e)
        }
    }
}

async fn run_stages(
    pool: &SqlitePool,
    nvd: &NvdClient,
    github: &GithubClient,
    cve_id: &str,
) -> Result<Patch, (Stage, PipelineError)> {
    progress(Stage::FetchNvd, &format!("Fetching CVE from NVD: {cve_id}"));
    let document = nvd
        .fetch_cve(cve_id)
        .await
        .map_err(|e| (Stage::FetchNvd, e))?;

    progress(
        Stage::ExtractReference,
        "Looking for a direct GitHub commit link...",
    );
    let commit_url = reference::find_commit_url(&document).ok_or_else(|| {
        (
            Stage::ExtractReference,
            PipelineError::NoCommitReference(cve_id.to_string()),
        )
    })?;
    println!("    Found: {commit_url}");

    progress(Stage::FetchDiff, "Fetching diff from GitHub...");
    let diff = github
        .fetch_commit_diff(&commit_url)
        .await
        .map_err(|e| (Stage::FetchDiff, e))?;
    println!("    Diff length: {}", diff.diff_text.len());

    progress(Stage::Persist, "Saving to SQLite...");
    let input = CreatePatch {
        cve_id: cve_id.to_string(),
        source_url: commit_url,
        repo_owner: diff.owner,
        repo_name: diff.repo,
        commit_sha: diff.sha,
        diff_text: diff.diff_text,
    };
    patch::insert(pool, &input)
        .await
        .map_err(|e| (Stage::Persist, e))
}

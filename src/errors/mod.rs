//! Unified error type for every pipeline stage.

use reqwest::StatusCode;

/// Upstream API a request was sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Nvd,
    Github,
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nvd => write!(f, "NVD"),
            Self::Github => write!(f, "GitHub"),
        }
    }
}

/// Pipeline error distinguishing expected, transient and internal failures.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} API returned status {status}")]
    UpstreamStatus { service: Service, status: StatusCode },

    #[error("No direct GitHub commit reference found in NVD data for {0}")]
    NoCommitReference(String),

    #[error("Not a valid GitHub commit URL: {0}")]
    MalformedCommitUrl(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl PipelineError {
    /// The CVE has no usable commit link. Trying another CVE is the remedy.
    pub fn is_no_reference(&self) -> bool {
        matches!(self, Self::NoCommitReference(_))
    }

    /// Network or upstream failure that may succeed on a later run.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Http(_) | Self::UpstreamStatus { .. })
    }

    /// Invariant violation inside the pipeline itself.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::MalformedCommitUrl(_))
    }
}

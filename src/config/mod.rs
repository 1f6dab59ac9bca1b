use std::env;
use std::time::Duration;

use crate::errors::PipelineError;

pub const DEFAULT_DB_PATH: &str = "patches.db";
pub const DEFAULT_NVD_API_URL: &str = "https://services.nvd.nist.gov/rest/json/cves/2.0";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Pipeline configuration loaded once from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: String,
    pub nvd_api_key: Option<String>,
    pub github_token: Option<String>,
    pub nvd_api_url: String,
    pub github_api_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, PipelineError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Credentials are trimmed and treated as absent when empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PipelineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let request_timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                PipelineError::Config(format!("REQUEST_TIMEOUT_SECS is not a number: {raw}"))
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            db_path: lookup("DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            nvd_api_key: non_empty(lookup("NVD_API_KEY")),
            github_token: non_empty(lookup("GITHUB_TOKEN")),
            nvd_api_url: lookup("NVD_API_URL").unwrap_or_else(|| DEFAULT_NVD_API_URL.to_string()),
            github_api_url: lookup("GITHUB_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            request_timeout_secs,
            user_agent: lookup("HTTP_USER_AGENT")
                .unwrap_or_else(|| format!("patchfetch/{}", env!("CARGO_PKG_VERSION"))),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

//! NVD API 2.0 client for single-CVE lookups.

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::{PipelineError, Service};

/// Client for the NVD CVE-lookup endpoint.
#[derive(Debug, Clone)]
pub struct NvdClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl NvdClient {
    pub fn new(config: &AppConfig) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            api_url: config.nvd_api_url.clone(),
            api_key: config.nvd_api_key.clone(),
        })
    }

    /// Fetch the NVD record for one CVE id as a raw JSON document.
    ///
    /// Any non-success status aborts with `UpstreamStatus`. No retry.
    pub async fn fetch_cve(&self, cve_id: &str) -> Result<Value, PipelineError> {
        let url = format!("{}?cveId={}", self.api_url, cve_id);
        debug!(url = %url, "Fetching CVE from NVD");

        let mut request = self.client.get(&url);
        if let Some(ref key) = self.api_key {
            request = request.header("apiKey", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::UpstreamStatus {
                service: Service::Nvd,
                status,
            });
        }

        Ok(response.json().await?)
    }
}

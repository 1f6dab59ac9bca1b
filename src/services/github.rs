//! GitHub commit API client returning unified diffs.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::{PipelineError, Service};
use crate::services::reference;

const DIFF_MEDIA_TYPE: &str = "application/vnd.github.diff";

/// Commit coordinates together with the raw diff GitHub returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitDiff {
    pub owner: String,
    pub repo: String,
    pub sha: String,
    pub diff_text: String,
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(config: &AppConfig) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            api_url: config.github_api_url.clone(),
            token: config.github_token.clone(),
        })
    }

    /// API URL for a commit, e.g. `https://api.github.com/repos/git/git/commits/9706576`.
    pub fn commit_api_url(&self, owner: &str, repo: &str, sha: &str) -> String {
        format!("{}/repos/{owner}/{repo}/commits/{sha}", self.api_url)
    }

    /// Download the diff for a commit permalink already accepted by
    /// [`reference::find_commit_url`].
    pub async fn fetch_commit_diff(&self, commit_url: &str) -> Result<CommitDiff, PipelineError> {
        let commit = reference::parse_commit_url(commit_url)
            .ok_or_else(|| PipelineError::MalformedCommitUrl(commit_url.to_string()))?;

        let url = self.commit_api_url(&commit.owner, &commit.repo, &commit.sha);
        debug!(url = %url, "Fetching commit diff from GitHub");

        let mut request = self.client.get(&url).header(ACCEPT, DIFF_MEDIA_TYPE);
        if let Some(ref token) = self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::UpstreamStatus {
                service: Service::Github,
                status,
            });
        }

        Ok(CommitDiff {
            owner: commit.owner,
            repo: commit.repo,
            sha: commit.sha,
            diff_text: response.text().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GithubClient {
        let config = AppConfig::from_lookup(|key| match key {
            "GITHUB_API_URL" => Some("http://127.0.0.1:1/".to_string()),
            _ => None,
        })
        .unwrap();
        GithubClient::new(&config).unwrap()
    }

    #[test]
    fn builds_commit_api_url() {
        assert_eq!(
            client().commit_api_url("acme", "widget", "abc1234def5678"),
            "http://127.0.0.1:1/repos/acme/widget/commits/abc1234def5678"
        );
    }

    #[tokio::test]
    async fn malformed_url_fails_before_any_request() {
        let err = client()
            .fetch_commit_diff("https://github.com/acme/widget/pull/5")
            .await
            .unwrap_err();
        assert!(err.is_internal());
        assert!(matches!(err, PipelineError::MalformedCommitUrl(url) if url.ends_with("/pull/5")));
    }
}

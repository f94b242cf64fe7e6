use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PullRequestUrl;

// Constants
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
const USER_AGENT: &str = concat!("pr-diff/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON: &str = "application/vnd.github+json";
const GITHUB_DIFF: &str = "application/vnd.github.diff";

#[derive(Error, Debug)]
pub enum FetchError {
  #[error("HTTP request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("{url} returned {status}")]
  Status { status: StatusCode, url: String }
}

impl FetchError {
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      FetchError::Status { status, .. } => Some(*status),
      FetchError::Http(err) => err.status()
    }
  }
}

/// Pull request metadata, as returned by the GitHub REST API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PullRequest {
  pub number:   u64,
  pub title:    String,
  pub state:    String,
  pub html_url: String,
  pub diff_url: String,
  #[serde(default)]
  pub body:     Option<String>
}

/// Anything that can look up a pull request and download its diff
#[async_trait]
pub trait PullRequestSource: Send + Sync {
  async fn pull_request(&self, pr: &PullRequestUrl) -> Result<PullRequest, FetchError>;
  async fn diff(&self, pr: &PullRequestUrl) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
  http:     reqwest::Client,
  api_base: String,
  token:    Option<String>
}

impl GitHubClient {
  pub fn new() -> Result<Self, FetchError> {
    Self::with_options(DEFAULT_API_BASE, None, DEFAULT_TIMEOUT)
  }

  pub fn with_options(api_base: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self, FetchError> {
    let http = reqwest::Client::builder()
      .user_agent(USER_AGENT)
      .timeout(timeout)
      .build()?;

    Ok(Self {
      http,
      api_base: api_base.into().trim_end_matches('/').to_string(),
      token: token.filter(|t| !t.is_empty())
    })
  }

  pub fn api_base(&self) -> &str {
    &self.api_base
  }

  fn pull_url(&self, pr: &PullRequestUrl) -> String {
    format!("{}/repos/{}/{}/pulls/{}", self.api_base, pr.owner, pr.repo, pr.number)
  }

  async fn get(&self, url: &str, accept: &str) -> Result<reqwest::Response, FetchError> {
    let mut request = self.http.get(url).header(ACCEPT, accept);
    if let Some(token) = &self.token {
      request = request.bearer_auth(token);
    }

    log::debug!("GET {url}");
    let response = request.send().await?;

    if response.status() != StatusCode::OK {
      return Err(FetchError::Status { status: response.status(), url: url.to_string() });
    }

    Ok(response)
  }
}

#[async_trait]
impl PullRequestSource for GitHubClient {
  async fn pull_request(&self, pr: &PullRequestUrl) -> Result<PullRequest, FetchError> {
    let response = self.get(&self.pull_url(pr), GITHUB_JSON).await?;
    Ok(response.json().await?)
  }

  // Authenticated API endpoint, not `diff_url`
  async fn diff(&self, pr: &PullRequestUrl) -> Result<String, FetchError> {
    let response = self.get(&self.pull_url(pr), GITHUB_DIFF).await?;
    let bytes = response.bytes().await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
  }
}

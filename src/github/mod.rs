//! Fetching pull request diffs from GitHub.

pub mod client;
pub mod url;

pub use client::{FetchError, GitHubClient, PullRequest, PullRequestSource};
pub use url::{PullRequestUrl, UrlError};

use crate::diff::{self, FileDiff};

/// Looks up the pull request and downloads its combined diff.
pub async fn fetch_diff<S>(source: &S, pr: &PullRequestUrl) -> Result<String, FetchError>
where
  S: PullRequestSource + ?Sized
{
  let pull_request = source.pull_request(pr).await?;
  log::debug!("Fetched {pr}: {}", pull_request.title);
  source.diff(pr).await
}

/// Downloads the diff of a pull request and parses it, dropping files that
/// match one of `ignore`.
pub async fn fetch_files<S, P>(source: &S, pr: &PullRequestUrl, ignore: &[P]) -> Result<Vec<FileDiff>, FetchError>
where
  S: PullRequestSource + ?Sized,
  P: AsRef<str>
{
  let diff = fetch_diff(source, pr).await?;
  Ok(diff::parse_git_diff(&diff, ignore))
}

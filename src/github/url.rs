use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
  #[error("invalid pull request URL: {0}")]
  InvalidUrl(String),

  #[error("invalid pull request number")]
  InvalidNumber(#[from] ParseIntError)
}

/// Location of a pull request, parsed from
/// `https://github.com/{owner}/{repo}/pull/{number}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PullRequestUrl {
  pub owner:  String,
  pub repo:   String,
  pub number: u64
}

impl PullRequestUrl {
  pub fn parse(url: &str) -> Result<Self, UrlError> {
    let parts: Vec<&str> = url.split('/').collect();
    if parts.len() != 7 {
      return Err(UrlError::InvalidUrl(url.to_string()));
    }

    Ok(Self {
      owner:  parts[3].to_string(),
      repo:   parts[4].to_string(),
      number: parts[6].parse()?
    })
  }
}

impl FromStr for PullRequestUrl {
  type Err = UrlError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

impl Display for PullRequestUrl {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_pull_request_url() {
    let pr = PullRequestUrl::parse("https://github.com/google/go-github/pull/1234").unwrap();
    assert_eq!(pr.owner, "google");
    assert_eq!(pr.repo, "go-github");
    assert_eq!(pr.number, 1234);
    assert_eq!(pr.to_string(), "google/go-github#1234");
  }

  #[test]
  fn test_parse_invalid_url() {
    assert_eq!(PullRequestUrl::parse("foo"), Err(UrlError::InvalidUrl("foo".into())));
    assert!(matches!(
      "https://github.com/google/go-github/pull/1234/files".parse::<PullRequestUrl>(),
      Err(UrlError::InvalidUrl(_))
    ));
  }

  #[test]
  fn test_parse_invalid_number() {
    assert!(matches!(
      PullRequestUrl::parse("https://github.com/google/go-github/pull/latest"),
      Err(UrlError::InvalidNumber(_))
    ));
  }
}

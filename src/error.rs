//! Error helpers for the pr-diff CLI.
//!
//! Detects GitHub failures that a token would fix, so the CLI can point the
//! user at `pr-diff config set github-token`.

use anyhow::Error;
use reqwest::StatusCode;

use crate::github::FetchError;

/// Checks if an error was caused by GitHub refusing the request for lack of
/// (valid) credentials or because the anonymous rate limit ran out.
///
/// Matches a [`FetchError`] anywhere in the error chain whose status is
/// `401 Unauthorized`, `403 Forbidden` or `404 Not Found` (GitHub answers 404
/// for private repositories when no token is sent).
///
/// # Examples
///
/// ```
/// use anyhow::anyhow;
/// use prdiff::error::is_github_auth_error;
///
/// let error = anyhow!("File not found");
/// assert!(!is_github_auth_error(&error));
/// ```
pub fn is_github_auth_error(error: &Error) -> bool {
  error
    .chain()
    .filter_map(|cause| cause.downcast_ref::<FetchError>())
    .filter_map(FetchError::status)
    .any(|status| matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND))
}

pub mod config;
pub mod diff;
pub mod error;
pub mod github;

// Re-exports
pub use diff::{is_ignored, parse_file_diff, parse_git_diff, parse_git_diff_reporting, parse_git_diff_with, split_files, FileDiff, IgnoreSet, ParseError};
pub use github::{GitHubClient, PullRequestUrl};

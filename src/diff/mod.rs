//! Splitting, parsing and filtering of multi-file git diffs.
//!
//! A combined diff (for example the `.diff` of a pull request) is split on
//! its `diff --git` lines, each segment is parsed into a [`FileDiff`], and
//! files whose new path matches an ignore pattern are dropped.

pub mod filter;
pub mod parser;
pub mod split;

use serde::Serialize;

pub use filter::{is_ignored, IgnoreSet};
pub use parser::{file_extension, parse_file_diff, FileDiff, ParseError};
pub use split::split_files;

pub(crate) const FILE_HEADER: &str = "diff --git";
pub(crate) const INDEX_PREFIX: &str = "index ";

/// A segment that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSegment {
  /// Zero-based position of the segment in the diff
  pub position: usize,
  pub error:    ParseError
}

/// Outcome of [`parse_git_diff_reporting`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffReport {
  pub files:   Vec<FileDiff>,
  pub skipped: Vec<SkippedSegment>,
  /// New paths of the files removed by the ignore patterns
  pub ignored: Vec<String>
}

/// Parses a combined git diff into per-file records.
///
/// Segments that fail to parse and files matching one of `ignore` are left
/// out without notice; the order of the remaining files is preserved.
///
/// # Example
/// ```
/// use prdiff::diff::parse_git_diff;
///
/// let diff = "diff --git a/main.go b/main.go\nindex 1..2 100644\n+x\n\
///             diff --git a/go.mod b/go.mod\nindex 3..4 100644\n+y\n";
/// let files = parse_git_diff(diff, &[r"\.mod$"]);
/// assert_eq!(files.len(), 1);
/// assert_eq!(files[0].new_path(), "b/main.go");
/// ```
pub fn parse_git_diff<S: AsRef<str>>(diff: &str, ignore: &[S]) -> Vec<FileDiff> {
  parse_git_diff_reporting(diff, ignore).files
}

/// Same as [`parse_git_diff`], but also reports which segments were skipped
/// and which files were ignored.
pub fn parse_git_diff_reporting<S: AsRef<str>>(diff: &str, ignore: &[S]) -> DiffReport {
  parse_git_diff_with(diff, &IgnoreSet::new(ignore))
}

/// Same as [`parse_git_diff_reporting`] with patterns compiled up front.
pub fn parse_git_diff_with(diff: &str, ignore: &IgnoreSet) -> DiffReport {
  let mut report = DiffReport::default();

  for (position, segment) in split_files(diff).into_iter().enumerate() {
    let file = match parse_file_diff(segment) {
      Ok(file) => file,
      Err(error) => {
        log::debug!("Skipping segment {position}: {error}");
        report.skipped.push(SkippedSegment { position, error });
        continue;
      }
    };

    if ignore.matches(&file) {
      log::debug!("Ignoring {}", file.new_path());
      report.ignored.push(file.new_path().to_string());
      continue;
    }

    report.files.push(file);
  }

  log::debug!(
    "Parsed {} files ({} skipped, {} ignored)",
    report.files.len(),
    report.skipped.len(),
    report.ignored.len()
  );

  report
}

//! Parsing a single-file git diff segment.

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use super::{FILE_HEADER, INDEX_PREFIX};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseError {
  #[error("invalid file paths")]
  InvalidPaths,

  #[error("invalid git diff format")]
  InvalidFormat
}

/// One file's change within a larger diff.
///
/// A `FileDiff` can only be obtained through [`parse_file_diff`], so its
/// paths, index line and body are always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDiff {
  old_path: String,
  new_path: String,
  index:    String,
  body:     String
}

impl FileDiff {
  /// Path before the change, as written in the header (e.g. `a/src/lib.rs`)
  pub fn old_path(&self) -> &str {
    &self.old_path
  }

  /// Path after the change, as written in the header (e.g. `b/src/lib.rs`)
  pub fn new_path(&self) -> &str {
    &self.new_path
  }

  /// Contents of the `index` line: hash range and optional mode
  pub fn index(&self) -> &str {
    &self.index
  }

  /// Every line that is neither the header nor the index line, including
  /// the `---`/`+++` file lines and hunks
  pub fn body(&self) -> &str {
    &self.body
  }

  /// Extension of the new path, see [`file_extension`]
  pub fn extension(&self) -> &str {
    file_extension(&self.new_path)
  }
}

impl FromStr for FileDiff {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    parse_file_diff(s)
  }
}

/// Parses the diff of a single file.
///
/// The `diff --git` line provides the old and new path, the `index ` line the
/// hash metadata, and every other line is kept verbatim as the body. When a
/// header or index line repeats, the last one wins.
///
/// # Errors
/// * [`ParseError::InvalidPaths`] as soon as a header line does not carry exactly two paths
/// * [`ParseError::InvalidFormat`] when the paths, the index line or the body is missing
pub fn parse_file_diff(input: &str) -> Result<FileDiff, ParseError> {
  let mut paths: Option<(&str, &str)> = None;
  let mut index = "";
  let mut body = Vec::new();

  for line in input.lines() {
    if line.starts_with(FILE_HEADER) {
      paths = Some(header_paths(line)?);
    } else if let Some(rest) = line.strip_prefix(INDEX_PREFIX) {
      index = rest.trim();
    } else {
      body.push(line);
    }
  }

  match paths {
    Some((old_path, new_path)) if !index.is_empty() && !body.is_empty() => {
      Ok(FileDiff {
        old_path: old_path.to_string(),
        new_path: new_path.to_string(),
        index:    index.to_string(),
        body:     body.join("\n")
      })
    }
    _ => Err(ParseError::InvalidFormat)
  }
}

// "diff --git <old> <new>": exactly two tokens after the marker
fn header_paths(line: &str) -> Result<(&str, &str), ParseError> {
  let mut tokens = line.split_whitespace().skip(2);

  match (tokens.next(), tokens.next(), tokens.next()) {
    (Some(old_path), Some(new_path), None) => Ok((old_path, new_path)),
    _ => Err(ParseError::InvalidPaths)
  }
}

/// Returns the extension of the last component of a `/`-separated path,
/// including the leading dot.
///
/// Directories (trailing `/`), empty paths and names without a dot yield an
/// empty string. A dot-file such as `.gitignore` is its own extension.
pub fn file_extension(path: &str) -> &str {
  let name = path.rsplit('/').next().unwrap_or_default();

  if name.is_empty() || name == "." {
    return "";
  }

  if name.len() > 1 && name.starts_with('.') && name.matches('.').count() == 1 {
    return name;
  }

  name.rfind('.').map_or("", |i| &name[i..])
}

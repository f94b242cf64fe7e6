//! Regex-based ignore filters on the new path of a file diff.

use regex::Regex;

use super::FileDiff;

#[derive(Debug)]
enum Pattern {
  Empty,
  Compiled(Regex),
  Invalid(regex::Error)
}

/// An ordered list of ignore patterns, compiled once.
///
/// Patterns are evaluated in order against [`FileDiff::new_path`] and match
/// anywhere in it. An empty pattern never matches. Evaluation stops at the
/// first invalid pattern and reports the file as not ignored, so a broken
/// pattern can never hide a file.
#[derive(Debug, Default)]
pub struct IgnoreSet {
  patterns: Vec<Pattern>
}

impl IgnoreSet {
  pub fn new<I, S>(patterns: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>
  {
    let patterns = patterns
      .into_iter()
      .map(|pattern| {
        let pattern = pattern.as_ref();
        if pattern.is_empty() {
          return Pattern::Empty;
        }

        match Regex::new(pattern) {
          Ok(rx) => Pattern::Compiled(rx),
          Err(err) => {
            log::warn!("Invalid ignore pattern {pattern:?}: {err}");
            Pattern::Invalid(err)
          }
        }
      })
      .collect();

    Self { patterns }
  }

  pub fn len(&self) -> usize {
    self.patterns.len()
  }

  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }

  /// Compile errors of the invalid patterns, in order
  pub fn errors(&self) -> impl Iterator<Item = &regex::Error> {
    self.patterns.iter().filter_map(|pattern| {
      match pattern {
        Pattern::Invalid(err) => Some(err),
        _ => None
      }
    })
  }

  pub fn matches(&self, file: &FileDiff) -> bool {
    for pattern in &self.patterns {
      match pattern {
        Pattern::Empty => continue,
        // TODO: skip just this pattern once callers have a way to see compile errors
        Pattern::Invalid(_) => return false,
        Pattern::Compiled(rx) => {
          if rx.is_match(file.new_path()) {
            return true;
          }
        }
      }
    }

    false
  }
}

/// Returns true when the new path of `file` matches one of `patterns`.
///
/// Compiles the patterns on every call; use an [`IgnoreSet`] to filter many
/// files against the same list.
pub fn is_ignored<S: AsRef<str>>(file: &FileDiff, patterns: &[S]) -> bool {
  IgnoreSet::new(patterns).matches(file)
}

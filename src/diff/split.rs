//! Splitting a combined diff into per-file segments.

use super::FILE_HEADER;

/// Splits a combined git diff into one segment per file.
///
/// Every line starting with `diff --git` opens a new segment; all following
/// lines belong to it until the next header or the end of input. Segments are
/// returned in input order as trimmed slices of `diff`. Text before the first
/// header becomes a segment of its own, even when it trims to `""` (blank
/// lines before the first header). Input without any header is returned whole
/// unless it is blank.
pub fn split_files(diff: &str) -> Vec<&str> {
  let mut files = Vec::new();
  let mut start = 0;
  let mut offset = 0;

  for line in diff.split_inclusive('\n') {
    if line.starts_with(FILE_HEADER) && offset > start {
      files.push(diff[start..offset].trim());
      start = offset;
    }
    offset += line.len();
  }

  let last = diff[start..].trim();
  if !last.is_empty() {
    files.push(last);
  }

  log::debug!("Split diff into {} segments", files.len());
  files
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_split_two_files() {
    let diff = r#"diff --git a/main.go b/main.go
index acdee69..e522a2d 100644
--- a/main.go
+++ b/main.go
@@ -115,6 +115,7 @@ func onAnalyzeButtonClickedHandler() {
+	// Additional line of code
}

diff --git a/ui/critic_window.go b/ui/critic_window.go
index d9e3436..96c7eb8 100644
--- a/ui/critic_window.go
+++ b/ui/critic_window.go
@@ -7,13 +7,14 @@ type CriticWindow struct {
+	// Another line of code
}"#;

    let files = split_files(diff);
    assert_eq!(files, vec![
      "diff --git a/main.go b/main.go
index acdee69..e522a2d 100644
--- a/main.go
+++ b/main.go
@@ -115,6 +115,7 @@ func onAnalyzeButtonClickedHandler() {
+	// Additional line of code
}",
      "diff --git a/ui/critic_window.go b/ui/critic_window.go
index d9e3436..96c7eb8 100644
--- a/ui/critic_window.go
+++ b/ui/critic_window.go
@@ -7,13 +7,14 @@ type CriticWindow struct {
+	// Another line of code
}"
    ]);
  }

  #[test]
  fn test_split_empty_input() {
    assert!(split_files("").is_empty());
    assert!(split_files("  \n\n").is_empty());
  }

  #[test]
  fn test_split_without_header_keeps_whole_input() {
    let files = split_files("--git a/file.txt b/file.txt");
    assert_eq!(files, vec!["--git a/file.txt b/file.txt"]);
  }

  #[test]
  fn test_split_consecutive_headers() {
    let diff = "diff --git a/f1 b/f1\ndiff --git c/f2 d/f2\n";
    assert_eq!(split_files(diff), vec!["diff --git a/f1 b/f1", "diff --git c/f2 d/f2"]);
  }

  #[test]
  fn test_split_blank_preamble_is_an_empty_segment() {
    let files = split_files("\n\ndiff --git a/x b/x\nindex 1..2\n+x");
    assert_eq!(files, vec!["", "diff --git a/x b/x\nindex 1..2\n+x"]);
  }

  #[test]
  fn test_split_keeps_preamble_segment() {
    let diff = "From 0472ffa Mon Sep 17 00:00:00 2001\nSubject: update\n\ndiff --git a/x b/x\nindex 1..2\n+x\n";
    let files = split_files(diff);
    assert_eq!(files.len(), 2);
    assert_eq!(files[0], "From 0472ffa Mon Sep 17 00:00:00 2001\nSubject: update");
    assert_eq!(files[1], "diff --git a/x b/x\nindex 1..2\n+x");
  }

  #[test]
  fn test_split_single_file_is_idempotent() {
    let file = "diff --git a/x b/x\nindex 1..2 100644\n--- a/x\n+++ b/x\n@@ -1 +1 @@\n-a\n+b";
    let once = split_files(file);
    assert_eq!(once, vec![file]);
    assert_eq!(split_files(once[0]), once);
  }

  #[test]
  fn test_split_crlf_input() {
    let diff = "diff --git a/x b/x\r\nindex 1..2\r\n+x\r\ndiff --git a/y b/y\r\nindex 3..4\r\n+y\r\n";
    let files = split_files(diff);
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.starts_with("diff --git")));
    assert_eq!(files[1], "diff --git a/y b/y\r\nindex 3..4\r\n+y");
  }
}

//! # Content Transformer Module
//!
//! This module provides the text transforms applied to a file's content:
//! stripping header texts and prepending the canonical header. All matching
//! is literal substring matching; file syntax is never parsed.

use std::borrow::Cow;

use crate::error::{Result, SyncError};
use crate::headers::HeaderSet;

/// Content transformation utilities for header synchronization.
///
/// The `ContentTransformer` handles:
/// - Replacing legacy headers with the canonical one
/// - Stripping every known header from a file
pub struct ContentTransformer {
  headers: HeaderSet,
}

impl ContentTransformer {
  /// Creates a new ContentTransformer for the given headers.
  pub const fn new(headers: HeaderSet) -> Self {
    Self { headers }
  }

  /// The headers this transformer applies.
  pub const fn headers(&self) -> &HeaderSet {
    &self.headers
  }

  /// Removes every legacy header, then prepends the canonical header.
  ///
  /// This does not check whether the canonical header is already present;
  /// callers decide that first so files that already carry it are left alone.
  ///
  /// # Returns
  ///
  /// The new content, and whether any legacy header was removed.
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::EmptyHeaderSet`] if there is no canonical header.
  pub fn insert_header(&self, content: &str) -> Result<(String, bool)> {
    let canonical = self.headers.canonical().ok_or(SyncError::EmptyHeaderSet)?;

    let body = strip_headers(content, self.headers.legacy());
    let replaced = matches!(body, Cow::Owned(_));

    // Only the line breaks a removed header left behind are dropped
    let body = if replaced {
      body.trim_start_matches(['\r', '\n'])
    } else {
      content
    };

    Ok((prepend_header(canonical, body), replaced))
  }

  /// Removes every occurrence of every header, canonical included.
  ///
  /// Returns borrowed content when nothing was found.
  pub fn strip_all<'a>(&self, content: &'a str) -> Cow<'a, str> {
    strip_headers(content, self.headers.all())
  }
}

/// Deletes every verbatim occurrence of each header from `content`.
///
/// Passes repeat until nothing more is found, so removing one header can't
/// leave behind a fresh occurrence of another. Empty headers are skipped.
pub fn strip_headers<'a>(content: &'a str, headers: &[String]) -> Cow<'a, str> {
  let mut current = Cow::Borrowed(content);

  loop {
    let mut changed = false;
    for header in headers.iter().filter(|h| !h.is_empty()) {
      if current.contains(header.as_str()) {
        current = Cow::Owned(current.replace(header.as_str(), ""));
        changed = true;
      }
    }

    if !changed {
      return current;
    }
  }
}

/// Prepends `header` to `body`, separated by one blank line.
///
/// The line ending follows the header's own. `body` is kept as is, leading
/// blank lines included.
pub fn prepend_header(header: &str, body: &str) -> String {
  let line_ending = if header.contains("\r\n") { "\r\n" } else { "\n" };
  let separator = if header.ends_with('\n') {
    line_ending.to_string()
  } else {
    line_ending.repeat(2)
  };
  let mut result = String::with_capacity(header.len() + separator.len() + body.len());
  result.push_str(header);
  result.push_str(&separator);
  result.push_str(body);
  result
}

#[cfg(test)]
mod tests {
  use super::*;

  fn transformer(headers: &[&str]) -> ContentTransformer {
    ContentTransformer::new(HeaderSet::new(headers.iter().map(|h| h.to_string()).collect()))
  }

  #[test]
  fn test_insert_into_unlicensed_content() {
    let (content, replaced) = transformer(&["// NEW"]).insert_header("code();").unwrap();
    assert_eq!(content, "// NEW\n\ncode();");
    assert!(!replaced);
  }

  #[test]
  fn test_insert_replaces_legacy_header() {
    let (content, replaced) = transformer(&["// NEW", "// OLD"])
      .insert_header("// OLD\ncode();")
      .unwrap();
    assert_eq!(content, "// NEW\n\ncode();");
    assert!(replaced);
  }

  #[test]
  fn test_insert_removes_every_legacy_occurrence() {
    let (content, _) = transformer(&["# NEW", "# OLD A", "# OLD B"])
      .insert_header("# OLD A\n# OLD B\nx = 1  # OLD A\n")
      .unwrap();
    assert_eq!(content, "# NEW\n\nx = 1  \n");
  }

  #[test]
  fn test_insert_with_header_ending_in_newline() {
    let (content, _) = transformer(&["# NEW\n"]).insert_header("import os\n").unwrap();
    assert_eq!(content, "# NEW\n\nimport os\n");
  }

  #[test]
  fn test_insert_into_empty_content() {
    let (content, _) = transformer(&["# NEW"]).insert_header("").unwrap();
    assert_eq!(content, "# NEW\n\n");
  }

  #[test]
  fn test_insert_keeps_crlf_line_endings() {
    let (content, _) = transformer(&["# NEW\r\n# LICENSE", "# OLD"])
      .insert_header("# OLD\r\nimport os\r\n")
      .unwrap();
    assert_eq!(content, "# NEW\r\n# LICENSE\r\n\r\nimport os\r\n");
  }

  #[test]
  fn test_insert_keeps_leading_blank_lines_without_legacy_header() {
    let (content, replaced) = transformer(&["# H", "# OLD"]).insert_header("\n\n\nimport os\n").unwrap();
    assert!(!replaced);
    assert_eq!(content, "# H\n\n\n\n\nimport os\n");
  }

  #[test]
  fn test_insert_drops_blank_lines_left_by_legacy_header() {
    let (content, replaced) = transformer(&["# H", "# OLD"]).insert_header("# OLD\n\n\nimport os\n").unwrap();
    assert!(replaced);
    assert_eq!(content, "# H\n\nimport os\n");
  }

  #[test]
  fn test_insert_requires_canonical_header() {
    let result = transformer(&[]).insert_header("code();");
    assert!(matches!(result, Err(SyncError::EmptyHeaderSet)));
  }

  #[test]
  fn test_strip_all_is_literal() {
    let stripped = transformer(&["// NEW"]).strip_all("// NEW\n\ncode();");
    assert_eq!(stripped, "\n\ncode();");

    // Regex metacharacters are plain text
    let stripped = transformer(&["(c) 2024 .*"]).strip_all("# (c) 2024 .*\n# (c) 2024 ab\n");
    assert_eq!(stripped, "# \n# (c) 2024 ab\n");
  }

  #[test]
  fn test_strip_all_borrows_when_nothing_found() {
    let stripped = transformer(&["// NEW", "// OLD"]).strip_all("code();");
    assert!(matches!(stripped, Cow::Borrowed("code();")));
  }

  #[test]
  fn test_strip_reaches_fixed_point() {
    // Removing "B" joins "A" + "C" into a fresh "AC"
    let stripped = strip_headers("ABC", &["AC".to_string(), "B".to_string()]);
    assert_eq!(stripped, "");
    assert_eq!(strip_headers(&stripped, &["AC".to_string(), "B".to_string()]), stripped);
  }

  #[test]
  fn test_strip_skips_empty_headers() {
    let stripped = strip_headers("code();", &[String::new()]);
    assert!(matches!(stripped, Cow::Borrowed(_)));
  }
}

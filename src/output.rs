//! # Output Module
//!
//! This module centralizes all user-facing output for headersync.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! - Changed files are listed, truncated unless `-v` is given
//! - `-q` prints only the changed paths, one per line, for scripting
//! - Summary lines always carry the scanned and changed counts

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileAction, FileReport, RunReport, RunSummary};

/// Symbols used in output
pub mod symbols {
  /// Success
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Header replaced
  pub const UPDATED: &str = "\u{21bb}"; // ↻
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

const fn plural(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

/// Print the initial "Found N files." message.
pub fn print_start_message(file_count: usize, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let suffix = if dry_run { " (dry run)" } else { "" };
  println!("Found {} {}{}.", file_count, plural(file_count), suffix);
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the list of files whose content changed, or would change in a dry
/// run.
pub fn print_changed_files(report: &RunReport, base_dir: Option<&Path>) {
  let mut files: Vec<&FileReport> = report.changed_files().collect();
  if files.is_empty() {
    return;
  }
  files.sort_by(|a, b| a.path.cmp(&b.path));

  if is_quiet() {
    for file in &files {
      println!("{}", make_relative_path(&file.path, base_dir));
    }
    return;
  }

  let count = files.len();
  let verb = if report.summary.dry_run { "Would change" } else { "Changed" };
  println!(
    "{} {} license header in {} {}:",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    verb,
    count,
    plural(count)
  );

  let show_all = is_verbose();
  let limit = if show_all { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in files.iter().take(limit) {
    let display_path = make_relative_path(&file.path, base_dir);
    match file.action {
      FileAction::Replaced => println!(
        "  {} {}",
        display_path,
        symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.yellow())
      ),
      _ => println!("  {}", display_path),
    }
  }

  if !show_all && count > limit {
    println!(
      "  {} ... and {} more (use -v to see all)",
      "".if_supports_color(Stream::Stdout, |s| s.dimmed()),
      count - limit
    );
  }
}

/// Print the list of files that could not be processed.
///
/// Failures go to stderr and are never suppressed by quiet mode.
pub fn print_failed_files(report: &RunReport, base_dir: Option<&Path>) {
  let failed: Vec<&FileReport> = report.failed_files().collect();
  if failed.is_empty() {
    return;
  }

  eprintln!(
    "{} Failed to process {} {}:",
    symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
    failed.len(),
    plural(failed.len())
  );
  for file in failed {
    eprintln!(
      "  {}: {}",
      make_relative_path(&file.path, base_dir),
      file.error.as_deref().unwrap_or("unknown error")
    );
  }
}

/// Print the message shown when no file needed a change.
pub fn print_all_files_ok(summary: &RunSummary) {
  if is_quiet() || summary.files_changed > 0 || summary.has_failures() {
    return;
  }

  println!(
    "{} All files are up to date.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the run summary.
///
/// Format: "Summary: X scanned, Y changed[, Z failed]"
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &RunSummary) {
  if is_quiet() {
    return;
  }

  let changed_label = if summary.dry_run { "to change" } else { "changed" };
  let mut summary_line = format!(
    "Summary: {} scanned, {} {}",
    summary.files_scanned.if_supports_color(Stream::Stdout, |s| s.cyan()),
    summary.files_changed.if_supports_color(Stream::Stdout, |s| s.cyan()),
    changed_label
  );

  if summary.has_failures() {
    summary_line.push_str(&format!(
      ", {} failed",
      summary.files_failed.if_supports_color(Stream::Stdout, |s| s.red())
    ));
  }

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", summary_line);
}

/// Make a path relative to the base directory for display.
fn make_relative_path(path: &Path, base_dir: Option<&Path>) -> String {
  if let Some(root) = base_dir {
    path
      .strip_prefix(root)
      .map(|p| p.to_string_lossy().to_string())
      .unwrap_or_else(|_| path.to_string_lossy().to_string())
  } else {
    path.to_string_lossy().to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_make_relative_path() {
    let path = Path::new("/work/repo/src/app.py");
    assert_eq!(make_relative_path(path, Some(Path::new("/work/repo"))), "src/app.py");
    assert_eq!(make_relative_path(path, Some(Path::new("/elsewhere"))), "/work/repo/src/app.py");
    assert_eq!(make_relative_path(path, None), "/work/repo/src/app.py");
  }

  #[test]
  fn test_plural() {
    assert_eq!(plural(0), "files");
    assert_eq!(plural(1), "file");
    assert_eq!(plural(2), "files");
  }
}

//! # Report Module
//!
//! This module records what happened to each selected file during a run and
//! summarizes the run. The report can be written to disk as JSON for CI
//! pipelines.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Which engine operation produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
  Synchronize,
  Remove,
}

impl std::fmt::Display for Operation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Operation::Synchronize => write!(f, "synchronize"),
      Operation::Remove => write!(f, "remove"),
    }
  }
}

/// Possible outcomes for a selected file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
  /// Canonical header was prepended; no legacy header was found
  Inserted,
  /// Legacy headers were removed and the canonical header prepended
  Replaced,
  /// Headers were removed
  Stripped,
  /// Content already in the target state; file not written
  Unchanged,
  /// Reading or writing the file failed
  Failed,
}

impl FileAction {
  /// Whether the action changes (or, in a dry run, would change) the file.
  pub const fn changes_content(self) -> bool {
    matches!(self, FileAction::Inserted | FileAction::Replaced | FileAction::Stripped)
  }
}

/// Information about a processed file for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// Outcome for the file
  pub action: FileAction,
  /// Error message when the action is [`FileAction::Failed`]
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl FileReport {
  pub const fn new(path: PathBuf, action: FileAction) -> Self {
    Self {
      path,
      action,
      error: None,
    }
  }

  pub fn failed(path: PathBuf, error: impl std::fmt::Display) -> Self {
    Self {
      path,
      action: FileAction::Failed,
      error: Some(error.to_string()),
    }
  }
}

/// Helper module for serializing/deserializing PathBuf
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Summary statistics for a run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
  /// Operation that was run
  pub operation: Operation,
  /// Whether files were left untouched
  pub dry_run: bool,
  /// Number of selected files
  pub files_scanned: usize,
  /// Number of files whose content changed (or would change)
  pub files_changed: usize,
  /// Number of files that could not be processed
  pub files_failed: usize,
  /// Total processing time
  #[serde(skip_serializing)]
  pub processing_time: Duration,
  /// Processing time in seconds for serialization
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
  /// Timestamp when the summary was created
  pub timestamp: i64,
}

impl RunSummary {
  /// Create a RunSummary from a collection of FileReports
  pub fn from_reports(operation: Operation, dry_run: bool, files: &[FileReport], processing_time: Duration) -> Self {
    let files_changed = files.iter().filter(|f| f.action.changes_content()).count();
    let files_failed = files.iter().filter(|f| f.action == FileAction::Failed).count();

    Self {
      operation,
      dry_run,
      files_scanned: files.len(),
      files_changed,
      files_failed,
      processing_time,
      processing_time_secs: processing_time.as_secs_f64(),
      timestamp: Local::now().timestamp(),
    }
  }

  /// Whether any file failed to process.
  pub const fn has_failures(&self) -> bool {
    self.files_failed > 0
  }
}

/// Outcome of a whole run: one report per selected file plus the summary.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
  pub summary: RunSummary,
  pub files: Vec<FileReport>,
}

impl RunReport {
  /// Files whose content changed (or would change in a dry run).
  pub fn changed_files(&self) -> impl Iterator<Item = &FileReport> {
    self.files.iter().filter(|f| f.action.changes_content())
  }

  /// Files that could not be processed.
  pub fn failed_files(&self) -> impl Iterator<Item = &FileReport> {
    self.files.iter().filter(|f| f.action == FileAction::Failed)
  }

  /// Writes the report as pretty-printed JSON.
  pub fn write_json(&self, output_path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(self).context("Failed to serialize report to JSON")?;
    fs::write(output_path, content).with_context(|| format!("Failed to write report to {}", output_path.display()))
  }
}

//! # Error Module
//!
//! Error taxonomy for the header synchronization engine. Every variant that
//! concerns a path carries it, so the CLI can report which file failed and
//! what was being done to it.

use std::path::PathBuf;

/// Errors produced while loading headers, selecting files, or rewriting them.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
  /// A license header source does not exist.
  #[error("License header file not found: {}", path.display())]
  HeaderNotFound { path: PathBuf },

  /// A root directory does not exist or is not a directory.
  #[error("Directory not found: {}", path.display())]
  DirectoryNotFound { path: PathBuf },

  /// Reading or writing a file failed.
  #[error("Failed to {operation} {}: {source}", path.display())]
  FileIo {
    path: PathBuf,
    operation: &'static str,
    source: std::io::Error,
  },

  /// Synchronize needs a canonical header to insert.
  #[error("At least one license header is required to synchronize")]
  EmptyHeaderSet,

  /// The file-name pattern of the selection criteria is not a valid glob.
  #[error("Invalid file name pattern '{pattern}': {source}")]
  InvalidPattern {
    pattern: String,
    source: glob::PatternError,
  },

  /// Walking a directory tree failed part way through.
  #[error("Failed to traverse {}: {source}", path.display())]
  Traversal { path: PathBuf, source: walkdir::Error },
}

impl SyncError {
  /// Builds a [`SyncError::FileIo`] for the given path and operation.
  pub fn io(path: impl Into<PathBuf>, operation: &'static str, source: std::io::Error) -> Self {
    Self::FileIo {
      path: path.into(),
      operation,
      source,
    }
  }

  /// Path associated with the error, if any.
  pub fn path(&self) -> Option<&std::path::Path> {
    match self {
      Self::HeaderNotFound { path }
      | Self::DirectoryNotFound { path }
      | Self::FileIo { path, .. }
      | Self::Traversal { path, .. } => Some(path),
      Self::EmptyHeaderSet | Self::InvalidPattern { .. } => None,
    }
  }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, SyncError>;

//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the processor.
//! Files are always read and written whole.

use std::path::Path;

use crate::error::{Result, SyncError};

/// A candidate file's full text at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord<'a> {
  pub path: &'a Path,
  pub content: String,
}

/// File I/O operations for the processor.
///
/// This struct provides static methods for reading and writing files.
pub struct FileIO;

impl FileIO {
  /// Reads the full content of a target file.
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::FileIo`] if the file cannot be read or is not valid
  /// UTF-8.
  pub fn read_record(path: &Path) -> Result<FileRecord<'_>> {
    let content = std::fs::read_to_string(path).map_err(|e| SyncError::io(path, "read", e))?;
    Ok(FileRecord { path, content })
  }

  /// Overwrites a target file with new content.
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::FileIo`] if the file cannot be written.
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| SyncError::io(path, "write", e))
  }
}

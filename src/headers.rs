//! # Headers Module
//!
//! Loading of license header sources into a [`HeaderSet`].
//!
//! The first header of a set is the canonical one: the text every target file
//! should end up containing. The remaining headers are legacy variants that
//! synchronization retires and removal strips.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SyncError};
use crate::verbose_log;

/// Ordered collection of header texts.
///
/// Order is significant: index 0 is the canonical header, indices 1.. are
/// legacy headers. Texts are kept exactly as read from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
  headers: Vec<String>,
}

impl HeaderSet {
  /// Creates a header set from already loaded texts.
  pub const fn new(headers: Vec<String>) -> Self {
    Self { headers }
  }

  /// Reads every source in order and returns them as a header set.
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::HeaderNotFound`] if a source does not exist, or
  /// [`SyncError::FileIo`] if it exists but cannot be read as UTF-8 text.
  /// No target file is touched in either case.
  pub fn load<P: AsRef<Path>>(sources: &[P]) -> Result<Self> {
    let mut headers = Vec::with_capacity(sources.len());
    for source in sources {
      headers.push(load_header(source.as_ref())?);
    }

    debug!("Loaded {} license header(s)", headers.len());
    Ok(Self { headers })
  }

  /// The canonical header, if the set is non-empty.
  pub fn canonical(&self) -> Option<&str> {
    self.headers.first().map(String::as_str)
  }

  /// The legacy headers, in the order they were given.
  pub fn legacy(&self) -> &[String] {
    self.headers.get(1..).unwrap_or_default()
  }

  /// All headers, canonical first.
  pub fn all(&self) -> &[String] {
    &self.headers
  }

  pub fn len(&self) -> usize {
    self.headers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.headers.is_empty()
  }
}

/// Reads a single header source in full, without trimming.
fn load_header(path: &Path) -> Result<String> {
  verbose_log!("Loading license header from: {}", path.display());

  if !path.exists() {
    return Err(SyncError::HeaderNotFound {
      path: PathBuf::from(path),
    });
  }

  let content = fs::read_to_string(path).map_err(|e| SyncError::io(path, "read license header", e))?;
  if content.is_empty() {
    verbose_log!("License header {} is empty", path.display());
  }

  Ok(content)
}

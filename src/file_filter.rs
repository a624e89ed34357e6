//! # File Filter Module
//!
//! This module contains components for filtering candidate files by their
//! base name: a glob pattern that names must match, and a list of names that
//! are always excluded. [`SelectionCriteria`] bundles both and builds the
//! composite filter used during traversal.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::trace;

use crate::error::{Result, SyncError};

/// Default file-name pattern.
pub const DEFAULT_PATTERN: &str = "*.py";

/// Base names excluded by default (package markers).
pub const DEFAULT_EXCLUDED_NAMES: &[&str] = &["__init__.py"];

/// Result of a file filtering operation.
#[derive(Debug)]
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that filter files based on certain criteria.
pub trait FileFilter {
  /// Determines whether a file should be processed.
  fn should_process(&self, path: &Path) -> FilterResult;
}

/// Returns the base name of a path, or an empty string when it has none.
fn base_name(path: &Path) -> std::borrow::Cow<'_, str> {
  path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
}

/// Filter that keeps files whose base name matches a glob pattern.
pub struct NamePatternFilter {
  pattern: glob::Pattern,
}

impl NamePatternFilter {
  /// Creates a new filter from a glob pattern such as `*.py`.
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::InvalidPattern`] if the pattern is not a valid glob.
  pub fn new(pattern: &str) -> Result<Self> {
    let pattern = glob::Pattern::new(pattern).map_err(|source| SyncError::InvalidPattern {
      pattern: pattern.to_string(),
      source,
    })?;
    Ok(Self { pattern })
  }
}

impl FileFilter for NamePatternFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    if self.pattern.matches(&base_name(path)) {
      FilterResult::process()
    } else {
      FilterResult::skip(format!("does not match {}", self.pattern))
    }
  }
}

/// Filter that rejects files whose base name is in an exclusion set.
pub struct ExcludedNameFilter {
  names: BTreeSet<String>,
}

impl ExcludedNameFilter {
  pub const fn new(names: BTreeSet<String>) -> Self {
    Self { names }
  }
}

impl FileFilter for ExcludedNameFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    let name = base_name(path);
    if self.names.contains(&*name) {
      FilterResult::skip("excluded name")
    } else {
      FilterResult::process()
    }
  }
}

/// Filter that combines multiple filters.
///
/// A file is processed only if every inner filter accepts it; the first
/// rejection wins.
#[derive(Default)]
pub struct CompositeFilter {
  filters: Vec<Box<dyn FileFilter>>,
}

impl CompositeFilter {
  /// Creates a new CompositeFilter with the given filters.
  pub fn new(filters: Vec<Box<dyn FileFilter>>) -> Self {
    Self { filters }
  }

  /// Adds a filter to this CompositeFilter.
  pub fn add_filter(&mut self, filter: Box<dyn FileFilter>) {
    self.filters.push(filter);
  }
}

impl FileFilter for CompositeFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    for filter in &self.filters {
      let result = filter.should_process(path);
      if !result.should_process {
        trace!(
          "Skipping: {} ({})",
          path.display(),
          result.reason.as_deref().unwrap_or("filtered")
        );
        return result;
      }
    }
    FilterResult::process()
  }
}

/// Which files under the root directories are candidates.
///
/// Both parts apply to base names only and are applied uniformly across every
/// root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCriteria {
  /// Glob pattern the base name must match.
  pub pattern: String,
  /// Base names that are never selected, even if they match the pattern.
  pub excluded_names: BTreeSet<String>,
}

impl Default for SelectionCriteria {
  fn default() -> Self {
    Self {
      pattern: DEFAULT_PATTERN.to_string(),
      excluded_names: DEFAULT_EXCLUDED_NAMES.iter().map(|s| (*s).to_string()).collect(),
    }
  }
}

impl SelectionCriteria {
  /// Creates criteria from a pattern and a list of excluded names.
  pub fn new(pattern: impl Into<String>, excluded_names: impl IntoIterator<Item = String>) -> Self {
    Self {
      pattern: pattern.into(),
      excluded_names: excluded_names.into_iter().collect(),
    }
  }

  /// Builds the filter that implements these criteria.
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::InvalidPattern`] if the pattern is not a valid glob.
  pub fn build_filter(&self) -> Result<CompositeFilter> {
    let filters: Vec<Box<dyn FileFilter>> = vec![
      Box::new(ExcludedNameFilter::new(self.excluded_names.clone())),
      Box::new(NamePatternFilter::new(&self.pattern)?),
    ];
    Ok(CompositeFilter::new(filters))
  }
}

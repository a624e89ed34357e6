//! # File Collector Module
//!
//! This module walks root directories and yields the files that pass the
//! selection filter.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, SyncError};
use crate::file_filter::{CompositeFilter, FileFilter, SelectionCriteria};

/// File collector for directory traversal.
///
/// The `FileCollector` handles:
/// - Validating root directories
/// - Walking each root recursively
/// - Applying the selection filter to every file found
pub struct FileCollector {
  filter: CompositeFilter,
}

impl FileCollector {
  /// Creates a new FileCollector for the given selection criteria.
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::InvalidPattern`] if the criteria's pattern is not a
  /// valid glob.
  pub fn new(criteria: &SelectionCriteria) -> Result<Self> {
    Ok(Self {
      filter: criteria.build_filter()?,
    })
  }

  /// Starts a lazy walk over every root.
  ///
  /// All roots are checked before anything is yielded, so a missing root
  /// fails the whole selection. Each call starts a fresh walk.
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::DirectoryNotFound`] if a root does not exist or is
  /// not a directory.
  pub fn select<P: AsRef<Path>>(&self, roots: &[P]) -> Result<SelectedFiles<'_>> {
    let mut validated = Vec::with_capacity(roots.len());
    for root in roots {
      let root = root.as_ref();
      if !root.is_dir() {
        return Err(SyncError::DirectoryNotFound {
          path: root.to_path_buf(),
        });
      }
      validated.push(root.to_path_buf());
    }

    Ok(SelectedFiles {
      filter: &self.filter,
      roots: validated.into_iter(),
      current: None,
      seen: HashSet::new(),
    })
  }

  /// Collects the whole selection eagerly.
  ///
  /// # Errors
  ///
  /// Returns the first error met while validating or walking the roots.
  pub fn collect_files<P: AsRef<Path>>(&self, roots: &[P]) -> Result<Vec<PathBuf>> {
    let start_time = std::time::Instant::now();
    let files = self.select(roots)?.collect::<Result<Vec<_>>>()?;

    debug!(
      "Found {} files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );

    Ok(files)
  }
}

/// Lazy sequence of selected file paths.
///
/// Traversal order within a directory is by file name so that logs are
/// reproducible; nothing else depends on it. A file reachable from more than
/// one root is yielded once.
pub struct SelectedFiles<'a> {
  filter: &'a CompositeFilter,
  roots: std::vec::IntoIter<PathBuf>,
  current: Option<walkdir::IntoIter>,
  seen: HashSet<PathBuf>,
}

impl Iterator for SelectedFiles<'_> {
  type Item = Result<PathBuf>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let Some(walker) = self.current.as_mut() else {
        let root = self.roots.next()?;
        debug!("Scanning directory: {}", root.display());
        self.current = Some(WalkDir::new(root).sort_by_file_name().into_iter());
        continue;
      };

      let entry = match walker.next() {
        None => {
          self.current = None;
          continue;
        }
        Some(Err(e)) => {
          let path = e.path().map(Path::to_path_buf).unwrap_or_default();
          return Some(Err(SyncError::Traversal { path, source: e }));
        }
        Some(Ok(entry)) => entry,
      };

      if !is_regular_file(&entry) {
        continue;
      }

      let path = entry.into_path();
      if !self.filter.should_process(&path).should_process {
        continue;
      }

      let key = std::fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
      if self.seen.insert(key) {
        return Some(Ok(path));
      }
      trace!("Skipping: {} (already selected)", path.display());
    }
  }
}

/// Regular files, and symlinks that resolve to regular files.
fn is_regular_file(entry: &DirEntry) -> bool {
  let file_type = entry.file_type();
  file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

//! # Processor Module
//!
//! This module contains the core functionality for synchronizing license
//! headers across directory trees.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - Whole-file reading and writing
//! - [`content_transformer`] - Header insertion and removal on text
//! - [`file_collector`] - Directory traversal and file selection
//!
//! The [`Processor`] struct is the main entry point, orchestrating the
//! submodules into the two operations: [`Processor::synchronize`] and
//! [`Processor::remove`]. Files are handled one at a time; each is read,
//! transformed and written before the next is considered.

mod content_transformer;
mod file_collector;
mod file_io;

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub use content_transformer::{ContentTransformer, prepend_header, strip_headers};
pub use file_collector::{FileCollector, SelectedFiles};
pub use file_io::{FileIO, FileRecord};
use tracing::{debug, trace, warn};

use crate::diff::DiffManager;
use crate::error::{Result, SyncError};
use crate::file_filter::SelectionCriteria;
use crate::header_detection::{HeaderDetector, VerbatimDetector};
use crate::headers::HeaderSet;
use crate::report::{FileAction, FileReport, Operation, RunReport, RunSummary};
use crate::verbose_log;

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub headers: HeaderSet,
  pub criteria: SelectionCriteria,

  // Behavior flags
  /// Compute every change but never write
  pub dry_run: bool,
  /// Record per-file failures and carry on instead of aborting the run
  pub keep_going: bool,

  // Optional components
  pub diff_manager: Option<DiffManager>,
  pub header_detector: Option<Box<dyn HeaderDetector>>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     dry_run: true,
  ///     ..ProcessorConfig::new(headers)
  /// }
  /// ```
  pub fn new(headers: HeaderSet) -> Self {
    Self {
      headers,
      criteria: SelectionCriteria::default(),
      dry_run: false,
      keep_going: false,
      diff_manager: None,
      header_detector: None,
    }
  }
}

/// Processor for synchronizing and removing license headers.
///
/// The `Processor` is responsible for:
/// - Selecting target files under the root directories
/// - Deciding whether each file already carries the canonical header
/// - Replacing legacy headers with the canonical one
/// - Stripping headers from files
/// - Writing files back only when their content changes
/// - Collecting a report for every selected file
pub struct Processor {
  /// Header transforms for the loaded header set
  content_transformer: ContentTransformer,

  /// File collector for directory traversal
  file_collector: FileCollector,

  /// Presence test for the canonical header
  header_detector: Box<dyn HeaderDetector>,

  /// Manager for handling diff creation and rendering
  diff_manager: DiffManager,

  /// Whether to leave files untouched
  dry_run: bool,

  /// Whether per-file failures are recorded instead of aborting
  keep_going: bool,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::InvalidPattern`] if the selection pattern is not a
  /// valid glob.
  pub fn new(config: ProcessorConfig) -> Result<Self> {
    let file_collector = FileCollector::new(&config.criteria)?;

    let header_detector = config
      .header_detector
      .unwrap_or_else(|| Box::new(VerbatimDetector::new()));

    if config.headers.canonical().is_some_and(str::is_empty) {
      warn!("The canonical license header is empty; synchronize will leave every file unchanged");
    }

    Ok(Self {
      content_transformer: ContentTransformer::new(config.headers),
      file_collector,
      header_detector,
      diff_manager: config.diff_manager.unwrap_or_default(),
      dry_run: config.dry_run,
      keep_going: config.keep_going,
    })
  }

  /// Loads the header sources and creates a processor with default options.
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::HeaderNotFound`] or [`SyncError::FileIo`] if a
  /// header source cannot be loaded.
  pub fn from_sources<P: AsRef<Path>>(header_sources: &[P], criteria: SelectionCriteria) -> Result<Self> {
    let headers = HeaderSet::load(header_sources)?;
    Self::new(ProcessorConfig {
      criteria,
      ..ProcessorConfig::new(headers)
    })
  }

  /// The header set this processor applies.
  pub const fn headers(&self) -> &HeaderSet {
    self.content_transformer.headers()
  }

  /// Selected files under the given roots.
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::DirectoryNotFound`] if a root is missing.
  pub fn select<'a, P: AsRef<Path>>(&'a self, roots: &[P]) -> Result<SelectedFiles<'a>> {
    self.file_collector.select(roots)
  }

  /// Ensures every selected file carries the canonical header.
  ///
  /// Files that already contain the canonical header verbatim are not
  /// touched. Every other file has its legacy headers removed and the
  /// canonical header prepended.
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::EmptyHeaderSet`] if no header was loaded,
  /// [`SyncError::DirectoryNotFound`] if a root is missing, and, unless
  /// `keep_going` is set, the first read or write failure.
  pub fn synchronize<P: AsRef<Path>>(&self, roots: &[P]) -> Result<RunReport> {
    if self.headers().is_empty() {
      return Err(SyncError::EmptyHeaderSet);
    }
    self.run(Operation::Synchronize, roots)
  }

  /// Strips every header, canonical included, from every selected file.
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::DirectoryNotFound`] if a root is missing and,
  /// unless `keep_going` is set, the first read or write failure.
  pub fn remove<P: AsRef<Path>>(&self, roots: &[P]) -> Result<RunReport> {
    self.run(Operation::Remove, roots)
  }

  fn run<P: AsRef<Path>>(&self, operation: Operation, roots: &[P]) -> Result<RunReport> {
    let start_time = Instant::now();
    let mut files = Vec::new();

    for selected in self.select(roots)? {
      let outcome = match selected {
        Ok(path) => match self.process_file(operation, &path) {
          Ok(action) => Ok(FileReport::new(path, action)),
          Err(e) => self.record_failure(path, e),
        },
        Err(e) => {
          let path = e.path().map(Path::to_path_buf).unwrap_or_default();
          self.record_failure(path, e)
        }
      };

      match outcome {
        Ok(report) => files.push(report),
        Err(e) => {
          self.log_interrupted(operation, &files);
          return Err(e);
        }
      }
    }

    let summary = RunSummary::from_reports(operation, self.dry_run, &files, start_time.elapsed());
    debug!(
      "{}: {} scanned, {} changed, {} failed",
      operation, summary.files_scanned, summary.files_changed, summary.files_failed
    );

    Ok(RunReport { summary, files })
  }

  /// Turns a per-file error into a failed report, or propagates it when
  /// running fail-fast.
  fn record_failure(&self, path: PathBuf, error: SyncError) -> Result<FileReport> {
    if !self.keep_going {
      return Err(error);
    }
    warn!("Skipping {}: {}", path.display(), error);
    Ok(FileReport::failed(path, error))
  }

  /// Reports the progress of a run that stopped at its first failure.
  ///
  /// Files listed here were already written (unless in dry-run mode) and a
  /// re-run picks up where this one stopped.
  fn log_interrupted(&self, operation: Operation, files: &[FileReport]) {
    let changed: Vec<&FileReport> = files.iter().filter(|f| f.action.changes_content()).collect();
    warn!(
      "Stopped {} after {} scanned, {} {}",
      operation,
      files.len(),
      changed.len(),
      if self.dry_run { "to change" } else { "changed" }
    );
    for file in changed {
      warn!("  {}", file.path.display());
    }
  }

  /// Applies one operation to a single file.
  ///
  /// The file is written only when its content changes and the processor is
  /// not in dry-run mode.
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::FileIo`] if the file cannot be read or written, and
  /// [`SyncError::EmptyHeaderSet`] when synchronizing without headers.
  pub fn process_file(&self, operation: Operation, path: &Path) -> Result<FileAction> {
    trace!("Processing file: {}", path.display());
    let record = FileIO::read_record(path)?;

    let (new_content, action) = self.transform(operation, &record.content)?;
    if let Cow::Owned(ref new_content) = new_content {
      if self.diff_manager.is_active()
        && let Err(e) = self.diff_manager.display_diff(path, &record.content, new_content)
      {
        warn!("Failed to render diff for {}: {:#}", path.display(), e);
      }

      if self.dry_run {
        verbose_log!("Would {} license header for: {}", operation, path.display());
      } else {
        FileIO::write_file(path, new_content)?;
        verbose_log!("Changed license header for: {}", path.display());
      }
    }

    Ok(action)
  }

  /// Computes the new content of a file for the given operation.
  ///
  /// Content that needs no change is returned borrowed, together with
  /// [`FileAction::Unchanged`].
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::EmptyHeaderSet`] when synchronizing without headers.
  pub fn transform<'a>(&self, operation: Operation, content: &'a str) -> Result<(Cow<'a, str>, FileAction)> {
    match operation {
      Operation::Synchronize => {
        let canonical = self.headers().canonical().ok_or(SyncError::EmptyHeaderSet)?;
        if self.header_detector.has_header(canonical, content) {
          return Ok((Cow::Borrowed(content), FileAction::Unchanged));
        }

        let (new_content, replaced) = self.content_transformer.insert_header(content)?;
        let action = if replaced {
          FileAction::Replaced
        } else {
          FileAction::Inserted
        };
        Ok((Cow::Owned(new_content), action))
      }
      Operation::Remove => {
        let stripped = self.content_transformer.strip_all(content);
        let action = match stripped {
          Cow::Borrowed(_) => FileAction::Unchanged,
          Cow::Owned(_) => FileAction::Stripped,
        };
        Ok((stripped, action))
      }
    }
  }
}

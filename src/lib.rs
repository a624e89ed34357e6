//! # headersync
//!
//! A tool that keeps one canonical license header across a tree of source
//! files.
//!
//! `headersync` inserts the canonical header where it is missing, replaces
//! retired header variants with it, and can strip headers entirely. Headers
//! are opaque blocks of text: presence is an exact substring test and removal
//! is literal substring deletion, so no comment syntax is ever parsed.
//!
//! ## Features
//!
//! * Recursively select files by name pattern, skipping excluded names
//! * Replace legacy headers with the canonical one in a single pass
//! * Strip every listed header from every selected file
//! * Idempotent: re-running a finished or interrupted run is always safe
//! * Dry-run mode with diffs, and JSON run reports
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use headersync::file_filter::SelectionCriteria;
//! use headersync::processor::Processor;
//!
//! fn main() -> anyhow::Result<()> {
//!     // NEW_HEADER.txt is canonical; OLD_HEADER.txt is retired
//!     let processor = Processor::from_sources(
//!         &["NEW_HEADER.txt", "OLD_HEADER.txt"],
//!         SelectionCriteria::new("*.py", vec!["__init__.py".to_string()]),
//!     )?;
//!
//!     let report = processor.synchronize(&["src", "tests"])?;
//!     println!(
//!         "Scanned {} files, changed {}",
//!         report.summary.files_scanned, report.summary.files_changed
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Selection, header decisions and rewriting
//! * [`headers`] - Loading header texts
//! * [`file_filter`] - Selection criteria and name filters
//! * [`logging`] - Logging utilities for verbose output
//!
//! [`processor`]: crate::processor
//! [`headers`]: crate::headers
//! [`file_filter`]: crate::file_filter
//! [`logging`]: crate::logging

pub mod config;
pub mod diff;
pub mod error;
pub mod file_filter;
pub mod header_detection;
pub mod headers;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;

use std::path::Path;

pub use error::{Result, SyncError};
use file_filter::SelectionCriteria;
use processor::Processor;
use report::RunSummary;

/// Synchronizes the canonical header (the first source) into every `*.py`
/// file under `roots`, replacing the legacy headers (the other sources).
///
/// Uses the default selection criteria and stops at the first failure.
///
/// # Errors
///
/// See [`Processor::synchronize`]; header sources are loaded first, so a
/// missing header fails before any file is touched.
pub fn synchronize<H: AsRef<Path>, D: AsRef<Path>>(header_sources: &[H], roots: &[D]) -> Result<RunSummary> {
  let processor = Processor::from_sources(header_sources, SelectionCriteria::default())?;
  Ok(processor.synchronize(roots)?.summary)
}

/// Strips every header source's text from every `*.py` file under `roots`.
///
/// Uses the default selection criteria and stops at the first failure.
///
/// # Errors
///
/// See [`Processor::remove`].
pub fn remove<H: AsRef<Path>, D: AsRef<Path>>(header_sources: &[H], roots: &[D]) -> Result<RunSummary> {
  let processor = Processor::from_sources(header_sources, SelectionCriteria::default())?;
  Ok(processor.remove(roots)?.summary)
}

//! # Header Detection Module
//!
//! This module contains the interfaces and implementations for deciding
//! whether a file already carries the canonical header. It allows the
//! presence test to be replaced without modifying the processor.

/// Trait for header detectors.
///
/// Implementations decide whether `content` already contains `header`.
pub trait HeaderDetector {
  /// Checks if the content already has the header.
  ///
  /// # Parameters
  ///
  /// * `header` - The canonical header text
  /// * `content` - The full file content
  ///
  /// # Returns
  ///
  /// `true` if the header is considered present, `false` otherwise.
  fn has_header(&self, header: &str, content: &str) -> bool;
}

/// Default detector: exact substring containment.
///
/// The comparison is case-sensitive and whitespace-sensitive, anywhere in the
/// file. Headers are treated as opaque text, so no comment syntax is parsed.
#[derive(Debug, Default, Clone, Copy)]
pub struct VerbatimDetector;

impl VerbatimDetector {
  pub const fn new() -> Self {
    VerbatimDetector
  }
}

impl HeaderDetector for VerbatimDetector {
  fn has_header(&self, header: &str, content: &str) -> bool {
    content.contains(header)
  }
}

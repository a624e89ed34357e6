mod common;

use std::fs;

use anyhow::Result;
use common::{NEW_HEADER, TestTree, write_file};
use headersync::SyncError;
use headersync::file_filter::SelectionCriteria;
use headersync::headers::HeaderSet;
use headersync::processor::{Processor, ProcessorConfig};
use headersync::report::FileAction;
use tempfile::tempdir;

#[test]
fn test_missing_header_fails_before_touching_files() -> Result<()> {
  let tree = TestTree::new()?;
  let missing = tree.root().join("headers/missing.txt");

  let err = headersync::synchronize(&[tree.new_header(), missing.clone()], &[tree.src()]).unwrap_err();

  assert!(matches!(err, SyncError::HeaderNotFound { ref path } if *path == missing));
  assert_eq!(tree.read("src/app.py")?, "import os\n\nprint(os.getcwd())\n");

  Ok(())
}

#[test]
fn test_missing_directory_is_an_error() -> Result<()> {
  let tree = TestTree::new()?;
  let missing = tree.root().join("does-not-exist");

  let err = headersync::synchronize(&tree.headers(), &[tree.src(), missing.clone()]).unwrap_err();

  assert!(matches!(err, SyncError::DirectoryNotFound { ref path } if *path == missing));
  // Roots are validated before any file is processed
  assert_eq!(tree.read("src/app.py")?, "import os\n\nprint(os.getcwd())\n");

  Ok(())
}

#[test]
fn test_remove_missing_directory_is_an_error() -> Result<()> {
  let tree = TestTree::new()?;
  let err = headersync::remove(&tree.headers(), &[tree.root().join("nope")]).unwrap_err();

  assert!(matches!(err, SyncError::DirectoryNotFound { .. }));

  Ok(())
}

#[test]
fn test_synchronize_without_headers() -> Result<()> {
  let tree = TestTree::new()?;
  let no_headers: [&str; 0] = [];

  let err = headersync::synchronize(&no_headers, &[tree.src()]).unwrap_err();

  assert!(matches!(err, SyncError::EmptyHeaderSet));

  Ok(())
}

#[test]
fn test_unreadable_file_fails_fast() -> Result<()> {
  let tree = TestTree::new()?;
  fs::write(tree.root().join("src/binary.py"), [0xFF, 0xFE, 0x00, 0x00])?;

  let err = headersync::synchronize(&tree.headers(), &[tree.src()]).unwrap_err();

  match err {
    SyncError::FileIo { path, operation, .. } => {
      assert!(path.ends_with("binary.py"));
      assert_eq!(operation, "read");
    }
    other => panic!("unexpected error: {other}"),
  }

  Ok(())
}

#[test]
fn test_unreadable_file_skipped_with_keep_going() -> Result<()> {
  let tree = TestTree::new()?;
  fs::write(tree.root().join("src/binary.py"), [0xFF, 0xFE, 0x00, 0x00])?;

  let processor = Processor::new(ProcessorConfig {
    keep_going: true,
    ..ProcessorConfig::new(HeaderSet::load(&tree.headers())?)
  })?;
  let report = processor.synchronize(&[tree.src()])?;

  assert_eq!(report.summary.files_scanned, 5);
  assert_eq!(report.summary.files_failed, 1);
  assert_eq!(report.summary.files_changed, 3);

  let failed: Vec<_> = report.failed_files().collect();
  assert_eq!(failed.len(), 1);
  assert!(failed[0].path.ends_with("binary.py"));
  assert!(failed[0].error.is_some());

  // The rest of the tree was still processed
  assert!(tree.read("src/app.py")?.starts_with(NEW_HEADER));

  Ok(())
}

/// Links `src/aa_version.py` to `/proc/version`, a file that reads fine but
/// rejects writes, even for root.
#[cfg(target_os = "linux")]
fn link_unwritable_file(tree: &TestTree) -> Result<Option<std::path::PathBuf>> {
  let target = std::path::Path::new("/proc/version");
  if !target.is_file() {
    return Ok(None);
  }
  let link = tree.root().join("src/aa_version.py");
  std::os::unix::fs::symlink(target, &link)?;
  Ok(Some(link))
}

#[cfg(target_os = "linux")]
#[test]
fn test_unwritable_file_fails_fast() -> Result<()> {
  let tree = TestTree::new()?;
  let Some(link) = link_unwritable_file(&tree)? else {
    return Ok(());
  };

  let err = headersync::synchronize(&tree.headers(), &[tree.src()]).unwrap_err();

  match err {
    SyncError::FileIo { path, operation, .. } => {
      assert_eq!(path, link);
      assert_eq!(operation, "write");
    }
    other => panic!("unexpected error: {other}"),
  }
  // Files after the failing one are never reached
  assert_eq!(tree.read("src/app.py")?, "import os\n\nprint(os.getcwd())\n");

  Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn test_unwritable_file_skipped_with_keep_going() -> Result<()> {
  let tree = TestTree::new()?;
  let Some(link) = link_unwritable_file(&tree)? else {
    return Ok(());
  };

  let processor = Processor::new(ProcessorConfig {
    keep_going: true,
    ..ProcessorConfig::new(HeaderSet::load(&tree.headers())?)
  })?;
  let report = processor.synchronize(&[tree.src()])?;

  assert_eq!(report.summary.files_scanned, 5);
  assert_eq!(report.summary.files_failed, 1);
  assert_eq!(report.summary.files_changed, 3);

  let failed: Vec<_> = report.failed_files().collect();
  assert_eq!(failed.len(), 1);
  assert_eq!(failed[0].path, link);
  assert_eq!(failed[0].action, FileAction::Failed);
  assert!(failed[0].error.as_deref().is_some_and(|e| e.contains("write")));

  // The failing file comes first; the rest of the tree was still processed
  assert!(tree.read("src/app.py")?.starts_with(NEW_HEADER));
  assert!(tree.read("src/pkg/util.py")?.starts_with(NEW_HEADER));

  Ok(())
}

#[test]
fn test_empty_target_file() -> Result<()> {
  let temp_dir = tempdir()?;
  let header = write_file(temp_dir.path(), "header.txt", "# H")?;
  write_file(temp_dir.path(), "src/empty.py", "")?;

  headersync::synchronize(&[header], &[temp_dir.path().join("src")])?;

  assert_eq!(fs::read_to_string(temp_dir.path().join("src/empty.py"))?, "# H\n\n");

  Ok(())
}

#[test]
fn test_header_with_trailing_newline() -> Result<()> {
  let temp_dir = tempdir()?;
  let header = write_file(temp_dir.path(), "header.txt", "# H\n")?;
  write_file(temp_dir.path(), "src/app.py", "import os\n")?;

  headersync::synchronize(&[header.clone()], &[temp_dir.path().join("src")])?;
  assert_eq!(fs::read_to_string(temp_dir.path().join("src/app.py"))?, "# H\n\nimport os\n");

  // Still recognized on the next run
  let summary = headersync::synchronize(&[header], &[temp_dir.path().join("src")])?;
  assert_eq!(summary.files_changed, 0);

  Ok(())
}

#[test]
fn test_header_text_inside_code_is_also_removed() -> Result<()> {
  // Headers are opaque text, so a copy inside a string literal goes too.
  let temp_dir = tempdir()?;
  let header = write_file(temp_dir.path(), "header.txt", "# H")?;
  write_file(temp_dir.path(), "src/app.py", "# H\nprint('# H')\n")?;

  headersync::remove(&[header], &[temp_dir.path().join("src")])?;

  assert_eq!(fs::read_to_string(temp_dir.path().join("src/app.py"))?, "\nprint('')\n");

  Ok(())
}

#[test]
fn test_unicode_content_preserved() -> Result<()> {
  let temp_dir = tempdir()?;
  let header = write_file(temp_dir.path(), "header.txt", "# © Ünïcødé Corp")?;
  write_file(temp_dir.path(), "src/app.py", "print('こんにちは')\n")?;

  headersync::synchronize(&[header], &[temp_dir.path().join("src")])?;

  assert_eq!(
    fs::read_to_string(temp_dir.path().join("src/app.py"))?,
    "# © Ünïcødé Corp\n\nprint('こんにちは')\n"
  );

  Ok(())
}

#[test]
fn test_invalid_pattern_is_rejected() -> Result<()> {
  let temp_dir = tempdir()?;
  let header = write_file(temp_dir.path(), "header.txt", "# H")?;

  let result = Processor::from_sources(&[header], SelectionCriteria::new("[*.py", Vec::new()));

  assert!(matches!(result, Err(SyncError::InvalidPattern { .. })));

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_symlinked_file_is_followed() -> Result<()> {
  let temp_dir = tempdir()?;
  let header = write_file(temp_dir.path(), "header.txt", "# H")?;
  let real = write_file(temp_dir.path(), "real/app.py", "x = 1\n")?;
  fs::create_dir_all(temp_dir.path().join("src"))?;
  std::os::unix::fs::symlink(&real, temp_dir.path().join("src/link.py"))?;

  let headers = HeaderSet::load(&[header])?;
  let report = Processor::new(ProcessorConfig::new(headers))?.synchronize(&[temp_dir.path().join("src")])?;

  assert_eq!(report.files.len(), 1);
  assert_eq!(report.files[0].action, FileAction::Inserted);
  assert_eq!(fs::read_to_string(&real)?, "# H\n\nx = 1\n");

  Ok(())
}

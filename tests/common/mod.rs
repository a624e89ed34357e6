#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

pub const NEW_HEADER: &str = "# Copyright (c) 2025 Example Corp\n# SPDX-License-Identifier: MIT";
pub const OLD_HEADER: &str = "# Copyright (c) 2019 Example Inc\n# All rights reserved.";

/// Writes a file relative to `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<PathBuf> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}

/// Reads a file relative to `root`.
pub fn read_file(root: &Path, relative: &str) -> Result<String> {
  let path = root.join(relative);
  fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Test workspace with header files under `headers/` and a small Python
/// package under `src/`.
///
/// - `src/app.py` has no header
/// - `src/legacy.py` carries the old header
/// - `src/current.py` already carries the new header
/// - `src/pkg/__init__.py` is excluded by default
/// - `src/pkg/util.py` has no header
/// - `src/README.md` does not match the default pattern
pub struct TestTree {
  pub dir: TempDir,
}

impl TestTree {
  pub fn new() -> Result<Self> {
    let dir = tempfile::tempdir()?;
    let root = dir.path();

    write_file(root, "headers/new.txt", NEW_HEADER)?;
    write_file(root, "headers/old.txt", OLD_HEADER)?;

    write_file(root, "src/app.py", "import os\n\nprint(os.getcwd())\n")?;
    write_file(root, "src/legacy.py", &format!("{OLD_HEADER}\n\ndef legacy():\n    pass\n"))?;
    write_file(root, "src/current.py", &format!("{NEW_HEADER}\n\nVALUE = 1\n"))?;
    write_file(root, "src/pkg/__init__.py", "")?;
    write_file(root, "src/pkg/util.py", "def util():\n    return 42\n")?;
    write_file(root, "src/README.md", "# Readme\n")?;

    Ok(Self { dir })
  }

  pub fn root(&self) -> &Path {
    self.dir.path()
  }

  pub fn src(&self) -> PathBuf {
    self.root().join("src")
  }

  pub fn new_header(&self) -> PathBuf {
    self.root().join("headers/new.txt")
  }

  pub fn old_header(&self) -> PathBuf {
    self.root().join("headers/old.txt")
  }

  pub fn headers(&self) -> Vec<PathBuf> {
    vec![self.new_header(), self.old_header()]
  }

  pub fn read(&self, relative: &str) -> Result<String> {
    read_file(self.root(), relative)
  }
}

//! Temporary `$GITHUB_OUTPUT` files for testing step output reporting

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// An empty step output file inside a temporary directory
pub struct GitHubOutputGuard {
  /// Kept alive so the directory is removed when the guard drops
  pub temp_dir: TempDir,
  path: PathBuf,
}

impl Default for GitHubOutputGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl GitHubOutputGuard {
  /// Create an empty output file
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join("github_output");
    fs::write(&path, "").expect("Failed to create GITHUB_OUTPUT file");

    Self { temp_dir, path }
  }

  /// Path to hand to the code under test as `$GITHUB_OUTPUT`
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Everything written to the output file so far
  pub fn contents(&self) -> String {
    fs::read_to_string(&self.path).expect("Failed to read GITHUB_OUTPUT file")
  }
}

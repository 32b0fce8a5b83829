//! Test fixtures for laying out config files on disk.

use async_trait::async_trait;
use rk_core::config::{ConfigFileResolver, ConfigResult};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A project document.
#[allow(dead_code)]
pub const PROJECT_YAML: &str = r#"kind: Project
name: test-project
environments:
  - name: local
"#;

/// A module document using both dependency forms.
#[allow(dead_code)]
pub const MODULE_YAML: &str = r#"kind: Module
name: frontend
type: container
description: The web frontend
build:
  dependencies:
    - a
    - name: b
      copy:
        - source: x
fooBar: 42
"#;

/// Create a temporary directory holding the given config files.
///
/// `files` maps a path relative to the temp root (including the file name)
/// to its content. Parent directories are created as needed.
///
/// Returns a TempDir that must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_tree(files: &[(&str, &str)]) -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;

    for (relative, content) in files {
        let path = temp_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
    }

    Ok(temp_dir)
}

/// Create nested directories under `root` and return the deepest one.
#[allow(dead_code)]
pub fn create_nested_dir(root: &Path, relative: &str) -> std::io::Result<PathBuf> {
    let path = root.join(relative);
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

/// Resolves `garden.yml` inside `root` only.
///
/// Directories above `root` resolve to a file that never exists, so upward
/// searches cannot pick up config files outside the test's temp directory.
#[allow(dead_code)]
pub struct ScopedResolver {
    pub root: PathBuf,
}

#[async_trait]
impl ConfigFileResolver for ScopedResolver {
    async fn resolve(&self, dir: &Path) -> ConfigResult<PathBuf> {
        if dir.starts_with(&self.root) {
            Ok(dir.join("garden.yml"))
        } else {
            Ok(self.root.join(".outside").join("garden.yml"))
        }
    }
}

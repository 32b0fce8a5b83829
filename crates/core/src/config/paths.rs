//! Path helpers shared by the loader, the dispatcher and the validator.

use std::path::{Path, PathBuf};

/// Makes `path` absolute against the current directory without touching the
/// filesystem. Falls back to the path as given if the current directory is
/// unavailable.
pub(crate) fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Renders a config file location relative to the project root, for use in
/// error messages (`services/api/garden.yml`).
///
/// Files outside the project root are shown with their full path.
pub(crate) fn relative_config_path(project_root: &Path, dir: &Path, config_path: &Path) -> String {
    let file_name = config_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "garden.yml".to_string());

    match dir.strip_prefix(project_root) {
        Ok(rel) if rel.as_os_str().is_empty() => file_name,
        Ok(rel) => rel.join(file_name).display().to_string(),
        Err(_) => config_path.display().to_string(),
    }
}

//! Upward search for the enclosing project.

use crate::config::error::ConfigResult;
use crate::config::loader::ConfigLoader;
use crate::config::paths::absolutize;
use rk_protocol::{ProjectResource, Resource};
use std::path::{Path, MAIN_SEPARATOR};
use tracing::{debug, warn};

impl ConfigLoader {
    /// Finds the project declaration closest to `start`.
    ///
    /// Starting at `start` and moving to its parent after every step, loads
    /// each directory's config file and returns the first Project found. The
    /// number of steps is bounded by the number of path separators in
    /// `start`, so the search never goes past the filesystem root. Levels are
    /// probed one at a time; the first match wins.
    ///
    /// # Arguments
    ///
    /// * `start` - Directory to start searching from
    /// * `allow_invalid` - Skip directories whose config fails to load
    ///   instead of aborting the search
    ///
    /// # Errors
    ///
    /// When `allow_invalid` is false, the first load error encountered is
    /// returned as is.
    pub async fn find_project_config(
        &self,
        start: &Path,
        allow_invalid: bool,
    ) -> ConfigResult<Option<ProjectResource>> {
        let start = absolutize(start);
        let max_steps = start.to_string_lossy().matches(MAIN_SEPARATOR).count();

        for dir in start.ancestors().take(max_steps) {
            debug!(dir = %dir.display(), "looking for project config");

            match self.load_config(dir, dir).await {
                Ok(resources) => {
                    if let Some(project) = resources.into_iter().find_map(Resource::into_project) {
                        debug!(path = %project.config_path.display(), "found project config");
                        return Ok(Some(project));
                    }
                }
                Err(err) if allow_invalid => {
                    warn!(dir = %dir.display(), error = %err, "skipping invalid config");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(None)
    }
}

/// Finds the project declaration closest to `start`, with default settings.
///
/// See [`ConfigLoader::find_project_config`].
pub async fn find_project_config(
    start: &Path,
    allow_invalid: bool,
) -> ConfigResult<Option<ProjectResource>> {
    ConfigLoader::default()
        .find_project_config(start, allow_invalid)
        .await
}

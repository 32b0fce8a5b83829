//! Config file lookup within a directory.

use crate::config::error::ConfigResult;
use async_trait::async_trait;
use rk_protocol::LoaderSettings;
use std::path::{Path, PathBuf};

/// Finds the config file belonging to a directory.
#[async_trait]
pub trait ConfigFileResolver: Send + Sync {
    /// Returns the path of `dir`'s config file.
    ///
    /// The returned file does not have to exist: the loader treats a file it
    /// cannot read as a directory without resources.
    async fn resolve(&self, dir: &Path) -> ConfigResult<PathBuf>;
}

/// Resolves config files by probing a list of candidate file names.
#[derive(Debug, Clone)]
pub struct FsConfigFileResolver {
    file_names: Vec<String>,
    primary: String,
}

impl FsConfigFileResolver {
    /// Probe the candidate names from `settings`, in order.
    pub fn new(settings: &LoaderSettings) -> Self {
        Self {
            file_names: settings.config_file_names.clone(),
            primary: settings.primary_file_name().to_string(),
        }
    }
}

impl Default for FsConfigFileResolver {
    fn default() -> Self {
        Self::new(&LoaderSettings::default())
    }
}

#[async_trait]
impl ConfigFileResolver for FsConfigFileResolver {
    async fn resolve(&self, dir: &Path) -> ConfigResult<PathBuf> {
        for name in &self.file_names {
            let candidate = dir.join(name);
            if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
                return Ok(candidate);
            }
        }

        // Nothing exists yet; point at the primary name
        Ok(dir.join(&self.primary))
    }
}

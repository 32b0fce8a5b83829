//! Loading of loader settings from TOML.

use crate::config::error::{ConfigError, ConfigResult};
use rk_protocol::LoaderSettings;
use std::io::ErrorKind;
use std::path::Path;

/// Reads [`LoaderSettings`] from a TOML file.
///
/// A missing file yields the default settings.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - The file exists but cannot be read
/// - The file is not valid TOML or has fields of the wrong type
pub async fn load_settings(path: &Path) -> ConfigResult<LoaderSettings> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(LoaderSettings::default()),
        Err(source) => {
            return Err(ConfigError::FileRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    toml::from_str(&content).map_err(|source| ConfigError::SettingsParse {
        path: path.to_path_buf(),
        source,
    })
}

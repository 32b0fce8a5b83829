//! Loader settings.
//!
//! Settings are optional; every field falls back to the built-in default
//! when omitted.

use crate::resource_models::DEFAULT_API_VERSION;
use serde::{Deserialize, Serialize};

/// Settings controlling how config files are found and defaulted.
///
/// # Example
///
/// ```toml
/// default-api-version = "garden.io/v0"
/// config-file-names = ["garden.yml", "garden.yaml"]
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct LoaderSettings {
    /// Stamped onto resources that omit `apiVersion`.
    pub default_api_version: String,

    /// Candidate config file names, tried in order within a directory.
    pub config_file_names: Vec<String>,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            default_api_version: DEFAULT_API_VERSION.to_string(),
            config_file_names: vec!["garden.yml".to_string(), "garden.yaml".to_string()],
        }
    }
}

impl LoaderSettings {
    /// The name used when a directory has no config file yet.
    pub fn primary_file_name(&self) -> &str {
        self.config_file_names
            .first()
            .map(String::as_str)
            .unwrap_or("garden.yml")
    }
}

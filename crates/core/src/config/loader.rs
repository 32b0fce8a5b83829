//! Config file loader.
//!
//! This module turns a directory's `garden.yml` into typed resources:
//! - Resolves and reads the config file
//! - Parses every YAML document in it
//! - Expands legacy scoped documents and dispatches each one by `kind`
//! - Rejects files declaring more than one project

use crate::config::dispatch::{is_falsy, prepare_resource, unwrap_scoped_document, PrepareContext};
use crate::config::error::{ConfigError, ConfigResult};
use crate::config::paths::absolutize;
use crate::config::resolver::{ConfigFileResolver, FsConfigFileResolver};
use crate::config::yaml::parse_documents;
use crate::schema::{BuiltinValidator, SchemaValidator};
use rk_protocol::{LoaderSettings, ProjectResource, Resource};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Loads resources from config files.
///
/// Holds the settings and the two collaborators the loader depends on: the
/// config file resolver and the schema validator. Both can be swapped out
/// with [`ConfigLoader::with_resolver`] and [`ConfigLoader::with_validator`].
///
/// Each call reads and parses from disk again; nothing is cached.
#[derive(Clone)]
pub struct ConfigLoader {
    settings: LoaderSettings,
    resolver: Arc<dyn ConfigFileResolver>,
    validator: Arc<dyn SchemaValidator>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(LoaderSettings::default())
    }
}

impl ConfigLoader {
    /// Create a loader with the filesystem resolver and the builtin validator.
    pub fn new(settings: LoaderSettings) -> Self {
        let resolver = FsConfigFileResolver::new(&settings);
        Self {
            settings,
            resolver: Arc::new(resolver),
            validator: Arc::new(BuiltinValidator),
        }
    }

    /// Replace the config file resolver.
    pub fn with_resolver(mut self, resolver: impl ConfigFileResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Replace the schema validator.
    pub fn with_validator(mut self, validator: impl SchemaValidator + 'static) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    /// Loads every resource declared in the config file of `path`.
    ///
    /// # Arguments
    ///
    /// * `project_root` - Root of the project, used to print config locations
    ///   relative to it in error messages
    /// * `path` - Directory whose config file should be loaded
    ///
    /// # Returns
    ///
    /// The resources in document order. A directory without a readable config
    /// file yields an empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The file is not valid YAML
    /// - A document is not a mapping, or has a missing or unknown `kind`
    /// - A module fails schema validation
    /// - The file declares more than one project
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use rk_core::config::loader::ConfigLoader;
    /// use std::path::Path;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let root = Path::new("/repo");
    /// let resources = ConfigLoader::default()
    ///     .load_config(root, &root.join("services/api"))
    ///     .await?;
    /// println!("Loaded {} resources", resources.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load_config(&self, project_root: &Path, path: &Path) -> ConfigResult<Vec<Resource>> {
        let project_root = absolutize(project_root);
        let path = absolutize(path);
        let config_path = self.resolver.resolve(&path).await?;

        let content = match tokio::fs::read_to_string(&config_path).await {
            Ok(content) => content,
            Err(err) => {
                debug!(path = %config_path.display(), error = %err, "no readable config file");
                return Ok(Vec::new());
            }
        };

        self.load_from_str(&content, &project_root, &path, &config_path)
    }

    /// Parses and prepares resources from config file content already in memory.
    ///
    /// `path` is the directory holding the file and `config_path` the file
    /// itself; both should be absolute.
    pub fn load_from_str(
        &self,
        content: &str,
        project_root: &Path,
        path: &Path,
        config_path: &Path,
    ) -> ConfigResult<Vec<Resource>> {
        let documents = parse_documents(content, config_path)?;

        let ctx = PrepareContext {
            path,
            config_path,
            project_root,
            default_api_version: &self.settings.default_api_version,
            validator: self.validator.as_ref(),
        };

        let resources = documents
            .into_iter()
            .filter(|document| !is_falsy(document))
            .flat_map(unwrap_scoped_document)
            .map(|document| prepare_resource(document, &ctx))
            .collect::<ConfigResult<Vec<_>>>()?;

        let projects: Vec<ProjectResource> = resources
            .iter()
            .filter_map(Resource::as_project)
            .cloned()
            .collect();

        if projects.len() > 1 {
            return Err(ConfigError::MultipleProjects {
                path: config_path.to_path_buf(),
                projects,
            });
        }

        debug!(
            path = %config_path.display(),
            resources = resources.len(),
            "loaded config file"
        );

        Ok(resources)
    }
}

/// Loads every resource declared in the config file of `path`, with default settings.
///
/// See [`ConfigLoader::load_config`].
pub async fn load_config(project_root: &Path, path: &Path) -> ConfigResult<Vec<Resource>> {
    ConfigLoader::default().load_config(project_root, path).await
}

//! Configuration loading and normalization.
//!
//! This module turns `garden.yml` files into typed resources and locates the
//! project enclosing a directory.

pub mod dispatch;
pub mod error;
pub mod loader;
pub mod locator;
pub mod module;
pub(crate) mod paths;
pub mod project;
pub mod resolver;
pub mod settings;
pub mod yaml;

pub use error::{ConfigError, ConfigResult, LintError, Violation};
pub use loader::{load_config, ConfigLoader};
pub use locator::find_project_config;
pub use resolver::{ConfigFileResolver, FsConfigFileResolver};

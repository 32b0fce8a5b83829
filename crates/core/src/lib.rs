//! # rk-core
//!
//! Config loading for resource-kit.
//!
//! This crate provides:
//! - Parsing of multi-document `garden.yml` files, with a lint pass for
//!   better syntax errors
//! - Dispatch of each document to a Project or Module resource
//! - Normalization and schema validation of Module resources
//! - Upward search for the project enclosing a directory
//!
//! ## Modules
//!
//! - [`config`]: Loading, dispatch, preparation and project lookup
//! - [`schema`]: Schema descriptions and the validator interface

pub mod config;
pub mod schema;

pub use config::{find_project_config, load_config, ConfigError, ConfigLoader, ConfigResult};

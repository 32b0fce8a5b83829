//! # rk-protocol
//!
//! Typed resource definitions for resource-kit.
//!
//! This crate defines the shape contract shared between the configuration
//! loader and everything downstream of it:
//! - Project and Module resources decoded from `garden.yml` documents
//! - Build dependency descriptors
//! - Loader settings read from a TOML file
//!
//! ## Modules
//!
//! - [`resource_models`]: The `Resource` union and its variants
//! - [`settings_models`]: Loader settings
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde and serde_yaml
//! - Independent compilation: No dependencies on other resource-kit crates

pub mod resource_models;
pub mod settings_models;

// Re-export all public types for convenience
pub use resource_models::*;
pub use settings_models::*;

//! Resource models decoded from `garden.yml` documents.
//!
//! A config file holds one or more YAML documents, each declaring either a
//! Project or a Module. Both are represented by the [`Resource`] union,
//! discriminated by the `kind` field.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::path::{Path, PathBuf};

/// API version stamped onto resources whose document omits `apiVersion`.
pub const DEFAULT_API_VERSION: &str = "garden.io/v0";

/// The set of resource kinds understood by the loader.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Project,
    Module,
}

impl ResourceKind {
    /// The literal value of the `kind` field for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Project => "Project",
            ResourceKind::Module => "Module",
        }
    }

    /// Parses a `kind` field value. Returns `None` for unknown kinds.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "Project" => Some(ResourceKind::Project),
            "Module" => Some(ResourceKind::Module),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed resource loaded from a config file.
///
/// Serialized with an internal `kind` tag, so the JSON/YAML form matches the
/// authored document shape:
///
/// ```yaml
/// kind: Module
/// name: frontend
/// type: container
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind")]
pub enum Resource {
    Project(ProjectResource),
    Module(ModuleResource),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Project(_) => ResourceKind::Project,
            Resource::Module(_) => ResourceKind::Module,
        }
    }

    /// The resource name. Projects are not validated here, so theirs may be absent.
    pub fn name(&self) -> Option<&str> {
        match self {
            Resource::Project(project) => project.name(),
            Resource::Module(module) => Some(&module.name),
        }
    }

    pub fn api_version(&self) -> &str {
        match self {
            Resource::Project(project) => &project.api_version,
            Resource::Module(module) => &module.api_version,
        }
    }

    /// Absolute path of the directory containing the config file.
    pub fn path(&self) -> &Path {
        match self {
            Resource::Project(project) => &project.path,
            Resource::Module(module) => &module.path,
        }
    }

    /// Absolute path of the config file itself.
    pub fn config_path(&self) -> &Path {
        match self {
            Resource::Project(project) => &project.config_path,
            Resource::Module(module) => &module.config_path,
        }
    }

    pub fn as_project(&self) -> Option<&ProjectResource> {
        match self {
            Resource::Project(project) => Some(project),
            Resource::Module(_) => None,
        }
    }

    pub fn into_project(self) -> Option<ProjectResource> {
        match self {
            Resource::Project(project) => Some(project),
            Resource::Module(_) => None,
        }
    }

    pub fn as_module(&self) -> Option<&ModuleResource> {
        match self {
            Resource::Module(module) => Some(module),
            Resource::Project(_) => None,
        }
    }
}

/// A project declaration.
///
/// Only `apiVersion`, `path` and `configPath` are lifted out of the document.
/// Every other field is carried through untouched in [`ProjectResource::fields`];
/// validating them is left to the consumers of the project config.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResource {
    pub api_version: String,

    /// Directory containing the config file.
    pub path: PathBuf,

    /// The config file the project was declared in.
    pub config_path: PathBuf,

    /// All remaining document fields (`name`, `environments`, ...).
    #[serde(flatten)]
    pub fields: Mapping,
}

impl ProjectResource {
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// Looks up a passthrough field by key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// A module declaration.
///
/// Structural fields are typed; everything else the user wrote lives in
/// [`ModuleResource::spec`] for the module type's handler to interpret.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleResource {
    pub api_version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_publish: Option<bool>,

    #[serde(default)]
    pub build: BuildConfig,

    pub config_path: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,

    /// File patterns to include in the module's sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,

    /// File patterns to exclude from the module's sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,

    pub name: String,

    /// Always empty at load time; filled in once the module is resolved.
    #[serde(default)]
    pub outputs: Mapping,

    pub path: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,

    #[serde(default)]
    pub service_configs: Vec<Value>,

    #[serde(default)]
    pub test_configs: Vec<Value>,

    #[serde(default)]
    pub task_configs: Vec<Value>,

    /// The module type, e.g. `container` or `exec`.
    #[serde(rename = "type")]
    pub module_type: String,

    /// User-defined fields, plus the normalized `build` section.
    #[serde(default)]
    pub spec: Mapping,
}

impl ModuleResource {
    /// Whether the module is switched off. Unset means enabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled.unwrap_or(false)
    }

    /// Names of the modules this module's build depends on, in declaration order.
    pub fn build_dependency_names(&self) -> impl Iterator<Item = &str> {
        self.build.dependencies.iter().map(|dep| dep.name.as_str())
    }
}

/// The `build` section of a module.
///
/// Keys other than `dependencies` belong to the module type and are kept in
/// [`BuildConfig::extra`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BuildConfig {
    #[serde(default)]
    pub dependencies: Vec<BuildDependency>,

    #[serde(flatten)]
    pub extra: Mapping,
}

/// A build dependency on another module.
///
/// In YAML this may be written as a bare module name:
///
/// ```yaml
/// build:
///   dependencies:
///     - base-image
///     - name: shared-lib
///       copy:
///         - source: dist/
///           target: vendor/
/// ```
///
/// Both forms normalize to this descriptor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BuildDependency {
    pub name: String,

    #[serde(default)]
    pub copy: Vec<CopySpec>,
}

impl BuildDependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            copy: Vec::new(),
        }
    }
}

/// A file or directory to copy from a build dependency.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CopySpec {
    /// Path within the dependency module.
    pub source: String,

    /// Destination within this module. Defaults to the module root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

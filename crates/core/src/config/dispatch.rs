//! Routing of parsed documents to the Project or Module preparer.

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::module::prepare_module;
use crate::config::paths::relative_config_path;
use crate::config::project::prepare_project;
use crate::schema::SchemaValidator;
use rk_protocol::{Resource, ResourceKind};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Everything a preparer needs besides the document itself.
#[derive(Clone, Copy)]
pub struct PrepareContext<'a> {
    /// Directory containing the config file.
    pub path: &'a Path,
    /// The config file the document was read from.
    pub config_path: &'a Path,
    pub project_root: &'a Path,
    /// Used when a document omits `apiVersion`.
    pub default_api_version: &'a str,
    pub validator: &'a dyn SchemaValidator,
}

impl PrepareContext<'_> {
    /// The config file location relative to the project root.
    pub fn relative_config_path(&self) -> String {
        relative_config_path(self.project_root, self.path, self.config_path)
    }
}

/// Turns one parsed document into a typed [`Resource`].
///
/// # Errors
///
/// - [`ConfigError::NotAnObject`] if the document is not a mapping
/// - [`ConfigError::MissingKind`] if `kind` is absent or empty
/// - [`ConfigError::UnknownKind`] if `kind` names neither `Project` nor `Module`
/// - Whatever the selected preparer raises
pub fn prepare_resource(document: Value, ctx: &PrepareContext<'_>) -> ConfigResult<Resource> {
    let mapping = match document {
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(ConfigError::NotAnObject {
                path: ctx.config_path.to_path_buf(),
                value: render_value(&other),
            })
        }
    };

    let kind = match mapping.get("kind") {
        None => None,
        Some(value) if is_falsy(value) => None,
        Some(Value::String(kind)) => Some(kind.clone()),
        Some(other) => Some(render_value(other)),
    };

    let Some(kind) = kind else {
        return Err(ConfigError::MissingKind {
            path: ctx.relative_config_path(),
        });
    };

    match ResourceKind::parse(&kind) {
        Some(ResourceKind::Project) => Ok(Resource::Project(prepare_project(mapping, ctx))),
        Some(ResourceKind::Module) => prepare_module(mapping, ctx).map(Resource::Module),
        None => Err(ConfigError::UnknownKind {
            kind,
            path: ctx.relative_config_path(),
        }),
    }
}

/// Expands a legacy scoped document into flat, `kind`-tagged documents.
///
/// Older config files nest declarations under a top-level `project` or
/// `module` key instead of tagging them with `kind`:
///
/// ```yaml
/// project:
///   name: my-project
/// module:
///   name: frontend
///   type: container
/// ```
///
/// Documents that already carry `kind`, or carry neither key, are returned as is.
pub fn unwrap_scoped_document(document: Value) -> Vec<Value> {
    let Value::Mapping(outer) = &document else {
        return vec![document];
    };

    if outer.contains_key("kind") {
        return vec![document];
    }

    let scoped: Vec<Value> = [ResourceKind::Project, ResourceKind::Module]
        .into_iter()
        .filter_map(|kind| {
            let key = kind.as_str().to_lowercase();
            match outer.get(key.as_str()) {
                Some(Value::Mapping(inner)) => Some(flatten_scoped(kind, inner, outer)),
                _ => None,
            }
        })
        .collect();

    if scoped.is_empty() {
        vec![document]
    } else {
        scoped
    }
}

fn flatten_scoped(kind: ResourceKind, inner: &Mapping, outer: &Mapping) -> Value {
    let mut flat = Mapping::new();
    flat.insert(Value::from("kind"), Value::from(kind.as_str()));

    if let Some(version) = outer.get("apiVersion") {
        flat.insert(Value::from("apiVersion"), version.clone());
    }

    for (key, value) in inner {
        if key.as_str() != Some("kind") {
            flat.insert(key.clone(), value.clone());
        }
    }

    Value::Mapping(flat)
}

/// Whether a value counts as "not set": null, `false`, `0` or the empty string.
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Renders a value on one line for error messages.
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|yaml| yaml.trim_end().replace('\n', " "))
            .unwrap_or_else(|_| format!("{other:?}")),
    }
}

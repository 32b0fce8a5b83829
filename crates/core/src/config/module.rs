//! Preparation of Module documents.
//!
//! A module document mixes two kinds of fields: the structural ones every
//! module has (`name`, `type`, `build`, ...) and whatever the module type
//! defines. The structural fields are lifted onto the resource; the rest is
//! kept in the open-ended `spec` mapping.

use crate::config::dispatch::{is_falsy, PrepareContext};
use crate::config::error::{ConfigError, ConfigResult, Violation};
use crate::schema::{core_module_schema, ValidationContext};
use rk_protocol::{ModuleResource, ResourceKind};
use serde_yaml::{Mapping, Value};
use tracing::debug;

/// Keys described by the base module schema. These never appear in `spec`,
/// except for `build`, which is carried into `spec` after normalization.
pub const BASE_MODULE_KEYS: &[&str] = &[
    "apiVersion",
    "kind",
    "type",
    "name",
    "description",
    "disabled",
    "include",
    "exclude",
    "repositoryUrl",
    "allowPublish",
    "build",
];

/// Structural fields copied verbatim from the document onto the resource.
const PASSTHROUGH_KEYS: &[&str] = &[
    "allowPublish",
    "description",
    "disabled",
    "include",
    "exclude",
    "name",
    "repositoryUrl",
    "type",
];

/// Label used in validation error messages.
const CONFIG_TYPE: &str = "module";

/// Whether `key` is one of [`BASE_MODULE_KEYS`].
pub fn is_base_module_key(key: &str) -> bool {
    BASE_MODULE_KEYS.iter().any(|base| *base == key)
}

/// Builds a validated [`ModuleResource`] from a document known to declare a module.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] when the assembled resource does not
/// match the core module schema. The validator's error is passed through
/// unchanged.
pub fn prepare_module(raw: Mapping, ctx: &PrepareContext<'_>) -> ConfigResult<ModuleResource> {
    let build = normalize_build(raw.get("build"));
    let assembled = assemble(&raw, build, ctx);

    ctx.validator.validate(
        &assembled,
        &core_module_schema(),
        &ValidationContext {
            path: ctx.path,
            config_path: ctx.config_path,
            project_root: ctx.project_root,
            config_type: CONFIG_TYPE,
        },
    )?;

    let module: ModuleResource =
        serde_yaml::from_value(assembled).map_err(|err| ConfigError::Validation {
            config_type: CONFIG_TYPE.to_string(),
            path: ctx.relative_config_path(),
            violations: vec![Violation::new("", err.to_string())],
        })?;

    debug!(
        module = %module.name,
        dependencies = module.build.dependencies.len(),
        "prepared module"
    );

    Ok(module)
}

/// Lays out the resource as a YAML value, ready for validation.
fn assemble(raw: &Mapping, build: Value, ctx: &PrepareContext<'_>) -> Value {
    let mut resource = Mapping::new();

    let api_version = match raw.get("apiVersion") {
        Some(version) if !is_falsy(version) => version.clone(),
        _ => Value::from(ctx.default_api_version),
    };
    resource.insert(Value::from("apiVersion"), api_version);
    resource.insert(Value::from("kind"), Value::from(ResourceKind::Module.as_str()));

    for key in PASSTHROUGH_KEYS {
        match raw.get(*key) {
            None | Some(Value::Null) => {}
            Some(value) => {
                resource.insert(Value::from(*key), value.clone());
            }
        }
    }

    resource.insert(Value::from("build"), build.clone());
    resource.insert(Value::from("path"), path_value(ctx.path));
    resource.insert(Value::from("configPath"), path_value(ctx.config_path));
    resource.insert(Value::from("outputs"), Value::Mapping(Mapping::new()));
    resource.insert(Value::from("serviceConfigs"), Value::Sequence(vec![]));
    resource.insert(Value::from("testConfigs"), Value::Sequence(vec![]));
    resource.insert(Value::from("taskConfigs"), Value::Sequence(vec![]));
    resource.insert(Value::from("spec"), Value::Mapping(user_spec(raw, build)));

    Value::Mapping(resource)
}

/// Every field the user wrote that is not a base key, plus the normalized `build`.
fn user_spec(raw: &Mapping, build: Value) -> Mapping {
    let mut spec: Mapping = raw
        .iter()
        .filter(|(key, _)| !key.as_str().is_some_and(is_base_module_key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    spec.insert(Value::from("build"), build);
    spec
}

/// Rebuilds the `build` section with its dependency list normalized.
///
/// A malformed `build` (neither a mapping nor null) is returned unchanged so
/// that validation reports it.
pub fn normalize_build(build: Option<&Value>) -> Value {
    let mut section = match build {
        None | Some(Value::Null) => Mapping::new(),
        Some(Value::Mapping(section)) => section.clone(),
        Some(other) => return other.clone(),
    };

    let dependencies = normalize_dependencies(section.get("dependencies"));
    section.insert(Value::from("dependencies"), dependencies);

    Value::Mapping(section)
}

/// Expands the string shorthand for build dependencies.
///
/// A sequence has each bare string `name` turned into `{ name, copy: [] }`;
/// other entries are kept as written. A missing or empty value becomes an
/// empty sequence. Anything else is kept as written and left for the
/// validator to reject.
pub fn normalize_dependencies(dependencies: Option<&Value>) -> Value {
    match dependencies {
        Some(Value::Sequence(entries)) => {
            Value::Sequence(entries.iter().map(normalize_dependency).collect())
        }
        Some(value) if !is_falsy(value) => value.clone(),
        _ => Value::Sequence(vec![]),
    }
}

fn normalize_dependency(entry: &Value) -> Value {
    match entry {
        Value::String(name) => {
            let mut dependency = Mapping::new();
            dependency.insert(Value::from("name"), Value::from(name.as_str()));
            dependency.insert(Value::from("copy"), Value::Sequence(vec![]));
            Value::Mapping(dependency)
        }
        other => other.clone(),
    }
}

fn path_value(path: &std::path::Path) -> Value {
    Value::from(path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::BuiltinValidator;
    use rk_protocol::{BuildDependency, CopySpec, DEFAULT_API_VERSION};
    use std::path::Path;

    fn ctx() -> PrepareContext<'static> {
        PrepareContext {
            path: Path::new("/repo/frontend"),
            config_path: Path::new("/repo/frontend/garden.yml"),
            project_root: Path::new("/repo"),
            default_api_version: DEFAULT_API_VERSION,
            validator: &BuiltinValidator,
        }
    }

    fn mapping(content: &str) -> Mapping {
        serde_yaml::from_str(content).expect("Test YAML should parse")
    }

    fn yaml(content: &str) -> Value {
        serde_yaml::from_str(content).expect("Test YAML should parse")
    }

    #[test]
    fn test_normalizes_shorthand_dependencies() {
        let raw = mapping(
            r#"
kind: Module
name: frontend
type: container
build:
  dependencies:
    - a
    - name: b
      copy:
        - source: x
"#,
        );

        let module = prepare_module(raw, &ctx()).expect("Module should prepare");

        let expected = vec![
            BuildDependency::new("a"),
            BuildDependency {
                name: "b".to_string(),
                copy: vec![CopySpec {
                    source: "x".to_string(),
                    target: None,
                }],
            },
        ];
        assert_eq!(module.build.dependencies, expected);
        assert_eq!(
            module.spec.get("build").and_then(|build| build.get("dependencies")),
            Some(&yaml("- name: a\n  copy: []\n- name: b\n  copy:\n    - source: x\n"))
        );
    }

    #[test]
    fn test_user_fields_land_in_spec() {
        let raw = mapping(
            r#"
kind: Module
apiVersion: garden.io/v0
name: frontend
type: container
description: The web frontend
include: ["src/**/*"]
fooBar: 42
services:
  - name: web
"#,
        );

        let module = prepare_module(raw, &ctx()).expect("Module should prepare");

        assert_eq!(module.spec.get("fooBar"), Some(&Value::from(42)));
        assert!(module.spec.get("services").is_some());
        for key in BASE_MODULE_KEYS.iter().filter(|key| **key != "build") {
            assert!(module.spec.get(*key).is_none(), "{key} leaked into spec");
        }
        assert_eq!(module.description.as_deref(), Some("The web frontend"));
        assert_eq!(module.include, Some(vec!["src/**/*".to_string()]));
    }

    #[test]
    fn test_defaults() {
        let raw = mapping("kind: Module\nname: frontend\ntype: container\n");

        let module = prepare_module(raw, &ctx()).expect("Module should prepare");

        assert_eq!(module.api_version, DEFAULT_API_VERSION);
        assert!(module.build.dependencies.is_empty());
        assert!(module.outputs.is_empty());
        assert!(module.service_configs.is_empty());
        assert!(module.test_configs.is_empty());
        assert!(module.task_configs.is_empty());
        assert_eq!(module.path, Path::new("/repo/frontend"));
        assert_eq!(module.config_path, Path::new("/repo/frontend/garden.yml"));
        assert_eq!(module.module_type, "container");
    }

    #[test]
    fn test_keeps_type_specific_build_keys() {
        let raw = mapping(
            r#"
kind: Module
name: frontend
type: container
build:
  targetImage: dev
"#,
        );

        let module = prepare_module(raw, &ctx()).expect("Module should prepare");

        assert_eq!(module.build.extra.get("targetImage"), Some(&Value::from("dev")));
        let spec_build = module.spec.get("build").expect("spec.build should exist");
        assert_eq!(spec_build.get("targetImage"), Some(&Value::from("dev")));
        assert_eq!(spec_build.get("dependencies"), Some(&Value::Sequence(vec![])));
    }

    #[test]
    fn test_scalar_dependencies_fail_validation() {
        let raw = mapping(
            r#"
kind: Module
name: frontend
type: container
build:
  dependencies: base
"#,
        );

        let err = prepare_module(raw, &ctx()).expect_err("Scalar dependencies should fail");

        match err {
            ConfigError::Validation { violations, path, .. } => {
                assert_eq!(path, Path::new("frontend/garden.yml").display().to_string());
                assert_eq!(violations[0].path, "build.dependencies");
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_name_fails_validation() {
        let raw = mapping("kind: Module\nname: Front_End\ntype: container\n");

        let err = prepare_module(raw, &ctx()).expect_err("Invalid name should fail");

        assert!(err.to_string().contains("key .name must be a valid identifier"));
    }

    #[test]
    fn test_preparing_twice_is_deterministic() {
        let raw = mapping(
            r#"
kind: Module
name: frontend
type: container
zeta: 1
alpha: 2
build:
  dependencies: [a, b]
"#,
        );

        let first = prepare_module(raw.clone(), &ctx()).expect("Module should prepare");
        let second = prepare_module(raw, &ctx()).expect("Module should prepare");

        assert_eq!(first, second);
        let first_keys: Vec<_> = first.spec.keys().collect();
        let second_keys: Vec<_> = second.spec.keys().collect();
        assert_eq!(first_keys, second_keys);
    }

    #[test]
    fn test_normalize_dependencies_passthrough() {
        assert_eq!(normalize_dependencies(None), Value::Sequence(vec![]));
        assert_eq!(normalize_dependencies(Some(&Value::Null)), Value::Sequence(vec![]));
        assert_eq!(
            normalize_dependencies(Some(&Value::from("base"))),
            Value::from("base")
        );
    }

    #[test]
    fn test_normalize_build_keeps_malformed_section() {
        assert_eq!(normalize_build(Some(&Value::from("make"))), Value::from("make"));
    }
}

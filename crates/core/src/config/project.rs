//! Preparation of Project documents.

use crate::config::dispatch::{is_falsy, render_value, PrepareContext};
use rk_protocol::ProjectResource;
use serde_yaml::{Mapping, Value};

/// Keys set by the loader rather than taken from the passthrough fields.
const LIFTED_KEYS: &[&str] = &["apiVersion", "kind", "path", "configPath"];

/// Builds a [`ProjectResource`] from a document known to declare a project.
///
/// Fills in `apiVersion` when absent and stamps the source locations. Nothing
/// is validated here: a non-string `apiVersion` is kept in its rendered form.
pub fn prepare_project(mapping: Mapping, ctx: &PrepareContext<'_>) -> ProjectResource {
    let api_version = match mapping.get("apiVersion") {
        Some(value) if !is_falsy(value) => render_value(value),
        _ => ctx.default_api_version.to_string(),
    };

    let fields: Mapping = mapping
        .into_iter()
        .filter(|(key, _)| !is_lifted(key))
        .collect();

    ProjectResource {
        api_version,
        path: ctx.path.to_path_buf(),
        config_path: ctx.config_path.to_path_buf(),
        fields,
    }
}

fn is_lifted(key: &Value) -> bool {
    key.as_str()
        .is_some_and(|key| LIFTED_KEYS.iter().any(|lifted| *lifted == key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::BuiltinValidator;
    use rk_protocol::DEFAULT_API_VERSION;
    use std::path::Path;

    fn ctx() -> PrepareContext<'static> {
        PrepareContext {
            path: Path::new("/repo"),
            config_path: Path::new("/repo/garden.yml"),
            project_root: Path::new("/repo"),
            default_api_version: DEFAULT_API_VERSION,
            validator: &BuiltinValidator,
        }
    }

    fn mapping(content: &str) -> Mapping {
        serde_yaml::from_str(content).expect("Test YAML should parse")
    }

    #[test]
    fn test_defaults_api_version() {
        let project = prepare_project(mapping("kind: Project\nname: demo\n"), &ctx());

        assert_eq!(project.api_version, DEFAULT_API_VERSION);
        assert_eq!(project.path, Path::new("/repo"));
        assert_eq!(project.config_path, Path::new("/repo/garden.yml"));
    }

    #[test]
    fn test_keeps_declared_api_version() {
        let project = prepare_project(
            mapping("kind: Project\napiVersion: garden.io/v1\nname: demo\n"),
            &ctx(),
        );

        assert_eq!(project.api_version, "garden.io/v1");
    }

    #[test]
    fn test_passes_other_fields_through() {
        let project = prepare_project(
            mapping(
                r#"
kind: Project
name: demo
defaultEnvironment: local
environments:
  - name: local
path: /somewhere/else
"#,
            ),
            &ctx(),
        );

        assert_eq!(project.name(), Some("demo"));
        assert_eq!(project.field("defaultEnvironment"), Some(&Value::from("local")));
        assert!(project.field("environments").is_some());
        // Loader-owned keys never leak into the passthrough fields
        assert!(project.field("kind").is_none());
        assert!(project.field("path").is_none());
        assert_eq!(project.path, Path::new("/repo"));
    }

    #[test]
    fn test_non_string_api_version_is_carried_through() {
        let number = prepare_project(mapping("kind: Project\napiVersion: 1\nname: demo\n"), &ctx());
        assert_eq!(number.api_version, "1");

        let boolean = prepare_project(mapping("kind: Project\napiVersion: true\n"), &ctx());
        assert_eq!(boolean.api_version, "true");

        let list = prepare_project(mapping("kind: Project\napiVersion: [1]\n"), &ctx());
        assert_eq!(list.api_version, "- 1");
        assert!(list.field("apiVersion").is_none());
    }

    #[test]
    fn test_falsy_api_version_takes_default() {
        let project = prepare_project(mapping("kind: Project\napiVersion: ''\n"), &ctx());

        assert_eq!(project.api_version, DEFAULT_API_VERSION);
    }
}

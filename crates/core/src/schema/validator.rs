//! Schema validation of assembled resources.

use crate::config::error::{ConfigError, ConfigResult, Violation};
use crate::config::paths::relative_config_path;
use crate::schema::definition::{ObjectSchema, Schema};
use regex::Regex;
use serde_yaml::Value;
use std::path::Path;
use std::sync::LazyLock;

const MAX_IDENTIFIER_LENGTH: usize = 63;

#[allow(clippy::expect_used)]
static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9]*(-[a-z0-9]+)*$").expect("identifier pattern is valid")
});

/// Where the value being validated came from. Only used to build error messages.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Directory containing the config file.
    pub path: &'a Path,
    pub config_path: &'a Path,
    pub project_root: &'a Path,
    /// Label for the kind of config being validated, e.g. `module`.
    pub config_type: &'a str,
}

/// Validates a value against a [`Schema`].
///
/// Implementations report failures as [`ConfigError::Validation`], naming
/// each offending field and the constraint it broke.
pub trait SchemaValidator: Send + Sync {
    fn validate(&self, value: &Value, schema: &Schema, ctx: &ValidationContext<'_>)
        -> ConfigResult<()>;
}

/// The default validator. Collects every violation rather than stopping at the first.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinValidator;

impl SchemaValidator for BuiltinValidator {
    fn validate(
        &self,
        value: &Value,
        schema: &Schema,
        ctx: &ValidationContext<'_>,
    ) -> ConfigResult<()> {
        let mut violations = Vec::new();
        check(value, schema, "", &mut violations);

        if violations.is_empty() {
            return Ok(());
        }

        Err(ConfigError::Validation {
            config_type: ctx.config_type.to_string(),
            path: relative_config_path(ctx.project_root, ctx.path, ctx.config_path),
            violations,
        })
    }
}

fn check(value: &Value, schema: &Schema, path: &str, out: &mut Vec<Violation>) {
    match schema {
        Schema::Any => {}
        Schema::String => {
            if !value.is_string() {
                out.push(Violation::new(path, "must be a string"));
            }
        }
        Schema::Boolean => {
            if !value.is_bool() {
                out.push(Violation::new(path, "must be a boolean"));
            }
        }
        Schema::Mapping => {
            if !value.is_mapping() {
                out.push(Violation::new(path, "must be an object"));
            }
        }
        Schema::Identifier => match value.as_str() {
            Some(name) if is_identifier(name) => {}
            Some(_) => out.push(Violation::new(
                path,
                "must be a valid identifier (lowercase letters, digits and single dashes, \
                 starting with a letter, at most 63 characters)",
            )),
            None => out.push(Violation::new(path, "must be a string")),
        },
        Schema::OneOf(allowed) => match value.as_str() {
            Some(s) if allowed.iter().any(|allowed| *allowed == s) => {}
            _ => out.push(Violation::new(
                path,
                format!("must be one of [{}]", allowed.join(", ")),
            )),
        },
        Schema::Array(items) => match value.as_sequence() {
            Some(values) => {
                for (index, item) in values.iter().enumerate() {
                    check(item, items, &format!("{path}[{index}]"), out);
                }
            }
            None => out.push(Violation::new(path, "must be an array")),
        },
        Schema::Object(object) => check_object(value, object, path, out),
    }
}

fn check_object(value: &Value, object: &ObjectSchema, path: &str, out: &mut Vec<Violation>) {
    let Some(mapping) = value.as_mapping() else {
        out.push(Violation::new(path, "must be an object"));
        return;
    };

    for key in &object.keys {
        let child = child_path(path, key.name);
        match mapping.get(key.name) {
            // null is treated as absent
            None | Some(Value::Null) => {
                if key.required {
                    out.push(Violation::new(child, "is required"));
                }
            }
            Some(field) => check(field, &key.schema, &child, out),
        }
    }

    if object.allow_unknown {
        return;
    }

    for key in mapping.keys() {
        let known = key.as_str().is_some_and(|name| object.get(name).is_some());
        if !known {
            let name = key
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| format!("{key:?}"));
            out.push(Violation::new(child_path(path, &name), "is not allowed"));
        }
    }
}

fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn is_identifier(name: &str) -> bool {
    name.len() <= MAX_IDENTIFIER_LENGTH && IDENTIFIER.is_match(name)
}

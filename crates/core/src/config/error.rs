//! Error types for configuration loading.
//!
//! Every failure raised while reading, parsing, dispatching or validating a
//! config file is a [`ConfigError`]. Variants carry their structured detail
//! as named fields and keep the underlying failure reachable through
//! [`std::error::Error::source`].

use rk_protocol::ProjectResource;
use serde::Serialize;
use serde_json::json;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The YAML stream could not be parsed, and the lint pass pinpointed the problem.
    #[error("Could not parse {file_name} in directory {dir} as valid YAML: {reason}")]
    YamlLint {
        file_name: String,
        dir: PathBuf,
        reason: String,
        source: LintError,
    },

    /// The YAML stream could not be parsed.
    #[error("Could not parse {file_name} in directory {dir} as valid YAML: {reason}")]
    YamlParse {
        file_name: String,
        dir: PathBuf,
        reason: String,
        source: serde_yaml::Error,
    },

    /// A document decoded to something other than a mapping.
    #[error("Invalid configuration found in {path}: expected a mapping, got {value}")]
    NotAnObject { path: PathBuf, value: String },

    /// A document has no `kind` field.
    #[error("Missing `kind` field in config at {path}")]
    MissingKind { path: String },

    /// A document declares a `kind` the loader does not know.
    #[error("Unknown config kind {kind} in {path}")]
    UnknownKind { kind: String, path: String },

    /// More than one Project document in a single file.
    #[error("Multiple project declarations found in {path}")]
    MultipleProjects {
        path: PathBuf,
        projects: Vec<ProjectResource>,
    },

    /// A resource failed schema validation.
    #[error("Error validating {config_type} ({path}): {}", join_violations(violations))]
    Validation {
        config_type: String,
        path: String,
        violations: Vec<Violation>,
    },

    /// Failed to read a settings file from disk.
    #[error("Failed to read settings file at {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse a TOML settings file.
    #[error("Failed to parse TOML file at {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Renders the structured detail payload of the error.
    ///
    /// Useful for structured logging and for tools that print errors as JSON.
    pub fn detail(&self) -> serde_json::Value {
        match self {
            ConfigError::YamlLint {
                file_name,
                dir,
                source,
                ..
            } => json!({
                "fileName": file_name,
                "dir": dir,
                "line": source.line,
                "column": source.column,
                "snippet": source.snippet,
            }),
            ConfigError::YamlParse {
                file_name,
                dir,
                source,
                ..
            } => json!({
                "fileName": file_name,
                "dir": dir,
                "line": source.location().map(|loc| loc.line()),
                "column": source.location().map(|loc| loc.column()),
            }),
            ConfigError::NotAnObject { path, value } => json!({ "path": path, "value": value }),
            ConfigError::MissingKind { path } => json!({ "path": path }),
            ConfigError::UnknownKind { kind, path } => json!({ "kind": kind, "path": path }),
            ConfigError::MultipleProjects { path, projects } => json!({
                "path": path,
                "projects": serde_json::to_value(projects).unwrap_or_default(),
            }),
            ConfigError::Validation {
                config_type,
                path,
                violations,
            } => json!({
                "configType": config_type,
                "path": path,
                "violations": violations,
            }),
            ConfigError::FileRead { path, .. } | ConfigError::SettingsParse { path, .. } => {
                json!({ "path": path })
            }
        }
    }
}

/// Type alias for Result with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A problem located by the YAML lint pass.
#[derive(Error, Debug)]
#[error("line {line}, column {column}: {message}")]
pub struct LintError {
    /// One-based line within the whole file.
    pub line: usize,
    /// One-based column.
    pub column: usize,
    pub message: String,
    /// The offending source line, if it could be recovered.
    pub snippet: Option<String>,
    #[source]
    pub source: Option<serde_yaml::Error>,
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dotted path to the offending field, e.g. `build.dependencies[1].name`.
    /// Empty when the violation concerns the value as a whole.
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "value {}", self.message)
        } else {
            write!(f, "key .{} {}", self.path, self.message)
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

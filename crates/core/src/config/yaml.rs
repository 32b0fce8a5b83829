//! Multi-document YAML loading.
//!
//! A config file is a YAML stream that may hold several documents separated
//! by `---`. When the stream fails to parse, a lint pass re-reads the content
//! to find a more precise location for the problem before the error is
//! reported.

use crate::config::error::{ConfigError, ConfigResult, LintError};
use serde::Deserialize;
use serde_yaml::Value;
use std::path::Path;

/// Parses every document in `content`.
///
/// `path` is the file the content was read from; it only feeds error
/// messages. Empty documents come back as [`Value::Null`] and are left for
/// the caller to filter out.
///
/// # Errors
///
/// Returns [`ConfigError::YamlLint`] when the lint pass could locate the
/// problem, and [`ConfigError::YamlParse`] otherwise.
pub fn parse_documents(content: &str, path: &Path) -> ConfigResult<Vec<Value>> {
    load_all(content).map_err(|err| diagnose(content, path, err))
}

fn load_all(content: &str) -> Result<Vec<Value>, serde_yaml::Error> {
    serde_yaml::Deserializer::from_str(content)
        .map(Value::deserialize)
        .collect()
}

fn diagnose(content: &str, path: &Path, err: serde_yaml::Error) -> ConfigError {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let reason = err.to_string();

    match lint(content) {
        Err(lint_error) => ConfigError::YamlLint {
            file_name,
            dir,
            reason,
            source: lint_error,
        },
        Ok(()) => ConfigError::YamlParse {
            file_name,
            dir,
            reason,
            source: err,
        },
    }
}

/// Checks `content` for problems and reports the first one found, with its
/// line and column in the file.
///
/// Each document is parsed on its own so a failure can be attributed to a
/// single document, and indentation is checked for tab characters.
pub fn lint(content: &str) -> Result<(), LintError> {
    check_indentation(content)?;

    for document in split_documents(content) {
        if let Err(err) = serde_yaml::from_str::<Value>(&document.text) {
            let (line, column) = err
                .location()
                .map(|loc| (document.first_line + loc.line(), loc.column()))
                .unwrap_or((document.first_line + 1, 1));

            return Err(LintError {
                line,
                column,
                message: strip_location(&err.to_string()),
                snippet: source_line(content, line),
                source: Some(err),
            });
        }
    }

    Ok(())
}

/// A single document cut out of a stream.
struct DocumentSlice {
    /// Zero-based index of the document's first line within the stream.
    first_line: usize,
    text: String,
}

fn split_documents(content: &str) -> Vec<DocumentSlice> {
    let mut documents = Vec::new();
    let mut current = DocumentSlice {
        first_line: 0,
        text: String::new(),
    };

    for (index, line) in content.lines().enumerate() {
        if is_document_start(line) && !current.text.trim().is_empty() {
            let next = DocumentSlice {
                first_line: index,
                text: String::new(),
            };
            documents.push(std::mem::replace(&mut current, next));
        }
        current.text.push_str(line);
        current.text.push('\n');
    }

    if !current.text.trim().is_empty() {
        documents.push(current);
    }

    documents
}

fn is_document_start(line: &str) -> bool {
    line.strip_prefix("---")
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

fn check_indentation(content: &str) -> Result<(), LintError> {
    for (index, line) in content.lines().enumerate() {
        let indent = line
            .char_indices()
            .take_while(|(_, c)| *c == ' ' || *c == '\t')
            .find(|(_, c)| *c == '\t');

        if let Some((offset, _)) = indent {
            return Err(LintError {
                line: index + 1,
                column: offset + 1,
                message: "found a tab character where indentation is expected".to_string(),
                snippet: Some(line.to_string()),
                source: None,
            });
        }
    }

    Ok(())
}

fn source_line(content: &str, line: usize) -> Option<String> {
    line.checked_sub(1)
        .and_then(|index| content.lines().nth(index))
        .map(str::to_string)
}

// serde_yaml appends "at line X column Y" relative to the parsed slice.
fn strip_location(message: &str) -> String {
    match message.find(" at line ") {
        Some(index) => message[..index].to_string(),
        None => message.to_string(),
    }
}

//! The save tool: the one side-effecting operation the model may invoke
//!
//! Writes the reviewed Gherkin content into the configured output
//! directory. Every failure mode is converted into a structured error
//! result and fed back to the model; nothing here panics or propagates an
//! `Err` into the conversation layer.

use genie_model::{ToolDeclaration, ToolRegistry};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Name the save tool is registered and invoked under
pub const SAVE_FEATURE_FILE: &str = "save_feature_file";

/// Outcome status of a tool execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    /// The operation completed
    Success,
    /// The operation failed; `message` explains why
    Error,
}

/// Structured outcome of a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Success or error
    pub status: ToolStatus,
    /// Human-readable outcome description
    pub message: String,
    /// On success, the resolved path written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl ToolResult {
    /// Successful write of `path`
    #[must_use]
    pub fn success(message: impl Into<String>, path: PathBuf) -> Self {
        Self {
            status: ToolStatus::Success,
            message: message.into(),
            path: Some(path),
        }
    }

    /// Failed execution
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Error,
            message: message.into(),
            path: None,
        }
    }

    /// JSON form fed back into the model conversation
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| {
            json!({"status": "error", "message": "tool result serialization failed"})
        })
    }
}

/// Write `content` to `<output_dir>/<filename>` as UTF-8
///
/// Creates the output directory if absent (idempotent) and overwrites any
/// existing file at the target path. I/O failures are caught and returned
/// as an error result, never raised.
#[must_use]
pub fn save_feature_file(output_dir: &Path, filename: &str, content: &str) -> ToolResult {
    if filename.trim().is_empty() {
        return ToolResult::error("filename must not be empty");
    }

    if let Err(e) = std::fs::create_dir_all(output_dir) {
        return ToolResult::error(format!(
            "could not create output directory '{}': {e}",
            output_dir.display()
        ));
    }

    let filepath = output_dir.join(filename);
    match std::fs::write(&filepath, content) {
        Ok(()) => ToolResult::success(
            format!("File successfully saved to {}", filepath.display()),
            filepath,
        ),
        Err(e) => ToolResult::error(format!(
            "could not write '{}': {e}",
            filepath.display()
        )),
    }
}

/// Build the tool registry the review stage hands to the model
///
/// Contains exactly the save tool, bound to `output_dir`. Arguments with a
/// missing or non-string `filename`/`content` produce an error result for
/// the model rather than a dispatch failure.
#[must_use]
pub fn save_tool_registry(output_dir: PathBuf) -> ToolRegistry {
    let declaration = ToolDeclaration {
        name: SAVE_FEATURE_FILE.to_string(),
        description: "Saves the generated Gherkin feature content to a local file.".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "filename": {
                    "type": "string",
                    "description": "The name of the file (e.g. 'login.feature')."
                },
                "content": {
                    "type": "string",
                    "description": "The full Gherkin syntax content."
                }
            },
            "required": ["filename", "content"]
        }),
    };

    let mut registry = ToolRegistry::new();
    registry.register(declaration, move |args| {
        let Some(filename) = args.get("filename").and_then(Value::as_str) else {
            return ToolResult::error("missing required string argument 'filename'").to_json();
        };
        let Some(content) = args.get("content").and_then(Value::as_str) else {
            return ToolResult::error("missing required string argument 'content'").to_json();
        };
        save_feature_file(&output_dir, filename, content).to_json()
    });
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn saves_content_and_creates_directory() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("output");

        let result = save_feature_file(&output, "login_tests.feature", "Feature: Login\n");
        assert_eq!(result.status, ToolStatus::Success);
        assert_eq!(result.path.as_deref(), Some(output.join("login_tests.feature").as_path()));
        assert_eq!(
            fs::read_to_string(output.join("login_tests.feature")).unwrap(),
            "Feature: Login\n"
        );
    }

    #[test]
    fn second_save_overwrites_without_directory_error() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("output");

        let first = save_feature_file(&output, "a.feature", "first");
        let second = save_feature_file(&output, "a.feature", "second");

        assert_eq!(first.status, ToolStatus::Success);
        assert_eq!(second.status, ToolStatus::Success);
        assert_eq!(fs::read_to_string(output.join("a.feature")).unwrap(), "second");
    }

    #[test]
    fn io_failure_is_an_error_result_not_a_panic() {
        let dir = TempDir::new().unwrap();
        // A regular file where the output directory should be.
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, "not a directory").unwrap();

        let result = save_feature_file(&blocker, "x.feature", "content");
        assert_eq!(result.status, ToolStatus::Error);
        assert!(!result.message.is_empty());
        assert!(result.path.is_none());
    }

    #[test]
    fn empty_filename_is_rejected() {
        let dir = TempDir::new().unwrap();
        let result = save_feature_file(dir.path(), "  ", "content");
        assert_eq!(result.status, ToolStatus::Error);
    }

    #[test]
    fn empty_content_is_allowed() {
        let dir = TempDir::new().unwrap();
        let result = save_feature_file(dir.path(), "empty.feature", "");
        assert_eq!(result.status, ToolStatus::Success);
        assert_eq!(fs::read_to_string(dir.path().join("empty.feature")).unwrap(), "");
    }

    #[test]
    fn registry_dispatch_round_trips_json() {
        let dir = TempDir::new().unwrap();
        let registry = save_tool_registry(dir.path().to_path_buf());

        let result = registry
            .dispatch(
                SAVE_FEATURE_FILE,
                &serde_json::json!({"filename": "r.feature", "content": "Feature: R"}),
            )
            .unwrap();
        assert_eq!(result["status"], "success");
        assert_eq!(fs::read_to_string(dir.path().join("r.feature")).unwrap(), "Feature: R");
    }

    #[test]
    fn registry_reports_missing_arguments_to_the_model() {
        let dir = TempDir::new().unwrap();
        let registry = save_tool_registry(dir.path().to_path_buf());

        let result = registry
            .dispatch(SAVE_FEATURE_FILE, &serde_json::json!({"filename": "x.feature"}))
            .unwrap();
        assert_eq!(result["status"], "error");
    }
}

//! End-to-end pipeline runs against a scripted model client
//!
//! Covers the handoff discipline (every stage consumes the previous
//! stage's full output), the canned login scenario, the no-save terminal
//! state, and the hard abort on a missing screenshot.

use genie_core::{Pipeline, PipelineConfig, PipelineError, SAVE_FEATURE_FILE};
use genie_test_utils::{RecordingTrace, ScriptedModelClient, TraceEvent};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

const VISION_TEXT: &str =
    "Button: Submit, Input: username, Input: password, Context: Login Page";
const STRATEGY_TEXT: &str = "\
1. Happy Path Scenarios: valid login.
2. Edge Case Scenarios: empty fields, invalid formats.
3. Security Scenarios: SQL injection, XSS, auth bypass.";
const GHERKIN_TEXT: &str = "Feature: Login\n  Scenario: Valid login\n    Given the login page";

fn write_screenshot(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a]).unwrap();
    path
}

fn pipeline_under_test(
    client: Arc<ScriptedModelClient>,
    trace: Arc<RecordingTrace>,
    output_dir: PathBuf,
) -> Pipeline {
    let config = PipelineConfig::new().with_output_dir(output_dir);
    Pipeline::new(config, client, trace)
}

#[tokio::test]
async fn full_run_saves_the_reviewed_feature_file() {
    let dir = TempDir::new().unwrap();
    let image = write_screenshot(&dir, "login.png");
    let output_dir = dir.path().join("output");

    let client = Arc::new(
        ScriptedModelClient::new()
            .with_response(VISION_TEXT)
            .with_response(STRATEGY_TEXT)
            .with_response(GHERKIN_TEXT)
            .with_response("Reviewed: syntax is valid, saved as requested.")
            .with_tool_request(
                SAVE_FEATURE_FILE,
                json!({"filename": "login_tests.feature", "content": GHERKIN_TEXT}),
            ),
    );
    let trace = Arc::new(RecordingTrace::new());

    let report = pipeline_under_test(Arc::clone(&client), Arc::clone(&trace), output_dir.clone())
        .run(&image)
        .await
        .unwrap();

    assert_eq!(report.feature_filename, "login_tests.feature");
    assert!(report.saved);
    assert_eq!(
        report.review_summary,
        "Reviewed: syntax is valid, saved as requested."
    );
    assert_eq!(
        fs::read_to_string(output_dir.join("login_tests.feature")).unwrap(),
        GHERKIN_TEXT
    );
    assert_eq!(trace.tool_usage_count(), 1);
}

#[tokio::test]
async fn each_stage_receives_the_previous_output_in_full() {
    let dir = TempDir::new().unwrap();
    let image = write_screenshot(&dir, "login.png");

    // Make the vision output far longer than any log preview.
    let long_inventory = format!("{VISION_TEXT}\n{}", "Link: forgot password\n".repeat(40));

    let client = Arc::new(
        ScriptedModelClient::new()
            .with_response(long_inventory.clone())
            .with_response(STRATEGY_TEXT)
            .with_response(GHERKIN_TEXT)
            .with_response("No save."),
    );
    let trace = Arc::new(RecordingTrace::new());

    pipeline_under_test(Arc::clone(&client), Arc::clone(&trace), dir.path().join("output"))
        .run(&image)
        .await
        .unwrap();

    let prompts = client.prompts();
    assert_eq!(prompts.len(), 4);
    // Strategy prompt embeds the untruncated inventory, syntax prompt the
    // full strategy, review prompt the full Gherkin.
    assert!(prompts[1].contains(&long_inventory));
    assert!(prompts[2].contains(STRATEGY_TEXT));
    assert!(prompts[3].contains(GHERKIN_TEXT));
    assert_eq!(client.images(), vec!["login.png".to_string()]);

    // Three handoffs, previews capped at the configured length.
    let handoffs = trace.handoffs();
    assert_eq!(handoffs.len(), 3);
    if let TraceEvent::Handoff { from, to, preview } = &handoffs[0] {
        assert_eq!(from, "Vision Agent");
        assert_eq!(to, "Architect Agent");
        assert!(preview.chars().count() <= 50);
    } else {
        unreachable!();
    }
}

#[tokio::test]
async fn review_without_tool_call_completes_with_nothing_written() {
    let dir = TempDir::new().unwrap();
    let image = write_screenshot(&dir, "dashboard.png");
    let output_dir = dir.path().join("output");

    let client = Arc::new(
        ScriptedModelClient::new()
            .with_response(VISION_TEXT)
            .with_response(STRATEGY_TEXT)
            .with_response(GHERKIN_TEXT)
            .with_response("The generated code is unfixable; not saving."),
    );
    let trace = Arc::new(RecordingTrace::new());

    let report = pipeline_under_test(client, Arc::clone(&trace), output_dir.clone())
        .run(&image)
        .await
        .unwrap();

    assert!(!report.saved);
    assert_eq!(trace.tool_usage_count(), 0);
    // Nothing created the directory either.
    assert!(!output_dir.exists());
}

#[tokio::test]
async fn missing_screenshot_aborts_before_any_model_call() {
    let dir = TempDir::new().unwrap();
    let client = Arc::new(ScriptedModelClient::new());
    let trace = Arc::new(RecordingTrace::new());

    let err = pipeline_under_test(Arc::clone(&client), trace, dir.path().join("output"))
        .run(&dir.path().join("absent.png"))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::ImageUnavailable(_)));
    assert!(client.prompts().is_empty());
}

#[tokio::test]
async fn unknown_tool_request_still_reaches_a_terminal_state() {
    let dir = TempDir::new().unwrap();
    let image = write_screenshot(&dir, "checkout.jpg");
    let output_dir = dir.path().join("output");

    let client = Arc::new(
        ScriptedModelClient::new()
            .with_response(VISION_TEXT)
            .with_response(STRATEGY_TEXT)
            .with_response(GHERKIN_TEXT)
            .with_response("Tried an unknown tool.")
            .with_tool_request("delete_everything", json!({})),
    );
    let trace = Arc::new(RecordingTrace::new());

    let report = pipeline_under_test(client, Arc::clone(&trace), output_dir.clone())
        .run(&image)
        .await
        .unwrap();

    // The invocation is traced for observability but it is not a save.
    assert!(!report.saved);
    assert_eq!(trace.tool_usage_count(), 1);
    assert!(!output_dir.join("checkout_tests.feature").exists());
}

//! Review-and-act stage: Gherkin review with an optional model-driven save
//!
//! The only state machine in the pipeline. The model inspects the Gherkin,
//! fixes anything it judges critical, and may invoke the save tool with a
//! filename and the (possibly corrected) content. The host executes the
//! tool automatically; this stage enumerates every invocation afterwards
//! for observability and reports which terminal state was reached.
//! Choosing not to save is a valid outcome, not an error.

use crate::error::PipelineError;
use crate::message::StageMessage;
use crate::tools::SAVE_FEATURE_FILE;
use crate::trace::PipelineTrace;
use genie_model::{ModelClient, ToolInvocation, ToolRegistry};
use serde_json::Value;
use std::sync::Arc;

/// Display identity of this stage
pub const NAME: &str = "Reviewer Agent";
/// Icon shown in phase logs
pub const ICON: &str = "🛡️";

/// Terminal state of a review cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    /// The model invoked the save tool at least once
    Saved,
    /// The model chose not to save; the pipeline does not retry
    NotSaved,
}

/// Exit value of the review stage
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    /// The model's final review commentary
    pub summary: String,
    /// Which terminal state the review reached
    pub state: ReviewState,
    /// Every tool call the model made, in order
    pub invocations: Vec<ToolInvocation>,
}

impl ReviewOutcome {
    /// Whether a save occurred
    #[inline]
    #[must_use]
    pub fn saved(&self) -> bool {
        self.state == ReviewState::Saved
    }
}

/// Gatekeeper stage that reviews the Gherkin and may save it via tool call
pub struct ReviewStage {
    client: Arc<dyn ModelClient>,
    model: String,
}

impl ReviewStage {
    /// Create the stage with an injected model client
    #[must_use]
    pub fn new(client: Arc<dyn ModelClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Review `gherkin` and let the model decide whether to save it
    ///
    /// # Errors
    /// [`PipelineError::Model`] when the conversation itself fails. A
    /// review that ends without a save is `Ok` with
    /// [`ReviewState::NotSaved`].
    pub async fn review_and_save(
        &self,
        gherkin: &StageMessage,
        filename: &str,
        registry: &ToolRegistry,
        trace: &dyn PipelineTrace,
    ) -> Result<ReviewOutcome, PipelineError> {
        trace.phase_start(NAME, ICON, "Reviewing and Saving Artifact...");

        let prompt = format!(
            "Review the following Gherkin code for syntax errors or missing logic.

Gherkin Code:
{gherkin}

If the code looks good, use the '{SAVE_FEATURE_FILE}' tool to save it to disk \
with the filename '{filename}'.
If there are critical errors, fix them first, then save."
        );

        let conversation = self
            .client
            .complete_with_tools(&self.model, &prompt, registry)
            .await
            .map_err(PipelineError::from_model)?;

        let mut state = ReviewState::NotSaved;
        for invocation in &conversation.invocations {
            trace.tool_usage(
                &invocation.name,
                &invocation.args,
                &summarize_result(&invocation.result),
            );
            if invocation.name == SAVE_FEATURE_FILE {
                state = ReviewState::Saved;
            }
        }

        trace.thought(NAME, &conversation.text);
        Ok(ReviewOutcome {
            summary: conversation.text,
            state,
            invocations: conversation.invocations,
        })
    }
}

fn summarize_result(result: &Value) -> String {
    result
        .get("message")
        .and_then(Value::as_str)
        .map_or_else(|| result.to_string(), str::to_string)
}

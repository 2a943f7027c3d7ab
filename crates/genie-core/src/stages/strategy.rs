//! Strategy stage: UI inventory -> plain-language test strategy

use crate::error::PipelineError;
use crate::message::StageMessage;
use crate::trace::PipelineTrace;
use genie_model::ModelClient;
use std::sync::Arc;

/// Display identity of this stage
pub const NAME: &str = "Architect Agent";
/// Icon shown in phase logs
pub const ICON: &str = "📐";

/// Reasoning stage that designs the test strategy from the UI inventory
///
/// The prompt explicitly requests all three mandatory categories (happy
/// path, edge cases, security); a model that omits one produces a content
/// defect downstream, not a crash here.
pub struct StrategyStage {
    client: Arc<dyn ModelClient>,
    model: String,
}

impl StrategyStage {
    /// Create the stage with an injected model client
    #[must_use]
    pub fn new(client: Arc<dyn ModelClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Design a test strategy covering happy path, edge, and security cases
    ///
    /// # Errors
    /// [`PipelineError::Model`] when the model call fails.
    pub async fn design_strategy(
        &self,
        ui_elements: &StageMessage,
        trace: &dyn PipelineTrace,
    ) -> Result<StageMessage, PipelineError> {
        trace.phase_start(NAME, ICON, "Designing Test Strategy...");

        let prompt = format!(
            "You are a Senior QA Architect. Based on the following UI elements, \
design a comprehensive test strategy.

UI Context:
{ui_elements}

Your strategy must include:
1. Happy Path Scenarios (Standard user flow).
2. Edge Case Scenarios (Empty fields, invalid formats).
3. Security Scenarios (SQL Injection, XSS attempts, Auth bypass).

Write this in plain English, not Gherkin yet."
        );

        let result = self
            .client
            .complete(&self.model, &prompt)
            .await
            .map_err(PipelineError::from_model)?;

        trace.thought(NAME, &result);
        Ok(StageMessage::new(result))
    }
}

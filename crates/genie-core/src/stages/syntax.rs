//! Syntax stage: test strategy -> Gherkin source

use crate::error::PipelineError;
use crate::message::StageMessage;
use crate::trace::PipelineTrace;
use genie_model::ModelClient;
use std::sync::Arc;

/// Display identity of this stage
pub const NAME: &str = "Gherkin Agent";
/// Icon shown in phase logs
pub const ICON: &str = "🥒";

/// Syntax stage that converts the strategy into a `.feature` source text
pub struct SyntaxStage {
    client: Arc<dyn ModelClient>,
    model: String,
}

impl SyntaxStage {
    /// Create the stage with an injected model client
    #[must_use]
    pub fn new(client: Arc<dyn ModelClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Convert the strategy into Gherkin, stripping any markdown fences
    ///
    /// # Errors
    /// [`PipelineError::Model`] when the model call fails.
    pub async fn generate_gherkin(
        &self,
        strategy: &StageMessage,
        trace: &dyn PipelineTrace,
    ) -> Result<StageMessage, PipelineError> {
        trace.phase_start(NAME, ICON, "Generating Gherkin Syntax...");

        let prompt = format!(
            "You are a Gherkin Syntax Expert. Convert the following test strategy \
into a valid Cucumber .feature file.

Strategy:
{strategy}

Rules:
- Use Feature, Scenario, Given, When, Then syntax strictly.
- Add 'Scenario Outline' and 'Examples' where appropriate for data-driven tests.
- Ensure indentation is correct.
- Return ONLY the Gherkin code, no markdown backticks."
        );

        let raw = self
            .client
            .complete(&self.model, &prompt)
            .await
            .map_err(PipelineError::from_model)?;

        let result = strip_code_fences(&raw);
        trace.thought(NAME, &result);
        Ok(StageMessage::new(result))
    }
}

/// Remove markdown code-fence wrapping from a raw model response
///
/// Models routinely ignore the "no backticks" instruction; this is pure
/// text normalization, not a parse.
#[must_use]
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```gherkin", "")
        .replace("```", "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_gherkin_fence() {
        assert_eq!(strip_code_fences("```gherkin\nFeature: X\n```"), "Feature: X");
    }

    #[test]
    fn strips_bare_fence() {
        assert_eq!(strip_code_fences("```\nFeature: X\n```"), "Feature: X");
    }

    #[test]
    fn unfenced_text_only_gets_trimmed() {
        assert_eq!(
            strip_code_fences("  Feature: X\n  Scenario: Y\n"),
            "Feature: X\n  Scenario: Y"
        );
    }

    #[test]
    fn interior_structure_is_preserved() {
        let raw = "```gherkin\nFeature: Login\n  Scenario Outline: Invalid input\n    Examples:\n      | user |\n```";
        assert_eq!(
            strip_code_fences(raw),
            "Feature: Login\n  Scenario Outline: Invalid input\n    Examples:\n      | user |"
        );
    }
}

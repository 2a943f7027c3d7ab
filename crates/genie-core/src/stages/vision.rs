//! Vision stage: screenshot -> inventory of UI elements

use crate::error::PipelineError;
use crate::message::StageMessage;
use crate::trace::PipelineTrace;
use genie_model::{ImageData, ModelClient};
use std::path::Path;
use std::sync::Arc;

/// Display identity of this stage
pub const NAME: &str = "Vision Agent";
/// Icon shown in phase logs
pub const ICON: &str = "👁️";

const PROMPT: &str = "\
Analyze this UI screenshot.
List every interactive element you see (Buttons, Input Fields, Links, Headers).
Format the output as a structured list suitable for a tester to read.
Identify the likely context (e.g., Login Page, Dashboard, Checkout).";

/// Multimodal stage that inventories the interactive elements of a screenshot
pub struct VisionStage {
    client: Arc<dyn ModelClient>,
    model: String,
}

impl VisionStage {
    /// Create the stage with an injected model client
    #[must_use]
    pub fn new(client: Arc<dyn ModelClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Describe every interactive element of the screenshot at `image_path`
    ///
    /// # Errors
    /// [`PipelineError::ImageUnavailable`] when the image cannot be loaded
    /// or uploaded; the pipeline aborts rather than forwarding an error
    /// string as if it were an inventory.
    pub async fn analyze(
        &self,
        image_path: &Path,
        trace: &dyn PipelineTrace,
    ) -> Result<StageMessage, PipelineError> {
        trace.phase_start(NAME, ICON, "Scanning visual interface...");

        let image = ImageData::from_path(image_path).map_err(PipelineError::from_model)?;
        let result = self
            .client
            .complete_with_image(&self.model, &image, PROMPT)
            .await
            .map_err(PipelineError::from_model)?;

        trace.thought(NAME, &result);
        Ok(StageMessage::new(result))
    }
}

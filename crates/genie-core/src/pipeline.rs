//! Pipeline orchestrator
//!
//! Runs the four stages in strict sequence with no branching and no
//! parallelism, threading each stage's full output into the next. The
//! orchestrator performs no validation of intermediate content; only a
//! hard stage failure (image unavailable, model transport error) aborts.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::stages::{review, strategy, syntax, vision};
use crate::stages::{ReviewStage, StrategyStage, SyntaxStage, VisionStage};
use crate::tools::save_tool_registry;
use crate::trace::PipelineTrace;
use genie_model::ModelClient;
use std::path::Path;
use std::sync::Arc;

/// Suffix appended to the image stem to form the artifact filename
pub const FEATURE_SUFFIX: &str = "_tests.feature";

/// Summary of a completed pipeline run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Filename the review stage was asked to save under
    pub feature_filename: String,
    /// Whether the review stage's model invoked the save tool
    pub saved: bool,
    /// The reviewer's final commentary
    pub review_summary: String,
}

/// Derive the artifact filename from the image path
///
/// `.../foo.png` targets `foo_tests.feature` for any extension. `None` for
/// paths without a usable stem.
#[must_use]
pub fn feature_filename(image_path: &Path) -> Option<String> {
    let stem = image_path.file_stem()?.to_str()?;
    if stem.is_empty() {
        return None;
    }
    Some(format!("{stem}{FEATURE_SUFFIX}"))
}

/// The four-stage screenshot-to-feature-file pipeline
pub struct Pipeline {
    config: PipelineConfig,
    vision: VisionStage,
    strategy: StrategyStage,
    syntax: SyntaxStage,
    review: ReviewStage,
    trace: Arc<dyn PipelineTrace>,
}

impl Pipeline {
    /// Assemble the pipeline from its injected collaborators
    #[must_use]
    pub fn new(
        config: PipelineConfig,
        client: Arc<dyn ModelClient>,
        trace: Arc<dyn PipelineTrace>,
    ) -> Self {
        Self {
            vision: VisionStage::new(Arc::clone(&client), config.vision_model.clone()),
            strategy: StrategyStage::new(Arc::clone(&client), config.strategy_model.clone()),
            syntax: SyntaxStage::new(Arc::clone(&client), config.syntax_model.clone()),
            review: ReviewStage::new(client, config.review_model.clone()),
            config,
            trace,
        }
    }

    /// Run the pipeline for one screenshot
    ///
    /// # Workflow
    /// 1. Vision: screenshot -> UI element inventory
    /// 2. Strategy: inventory -> test strategy
    /// 3. Syntax: strategy -> Gherkin source
    /// 4. Review-and-act: Gherkin -> review summary, optional save
    ///
    /// # Errors
    /// - [`PipelineError::InvalidImagePath`] when no output filename can be
    ///   derived from the image path
    /// - [`PipelineError::ImageUnavailable`] when the screenshot cannot be
    ///   loaded
    /// - [`PipelineError::Model`] when a model call fails
    pub async fn run(&self, image_path: &Path) -> Result<PipelineReport, PipelineError> {
        let filename = feature_filename(image_path)
            .ok_or_else(|| PipelineError::InvalidImagePath(image_path.to_path_buf()))?;
        tracing::info!(image = %image_path.display(), target_file = %filename, "pipeline started");

        let trace = self.trace.as_ref();
        let preview = self.config.preview_chars;

        let ui_elements = self.vision.analyze(image_path, trace).await?;
        trace.handoff(vision::NAME, strategy::NAME, ui_elements.preview(preview));

        let test_strategy = self.strategy.design_strategy(&ui_elements, trace).await?;
        trace.handoff(strategy::NAME, syntax::NAME, test_strategy.preview(preview));

        let gherkin = self.syntax.generate_gherkin(&test_strategy, trace).await?;
        trace.handoff(syntax::NAME, review::NAME, gherkin.preview(preview));

        let registry = save_tool_registry(self.config.output_dir.clone());
        let outcome = self
            .review
            .review_and_save(&gherkin, &filename, &registry, trace)
            .await?;

        tracing::info!(saved = outcome.saved(), "pipeline complete");
        Ok(PipelineReport {
            feature_filename: filename,
            saved: outcome.saved(),
            review_summary: outcome.summary,
        })
    }
}

//! Pipeline configuration

use std::path::PathBuf;

/// Default model for the vision, strategy, and syntax stages
pub const DEFAULT_REASONING_MODEL: &str = "gemini-2.5-pro";

/// Default model for the review stage (tool-capable, cheap)
pub const DEFAULT_REVIEW_MODEL: &str = "gemini-flash-lite-latest";

/// Configuration for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Model used by the vision stage
    pub vision_model: String,
    /// Model used by the strategy stage
    pub strategy_model: String,
    /// Model used by the syntax stage
    pub syntax_model: String,
    /// Model used by the review-and-act stage
    pub review_model: String,
    /// Directory the save tool writes artifacts into
    pub output_dir: PathBuf,
    /// How many characters of a payload handoff logs show
    pub preview_chars: usize,
}

impl PipelineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With output directory
    #[inline]
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// With review-stage model
    #[inline]
    #[must_use]
    pub fn with_review_model(mut self, model: impl Into<String>) -> Self {
        self.review_model = model.into();
        self
    }

    /// With one model for vision, strategy, and syntax
    #[inline]
    #[must_use]
    pub fn with_reasoning_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.vision_model.clone_from(&model);
        self.strategy_model.clone_from(&model);
        self.syntax_model = model;
        self
    }

    /// With handoff preview length
    #[inline]
    #[must_use]
    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            vision_model: DEFAULT_REASONING_MODEL.to_string(),
            strategy_model: DEFAULT_REASONING_MODEL.to_string(),
            syntax_model: DEFAULT_REASONING_MODEL.to_string(),
            review_model: DEFAULT_REVIEW_MODEL.to_string(),
            output_dir: PathBuf::from("output"),
            preview_chars: 50,
        }
    }
}

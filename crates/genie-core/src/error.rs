//! Error types for the pipeline core
//!
//! The pipeline deliberately does not validate intermediate content
//! quality; errors here are the hard failures only. Image unavailability
//! gets its own variant so the orchestrator can abort instead of silently
//! forwarding an error string downstream.

use genie_model::ModelError;
use std::path::PathBuf;

/// Main pipeline error type
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The screenshot could not be loaded or uploaded
    #[error("could not load UI screenshot: {0}")]
    ImageUnavailable(#[source] ModelError),

    /// A model call failed
    #[error("model call failed: {0}")]
    Model(#[source] ModelError),

    /// The image path has no usable base name
    #[error("image path '{0}' has no base name to derive an output filename from")]
    InvalidImagePath(PathBuf),
}

impl PipelineError {
    /// Classify a model error from a stage call
    ///
    /// Image-related failures become [`Self::ImageUnavailable`], everything
    /// else [`Self::Model`].
    #[must_use]
    pub fn from_model(error: ModelError) -> Self {
        if error.is_image_error() {
            Self::ImageUnavailable(error)
        } else {
            Self::Model(error)
        }
    }
}

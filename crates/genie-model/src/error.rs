//! Error types for the model client boundary

use std::path::PathBuf;

/// Errors produced by a [`crate::ModelClient`] implementation
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// HTTP transport failure (connection, TLS, body decode)
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The model service answered with a non-success status
    #[error("model service returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or status text
        message: String,
    },

    /// The model answered but produced no usable content
    #[error("model returned no usable content")]
    EmptyResponse,

    /// The image resource could not be read
    #[error("failed to load image '{path}': {source}")]
    Image {
        /// Path that failed to load
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The image extension maps to no known MIME type
    #[error("unsupported image format: '{0}'")]
    UnsupportedImageFormat(String),

    /// The tool-calling conversation never reached a final text answer
    #[error("tool conversation exceeded {0} rounds without a final answer")]
    ToolRoundsExhausted(usize),
}

impl ModelError {
    /// Check whether this error means the input image was unusable
    #[inline]
    #[must_use]
    pub fn is_image_error(&self) -> bool {
        matches!(
            self,
            Self::Image { .. } | Self::UnsupportedImageFormat(_)
        )
    }
}

//! Generative model client boundary for Gherkin Genie
//!
//! Defines the narrow interface the pipeline stages depend on:
//! - [`ModelClient`]: text, image+text, and tool-augmented completions
//! - [`ToolRegistry`]: locally-executed operations the model may invoke
//! - [`GeminiClient`]: the HTTP implementation against the Gemini API
//!
//! Stages never see HTTP or wire formats; they receive an injected
//! `Arc<dyn ModelClient>` and plain strings come back.

pub mod client;
pub mod error;
pub mod gemini;
pub mod image;
pub mod tool;

pub use client::{ModelClient, ToolConversation, ToolInvocation};
pub use error::ModelError;
pub use gemini::GeminiClient;
pub use image::ImageData;
pub use tool::{ToolDeclaration, ToolRegistry};

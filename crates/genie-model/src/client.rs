//! The `ModelClient` trait: what the pipeline stages depend on
//!
//! Three call shapes cover the whole pipeline: plain text completion,
//! image + text completion, and a tool-augmented conversation where the
//! host executes any tool the model chooses to invoke and returns both the
//! final text and the invocation record.

use crate::error::ModelError;
use crate::image::ImageData;
use crate::tool::ToolRegistry;
use async_trait::async_trait;
use serde_json::Value;

/// One tool call the model made during a conversation
///
/// Recorded for observability; execution itself is automatic (the host ran
/// the handler and fed the result back before the model produced its final
/// answer).
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    /// Tool identifier the model named
    pub name: String,
    /// Arguments the model supplied
    pub args: Value,
    /// Result the local handler returned
    pub result: Value,
}

/// Outcome of a tool-augmented conversation
#[derive(Debug, Clone)]
pub struct ToolConversation {
    /// The model's final natural-language answer
    pub text: String,
    /// Every tool call made along the way, in order
    pub invocations: Vec<ToolInvocation>,
}

/// Narrow interface over the generative model service
///
/// Implementations are injected as `Arc<dyn ModelClient>`; tests substitute
/// a deterministic scripted client so the pipeline runs without a network.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Complete a text prompt
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, ModelError>;

    /// Complete a prompt grounded in an image
    async fn complete_with_image(
        &self,
        model: &str,
        image: &ImageData,
        prompt: &str,
    ) -> Result<String, ModelError>;

    /// Run a conversation in which the model may invoke registered tools
    ///
    /// The implementation must execute any tool the model requests against
    /// `registry`, feed the result back into the same conversation, and
    /// return the final text alongside the full invocation record.
    async fn complete_with_tools(
        &self,
        model: &str,
        prompt: &str,
        registry: &ToolRegistry,
    ) -> Result<ToolConversation, ModelError>;
}

//! Gemini HTTP implementation of [`ModelClient`]
//!
//! Talks to the `generateContent` REST endpoint. Images travel as inline
//! base64 data; tools are advertised as function declarations. Tool calls
//! are handled with an automatic function-calling loop: while the model
//! answers with `functionCall` parts, each is executed against the local
//! registry and its result appended as a `functionResponse` before the
//! conversation is re-issued. The loop is bounded so a model that never
//! stops calling tools cannot spin the host.

use crate::client::{ModelClient, ToolConversation, ToolInvocation};
use crate::error::ModelError;
use crate::image::ImageData;
use crate::tool::{ToolDeclaration, ToolRegistry};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default API endpoint root
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default cap on tool-calling rounds per conversation
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 4;

/// Client for the Gemini `generateContent` API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    max_tool_rounds: usize,
}

impl GeminiClient {
    /// Create a client against the default endpoint
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    /// Override the endpoint root (test servers)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the tool-round cap
    #[must_use]
    pub fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds;
        self
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, ModelError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<GenerateResponse>().await?)
    }

    async fn generate_text(
        &self,
        model: &str,
        contents: Vec<Content>,
    ) -> Result<String, ModelError> {
        let request = GenerateRequest {
            contents,
            tools: None,
        };
        let response = self.generate(model, &request).await?;
        let content = response.into_content().ok_or(ModelError::EmptyResponse)?;
        let text = content.text();
        if text.is_empty() {
            return Err(ModelError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, ModelError> {
        tracing::debug!(model, prompt_len = prompt.len(), "text completion");
        self.generate_text(model, vec![Content::user_text(prompt)])
            .await
    }

    async fn complete_with_image(
        &self,
        model: &str,
        image: &ImageData,
        prompt: &str,
    ) -> Result<String, ModelError> {
        tracing::debug!(
            model,
            image = %image.display_name,
            mime = %image.mime_type,
            "multimodal completion"
        );
        let content = Content {
            role: Role::User,
            parts: vec![Part::inline_image(image), Part::text(prompt)],
        };
        self.generate_text(model, vec![content]).await
    }

    async fn complete_with_tools(
        &self,
        model: &str,
        prompt: &str,
        registry: &ToolRegistry,
    ) -> Result<ToolConversation, ModelError> {
        tracing::debug!(model, tools = registry.len(), "tool-augmented completion");
        let tools = vec![ToolSpec {
            function_declarations: registry.declarations().into_iter().cloned().collect(),
        }];

        let mut contents = vec![Content::user_text(prompt)];
        let mut invocations: Vec<ToolInvocation> = Vec::new();

        for _round in 0..=self.max_tool_rounds {
            let request = GenerateRequest {
                contents: contents.clone(),
                tools: Some(tools.clone()),
            };
            let response = self.generate(model, &request).await?;
            let content = response.into_content().ok_or(ModelError::EmptyResponse)?;

            let calls: Vec<FunctionCall> = content
                .parts
                .iter()
                .filter_map(|p| p.function_call.clone())
                .collect();

            if calls.is_empty() {
                let text = content.text();
                if text.is_empty() {
                    return Err(ModelError::EmptyResponse);
                }
                return Ok(ToolConversation { text, invocations });
            }

            // Keep the model turn in the transcript, then answer each call.
            contents.push(content);
            for call in calls {
                let result = registry.dispatch(&call.name, &call.args).unwrap_or_else(|| {
                    json!({
                        "status": "error",
                        "message": format!("unknown tool '{}'", call.name),
                    })
                });
                tracing::debug!(tool = %call.name, "executed tool call");
                contents.push(Content::function_response(&call.name, result.clone()));
                invocations.push(ToolInvocation {
                    name: call.name,
                    args: call.args,
                    result,
                });
            }
        }

        Err(ModelError::ToolRoundsExhausted(self.max_tool_rounds))
    }
}

// ---- wire types -----------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolSpec>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolSpec {
    function_declarations: Vec<ToolDeclaration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Role {
    User,
    Model,
    Function,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    role: Role,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn user_text(text: &str) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::text(text)],
        }
    }

    fn function_response(name: &str, response: Value) -> Self {
        Self {
            role: Role::Function,
            parts: vec![Part {
                function_response: Some(FunctionResponse {
                    name: name.to_string(),
                    response,
                }),
                ..Part::default()
            }],
        }
    }

    /// Concatenate all text parts of this turn
    fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<FunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_response: Option<FunctionResponse>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::default()
        }
    }

    fn inline_image(image: &ImageData) -> Self {
        Self {
            inline_data: Some(InlineData {
                mime_type: image.mime_type.clone(),
                data: image.to_base64(),
            }),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionResponse {
    name: String,
    response: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    fn into_content(self) -> Option<Content> {
        self.candidates.into_iter().next().and_then(|c| c.content)
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

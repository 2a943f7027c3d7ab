//! Testing utilities for the Gherkin Genie workspace
//!
//! Deterministic stand-ins for the two injected collaborators: a scripted
//! model client (canned responses, no network) and a recording trace.

#![allow(missing_docs)]

use async_trait::async_trait;
use genie_core::trace::PipelineTrace;
use genie_model::{
    ImageData, ModelClient, ModelError, ToolConversation, ToolInvocation, ToolRegistry,
};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A scripted [`ModelClient`]
///
/// Pops one canned response per completion call (in script order) and
/// records every prompt it receives, so tests can assert that each stage
/// consumed the previous stage's full output. For the tool-augmented call
/// it plays back queued tool requests, executing each against the real
/// registry exactly as the conversational host would.
#[derive(Default)]
pub struct ScriptedModelClient {
    responses: Mutex<VecDeque<String>>,
    tool_requests: Mutex<Vec<(String, Value)>>,
    seen_prompts: Mutex<Vec<String>>,
    seen_images: Mutex<Vec<String>>,
}

impl ScriptedModelClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next completion response
    #[must_use]
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(text.into());
        self
    }

    /// Queue a tool call the "model" will make during the tools completion
    #[must_use]
    pub fn with_tool_request(self, name: impl Into<String>, args: Value) -> Self {
        self.tool_requests.lock().unwrap().push((name.into(), args));
        self
    }

    /// Every prompt received, in call order
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.seen_prompts.lock().unwrap().clone()
    }

    /// Display names of every image received
    #[must_use]
    pub fn images(&self) -> Vec<String> {
        self.seen_images.lock().unwrap().clone()
    }

    fn next_response(&self) -> Result<String, ModelError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(ModelError::EmptyResponse)
    }

    fn record_prompt(&self, prompt: &str) {
        self.seen_prompts.lock().unwrap().push(prompt.to_string());
    }
}

#[async_trait]
impl ModelClient for ScriptedModelClient {
    async fn complete(&self, _model: &str, prompt: &str) -> Result<String, ModelError> {
        self.record_prompt(prompt);
        self.next_response()
    }

    async fn complete_with_image(
        &self,
        _model: &str,
        image: &ImageData,
        prompt: &str,
    ) -> Result<String, ModelError> {
        self.seen_images
            .lock()
            .unwrap()
            .push(image.display_name.clone());
        self.record_prompt(prompt);
        self.next_response()
    }

    async fn complete_with_tools(
        &self,
        _model: &str,
        prompt: &str,
        registry: &ToolRegistry,
    ) -> Result<ToolConversation, ModelError> {
        self.record_prompt(prompt);

        let requests: Vec<(String, Value)> =
            self.tool_requests.lock().unwrap().drain(..).collect();
        let invocations = requests
            .into_iter()
            .map(|(name, args)| {
                let result = registry.dispatch(&name, &args).unwrap_or_else(|| {
                    json!({"status": "error", "message": format!("unknown tool '{name}'")})
                });
                ToolInvocation { name, args, result }
            })
            .collect();

        Ok(ToolConversation {
            text: self.next_response()?,
            invocations,
        })
    }
}

/// One captured trace event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    PhaseStart {
        agent: String,
        status: String,
    },
    Handoff {
        from: String,
        to: String,
        preview: String,
    },
    Thought {
        agent: String,
        text: String,
    },
    ToolUsage {
        tool: String,
        args: String,
        result: String,
    },
}

/// A [`PipelineTrace`] that records every event for assertions
#[derive(Debug, Default)]
pub struct RecordingTrace {
    events: Mutex<Vec<TraceEvent>>,
}

impl RecordingTrace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.lock().unwrap().clone()
    }

    #[must_use]
    pub fn handoffs(&self) -> Vec<TraceEvent> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, TraceEvent::Handoff { .. }))
            .collect()
    }

    #[must_use]
    pub fn tool_usage_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, TraceEvent::ToolUsage { .. }))
            .count()
    }

    fn push(&self, event: TraceEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl PipelineTrace for RecordingTrace {
    fn phase_start(&self, agent: &str, _icon: &str, status: &str) {
        self.push(TraceEvent::PhaseStart {
            agent: agent.to_string(),
            status: status.to_string(),
        });
    }

    fn handoff(&self, from: &str, to: &str, preview: &str) {
        self.push(TraceEvent::Handoff {
            from: from.to_string(),
            to: to.to_string(),
            preview: preview.to_string(),
        });
    }

    fn thought(&self, agent: &str, text: &str) {
        self.push(TraceEvent::Thought {
            agent: agent.to_string(),
            text: text.to_string(),
        });
    }

    fn tool_usage(&self, tool: &str, args: &Value, result: &str) {
        self.push(TraceEvent::ToolUsage {
            tool: tool.to_string(),
            args: args.to_string(),
            result: result.to_string(),
        });
    }
}

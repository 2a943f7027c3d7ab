//! Pipeline observability
//!
//! The pipeline reports four event kinds at well-defined checkpoints:
//! phase starts, handoffs between stages, full "thought" blocks, and tool
//! usage. The trace is an injected capability rather than ambient global
//! state, so tests can assert on call counts and payloads.

use serde_json::Value;

/// Observer for pipeline checkpoints
pub trait PipelineTrace: Send + Sync {
    /// A stage has been activated
    fn phase_start(&self, agent: &str, icon: &str, status: &str);

    /// One stage's output is being handed to the next
    ///
    /// `preview` is a prefix of the payload for display; the full payload
    /// still flows forward through the pipeline.
    fn handoff(&self, from: &str, to: &str, preview: &str);

    /// A stage's raw output or reasoning, in full
    fn thought(&self, agent: &str, text: &str);

    /// The model invoked a tool
    fn tool_usage(&self, tool: &str, args: &Value, result: &str);
}

/// Default trace: renders events through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTrace;

impl PipelineTrace for TracingTrace {
    fn phase_start(&self, agent: &str, icon: &str, status: &str) {
        tracing::info!(target: "genie::phase", "{icon}  {agent}: {status}");
    }

    fn handoff(&self, from: &str, to: &str, preview: &str) {
        tracing::info!(target: "genie::handoff", from, to, "payload: {preview}...");
    }

    fn thought(&self, agent: &str, text: &str) {
        tracing::debug!(target: "genie::thought", agent, "{text}");
    }

    fn tool_usage(&self, tool: &str, args: &Value, result: &str) {
        tracing::info!(target: "genie::tool", tool, %args, result, "tool call executed");
    }
}

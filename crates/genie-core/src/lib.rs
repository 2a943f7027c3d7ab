//! Gherkin Genie pipeline core
//!
//! A linear four-stage pipeline that turns a UI screenshot into a Gherkin
//! `.feature` file:
//! 1. Vision: screenshot -> inventory of interactive UI elements
//! 2. Strategy: inventory -> plain-language test strategy
//! 3. Syntax: strategy -> Gherkin source
//! 4. Review-and-act: Gherkin -> model review, with an optional
//!    model-invoked save of the final artifact
//!
//! Data flows strictly forward; each stage hands its full output to the
//! next. The only branching lives in the review stage, whose model decides
//! whether to invoke the save tool at all.

pub mod config;
pub mod error;
pub mod message;
pub mod pipeline;
pub mod stages;
pub mod tools;
pub mod trace;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use message::StageMessage;
pub use pipeline::{feature_filename, Pipeline, PipelineReport};
pub use stages::review::{ReviewOutcome, ReviewState};
pub use tools::{save_feature_file, save_tool_registry, ToolResult, ToolStatus, SAVE_FEATURE_FILE};
pub use trace::{PipelineTrace, TracingTrace};

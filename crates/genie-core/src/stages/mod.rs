//! The four pipeline stages
//!
//! Each stage wraps one model call: it announces itself to the trace,
//! formats a prompt, sends it, logs the full response as a thought, and
//! returns the response as the next stage's input. The review stage
//! additionally owns the save-tool decision.

pub mod review;
pub mod strategy;
pub mod syntax;
pub mod vision;

pub use review::ReviewStage;
pub use strategy::StrategyStage;
pub use syntax::SyntaxStage;
pub use vision::VisionStage;

//! Dialogue command handlers.
//!
//! ## Commands
//! - `Respond` - Answer one chat turn through the hybrid live/scripted policy

mod hybrid_orchestrator;
mod system_prompt;

pub use hybrid_orchestrator::{
    HybridOrchestrator, RespondCommand, RespondError, RespondResult, ResponseSource,
    DEFAULT_LIVE_TIMEOUT,
};
pub use system_prompt::build_system_prompt;

//! Application layer - command handlers.
//!
//! This layer coordinates the scripted dialogue domain with the live reply
//! port.

pub mod handlers;

pub use handlers::dialogue::{
    HybridOrchestrator, RespondCommand, RespondError, RespondResult, ResponseSource,
};

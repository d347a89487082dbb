//! Application handlers.
//!
//! Command handlers that orchestrate domain operations and ports.

pub mod dialogue;

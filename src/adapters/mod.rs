//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `ai` - Live reply providers (OpenAI, mock)
//! - `http` - REST API for the chat client

pub mod ai;
pub mod http;

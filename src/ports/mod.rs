//! Ports - contracts between the engine and the outside world.
//!
//! - `AIProvider` - Live chat-completion collaborator

mod ai_provider;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};

//! Live reply port - contract for the chat-completion collaborator.
//!
//! The orchestrator prefers a live model reply when one is available and
//! falls back to the scripted matcher otherwise. Everything it needs from
//! the model is a single text-in/text-out completion, so the port is small:
//!
//! - one non-streaming `complete` call
//! - provider-agnostic messages (system/user/assistant)
//! - typed errors that the caller logs and absorbs
//!
//! Implementations must be cancel-safe: the orchestrator drops the
//! `complete` future when its timeout fires.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for chat-completion providers.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Generates one completion for the conversation so far.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Returns provider name and model, for logs and health output.
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for a single completion.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    /// Conversation history, oldest first.
    pub messages: Vec<Message>,
    pub system_prompt: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    pub fn new(metadata: RequestMetadata) -> Self {
        Self {
            metadata,
            ..Default::default()
        }
    }

    /// Appends a message.
    pub fn with_message(mut self, role: MessageRole, content: impl Into<String>) -> Self {
        self.messages.push(Message::new(role, content));
        self
    }

    /// Replaces the whole history.
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// One message of chat history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    /// Parses a client-supplied role; `None` for anything unrecognised.
    ///
    /// Clients may only speak as the user or replay assistant turns, so
    /// `system` is not accepted from the wire.
    pub fn from_client(role: &str) -> Option<Self> {
        match role.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "assistant" | "bot" => Some(Self::Assistant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// Tracing context carried with a request.
#[derive(Debug, Clone, Default)]
pub struct RequestMetadata {
    pub trace_id: String,
}

impl RequestMetadata {
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
        }
    }
}

/// A completed reply.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub usage: TokenUsage,
    /// Model that actually answered.
    pub model: String,
    pub finish_reason: FinishReason,
}

/// Token counts reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Error,
}

/// Provider identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// e.g. "openai"
    pub name: String,
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Live collaborator failures.
///
/// None of these ever reach an end user; the orchestrator logs them and
/// answers from the script instead.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    #[error("context too long: {0}")]
    ContextTooLong(String),

    #[error("content filtered: {reason}")]
    ContentFiltered { reason: String },

    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The provider answered, but with nothing usable.
    #[error("empty completion")]
    EmptyCompletion,

    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Short machine-friendly name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AIError::RateLimited { .. } => "rate_limited",
            AIError::ContextTooLong(_) => "context_too_long",
            AIError::ContentFiltered { .. } => "content_filtered",
            AIError::Unavailable { .. } => "unavailable",
            AIError::AuthenticationFailed => "authentication_failed",
            AIError::Network(_) => "network",
            AIError::Parse(_) => "parse",
            AIError::InvalidRequest(_) => "invalid_request",
            AIError::EmptyCompletion => "empty_completion",
            AIError::Timeout { .. } => "timeout",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_collects_history_and_options() {
        let request = CompletionRequest::new(RequestMetadata::new("trace-1"))
            .with_message(MessageRole::User, "START")
            .with_message(MessageRole::Assistant, "Hi Mina!")
            .with_system_prompt("Be kind")
            .with_max_tokens(300)
            .with_temperature(0.7);

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[1], Message::assistant("Hi Mina!"));
        assert_eq!(request.system_prompt.as_deref(), Some("Be kind"));
        assert_eq!(request.max_tokens, Some(300));
        assert_eq!(request.metadata.trace_id, "trace-1");
    }

    #[test]
    fn with_messages_replaces_history() {
        let request = CompletionRequest::default()
            .with_message(MessageRole::User, "old")
            .with_messages(vec![Message::user("new")]);
        assert_eq!(request.messages, vec![Message::user("new")]);
    }

    #[test]
    fn client_roles_exclude_system() {
        assert_eq!(MessageRole::from_client("user"), Some(MessageRole::User));
        assert_eq!(MessageRole::from_client(" Assistant "), Some(MessageRole::Assistant));
        assert_eq!(MessageRole::from_client("bot"), Some(MessageRole::Assistant));
        assert_eq!(MessageRole::from_client("system"), None);
        assert_eq!(MessageRole::from_client("narrator"), None);
    }

    #[test]
    fn token_usage_totals() {
        let usage = TokenUsage::new(120, 40);
        assert_eq!(usage.total_tokens, 160);
    }

    #[test]
    fn errors_display_and_name_themselves() {
        let err = AIError::Timeout { timeout_ms: 5000 };
        assert_eq!(err.to_string(), "request timed out after 5000ms");
        assert_eq!(err.kind(), "timeout");
        assert_eq!(AIError::EmptyCompletion.kind(), "empty_completion");
    }

    #[test]
    fn roles_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&MessageRole::Assistant).unwrap(), "\"assistant\"");
        assert_eq!(MessageRole::System.as_str(), "system");
    }
}

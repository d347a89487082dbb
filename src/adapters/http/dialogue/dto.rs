//! HTTP DTOs for the chat endpoint.
//!
//! Field names are camelCase on the wire to match the web client.

use serde::{Deserialize, Serialize};

use crate::application::{RespondCommand, RespondResult, ResponseSource};
use crate::domain::dialogue::{Language, Phase, Scenario, UnknownLanguage, UserContext};
use crate::ports::{Message, MessageRole};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One message of client-held history.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessageDto {
    pub role: String,
    #[serde(default)]
    pub content: String,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessageDto>,
    #[serde(default)]
    pub user_context: UserContext,
    #[serde(default)]
    pub current_turn: usize,
    #[serde(default)]
    pub scenario: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, rename = "forceRealAPI")]
    pub force_real_api: Option<bool>,
}

/// Request fields that are well-formed JSON but still unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatRequestError {
    #[error("language is required (\"ko\" or \"en\")")]
    MissingLanguage,

    #[error(transparent)]
    UnknownLanguage(#[from] UnknownLanguage),
}

impl ChatRequest {
    /// Converts the wire request into an application command.
    ///
    /// Messages with roles other than user/assistant are dropped; a missing or
    /// unknown scenario resolves to the general one.
    pub fn into_command(self) -> Result<RespondCommand, ChatRequestError> {
        let language: Language = self
            .language
            .as_deref()
            .ok_or(ChatRequestError::MissingLanguage)?
            .parse()?;

        let messages = self
            .messages
            .into_iter()
            .filter_map(|m| MessageRole::from_client(&m.role).map(|role| Message::new(role, m.content)))
            .collect();

        Ok(RespondCommand {
            messages,
            user_context: self.user_context,
            current_turn: self.current_turn,
            scenario: Scenario::resolve(self.scenario.as_deref()),
            language,
            force_real_api: self.force_real_api,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body returned by `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    pub source: ResponseSource,
    pub current_turn: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<RespondResult> for ChatResponse {
    fn from(result: RespondResult) -> Self {
        Self {
            message: result.message,
            source: result.source,
            current_turn: result.current_turn,
            phase: result.phase,
            warning: result.warning,
        }
    }
}

/// Body returned by the health endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub openai: String,
    pub fallback: String,
}

impl HealthResponse {
    pub fn new(live_configured: bool) -> Self {
        Self {
            status: "ok".to_string(),
            openai: if live_configured { "configured" } else { "not configured" }.to_string(),
            fallback: "available".to_string(),
        }
    }
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

//! HTTP handlers for the chat endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{ChatRequest, ChatRequestError, ChatResponse, ErrorResponse, HealthResponse};
use crate::application::{HybridOrchestrator, RespondError};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the dialogue routes.
#[derive(Clone)]
pub struct DialogueAppState {
    pub orchestrator: Arc<HybridOrchestrator>,
}

impl DialogueAppState {
    pub fn new(orchestrator: HybridOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type for dialogue endpoints.
///
/// Every failure the endpoint can report is a client error; upstream and
/// scripted-path failures are absorbed by the orchestrator.
#[derive(Debug)]
pub enum DialogueApiError {
    BadRequest(String),
}

impl IntoResponse for DialogueApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            DialogueApiError::BadRequest(msg) => {
                tracing::debug!(error = %msg, "rejected chat request");
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<JsonRejection> for DialogueApiError {
    fn from(rejection: JsonRejection) -> Self {
        DialogueApiError::BadRequest(rejection.body_text())
    }
}

impl From<ChatRequestError> for DialogueApiError {
    fn from(err: ChatRequestError) -> Self {
        DialogueApiError::BadRequest(err.to_string())
    }
}

impl From<RespondError> for DialogueApiError {
    fn from(err: RespondError) -> Self {
        DialogueApiError::BadRequest(err.to_string())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// Answers one chat turn.
///
/// POST /api/chat
pub async fn chat(
    State(state): State<DialogueAppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, DialogueApiError> {
    let Json(request) = payload?;
    let cmd = request.into_command()?;
    let result = state.orchestrator.respond(cmd).await?;
    Ok(Json(result.into()))
}

/// Reports liveness and whether live replies are configured.
///
/// GET /health, GET /api/chat
pub async fn health(State(state): State<DialogueAppState>) -> Json<HealthResponse> {
    Json(HealthResponse::new(state.orchestrator.is_live_configured()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::{DialogueMatcher, ScriptRegistry};

    fn state() -> DialogueAppState {
        let registry = Arc::new(ScriptRegistry::builtin().unwrap());
        DialogueAppState::new(HybridOrchestrator::new(DialogueMatcher::new(registry)))
    }

    fn request(json: &str) -> Result<Json<ChatRequest>, JsonRejection> {
        Ok(Json(serde_json::from_str(json).unwrap()))
    }

    #[tokio::test]
    async fn chat_returns_scripted_reply_without_live_provider() {
        let body = r#"{"language":"en","userContext":{"name":"Mina","courses":["Statistics"]}}"#;
        let Json(response) = chat(State(state()), request(body)).await.unwrap();

        assert_eq!(response.current_turn, 1);
        assert!(response.message.contains("Mina"));
        assert!(response.warning.is_some());
    }

    #[tokio::test]
    async fn chat_rejects_missing_courses() {
        let body = r#"{"language":"en","userContext":{"name":"Mina","courses":[]}}"#;
        let err = chat(State(state()), request(body)).await.unwrap_err();

        let DialogueApiError::BadRequest(msg) = err;
        assert!(msg.contains("courses"));
    }

    #[tokio::test]
    async fn chat_rejects_unknown_language() {
        let body = r#"{"language":"de","userContext":{"name":"Mina","courses":["Art"]}}"#;
        let response = chat(State(state()), request(body))
            .await
            .unwrap_err()
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_reports_fallback_only() {
        let Json(health) = health(State(state())).await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.openai, "not configured");
        assert_eq!(health.fallback, "available");
    }
}

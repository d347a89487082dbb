//! Route definitions for the chat endpoint.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{chat, health, DialogueAppState};

/// Creates the dialogue router.
///
/// # Routes
///
/// - `POST /api/chat` - Answer one chat turn
/// - `GET /api/chat` - Health check
/// - `GET /health` - Health check
pub fn dialogue_routes() -> Router<DialogueAppState> {
    Router::new()
        .route("/api/chat", post(chat).get(health))
        .route("/health", get(health))
}

/// Creates the dialogue router with its state attached.
pub fn dialogue_router(state: DialogueAppState) -> Router {
    dialogue_routes().with_state(state)
}

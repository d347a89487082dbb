//! HTTP surface for the coaching dialogue.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChatMessageDto, ChatRequest, ChatRequestError, ChatResponse, ErrorResponse, HealthResponse,
};
pub use handlers::{chat, health, DialogueApiError, DialogueAppState};
pub use routes::{dialogue_router, dialogue_routes};

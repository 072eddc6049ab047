//! HTTP routes for the chat endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    clear_history, delete_session, list_sessions, send_message, session_stats, ChatHandlers,
};

/// Creates the chat router with all endpoints.
pub fn chat_routes(handlers: ChatHandlers) -> Router {
    Router::new()
        .route("/message", post(send_message))
        .route("/stats/:session_id", get(session_stats))
        .route("/clear/:session_id", delete(clear_history))
        .route("/sessions", get(list_sessions))
        .route("/sessions/:session_id", delete(delete_session))
        .with_state(handlers)
}

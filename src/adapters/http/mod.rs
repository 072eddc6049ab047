//! HTTP adapters - REST API implementations.
//!
//! Each area has its own DTOs, handlers, and routes; all error enums are
//! converted to transport status codes here and nowhere else.

pub mod chat;
pub mod lead;

mod error;

pub use chat::ChatHandlers;
pub use error::ErrorResponse;
pub use lead::LeadHandlers;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

/// Assembles the full application router.
pub fn api_router(chat: ChatHandlers, lead: LeadHandlers) -> Router {
    Router::new()
        .route("/", get(service_banner))
        .route("/health", get(health))
        .nest("/api/chat", chat::chat_routes(chat))
        .nest("/api", lead::lead_routes(lead))
}

/// GET / - service banner with the available endpoints
async fn service_banner() -> Json<Value> {
    Json(json!({
        "service": "concierge",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "chat": "/api/chat/message",
            "stats": "/api/chat/stats/{session_id}",
            "sessions": "/api/chat/sessions",
            "leads": "/api/leads",
        }
    }))
}

/// GET /health - liveness probe
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

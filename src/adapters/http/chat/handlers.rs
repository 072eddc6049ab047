//! HTTP handlers for the chat endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::application::{SessionError, SessionRegistry};
use crate::domain::chat::validate_user_message;
use crate::domain::{SessionId, ValidationError};
use crate::ports::ProviderError;

use super::super::ErrorResponse;
use super::dto::{
    SendMessageRequest, SendMessageResponse, SessionActionResponse, SessionListResponse,
    SessionStatsResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ChatHandlers {
    registry: Arc<SessionRegistry>,
}

impl ChatHandlers {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/chat/message - Send one message to the assistant
pub async fn send_message(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<SendMessageRequest>,
) -> Response {
    // Validate before touching the registry: bad input must not create a
    // session as a side effect.
    let message = match validate_user_message(&req.message) {
        Ok(trimmed) => trimmed.to_string(),
        Err(e) => return validation_error_response(e),
    };

    let (session_id, session) = handlers
        .registry
        .resolve_or_create(req.session_id.as_deref())
        .await;

    match session.send(&message).await {
        Ok(reply) => {
            let response = SendMessageResponse {
                response: reply,
                session_id,
                timestamp: Utc::now(),
                tokens_used: None,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => provider_error_response(&session_id, e),
    }
}

/// GET /api/chat/stats/:session_id - Session statistics
pub async fn session_stats(
    State(handlers): State<ChatHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    match handlers.registry.get(&session_id).await {
        Ok(session) => {
            let response: SessionStatsResponse = session.stats().await.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => session_error_response(e),
    }
}

/// DELETE /api/chat/clear/:session_id - Empty a session's history
pub async fn clear_history(
    State(handlers): State<ChatHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    match handlers.registry.clear(&session_id).await {
        Ok(()) => {
            let response = SessionActionResponse {
                message: "History cleared".to_string(),
                session_id,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => session_error_response(e),
    }
}

/// GET /api/chat/sessions - List active sessions
pub async fn list_sessions(State(handlers): State<ChatHandlers>) -> Response {
    let (total, session_ids) = handlers.registry.list().await;
    let response = SessionListResponse { total, session_ids };
    (StatusCode::OK, Json(response)).into_response()
}

/// DELETE /api/chat/sessions/:session_id - Remove a session entirely
pub async fn delete_session(
    State(handlers): State<ChatHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    match handlers.registry.delete(&session_id).await {
        Ok(()) => {
            let response = SessionActionResponse {
                message: "Session deleted".to_string(),
                session_id,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => session_error_response(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn validation_error_response(error: ValidationError) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse::validation(error.field(), error.to_string())),
    )
        .into_response()
}

fn session_error_response(error: SessionError) -> Response {
    match error {
        SessionError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", &id)),
        )
            .into_response(),
    }
}

fn provider_error_response(session_id: &SessionId, error: ProviderError) -> Response {
    // Full detail stays server-side; the client gets one generic message.
    tracing::error!(session_id = %session_id, error = %error, "model provider call failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal("Failed to process the message")),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_maps_to_422() {
        let error = ValidationError::invalid_field("message", "must not be empty");
        let response = validation_error_response(error);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn session_not_found_maps_to_404() {
        let error = SessionError::NotFound("abc".to_string());
        let response = session_error_response(error);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn provider_error_maps_to_500() {
        let id = SessionId::generate();
        let response = provider_error_response(&id, ProviderError::RateLimited);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

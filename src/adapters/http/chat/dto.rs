//! HTTP DTOs for the chat endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent
//! evolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{SessionId, SessionStats};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/chat/message`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Reply to a chat message.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageResponse {
    pub response: String,
    pub session_id: SessionId,
    pub timestamp: DateTime<Utc>,
    /// Always absent: the free-tier provider does not report usage here.
    pub tokens_used: Option<u32>,
}

/// Statistics for one session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatsResponse {
    pub total_messages: u64,
    pub messages_in_history: usize,
    pub created_at: String,
    pub total_cost: f64,
}

impl From<SessionStats> for SessionStatsResponse {
    fn from(stats: SessionStats) -> Self {
        Self {
            total_messages: stats.total_messages,
            messages_in_history: stats.messages_in_history,
            created_at: stats.created_at.to_rfc3339(),
            total_cost: stats.total_cost,
        }
    }
}

/// Confirmation for clear/delete operations.
#[derive(Debug, Clone, Serialize)]
pub struct SessionActionResponse {
    pub message: String,
    pub session_id: String,
}

/// Body of `GET /api/chat/sessions`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionListResponse {
    pub total: usize,
    pub session_ids: Vec<SessionId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_message_request_deserializes_without_session_id() {
        let req: SendMessageRequest = serde_json::from_str(r#"{"message": "hola"}"#).unwrap();
        assert_eq!(req.message, "hola");
        assert!(req.session_id.is_none());
    }

    #[test]
    fn send_message_request_deserializes_with_session_id() {
        let req: SendMessageRequest =
            serde_json::from_str(r#"{"message": "hola", "session_id": "abc-123"}"#).unwrap();
        assert_eq!(req.session_id.as_deref(), Some("abc-123"));
    }

    #[test]
    fn stats_response_renders_rfc3339_timestamp() {
        let stats = SessionStats {
            total_messages: 3,
            messages_in_history: 6,
            created_at: Utc::now(),
            total_cost: 0.0,
        };
        let response: SessionStatsResponse = stats.into();
        assert_eq!(response.total_messages, 3);
        assert!(response.created_at.contains('T'));
    }

    #[test]
    fn send_message_response_serializes_null_tokens() {
        let response = SendMessageResponse {
            response: "hola".to_string(),
            session_id: SessionId::generate(),
            timestamp: Utc::now(),
            tokens_used: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["tokens_used"].is_null());
    }
}

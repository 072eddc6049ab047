//! Chat-side value objects: session identity, turns, statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ValidationError;

/// Upper bound on a single inbound chat message.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Opaque session identifier.
///
/// Minted values are UUID-v4 strings, but lookups never parse: an identifier
/// the registry has not issued is simply unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Mints a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// End-user input.
    User,
    /// Model response.
    Model,
}

/// One exchanged turn in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    /// Creates a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Creates a model turn.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Observational snapshot of one session. Producing it has no side effects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStats {
    /// Messages ever sent on this session (lifetime, survives `clear`).
    pub total_messages: u64,
    /// Turns currently held in the conversation history.
    pub messages_in_history: usize,
    /// When the session was registered.
    pub created_at: DateTime<Utc>,
    /// Accumulated provider cost. Always zero on the free tier.
    pub total_cost: f64,
}

/// Checks the bounds of an inbound chat message and returns the trimmed text.
///
/// Rejected input never reaches the registry, so an invalid message cannot
/// create a session as a side effect.
pub fn validate_user_message(raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::invalid_field(
            "message",
            "must not be empty",
        ));
    }
    if trimmed.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ValidationError::invalid_field(
            "message",
            format!("must be at most {} characters", MAX_MESSAGE_CHARS),
        ));
    }
    Ok(trimmed)
}

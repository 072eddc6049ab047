//! Chat-model port - the narrow interface to the hosted language model.
//!
//! The provider owns conversation history. This port exposes only what the
//! core needs: start a conversation under an instruction, send one message,
//! observe history length, reset, and export a snapshot. Nothing here
//! assumes local introspection beyond those operations.

use async_trait::async_trait;

use crate::domain::Turn;

/// Factory for provider-backed conversations.
pub trait ChatModel: Send + Sync {
    /// Starts an empty conversation guided by the given instruction text.
    ///
    /// The instruction is opaque configuration: the model shapes its replies
    /// with it, the core never interprets it.
    fn start_chat(&self, instruction: &str) -> Box<dyn Conversation>;
}

/// One ongoing exchange with the model provider.
///
/// Implementations must mutate history only on success: a failed or
/// cancelled `send` leaves the visible turn sequence exactly as it was, so
/// no partial user-only turn can ever be observed.
#[async_trait]
pub trait Conversation: Send + Sync {
    /// Sends one user message and returns the model's reply.
    ///
    /// On success the provider's history grows by one user turn and one
    /// model turn.
    async fn send(&mut self, text: &str) -> Result<String, ProviderError>;

    /// Number of turns the provider currently holds (user and model turns
    /// both count).
    fn history_len(&self) -> usize;

    /// Discards all history. The conversation keeps its instruction.
    fn reset(&mut self);

    /// Read-only snapshot of the current turns, for callers that want to
    /// persist them elsewhere.
    fn export(&self) -> Vec<Turn>;
}

/// Failures surfaced by the model provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Quota exhausted or request rate too high.
    #[error("rate limited by provider")]
    RateLimited,

    /// API key rejected.
    #[error("provider authentication failed")]
    AuthenticationFailed,

    /// The call outlived its explicit timeout.
    #[error("provider request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered, but not in a shape we understand.
    #[error("failed to parse provider response: {0}")]
    Parse(String),

    /// Any other non-success status from the provider.
    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl ProviderError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        ProviderError::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        ProviderError::Parse(message.into())
    }

    /// Creates an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ProviderError::Api {
            status,
            message: message.into(),
        }
    }
}

//! Session registry - the process-wide map from identifier to session.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::SessionId;
use crate::ports::ChatModel;

use super::Session;

/// Errors from registry lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(String),
}

/// Owns every live session and the only references to their conversations.
///
/// Entries live until explicitly deleted or the process exits: there is no
/// TTL and no capacity bound, a documented limitation of the in-memory
/// design. The instruction text passed at construction is opaque persona
/// configuration handed to the model whenever a session is created.
///
/// The map lock is never held across a provider call; per-session
/// serialization happens inside [`Session`].
pub struct SessionRegistry {
    model: Arc<dyn ChatModel>,
    instruction: String,
    sessions: RwLock<HashMap<String, Arc<Session>>>,
}

impl SessionRegistry {
    /// Creates an empty registry backed by the given model.
    pub fn new(model: Arc<dyn ChatModel>, instruction: impl Into<String>) -> Self {
        Self {
            model,
            instruction: instruction.into(),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Resolves a known identifier to its session, or mints a fresh one.
    ///
    /// An absent or unknown identifier yields a fresh UUID-v4 identifier
    /// with an empty conversation. A known identifier always resolves to
    /// the same handle - never two different handles within the registry's
    /// lifetime.
    pub async fn resolve_or_create(&self, requested: Option<&str>) -> (SessionId, Arc<Session>) {
        if let Some(id) = requested {
            let sessions = self.sessions.read().await;
            if let Some(session) = sessions.get(id) {
                return (session.id().clone(), Arc::clone(session));
            }
        }

        let mut sessions = self.sessions.write().await;
        loop {
            let id = SessionId::generate();
            if sessions.contains_key(id.as_str()) {
                // v4 collision, practically unreachable
                continue;
            }
            let session = Arc::new(Session::new(
                id.clone(),
                self.model.start_chat(&self.instruction),
            ));
            sessions.insert(id.as_str().to_string(), Arc::clone(&session));
            tracing::debug!(session_id = %id, "session created");
            return (id, session);
        }
    }

    /// Looks up a session by identifier.
    pub async fn get(&self, id: &str) -> Result<Arc<Session>, SessionError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Empties the session's history. The entry itself is retained.
    pub async fn clear(&self, id: &str) -> Result<(), SessionError> {
        let session = self.get(id).await?;
        session.clear().await;
        Ok(())
    }

    /// Removes the entry entirely, releasing the conversation.
    pub async fn delete(&self, id: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        sessions
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Read-only snapshot: session count plus identifiers.
    pub async fn list(&self) -> (usize, Vec<SessionId>) {
        let sessions = self.sessions.read().await;
        let ids: Vec<SessionId> = sessions.values().map(|s| s.id().clone()).collect();
        (ids.len(), ids)
    }
}

//! One live chat session: a conversation handle plus its counters.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::{SessionId, SessionStats, Turn};
use crate::ports::{Conversation, ProviderError};

/// A registered session owning its conversation with the model provider.
///
/// The conversation sits behind its own mutex and the mutex is held across
/// the provider call on purpose: two concurrent sends against the same
/// session serialize there, while sends against different sessions never
/// contend.
pub struct Session {
    id: SessionId,
    created_at: DateTime<Utc>,
    /// Messages ever sent on this session. `clear` does not touch it.
    total_messages: AtomicU64,
    conversation: Mutex<Box<dyn Conversation>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .field("total_messages", &self.total_messages)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub(crate) fn new(id: SessionId, conversation: Box<dyn Conversation>) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            total_messages: AtomicU64::new(0),
            conversation: Mutex::new(conversation),
        }
    }

    /// The session's identifier.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// When the session was registered.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sends one user message and returns the model's reply.
    ///
    /// The lifetime counter moves only after the provider succeeds, so a
    /// failed call changes nothing observable - neither counters nor the
    /// turn sequence.
    pub async fn send(&self, text: &str) -> Result<String, ProviderError> {
        let mut conversation = self.conversation.lock().await;
        let reply = conversation.send(text).await?;
        self.total_messages.fetch_add(1, Ordering::Relaxed);
        Ok(reply)
    }

    /// Observational snapshot of the session.
    pub async fn stats(&self) -> SessionStats {
        let messages_in_history = self.conversation.lock().await.history_len();
        SessionStats {
            total_messages: self.total_messages.load(Ordering::Relaxed),
            messages_in_history,
            created_at: self.created_at,
            // Free-tier provider: there is nothing to bill.
            total_cost: 0.0,
        }
    }

    /// Drops the conversation history.
    ///
    /// The lifetime counter stays put: "messages ever sent" and "messages
    /// currently in context" are different numbers.
    pub async fn clear(&self) {
        self.conversation.lock().await.reset();
    }

    /// Snapshot of the current turns, for callers persisting them elsewhere.
    pub async fn export(&self) -> Vec<Turn> {
        self.conversation.lock().await.export()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockChatModel, MockFailure};
    use crate::ports::ChatModel;

    fn session_with(model: &MockChatModel) -> Session {
        Session::new(SessionId::generate(), model.start_chat("be helpful"))
    }

    #[tokio::test]
    async fn send_returns_reply_and_counts() {
        let model = MockChatModel::new().with_reply("hola!");
        let session = session_with(&model);

        let reply = session.send("hi").await.unwrap();
        assert_eq!(reply, "hola!");

        let stats = session.stats().await;
        assert_eq!(stats.total_messages, 1);
        assert_eq!(stats.messages_in_history, 2);
        assert_eq!(stats.total_cost, 0.0);
    }

    #[tokio::test]
    async fn failed_send_leaves_session_untouched() {
        let model =
            MockChatModel::new().with_failure(MockFailure::Network("connection reset".into()));
        let session = session_with(&model);

        assert!(session.send("hi").await.is_err());

        let stats = session.stats().await;
        assert_eq!(stats.total_messages, 0);
        assert_eq!(stats.messages_in_history, 0);
    }

    #[tokio::test]
    async fn clear_keeps_lifetime_counter() {
        let model = MockChatModel::new().with_reply("a").with_reply("b");
        let session = session_with(&model);

        session.send("one").await.unwrap();
        session.send("two").await.unwrap();
        session.clear().await;

        let stats = session.stats().await;
        assert_eq!(stats.total_messages, 2);
        assert_eq!(stats.messages_in_history, 0);
    }

    #[tokio::test]
    async fn export_snapshots_turns_in_order() {
        let model = MockChatModel::new().with_reply("first reply");
        let session = session_with(&model);

        session.send("first").await.unwrap();
        let turns = session.export().await;

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].text, "first");
        assert_eq!(turns[1].text, "first reply");
    }
}

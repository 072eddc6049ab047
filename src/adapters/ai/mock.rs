//! Mock chat model for testing.
//!
//! Scripted replies, error injection, an optional per-send delay, and call
//! tracking, so the registry and the HTTP layer can be exercised without a
//! real provider. When the script runs dry the mock echoes the input.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::domain::Turn;
use crate::ports::{ChatModel, Conversation, ProviderError};

/// One scripted outcome for a `send` call.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text as the model's reply.
    Reply(String),
    /// Fail the call.
    Error(MockFailure),
}

/// Error kinds the mock can inject.
#[derive(Debug, Clone)]
pub enum MockFailure {
    RateLimited,
    AuthenticationFailed,
    Network(String),
    Timeout { timeout_secs: u64 },
    Parse(String),
}

impl From<MockFailure> for ProviderError {
    fn from(failure: MockFailure) -> Self {
        match failure {
            MockFailure::RateLimited => ProviderError::RateLimited,
            MockFailure::AuthenticationFailed => ProviderError::AuthenticationFailed,
            MockFailure::Network(message) => ProviderError::network(message),
            MockFailure::Timeout { timeout_secs } => ProviderError::Timeout { timeout_secs },
            MockFailure::Parse(message) => ProviderError::parse(message),
        }
    }
}

/// Chat model whose conversations replay a shared script.
///
/// Clones share the script and the call log, so a test can keep a handle
/// for assertions after moving the model into the registry.
#[derive(Clone, Default)]
pub struct MockChatModel {
    script: Arc<Mutex<VecDeque<MockReply>>>,
    delay: Duration,
    instructions: Arc<Mutex<Vec<String>>>,
    sends: Arc<Mutex<Vec<String>>>,
}

impl MockChatModel {
    /// Creates a mock with an empty script (every send echoes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(MockReply::Reply(text.into()));
        self
    }

    /// Queues a failure.
    pub fn with_failure(self, failure: MockFailure) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(MockReply::Error(failure));
        self
    }

    /// Makes every send pause first, for concurrency tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Instructions passed to `start_chat` so far, in order.
    pub fn started_with(&self) -> Vec<String> {
        self.instructions.lock().unwrap().clone()
    }

    /// Messages passed to `send` so far, in order.
    pub fn sent(&self) -> Vec<String> {
        self.sends.lock().unwrap().clone()
    }
}

impl ChatModel for MockChatModel {
    fn start_chat(&self, instruction: &str) -> Box<dyn Conversation> {
        self.instructions
            .lock()
            .unwrap()
            .push(instruction.to_string());
        Box::new(MockConversation {
            script: Arc::clone(&self.script),
            sends: Arc::clone(&self.sends),
            delay: self.delay,
            history: Vec::new(),
        })
    }
}

struct MockConversation {
    script: Arc<Mutex<VecDeque<MockReply>>>,
    sends: Arc<Mutex<Vec<String>>>,
    delay: Duration,
    history: Vec<Turn>,
}

#[async_trait]
impl Conversation for MockConversation {
    async fn send(&mut self, text: &str) -> Result<String, ProviderError> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        self.sends.lock().unwrap().push(text.to_string());

        let scripted = self.script.lock().unwrap().pop_front();
        let reply = match scripted {
            Some(MockReply::Reply(reply)) => reply,
            Some(MockReply::Error(failure)) => return Err(failure.into()),
            None => format!("echo: {}", text),
        };

        self.history.push(Turn::user(text));
        self.history.push(Turn::model(reply.clone()));
        Ok(reply)
    }

    fn history_len(&self) -> usize {
        self.history.len()
    }

    fn reset(&mut self) {
        self.history.clear();
    }

    fn export(&self) -> Vec<Turn> {
        self.history.clone()
    }
}

//! Mock LLM for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{LlmClient, LlmResponse};
use crate::error::GraphError;
use crate::message::Message;

/// Returns a fixed reply and remembers the last messages it was called with.
pub struct MockLlm {
    reply: String,
    fail_with: Option<String>,
    last_messages: Mutex<Option<Vec<Message>>>,
}

impl MockLlm {
    /// Mock that always answers `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            fail_with: None,
            last_messages: Mutex::new(None),
        }
    }

    /// Mock whose every call fails with `GraphError::Llm(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: String::new(),
            fail_with: Some(message.into()),
            last_messages: Mutex::new(None),
        }
    }

    /// Messages passed to the most recent `invoke`, if any.
    pub fn last_messages(&self) -> Option<Vec<Message>> {
        self.last_messages
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, GraphError> {
        if let Ok(mut guard) = self.last_messages.lock() {
            *guard = Some(messages.to_vec());
        }
        if let Some(ref msg) = self.fail_with {
            return Err(GraphError::Llm(msg.clone()));
        }
        Ok(LlmResponse {
            content: self.reply.clone(),
        })
    }
}

//! LLM client abstraction.
//!
//! The chat-model graph and the suggestion generator both depend on a callable that turns a list
//! of messages into assistant text; this module defines the trait, a mock, and (feature `openai`)
//! an OpenAI-compatible implementation.

mod mock;

#[cfg(feature = "openai")]
mod openai;

pub use mock::MockLlm;

#[cfg(feature = "openai")]
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::GraphError;
use crate::message::Message;

/// Response from an LLM completion.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Assistant message content (plain text).
    pub content: String,
}

/// LLM client: given messages, returns assistant text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Invoke one turn (single-call API, no token streaming).
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, GraphError>;
}

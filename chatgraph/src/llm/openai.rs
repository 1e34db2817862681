//! OpenAI Chat Completions client implementing `LlmClient` (ChatOpenAI).
//!
//! Works against any OpenAI-compatible endpoint (OpenAI, OpenRouter) through `async_openai`; the
//! base URL and key come from [`LlmConfig`](crate::config::LlmConfig) or the default env lookup.

use async_trait::async_trait;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};

use crate::config::LlmConfig;
use crate::error::GraphError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;

/// OpenAI-compatible chat client.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl ChatOpenAI {
    /// Build client with default config (API key from `OPENAI_API_KEY` env).
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            temperature: None,
        }
    }

    /// Build client with custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
            temperature: None,
        }
    }

    /// Build client from env-derived settings, using `model` instead of `config.model`.
    pub fn from_llm_config(config: &LlmConfig, model: &str) -> Self {
        // async_openai appends "/chat/completions"; a trailing slash would double it.
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.clone())
            .with_api_base(config.api_base.trim_end_matches('/'));
        let mut client = Self::with_config(openai_config, model);
        client.temperature = config.temperature;
        client
    }

    /// Set temperature (0–2). Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Converts messages to request messages. Tool output is replayed as user-visible text since
    /// tool calling itself belongs to the graph.
    fn messages_to_request(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System { content } => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(content.as_str()),
                ),
                Message::Human { content } => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(content.as_str()),
                ),
                Message::Ai { content } => {
                    ChatCompletionRequestMessage::Assistant(content.as_str().into())
                }
                Message::Tool { name, content } => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(
                        format!("[tool {}] {}", name, content).as_str(),
                    ),
                ),
            })
            .collect()
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, GraphError> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(Self::messages_to_request(messages));
        if let Some(t) = self.temperature {
            args.temperature(t);
        }

        let request = args
            .build()
            .map_err(|e| GraphError::Llm(format!("request build failed: {}", e)))?;

        tracing::debug!(model = %self.model, messages = messages.len(), "chat completion");
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| GraphError::Llm(format!("API error: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GraphError::Llm("API returned no choices".to_string()))?;

        Ok(LlmResponse {
            content: choice.message.content.unwrap_or_default(),
        })
    }
}

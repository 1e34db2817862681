//! # chatgraph
//!
//! Front-end plumbing for a conversational graph: the contract the servers and the terminal
//! client call (`invoke`, `stream`, `get_state`), the message model that flows through it,
//! per-thread checkpointing, answer/tool extraction and follow-up suggestion generation.
//!
//! ## Main Modules
//!
//! - [`graph`]: [`ConversationGraph`], [`StreamChunk`] / [`NodeUpdate`], [`ScriptedGraph`],
//!   [`ChatModelGraph`].
//! - [`message`]: [`Message`] (human / ai / tool / system) and [`GraphState`].
//! - [`memory`]: [`RunnableConfig`], [`Checkpointer`], [`MemorySaver`], optional `SqliteSaver`.
//! - [`llm`]: [`LlmClient`], [`MockLlm`], optional `ChatOpenAI`.
//! - [`extract`]: last AI answer, last tool metadata, per-update content.
//! - [`suggest`]: suggestion prompt, reply parsing, [`SuggestionGenerator`].
//! - [`config`]: [`LlmConfig`] from env / `.env`.
//!
//! ## Features
//!
//! - `openai` (default): `ChatOpenAI` over any OpenAI-compatible endpoint.
//! - `sqlite` (default): `SqliteSaver` persistent checkpointer.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatgraph::{ConversationGraph, GraphState, Message, RunnableConfig, ScriptedGraph, StreamChunk};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let graph = ScriptedGraph::new(vec![StreamChunk::single("agent", vec![Message::ai("Hello!")])]);
//! let state = graph
//!     .invoke(GraphState::from_query("hi"), RunnableConfig::for_thread("t1"))
//!     .await
//!     .unwrap();
//! assert_eq!(chatgraph::extract::last_ai_answer(&state.messages), Some("Hello!"));
//! # }
//! ```

pub mod build;
pub mod config;
pub mod error;
pub mod extract;
pub mod graph;
pub mod llm;
pub mod memory;
pub mod message;
pub mod suggest;

pub use config::{load_dotenv, ConfigError, LlmConfig};
pub use error::GraphError;
pub use extract::{ToolMetadata, ToolType, FALLBACK_ANSWER};
pub use graph::{
    ChatModelGraph, ChunkStream, ConversationGraph, NodeUpdate, ScriptedGraph, StreamChunk,
};
#[cfg(feature = "openai")]
pub use llm::ChatOpenAI;
pub use llm::{LlmClient, LlmResponse, MockLlm};
pub use memory::{
    Checkpoint, CheckpointError, CheckpointListItem, CheckpointMetadata, CheckpointSource,
    Checkpointer, MemorySaver, RunnableConfig,
};
#[cfg(feature = "sqlite")]
pub use memory::SqliteSaver;
pub use message::{GraphState, Message};
pub use suggest::{SuggestionGenerator, SuggestionSource};

//! Conversation graph contract.
//!
//! The orchestration engine (retrieval, tool routing, grading) lives behind
//! [`ConversationGraph`]: front-ends only ever call `invoke`, `stream` and `get_state`.
//! Two implementations ship with this crate: [`ScriptedGraph`] replays fixed updates (tests,
//! demos) and [`ChatModelGraph`] answers with a single LLM node.

mod chat_model;
mod scripted;

pub use chat_model::{ChatModelGraph, AGENT_NODE, DEFAULT_SYSTEM_PROMPT};
pub use scripted::ScriptedGraph;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::GraphError;
use crate::memory::RunnableConfig;
use crate::message::{GraphState, Message};

/// One node's output within a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeUpdate {
    pub node: String,
    pub messages: Vec<Message>,
}

impl NodeUpdate {
    pub fn new(node: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            node: node.into(),
            messages,
        }
    }
}

/// One item of a graph stream: node name → update, in the order the graph produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamChunk {
    pub updates: Vec<NodeUpdate>,
}

impl StreamChunk {
    /// Chunk with a single node update (the common case).
    pub fn single(node: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            updates: vec![NodeUpdate::new(node, messages)],
        }
    }
}

/// Ordered node updates of one run. An `Err` item ends the run.
pub type ChunkStream = BoxStream<'static, Result<StreamChunk, GraphError>>;

/// A compiled conversational graph with per-thread memory.
#[async_trait]
pub trait ConversationGraph: Send + Sync {
    /// Runs to completion and returns the thread's full state afterwards.
    async fn invoke(
        &self,
        input: GraphState,
        config: RunnableConfig,
    ) -> Result<GraphState, GraphError>;

    /// Runs and yields each step's node updates as they are produced.
    fn stream(&self, input: GraphState, config: RunnableConfig) -> ChunkStream;

    /// Latest checkpointed state of `config`'s thread; empty when the thread is unknown.
    async fn get_state(&self, config: RunnableConfig) -> Result<GraphState, GraphError>;
}

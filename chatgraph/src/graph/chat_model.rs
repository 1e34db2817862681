//! Single-node chat graph: one `agent` node answers with an LLM over the thread history.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use super::{ChunkStream, ConversationGraph, StreamChunk};
use crate::error::GraphError;
use crate::llm::LlmClient;
use crate::memory::{Checkpoint, CheckpointSource, Checkpointer, RunnableConfig};
use crate::message::{GraphState, Message};

/// Name of the only node.
pub const AGENT_NODE: &str = "agent";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are the Cloud Computing Cell (CCC) assistant. \
Answer questions about the society, its domains, events, members and faculty concisely. \
If you do not know the answer, say so.";

/// Graph with a single `agent` node backed by an [`LlmClient`].
///
/// The system prompt is sent with every call but never stored; the checkpoint holds only the
/// conversation (human / ai turns).
#[derive(Clone)]
pub struct ChatModelGraph {
    llm: Arc<dyn LlmClient>,
    checkpointer: Arc<dyn Checkpointer>,
    system_prompt: String,
}

impl ChatModelGraph {
    pub fn new(llm: Arc<dyn LlmClient>, checkpointer: Arc<dyn Checkpointer>) -> Self {
        Self {
            llm,
            checkpointer,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Runs the agent node: returns the full state after the turn and the node's new messages.
    async fn run_agent(
        &self,
        input: GraphState,
        config: &RunnableConfig,
    ) -> Result<(GraphState, Vec<Message>), GraphError> {
        let mut state = match config.thread() {
            Some(_) => self
                .checkpointer
                .get(config)
                .await?
                .map(|cp| cp.state)
                .unwrap_or_default(),
            None => GraphState::default(),
        };
        state.messages.extend(input.messages);

        let mut prompt = Vec::with_capacity(state.messages.len() + 1);
        prompt.push(Message::system(self.system_prompt.clone()));
        prompt.extend(state.messages.iter().cloned());

        tracing::debug!(node = AGENT_NODE, thread_id = ?config.thread_id, "node start");
        let reply = self.llm.invoke(&prompt).await?;
        let produced = vec![Message::ai(reply.content)];
        state.messages.extend(produced.iter().cloned());
        tracing::debug!(node = AGENT_NODE, "node complete");

        if config.thread().is_some() {
            let cp = Checkpoint::from_state(state.clone(), CheckpointSource::Update, 1);
            self.checkpointer.put(config, &cp).await?;
        }
        Ok((state, produced))
    }
}

#[async_trait]
impl ConversationGraph for ChatModelGraph {
    async fn invoke(
        &self,
        input: GraphState,
        config: RunnableConfig,
    ) -> Result<GraphState, GraphError> {
        let (state, _) = self.run_agent(input, &config).await?;
        Ok(state)
    }

    fn stream(&self, input: GraphState, config: RunnableConfig) -> ChunkStream {
        let (tx, rx) = mpsc::channel(128);
        let graph = self.clone();
        tokio::spawn(async move {
            let item = graph
                .run_agent(input, &config)
                .await
                .map(|(_, produced)| StreamChunk::single(AGENT_NODE, produced));
            if let Err(ref e) = item {
                tracing::error!(error = %e, "chat graph run failed");
            }
            let _ = tx.send(item).await;
        });
        Box::pin(ReceiverStream::new(rx))
    }

    async fn get_state(&self, config: RunnableConfig) -> Result<GraphState, GraphError> {
        if config.thread().is_none() {
            return Ok(GraphState::default());
        }
        Ok(self
            .checkpointer
            .get(&config)
            .await?
            .map(|cp| cp.state)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;
    use crate::memory::MemorySaver;
    use tokio_stream::StreamExt;

    fn graph_with(llm: Arc<MockLlm>) -> ChatModelGraph {
        ChatModelGraph::new(llm, Arc::new(MemorySaver::new()))
    }

    /// **Scenario**: invoke sends system prompt + history and returns human + ai turns.
    #[tokio::test]
    async fn invoke_prepends_system_prompt_and_appends_answer() {
        let llm = Arc::new(MockLlm::with_reply("CCC is a tech society."));
        let graph = graph_with(Arc::clone(&llm)).with_system_prompt("be brief");
        let state = graph
            .invoke(GraphState::from_query("what is CCC?"), RunnableConfig::for_thread("t"))
            .await
            .unwrap();
        assert_eq!(
            state.messages,
            vec![
                Message::human("what is CCC?"),
                Message::ai("CCC is a tech society.")
            ]
        );
        let sent = llm.last_messages().unwrap();
        assert_eq!(sent[0], Message::system("be brief"));
        assert_eq!(sent.len(), 2);
    }

    /// **Scenario**: the second turn on a thread sees the first turn's history.
    #[tokio::test]
    async fn second_turn_sees_history() {
        let llm = Arc::new(MockLlm::with_reply("ok"));
        let graph = graph_with(Arc::clone(&llm));
        let config = RunnableConfig::for_thread("t");
        graph
            .invoke(GraphState::from_query("one"), config.clone())
            .await
            .unwrap();
        graph
            .invoke(GraphState::from_query("two"), config.clone())
            .await
            .unwrap();
        let sent = llm.last_messages().unwrap();
        assert_eq!(sent.len(), 4, "system + human/ai + human: {:?}", sent);
        assert_eq!(sent[1], Message::human("one"));
        assert_eq!(sent[2], Message::ai("ok"));
        assert_eq!(sent[3], Message::human("two"));
        assert_eq!(graph.get_state(config).await.unwrap().messages.len(), 4);
    }

    /// **Scenario**: stream yields one `agent` chunk holding the AI message.
    #[tokio::test]
    async fn stream_yields_single_agent_chunk() {
        let graph = graph_with(Arc::new(MockLlm::with_reply("hi")));
        let items: Vec<_> = graph
            .stream(GraphState::from_query("hello"), RunnableConfig::default())
            .collect()
            .await;
        assert_eq!(items.len(), 1);
        let chunk = items.into_iter().next().unwrap().unwrap();
        assert_eq!(chunk, StreamChunk::single(AGENT_NODE, vec![Message::ai("hi")]));
    }

    /// **Scenario**: an LLM failure surfaces as the stream's only (error) item.
    #[tokio::test]
    async fn stream_surfaces_llm_failure() {
        let graph = graph_with(Arc::new(MockLlm::failing("down")));
        let items: Vec<_> = graph
            .stream(GraphState::from_query("hello"), RunnableConfig::default())
            .collect()
            .await;
        assert!(matches!(items.as_slice(), [Err(GraphError::Llm(_))]));
    }
}

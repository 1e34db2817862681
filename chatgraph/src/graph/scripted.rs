//! Scripted graph: replays a fixed sequence of chunks on every run.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

use super::{ChunkStream, ConversationGraph, StreamChunk};
use crate::error::GraphError;
use crate::memory::{Checkpoint, CheckpointSource, Checkpointer, MemorySaver, RunnableConfig};
use crate::message::GraphState;

/// Replays `chunks` for every run, optionally failing after a number of them.
///
/// Every emitted message is appended to the thread state (input first) and checkpointed, so
/// `invoke` and `get_state` behave like a real graph with memory.
#[derive(Clone)]
pub struct ScriptedGraph {
    chunks: Vec<StreamChunk>,
    fail_after: Option<(usize, String)>,
    checkpointer: Arc<dyn Checkpointer>,
}

impl ScriptedGraph {
    pub fn new(chunks: Vec<StreamChunk>) -> Self {
        Self {
            chunks,
            fail_after: None,
            checkpointer: Arc::new(MemorySaver::new()),
        }
    }

    /// Emit `n` chunks, then fail with `GraphError::ExecutionFailed(message)`.
    pub fn failing_after(mut self, n: usize, message: impl Into<String>) -> Self {
        self.fail_after = Some((n, message.into()));
        self
    }

    pub fn with_checkpointer(mut self, checkpointer: Arc<dyn Checkpointer>) -> Self {
        self.checkpointer = checkpointer;
        self
    }

    async fn load(&self, config: &RunnableConfig) -> Result<GraphState, GraphError> {
        if config.thread().is_none() {
            return Ok(GraphState::default());
        }
        Ok(self
            .checkpointer
            .get(config)
            .await?
            .map(|cp| cp.state)
            .unwrap_or_default())
    }

    async fn save(
        &self,
        config: &RunnableConfig,
        state: &GraphState,
        step: u64,
    ) -> Result<(), GraphError> {
        if config.thread().is_some() {
            let cp = Checkpoint::from_state(state.clone(), CheckpointSource::Loop, step);
            self.checkpointer.put(config, &cp).await?;
        }
        Ok(())
    }

    async fn run(
        &self,
        input: GraphState,
        config: &RunnableConfig,
        tx: &mpsc::Sender<Result<StreamChunk, GraphError>>,
    ) -> Result<(), GraphError> {
        let mut state = self.load(config).await?;
        state.messages.extend(input.messages);
        self.save(config, &state, 0).await?;

        for (i, chunk) in self.chunks.iter().enumerate() {
            if let Some((n, ref message)) = self.fail_after {
                if i >= n {
                    return Err(GraphError::ExecutionFailed(message.clone()));
                }
            }
            for update in &chunk.updates {
                state.messages.extend(update.messages.iter().cloned());
            }
            self.save(config, &state, i as u64 + 1).await?;
            if tx.send(Ok(chunk.clone())).await.is_err() {
                tracing::debug!("stream receiver dropped; stopping scripted run");
                return Ok(());
            }
        }
        if let Some((n, ref message)) = self.fail_after {
            if n >= self.chunks.len() {
                return Err(GraphError::ExecutionFailed(message.clone()));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ConversationGraph for ScriptedGraph {
    async fn invoke(
        &self,
        input: GraphState,
        config: RunnableConfig,
    ) -> Result<GraphState, GraphError> {
        let mut stream = self.stream(input.clone(), config.clone());
        let mut state = if config.thread().is_some() {
            None
        } else {
            Some(input)
        };
        while let Some(item) = stream.next().await {
            let chunk = item?;
            if let Some(s) = state.as_mut() {
                for update in chunk.updates {
                    s.messages.extend(update.messages);
                }
            }
        }
        match state {
            Some(s) => Ok(s),
            None => self.get_state(config).await,
        }
    }

    fn stream(&self, input: GraphState, config: RunnableConfig) -> ChunkStream {
        let (tx, rx) = mpsc::channel(128);
        let graph = self.clone();
        tokio::spawn(async move {
            if let Err(e) = graph.run(input, &config, &tx).await {
                let _ = tx.send(Err(e)).await;
            }
        });
        Box::pin(ReceiverStream::new(rx))
    }

    async fn get_state(&self, config: RunnableConfig) -> Result<GraphState, GraphError> {
        self.load(&config).await
    }
}

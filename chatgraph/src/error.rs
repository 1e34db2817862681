//! Graph execution error types.
//!
//! Returned by [`ConversationGraph`](crate::graph::ConversationGraph) operations and by
//! [`LlmClient::invoke`](crate::llm::LlmClient::invoke).

use thiserror::Error;

use crate::memory::CheckpointError;

/// Error raised while running, streaming or reading a conversation graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A node failed (e.g. a scripted failure or an unexpected state).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
    /// The language model call failed or returned nothing usable.
    #[error("llm error: {0}")]
    Llm(String),
    /// Loading or saving the thread checkpoint failed.
    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] CheckpointError),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Display format of ExecutionFailed contains "execution failed" and the message.
    #[test]
    fn graph_error_display_execution_failed() {
        let err = GraphError::ExecutionFailed("node blew up".to_string());
        let s = err.to_string();
        assert!(s.contains("execution failed"), "{}", s);
        assert!(s.contains("node blew up"), "{}", s);
    }

    /// **Scenario**: CheckpointError converts into GraphError::Checkpoint via `?`.
    #[test]
    fn checkpoint_error_converts_into_graph_error() {
        fn load() -> Result<(), GraphError> {
            Err::<(), _>(CheckpointError::ThreadIdRequired)?;
            Ok(())
        }
        match load() {
            Err(GraphError::Checkpoint(CheckpointError::ThreadIdRequired)) => {}
            other => panic!("expected Checkpoint(ThreadIdRequired), got {:?}", other),
        }
    }
}

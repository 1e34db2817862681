//! Checkpointer trait and its error type.

use async_trait::async_trait;
use thiserror::Error;

use super::{Checkpoint, CheckpointListItem, RunnableConfig};

/// Errors from checkpoint storage.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("thread_id is required for checkpointing")]
    ThreadIdRequired,
    #[error("serialization failed: {0}")]
    Serialization(String),
    #[error("storage failed: {0}")]
    Storage(String),
}

/// Per-thread state persistence.
///
/// `put` appends a checkpoint for `config.thread_id`; `get` returns the latest one. Both fail with
/// [`CheckpointError::ThreadIdRequired`] when the config has no (non-empty) thread id.
#[async_trait]
pub trait Checkpointer: Send + Sync {
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint,
    ) -> Result<String, CheckpointError>;

    async fn get(&self, config: &RunnableConfig) -> Result<Option<Checkpoint>, CheckpointError>;

    async fn list(&self, config: &RunnableConfig)
        -> Result<Vec<CheckpointListItem>, CheckpointError>;
}

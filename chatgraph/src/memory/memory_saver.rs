//! In-memory checkpointer for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Checkpoint, CheckpointError, CheckpointListItem, Checkpointer, RunnableConfig};

/// Checkpoints kept per thread unless overridden with [`MemorySaver::with_max_history`].
pub const DEFAULT_MAX_HISTORY: usize = 8;

/// Keeps the most recent checkpoints of every thread in process memory. Lost on restart.
///
/// Each checkpoint holds the full thread state, so only the newest `max_history` per thread are
/// retained; older ones are dropped on `put`.
pub struct MemorySaver {
    threads: RwLock<HashMap<String, Vec<Checkpoint>>>,
    max_history: usize,
}

impl MemorySaver {
    pub fn new() -> Self {
        Self::with_max_history(DEFAULT_MAX_HISTORY)
    }

    /// Retains at most `max_history` checkpoints per thread (at least one).
    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            threads: RwLock::new(HashMap::new()),
            max_history: max_history.max(1),
        }
    }
}

impl Default for MemorySaver {
    fn default() -> Self {
        Self::new()
    }
}

fn thread_of(config: &RunnableConfig) -> Result<&str, CheckpointError> {
    config.thread().ok_or(CheckpointError::ThreadIdRequired)
}

#[async_trait]
impl Checkpointer for MemorySaver {
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint,
    ) -> Result<String, CheckpointError> {
        let thread = thread_of(config)?;
        let mut threads = self.threads.write().await;
        let history = threads.entry(thread.to_string()).or_default();
        history.push(checkpoint.clone());
        if history.len() > self.max_history {
            let excess = history.len() - self.max_history;
            history.drain(..excess);
        }
        Ok(checkpoint.id.clone())
    }

    async fn get(&self, config: &RunnableConfig) -> Result<Option<Checkpoint>, CheckpointError> {
        let thread = thread_of(config)?;
        let threads = self.threads.read().await;
        Ok(threads.get(thread).and_then(|cps| cps.last().cloned()))
    }

    async fn list(
        &self,
        config: &RunnableConfig,
    ) -> Result<Vec<CheckpointListItem>, CheckpointError> {
        let thread = thread_of(config)?;
        let threads = self.threads.read().await;
        Ok(threads
            .get(thread)
            .map(|cps| {
                cps.iter()
                    .map(|cp| CheckpointListItem {
                        checkpoint_id: cp.id.clone(),
                        metadata: cp.metadata.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}

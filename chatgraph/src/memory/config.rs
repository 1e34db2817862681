//! Run config: which thread a call belongs to.

/// Config for a single invoke / stream / get_state call.
///
/// Mirrors the `configurable` block of a graph call. Checkpointers key state by `thread_id`;
/// without one a run is stateless and nothing is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnableConfig {
    /// Conversation id. Required for checkpointing.
    pub thread_id: Option<String>,
}

impl RunnableConfig {
    pub fn for_thread(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: Some(thread_id.into()),
        }
    }

    /// Thread id when present and non-empty.
    pub fn thread(&self) -> Option<&str> {
        self.thread_id.as_deref().filter(|t| !t.is_empty())
    }
}

//! Checkpoint and metadata types.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::message::GraphState;

/// Where a checkpoint came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointSource {
    /// Input state written before the first node ran.
    Input,
    /// Written after a node finished.
    Loop,
    /// Written after the run finished.
    Update,
}

impl CheckpointSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Loop => "loop",
            Self::Update => "update",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "input" => Some(Self::Input),
            "loop" => Some(Self::Loop),
            "update" => Some(Self::Update),
            _ => None,
        }
    }
}

/// Metadata for a single checkpoint.
#[derive(Debug, Clone)]
pub struct CheckpointMetadata {
    pub source: CheckpointSource,
    pub step: u64,
    pub created_at: Option<SystemTime>,
}

/// One saved conversation state for a thread.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pub id: String,
    pub ts: String,
    pub state: GraphState,
    pub metadata: CheckpointMetadata,
}

/// Item returned by `Checkpointer::list`, oldest first.
#[derive(Debug, Clone)]
pub struct CheckpointListItem {
    pub checkpoint_id: String,
    pub metadata: CheckpointMetadata,
}

impl Checkpoint {
    /// Creates a checkpoint from the current state. Id and ts derive from the current time.
    pub fn from_state(state: GraphState, source: CheckpointSource, step: u64) -> Self {
        let now = SystemTime::now();
        let ts = format!(
            "{}",
            now.duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0)
        );
        let id = format!("{}-{}", ts, step);
        Self {
            id,
            ts,
            state,
            metadata: CheckpointMetadata {
                source,
                step,
                created_at: Some(now),
            },
        }
    }
}

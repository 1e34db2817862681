//! # Memory: per-thread checkpointing
//!
//! A [`Checkpointer`] keeps the conversation state of each thread so that a later request with the
//! same thread id continues the conversation, and so `get_state` can read it back (e.g. to find the
//! last answer when generating follow-up suggestions).
//!
//! | Type            | Persistence | Feature  |
//! |-----------------|-------------|----------|
//! | [`MemorySaver`] | In-memory   | none     |
//! | [`SqliteSaver`] | SQLite file | `sqlite` |
//!
//! [`RunnableConfig`] carries the thread id into every call.

mod checkpoint;
mod checkpointer;
mod config;
mod memory_saver;
#[cfg(feature = "sqlite")]
mod sqlite_saver;

pub use checkpoint::{Checkpoint, CheckpointListItem, CheckpointMetadata, CheckpointSource};
pub use checkpointer::{CheckpointError, Checkpointer};
pub use config::RunnableConfig;
pub use memory_saver::{MemorySaver, DEFAULT_MAX_HISTORY};
#[cfg(feature = "sqlite")]
pub use sqlite_saver::SqliteSaver;

//! SQLite-backed checkpointer (feature `sqlite`).
//!
//! One row per checkpoint; the conversation state is stored as JSON. Blocking rusqlite calls run on
//! tokio's blocking pool.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use super::{
    Checkpoint, CheckpointError, CheckpointListItem, CheckpointMetadata, CheckpointSource,
    Checkpointer, RunnableConfig,
};
use crate::message::GraphState;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS checkpoints (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    thread_id TEXT NOT NULL,
    checkpoint_id TEXT NOT NULL,
    ts TEXT NOT NULL,
    source TEXT NOT NULL,
    step INTEGER NOT NULL,
    state TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_checkpoints_thread ON checkpoints (thread_id, seq);";

/// Persistent checkpointer over a single SQLite file.
pub struct SqliteSaver {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSaver {
    /// Opens (or creates) the database at `path` and ensures the schema exists.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, CheckpointError> {
        let conn = Connection::open(path).map_err(storage)?;
        conn.execute_batch(SCHEMA).map_err(storage)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, CheckpointError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, CheckpointError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|e| CheckpointError::Storage(format!("connection lock poisoned: {}", e)))?;
            f(&guard)
        })
        .await
        .map_err(|e| CheckpointError::Storage(e.to_string()))?
    }
}

fn storage(e: rusqlite::Error) -> CheckpointError {
    CheckpointError::Storage(e.to_string())
}

fn thread_of(config: &RunnableConfig) -> Result<String, CheckpointError> {
    config
        .thread()
        .map(ToString::to_string)
        .ok_or(CheckpointError::ThreadIdRequired)
}

fn metadata_from_row(ts: &str, source: &str, step: i64) -> CheckpointMetadata {
    let created_at = ts
        .parse::<u64>()
        .ok()
        .map(|ms| SystemTime::UNIX_EPOCH + Duration::from_millis(ms));
    CheckpointMetadata {
        source: CheckpointSource::parse(source).unwrap_or(CheckpointSource::Update),
        step: step.max(0) as u64,
        created_at,
    }
}

#[async_trait]
impl Checkpointer for SqliteSaver {
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint,
    ) -> Result<String, CheckpointError> {
        let thread = thread_of(config)?;
        let state = serde_json::to_string(&checkpoint.state)
            .map_err(|e| CheckpointError::Serialization(e.to_string()))?;
        let id = checkpoint.id.clone();
        let ts = checkpoint.ts.clone();
        let source = checkpoint.metadata.source.as_str();
        let step = checkpoint.metadata.step as i64;
        let returned = id.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO checkpoints (thread_id, checkpoint_id, ts, source, step, state)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![thread, id, ts, source, step, state],
            )
            .map_err(storage)?;
            Ok(())
        })
        .await?;
        Ok(returned)
    }

    async fn get(&self, config: &RunnableConfig) -> Result<Option<Checkpoint>, CheckpointError> {
        let thread = thread_of(config)?;
        let row = self
            .with_conn(move |conn| {
                conn.query_row(
                    "SELECT checkpoint_id, ts, source, step, state FROM checkpoints
                     WHERE thread_id = ?1 ORDER BY seq DESC LIMIT 1",
                    params![thread],
                    |r| {
                        Ok((
                            r.get::<_, String>(0)?,
                            r.get::<_, String>(1)?,
                            r.get::<_, String>(2)?,
                            r.get::<_, i64>(3)?,
                            r.get::<_, String>(4)?,
                        ))
                    },
                )
                .optional()
                .map_err(storage)
            })
            .await?;

        let Some((id, ts, source, step, state)) = row else {
            return Ok(None);
        };
        let state: GraphState = serde_json::from_str(&state)
            .map_err(|e| CheckpointError::Serialization(e.to_string()))?;
        let metadata = metadata_from_row(&ts, &source, step);
        Ok(Some(Checkpoint {
            id,
            ts,
            state,
            metadata,
        }))
    }

    async fn list(
        &self,
        config: &RunnableConfig,
    ) -> Result<Vec<CheckpointListItem>, CheckpointError> {
        let thread = thread_of(config)?;
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT checkpoint_id, ts, source, step FROM checkpoints
                     WHERE thread_id = ?1 ORDER BY seq ASC",
                )
                .map_err(storage)?;
            let rows = stmt
                .query_map(params![thread], |r| {
                    Ok((
                        r.get::<_, String>(0)?,
                        r.get::<_, String>(1)?,
                        r.get::<_, String>(2)?,
                        r.get::<_, i64>(3)?,
                    ))
                })
                .map_err(storage)?;
            let mut items = Vec::new();
            for row in rows {
                let (checkpoint_id, ts, source, step) = row.map_err(storage)?;
                items.push(CheckpointListItem {
                    checkpoint_id,
                    metadata: metadata_from_row(&ts, &source, step),
                });
            }
            Ok(items)
        })
        .await
    }
}

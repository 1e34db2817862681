//! Builds the runtime pieces (checkpointer, chat graph, suggestion generator) from [`LlmConfig`].
//!
//! Used by the server and the CLI so both wire the same graph from the same env.

use std::sync::Arc;

use crate::config::LlmConfig;
use crate::memory::{CheckpointError, Checkpointer, MemorySaver};

/// Checkpointer for `config`: SQLite at `db_path` when set (feature `sqlite`), in-memory otherwise.
pub fn build_checkpointer(config: &LlmConfig) -> Result<Arc<dyn Checkpointer>, CheckpointError> {
    match config.db_path.as_deref() {
        #[cfg(feature = "sqlite")]
        Some(path) => {
            tracing::info!(db_path = %path, "using sqlite checkpointer");
            Ok(Arc::new(crate::memory::SqliteSaver::new(path)?))
        }
        #[cfg(not(feature = "sqlite"))]
        Some(path) => {
            tracing::warn!(db_path = %path, "sqlite feature disabled; checkpoints stay in memory");
            Ok(Arc::new(MemorySaver::new()))
        }
        None => Ok(Arc::new(MemorySaver::new())),
    }
}

/// Chat-model graph answering with `config.model`.
#[cfg(feature = "openai")]
pub fn build_chat_graph(
    config: &LlmConfig,
) -> Result<crate::graph::ChatModelGraph, CheckpointError> {
    let llm = crate::llm::ChatOpenAI::from_llm_config(config, &config.model);
    let graph = crate::graph::ChatModelGraph::new(Arc::new(llm), build_checkpointer(config)?);
    Ok(match config.system_prompt {
        Some(ref prompt) => graph.with_system_prompt(prompt.clone()),
        None => graph,
    })
}

/// Suggestion generator calling `config.suggest_model`.
#[cfg(feature = "openai")]
pub fn build_suggester(config: &LlmConfig) -> crate::suggest::SuggestionGenerator {
    let llm = crate::llm::ChatOpenAI::from_llm_config(config, &config.suggest_model);
    crate::suggest::SuggestionGenerator::new(Arc::new(llm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Checkpoint, CheckpointSource, RunnableConfig};
    use crate::message::GraphState;

    fn config(db_path: Option<String>) -> LlmConfig {
        LlmConfig {
            api_base: "http://localhost:1".into(),
            api_key: "k".into(),
            model: "m".into(),
            suggest_model: "m".into(),
            temperature: None,
            system_prompt: None,
            db_path,
        }
    }

    /// **Scenario**: without db_path the checkpointer is in-memory and usable.
    #[tokio::test]
    async fn build_checkpointer_defaults_to_memory() {
        let cp = build_checkpointer(&config(None)).unwrap();
        let rc = RunnableConfig::for_thread("t");
        cp.put(&rc, &Checkpoint::from_state(GraphState::default(), CheckpointSource::Input, 0))
            .await
            .unwrap();
        assert!(cp.get(&rc).await.unwrap().is_some());
    }

    /// **Scenario**: with db_path the sqlite file is created.
    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn build_checkpointer_with_db_path_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.db");
        let _cp = build_checkpointer(&config(Some(path.to_string_lossy().into_owned()))).unwrap();
        assert!(path.is_file());
    }
}

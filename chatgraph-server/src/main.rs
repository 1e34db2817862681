//! CCC chatbot server: conversation graph over JSON, SSE and WebSocket.
//!
//! Configure via env: OPENAI_API_KEY or OPENROUTER_API_KEY, OPENAI_API_BASE, OPENAI_MODEL,
//! SUGGEST_MODEL, DB_PATH, LISTEN, LOG_FILE. See `chatgraph::LlmConfig::from_env`.

use std::sync::Arc;

use chatgraph::build::{build_chat_graph, build_suggester};
use chatgraph_server::{app, logging, AppState, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    chatgraph::load_dotenv();

    let config = ServerConfig::from_env()?;
    logging::init_tracing(config.log_file.as_deref())?;

    info!(
        model = %config.llm.model,
        suggest_model = %config.llm.suggest_model,
        base_url = %config.llm.api_base,
        db_path = ?config.llm.db_path,
        "LLM and runtime config loaded"
    );

    let graph = build_chat_graph(&config.llm)?;
    let suggester = build_suggester(&config.llm);
    let state = Arc::new(AppState::new(Arc::new(graph), Arc::new(suggester)));

    info!("listening on http://{}", config.listen);
    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}

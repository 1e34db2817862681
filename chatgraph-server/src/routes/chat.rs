//! `/chat` (invoke) and `/chat/stream` (named SSE events).

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use axum::Json;
use chatgraph::extract::{last_ai_answer, tool_metadata};
use chatgraph::{GraphState, RunnableConfig, FALLBACK_ANSWER};
use futures::{Stream, StreamExt};

use crate::api::{ChatResponse, QueryRequest};
use crate::error::ServerError;
use crate::state::AppState;
use crate::transport::{chat_events, resolve_thread_id};

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<ChatResponse>, ServerError> {
    let thread_id = resolve_thread_id(req.thread_id.as_deref());
    tracing::info!(thread_id = %thread_id, "chat");

    let result = state
        .graph
        .invoke(
            GraphState::from_query(req.query),
            RunnableConfig::for_thread(thread_id.clone()),
        )
        .await?;

    let tool = tool_metadata(&result.messages);
    Ok(Json(ChatResponse {
        answer: last_ai_answer(&result.messages)
            .unwrap_or(FALLBACK_ANSWER)
            .to_string(),
        thread_id,
        tool_type: tool.tool_type,
        tool_name: tool.tool_name,
    }))
}

pub async fn chat_stream(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let thread_id = resolve_thread_id(req.thread_id.as_deref());
    tracing::info!(thread_id = %thread_id, "chat stream");

    let chunks = state.graph.stream(
        GraphState::from_query(req.query),
        RunnableConfig::for_thread(thread_id.clone()),
    );
    let events = chat_events(thread_id, chunks).map(|ev| Ok(ev.into_sse()));
    Sse::new(events)
}

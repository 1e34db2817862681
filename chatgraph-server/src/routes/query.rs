//! `/query` (collected steps), `/query/stream` (data-only SSE) and `/query/ws` (WebSocket).
//!
//! All three stream the graph and emit the same step frames; they differ only in transport.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::sse::{Event, Sse};
use axum::response::IntoResponse;
use axum::Json;
use chatgraph::{GraphState, RunnableConfig};
use futures::{Stream, StreamExt};

use crate::api::{QueryRequest, QueryResponse};
use crate::error::ServerError;
use crate::state::AppState;
use crate::transport::{collect_steps, resolve_thread_id, step_frames, StepFrame};

pub async fn query(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ServerError> {
    let thread_id = resolve_thread_id(req.thread_id.as_deref());
    tracing::info!(thread_id = %thread_id, "query");

    let chunks = state.graph.stream(
        GraphState::from_query(req.query),
        RunnableConfig::for_thread(thread_id.clone()),
    );
    let (answer, steps) = collect_steps(chunks).await?;
    Ok(Json(QueryResponse {
        answer,
        steps,
        thread_id,
    }))
}

pub async fn query_stream(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let thread_id = resolve_thread_id(req.thread_id.as_deref());
    tracing::info!(thread_id = %thread_id, "query stream");

    let chunks = state.graph.stream(
        GraphState::from_query(req.query),
        RunnableConfig::for_thread(thread_id.clone()),
    );
    Sse::new(step_frames(thread_id, chunks).map(|frame| Event::default().json_data(frame)))
}

pub async fn query_ws(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_query_socket(socket, state))
}

/// One query per connection: read the request frame, relay step frames, close.
async fn handle_query_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let req = match read_query_request(&mut socket).await {
        Ok(Some(req)) => req,
        Ok(None) => {
            tracing::debug!("websocket closed before a query arrived");
            return;
        }
        Err(e) => {
            tracing::warn!(error = %e, "invalid websocket query");
            let frame = StepFrame::Error {
                message: e.to_string(),
            };
            let _ = send_frame(&mut socket, &frame).await;
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    };

    let thread_id = resolve_thread_id(req.thread_id.as_deref());
    tracing::info!(thread_id = %thread_id, "query websocket");
    let chunks = state.graph.stream(
        GraphState::from_query(req.query),
        RunnableConfig::for_thread(thread_id.clone()),
    );
    let mut frames = step_frames(thread_id, chunks);
    while let Some(frame) = frames.next().await {
        if let Err(e) = send_frame(&mut socket, &frame).await {
            tracing::debug!(error = %e, "websocket client went away");
            return;
        }
    }
    let _ = socket.send(Message::Close(None)).await;
}

/// Waits for the first data frame and parses it. `Ok(None)` when the client closed first.
async fn read_query_request(
    socket: &mut WebSocket,
) -> Result<Option<QueryRequest>, ServerError> {
    while let Some(msg) = socket.recv().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(error = %e, "websocket receive failed");
                return Ok(None);
            }
        };
        match msg {
            Message::Text(text) => return parse_query_request(text.as_bytes()).map(Some),
            Message::Binary(bytes) => return parse_query_request(&bytes).map(Some),
            Message::Close(_) => return Ok(None),
            Message::Ping(_) | Message::Pong(_) => {}
        }
    }
    Ok(None)
}

fn parse_query_request(raw: &[u8]) -> Result<QueryRequest, ServerError> {
    serde_json::from_slice(raw)
        .map_err(|e| ServerError::BadRequest(format!("invalid query frame: {}", e)))
}

async fn send_frame(socket: &mut WebSocket, frame: &StepFrame) -> Result<(), axum::Error> {
    let json = serde_json::to_string(frame).map_err(axum::Error::new)?;
    socket.send(Message::Text(json)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: a frame with query and thread_id parses; a frame without query is rejected.
    #[test]
    fn parse_query_request_requires_query() {
        let req = parse_query_request(br#"{"query":"hi","thread_id":"t1"}"#).unwrap();
        assert_eq!(req.query, "hi");
        assert_eq!(req.thread_id.as_deref(), Some("t1"));

        let err = parse_query_request(br#"{"thread_id":"t1"}"#).unwrap_err();
        assert!(matches!(err, ServerError::BadRequest(_)));
        assert!(err.to_string().contains("missing field `query`"), "{}", err);
    }
}

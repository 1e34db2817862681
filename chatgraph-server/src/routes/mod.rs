//! Route table.

mod chat;
mod meta;
mod query;
mod suggest;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info_span;

use crate::logging::log_request;
use crate::state::AppState;

/// Builds the application router with tracing, request logging and permissive CORS.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(meta::root))
        .route("/health", get(meta::health))
        .route("/chat", post(chat::chat))
        .route("/chat/stream", post(chat::chat_stream))
        .route("/query", post(query::query))
        .route("/query/stream", post(query::query_stream))
        .route("/query/ws", get(query::query_ws))
        .route("/suggest", post(suggest::suggest))
        .layer(middleware::from_fn(log_request))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                info_span!("request", method = %req.method(), uri = %req.uri())
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

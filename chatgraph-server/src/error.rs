//! Handler errors and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chatgraph::GraphError;

/// Error returned by route handlers; rendered as `{"error":{"message":...}}`.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The client sent a request the handler cannot use (e.g. an invalid WebSocket query frame).
    #[error("bad request: {0}")]
    BadRequest(String),
    /// The graph failed while running or reading state.
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
    /// The suggestion model call failed.
    #[error("suggestion model error: {0}")]
    Suggest(GraphError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Graph(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Suggest(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let msg = self.to_string();
        (status, Json(serde_json::json!({ "error": { "message": msg } }))).into_response()
    }
}

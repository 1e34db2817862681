//! HTTP front-end for a conversation graph.
//!
//! Routes (see [`app`]):
//!
//! - `POST /chat`, `POST /query`: JSON request/response.
//! - `POST /chat/stream`: named SSE events; `POST /query/stream`: JSON step frames over SSE.
//! - `GET /query/ws`: the same step frames over WebSocket.
//! - `POST /suggest`: follow-up suggestions.
//! - `GET /`, `GET /health`.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod state;
pub mod transport;

pub use config::ServerConfig;
pub use error::ServerError;
pub use routes::app;
pub use state::AppState;

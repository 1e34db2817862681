//! Tracing setup and per-request logging.

use std::time::Instant;

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

const DEFAULT_FILTER: &str = "info,chatgraph_server=debug,chatgraph=debug";

/// `RUST_LOG` when set, otherwise the crate-level debug default.
fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER))
}

/// Initializes tracing: always to stdout; if `log_file` is set, also to that file (append).
/// File output is plain text (no ANSI colors).
pub fn init_tracing(log_file: Option<&str>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::Layer;

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_filter(env_filter());

    let registry = tracing_subscriber::registry().with(stdout_layer);

    if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false)
            .with_filter(env_filter());
        registry.with(file_layer).try_init()?;
        tracing::info!(path = %path, "logging to file");
    } else {
        registry.try_init()?;
    }
    Ok(())
}

/// Middleware that logs method, uri, status and latency of every request.
pub async fn log_request(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();
    let response = next.run(request).await;
    tracing::debug!(
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}

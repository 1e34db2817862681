//! Server config: listen address and log file on top of the shared [`LlmConfig`].

use chatgraph::{ConfigError, LlmConfig};

pub const DEFAULT_LISTEN: &str = "0.0.0.0:8000";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Bind address (`LISTEN`).
    pub listen: String,
    /// Optional plain-text log file (`LOG_FILE`).
    pub log_file: Option<String>,
    pub llm: LlmConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            listen: std::env::var("LISTEN").unwrap_or_else(|_| DEFAULT_LISTEN.to_string()),
            log_file: std::env::var("LOG_FILE").ok().filter(|p| !p.is_empty()),
            llm: LlmConfig::from_env()?,
        })
    }
}

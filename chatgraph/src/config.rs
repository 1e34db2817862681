//! Model and persistence config. Filled from env vars (and `.env`).
//!
//! Shared by the server and the CLI: both need the same graph model, suggestion model and
//! checkpoint location.

use thiserror::Error;

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const OPENROUTER_API_BASE: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Error type used for config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY (or OPENROUTER_API_KEY) is not set; please configure it in .env")]
    MissingApiKey,
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// LLM endpoint, models and checkpoint location.
#[derive(Clone, Debug)]
pub struct LlmConfig {
    /// OpenAI-compatible API base URL, e.g. `https://openrouter.ai/api/v1`.
    pub api_base: String,
    pub api_key: String,
    /// Model answering inside the chat-model graph.
    pub model: String,
    /// Model generating follow-up suggestions.
    pub suggest_model: String,
    /// Sampling temperature 0–2. Default: unset (use API default).
    pub temperature: Option<f32>,
    /// System prompt for the chat-model graph; built-in prompt when unset.
    pub system_prompt: Option<String>,
    /// SQLite checkpoint file. In-memory checkpoints when unset.
    pub db_path: Option<String>,
}

impl LlmConfig {
    /// Fill config from env vars. Call [`load_dotenv`] first to pick up `.env`.
    ///
    /// `OPENAI_API_KEY` or `OPENROUTER_API_KEY` required (the latter switches the default base to
    /// OpenRouter). `OPENAI_API_BASE`, `OPENAI_MODEL`, `SUGGEST_MODEL`, `OPENAI_TEMPERATURE`,
    /// `SYSTEM_PROMPT`, `DB_PATH` optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let (api_key, default_base) = match (get("OPENAI_API_KEY"), get("OPENROUTER_API_KEY")) {
            (Some(key), _) => (key, OPENAI_API_BASE),
            (None, Some(key)) => (key, OPENROUTER_API_BASE),
            (None, None) => return Err(ConfigError::MissingApiKey),
        };
        let api_base = get("OPENAI_API_BASE").unwrap_or_else(|| default_base.to_string());
        let model = get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let suggest_model = get("SUGGEST_MODEL").unwrap_or_else(|| model.clone());
        let temperature = match get("OPENAI_TEMPERATURE") {
            Some(raw) => Some(raw.parse::<f32>().map_err(|_| ConfigError::Invalid {
                name: "OPENAI_TEMPERATURE",
                value: raw.clone(),
            })?),
            None => None,
        };

        Ok(Self {
            api_base,
            api_key,
            model,
            suggest_model,
            temperature,
            system_prompt: get("SYSTEM_PROMPT"),
            db_path: get("DB_PATH"),
        })
    }
}

/// Load .env from current directory; if not found, try parent (workspace root when run from crate dir).
pub fn load_dotenv() {
    if dotenv::dotenv().is_ok() {
        return;
    }
    if let Ok(cwd) = std::env::current_dir() {
        if let Some(parent) = cwd.parent() {
            let env_path = parent.join(".env");
            if env_path.is_file() {
                let _ = dotenv::from_path(env_path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    /// **Scenario**: without any API key, loading fails with MissingApiKey.
    #[test]
    fn missing_api_key_fails() {
        let err = LlmConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    /// **Scenario**: OPENAI_API_KEY alone yields OpenAI defaults; suggest model follows model.
    #[test]
    fn openai_key_uses_openai_defaults() {
        let c = LlmConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(c.api_base, OPENAI_API_BASE);
        assert_eq!(c.model, DEFAULT_MODEL);
        assert_eq!(c.suggest_model, DEFAULT_MODEL);
        assert!(c.temperature.is_none());
        assert!(c.db_path.is_none());
    }

    /// **Scenario**: an OpenRouter key switches the default base; explicit values win.
    #[test]
    fn openrouter_key_switches_default_base() {
        let c = LlmConfig::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "or-key"),
            ("SUGGEST_MODEL", "google/gemini-2.5-flash-lite-preview-09-2025"),
            ("OPENAI_TEMPERATURE", "0.3"),
            ("DB_PATH", "memory.db"),
        ]))
        .unwrap();
        assert_eq!(c.api_base, OPENROUTER_API_BASE);
        assert_eq!(c.api_key, "or-key");
        assert_eq!(c.suggest_model, "google/gemini-2.5-flash-lite-preview-09-2025");
        assert_eq!(c.temperature, Some(0.3));
        assert_eq!(c.db_path.as_deref(), Some("memory.db"));
    }

    /// **Scenario**: a non-numeric temperature is rejected with the variable name.
    #[test]
    fn invalid_temperature_is_rejected() {
        let err = LlmConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "k"),
            ("OPENAI_TEMPERATURE", "warm"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("OPENAI_TEMPERATURE"), "{}", err);
    }
}

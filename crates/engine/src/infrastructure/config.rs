//! Engine configuration read from the environment.

use std::time::Duration;

use orderly_domain::DomainError;

use crate::infrastructure::gemini::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_ITINERARY_MODEL, DEFAULT_GEMINI_SUGGEST_MODEL,
};
use crate::infrastructure::groq::{DEFAULT_GROQ_BASE_URL, DEFAULT_GROQ_MODEL};
use crate::infrastructure::nominatim::DEFAULT_NOMINATIM_BASE_URL;
use crate::infrastructure::ollama::{DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL};
use crate::infrastructure::ports::BackendId;

pub const DEFAULT_PORT: u16 = 3002;
pub const DEFAULT_LEDGER_DB: &str = "orderly.db";
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 120;

/// Settings for every backend variant. Credentials are optional; a backend
/// without one is skipped when the backend lists are assembled.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_suggest_model: String,
    pub gemini_itinerary_model: String,
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub groq_model: String,
    pub ollama_base_url: Option<String>,
    pub ollama_model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    pub ledger_db: String,
    pub nominatim_base_url: String,
    pub suggestion_backends: Vec<BackendId>,
    pub itinerary_backends: Vec<BackendId>,
    pub backends: BackendSettings,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let server_port = match var("SERVER_PORT").or_else(|| var("PORT")) {
            Some(raw) => raw
                .parse()
                .map_err(|_| DomainError::parse(format!("invalid port: {raw}")))?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match var("BACKEND_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    DomainError::parse(format!(
                        "BACKEND_TIMEOUT_SECS must be a positive number of seconds, got {raw}"
                    ))
                })?,
            None => DEFAULT_BACKEND_TIMEOUT_SECS,
        };

        Ok(Self {
            server_host: or("SERVER_HOST", "0.0.0.0"),
            server_port,
            ledger_db: or("LEDGER_DB", DEFAULT_LEDGER_DB),
            nominatim_base_url: or("NOMINATIM_BASE_URL", DEFAULT_NOMINATIM_BASE_URL),
            suggestion_backends: BackendId::parse_order(&or("SUGGESTION_BACKENDS", "gemini"))?,
            itinerary_backends: BackendId::parse_order(&or("ITINERARY_BACKENDS", "gemini,groq"))?,
            backends: BackendSettings {
                gemini_api_key: var("GEMINI_API_KEY"),
                gemini_base_url: or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
                gemini_suggest_model: or("GEMINI_SUGGEST_MODEL", DEFAULT_GEMINI_SUGGEST_MODEL),
                gemini_itinerary_model: or(
                    "GEMINI_ITINERARY_MODEL",
                    DEFAULT_GEMINI_ITINERARY_MODEL,
                ),
                groq_api_key: var("GROQ_API_KEY"),
                groq_base_url: or("GROQ_BASE_URL", DEFAULT_GROQ_BASE_URL),
                groq_model: or("GROQ_MODEL", DEFAULT_GROQ_MODEL),
                ollama_base_url: var("OLLAMA_BASE_URL").or_else(|| var("OLLAMA_URL")),
                ollama_model: or("OLLAMA_MODEL", DEFAULT_OLLAMA_MODEL),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl BackendSettings {
    /// Ollama has no credential; it is enabled by naming it in a backend list
    /// and falls back to the local default host.
    pub fn ollama_base_url(&self) -> &str {
        self.ollama_base_url
            .as_deref()
            .unwrap_or(DEFAULT_OLLAMA_BASE_URL)
    }
}

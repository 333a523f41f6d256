//! Ollama backend (OpenAI-compatible API on a local host, no auth).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::infrastructure::openai_compat::{complete, ChatRequest};
use crate::infrastructure::ports::{BackendError, BackendId, GenerationBackend};

/// Default Ollama base URL.
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Default model for Ollama.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Client for Ollama's OpenAI-compatible API
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            client: crate::infrastructure::transport::client_with_timeout(config.timeout),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model,
            timeout: config.timeout,
        }
    }
}

#[async_trait]
impl GenerationBackend for OllamaClient {
    fn id(&self) -> BackendId {
        BackendId::Ollama
    }

    async fn invoke(&self, prompt: &str) -> Result<String, BackendError> {
        let request = ChatRequest::single_user_message(&self.model, prompt);
        complete(&self.client, &self.base_url, None, &request, self.timeout).await
    }
}

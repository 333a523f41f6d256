//! Assembles ordered backend lists from configuration.

use std::sync::Arc;

use crate::infrastructure::config::BackendSettings;
use crate::infrastructure::gemini::{GeminiClient, GeminiConfig};
use crate::infrastructure::groq::{GroqClient, GroqConfig};
use crate::infrastructure::ollama::{OllamaClient, OllamaConfig};
use crate::infrastructure::ports::{BackendId, GenerationBackend};

/// Which request family a backend list serves. Gemini picks its model by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Suggestion,
    Itinerary,
}

/// Build backends in the given priority order, skipping any that lack a
/// credential.
pub fn build_backends(
    order: &[BackendId],
    settings: &BackendSettings,
    purpose: Purpose,
) -> Vec<Arc<dyn GenerationBackend>> {
    let mut backends: Vec<Arc<dyn GenerationBackend>> = Vec::with_capacity(order.len());

    for id in order {
        match id {
            BackendId::Gemini => match &settings.gemini_api_key {
                Some(key) => {
                    let model = match purpose {
                        Purpose::Suggestion => &settings.gemini_suggest_model,
                        Purpose::Itinerary => &settings.gemini_itinerary_model,
                    };
                    backends.push(Arc::new(GeminiClient::new(GeminiConfig {
                        api_key: key.clone(),
                        base_url: settings.gemini_base_url.clone(),
                        model: model.clone(),
                        timeout: settings.timeout,
                    })));
                }
                None => skip(*id, purpose, "GEMINI_API_KEY"),
            },
            BackendId::Groq => match &settings.groq_api_key {
                Some(key) => backends.push(Arc::new(GroqClient::new(GroqConfig {
                    api_key: key.clone(),
                    base_url: settings.groq_base_url.clone(),
                    model: settings.groq_model.clone(),
                    timeout: settings.timeout,
                }))),
                None => skip(*id, purpose, "GROQ_API_KEY"),
            },
            BackendId::Ollama => backends.push(Arc::new(OllamaClient::new(OllamaConfig {
                base_url: settings.ollama_base_url().to_string(),
                model: settings.ollama_model.clone(),
                timeout: settings.timeout,
            }))),
        }
    }

    backends
}

fn skip(id: BackendId, purpose: Purpose, missing: &str) {
    tracing::warn!(
        backend = %id,
        purpose = ?purpose,
        "Skipping backend: {} is not set",
        missing
    );
}

//! OpenAI-compatible chat completion envelope, shared by Groq and Ollama.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::BackendError;
use crate::infrastructure::transport::{ensure_success, map_transport, non_empty};

/// POST one user message to `{base_url}/v1/chat/completions` and return the
/// first choice's content.
pub(crate) async fn complete(
    client: &Client,
    base_url: &str,
    bearer: Option<&str>,
    request: &ChatRequest,
    timeout: Duration,
) -> Result<String, BackendError> {
    let mut builder = client
        .post(format!("{}/v1/chat/completions", base_url))
        .json(request);
    if let Some(token) = bearer {
        builder = builder.bearer_auth(token);
    }

    let response = builder
        .send()
        .await
        .map_err(|e| map_transport(e, timeout))?;
    let response = ensure_success(response, timeout).await?;

    let body: ChatResponse = response
        .json()
        .await
        .map_err(|e| map_transport(e, timeout))?;

    first_content(body)
}

fn first_content(response: ChatResponse) -> Result<String, BackendError> {
    if let Some(error) = response.error {
        return Err(BackendError::Network(error.message));
    }
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();
    non_empty(content)
}

// =============================================================================
// OpenAI API types
// =============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl ChatRequest {
    pub fn single_user_message(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            temperature: None,
            response_format: None,
        }
    }

    pub fn json_object(mut self) -> Self {
        self.response_format = Some(ResponseFormat {
            r#type: "json_object".to_string(),
        });
        self
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponseFormat {
    r#type: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct ChatMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize, Default)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

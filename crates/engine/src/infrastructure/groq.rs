//! Groq backend (hosted OpenAI-compatible API with bearer auth).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::infrastructure::openai_compat::{complete, ChatRequest};
use crate::infrastructure::ports::{BackendError, BackendId, GenerationBackend};

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai";
pub const DEFAULT_GROQ_MODEL: &str = "openai/gpt-oss-20b";

#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl GroqConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            model: DEFAULT_GROQ_MODEL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl GroqClient {
    pub fn new(config: GroqConfig) -> Self {
        Self {
            client: crate::infrastructure::transport::client_with_timeout(config.timeout),
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model,
            timeout: config.timeout,
        }
    }
}

#[async_trait]
impl GenerationBackend for GroqClient {
    fn id(&self) -> BackendId {
        BackendId::Groq
    }

    async fn invoke(&self, prompt: &str) -> Result<String, BackendError> {
        // Groq enforces JSON output server-side when asked to.
        let request = ChatRequest::single_user_message(&self.model, prompt).json_object();
        complete(
            &self.client,
            &self.base_url,
            Some(&self.api_key),
            &request,
            self.timeout,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout: Duration) -> GroqClient {
        let mut config = GroqConfig::new("test-key");
        config.base_url = server.uri();
        config.timeout = timeout;
        GroqClient::new(config)
    }

    #[tokio::test]
    async fn sends_bearer_key_and_json_mode() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": DEFAULT_GROQ_MODEL,
                "response_format": { "type": "json_object" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [ { "message": { "role": "assistant", "content": "{\"name\":\"A\"}" } } ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server, Duration::from_secs(5))
            .invoke("suggest")
            .await
            .unwrap();
        assert_eq!(text, "{\"name\":\"A\"}");
    }

    #[tokio::test]
    async fn unavailable_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("over capacity"))
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::from_secs(5))
            .invoke("suggest")
            .await
            .unwrap_err();
        match err {
            BackendError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "over capacity");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "choices": [] }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let timeout = Duration::from_millis(200);
        let err = client_for(&server, timeout)
            .invoke("suggest")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Timeout(t) if t == timeout));
    }

    #[tokio::test]
    async fn empty_choices_is_an_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::from_secs(5))
            .invoke("suggest")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::EmptyBody));
    }
}

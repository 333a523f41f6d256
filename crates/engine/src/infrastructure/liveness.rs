//! Website liveness probe.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};

use crate::infrastructure::ports::LivenessPort;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends a HEAD request, following redirects, and reports 2xx as reachable.
pub struct HttpLivenessProbe {
    client: Client,
}

impl HttpLivenessProbe {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(PROBE_TIMEOUT)
            .redirect(Policy::limited(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }
}

impl Default for HttpLivenessProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LivenessPort for HttpLivenessProbe {
    async fn is_reachable(&self, url: &str) -> bool {
        if !is_probeable(url) {
            return false;
        }
        match self.client.head(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Website probe failed");
                false
            }
        }
    }
}

fn is_probeable(url: &str) -> bool {
    url.starts_with("http")
}

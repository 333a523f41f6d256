//! Website liveness check.

use std::sync::Arc;

use crate::infrastructure::ports::LivenessPort;

pub struct CheckWebsite {
    probe: Arc<dyn LivenessPort>,
}

impl CheckWebsite {
    pub fn new(probe: Arc<dyn LivenessPort>) -> Self {
        Self { probe }
    }

    /// True when `url` answers a HEAD request with a success status.
    pub async fn execute(&self, url: &str) -> bool {
        let active = self.probe.is_reachable(url.trim()).await;
        tracing::debug!(url = %url, active, "Website checked");
        active
    }
}

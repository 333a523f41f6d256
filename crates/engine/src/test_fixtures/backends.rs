//! Fake generation backends for controller and end-to-end tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::infrastructure::ports::{BackendError, BackendId, GenerationBackend};

/// Shared, ordered record of `(backend, prompt)` calls across fakes.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<(BackendId, String)>>>);

impl CallLog {
    fn push(&self, backend: BackendId, prompt: &str) {
        self.0.lock().unwrap().push((backend, prompt.to_string()));
    }

    pub fn calls(&self) -> Vec<(BackendId, String)> {
        self.0.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls().into_iter().map(|(_, prompt)| prompt).collect()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Backend that plays back a fixed script, one entry per call.
///
/// Calls past the end of the script fail with a network error.
pub struct ScriptedBackend {
    id: BackendId,
    script: Mutex<VecDeque<Result<String, BackendError>>>,
    log: CallLog,
}

impl ScriptedBackend {
    pub fn new(id: BackendId, log: &CallLog) -> Self {
        Self {
            id,
            script: Mutex::new(VecDeque::new()),
            log: log.clone(),
        }
    }

    pub fn reply(self, text: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    pub fn fail(self, error: BackendError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn shared(self) -> Arc<dyn GenerationBackend> {
        Arc::new(self)
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    fn id(&self) -> BackendId {
        self.id
    }

    async fn invoke(&self, prompt: &str) -> Result<String, BackendError> {
        self.log.push(self.id, prompt);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Network("script exhausted".into())))
    }
}

/// Backend that answers only after a delay.
pub struct SlowBackend {
    id: BackendId,
    delay: Duration,
    reply: String,
}

impl SlowBackend {
    pub fn new(id: BackendId, delay: Duration, reply: &str) -> Arc<dyn GenerationBackend> {
        Arc::new(Self {
            id,
            delay,
            reply: reply.to_string(),
        })
    }
}

#[async_trait]
impl GenerationBackend for SlowBackend {
    fn id(&self) -> BackendId {
        self.id
    }

    async fn invoke(&self, _prompt: &str) -> Result<String, BackendError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.reply.clone())
    }
}

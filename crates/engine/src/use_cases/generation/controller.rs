//! Fallback controller: the strict-then-relaxed retry state machine.
//!
//! One run walks `Strict -> Relaxed -> Exhausted`, trying every configured
//! backend in priority order at each level and stopping at the first reply
//! that validates. Trials are sequential; nothing is shared between runs.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use orderly_domain::{CandidateResult, ExpectedShape};

use super::validator::{validate, ValidationError};
use crate::infrastructure::ports::{BackendError, BackendId, GenerationBackend};

/// Constraint level embedded in a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    Strict,
    Relaxed,
}

impl Strictness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Relaxed => "relaxed",
        }
    }
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which levels a run may visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxationPolicy {
    /// Strict across all backends, then relaxed across all backends.
    StrictThenRelaxed,
    /// One strict pass over the backends only.
    SingleAttempt,
}

/// Prompt text for one strictness level, with the shape it asks for.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPrompt {
    pub strictness: Strictness,
    pub text: String,
    pub shape: ExpectedShape,
}

/// One backend trial within a run.
#[derive(Debug, Clone)]
pub struct PromptAttempt<'a> {
    pub backend: BackendId,
    pub strictness: Strictness,
    pub prompt: &'a str,
    pub shape: ExpectedShape,
}

/// Terminal success of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted {
    pub result: CandidateResult,
    pub backend: BackendId,
    pub strictness: Strictness,
    /// Trials made, including the accepted one.
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Every level and backend failed transport or validation.
    #[error("no result met the quality bar after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Why a single trial did not produce a result.
#[derive(Debug, thiserror::Error)]
enum TrialFailure {
    #[error("transport: {0}")]
    Transport(#[from] BackendError),
    #[error("validation: {0}")]
    Invalid(#[from] ValidationError),
}

impl TrialFailure {
    fn timed_out(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

enum RunState {
    Trying(Strictness),
    Accepted(Accepted),
    Exhausted,
}

pub struct FallbackController {
    backends: Vec<Arc<dyn GenerationBackend>>,
    policy: RelaxationPolicy,
    trial_timeout: Duration,
}

impl FallbackController {
    pub fn new(
        backends: Vec<Arc<dyn GenerationBackend>>,
        policy: RelaxationPolicy,
        trial_timeout: Duration,
    ) -> Self {
        Self {
            backends,
            policy,
            trial_timeout,
        }
    }

    pub fn backend_ids(&self) -> Vec<BackendId> {
        self.backends.iter().map(|b| b.id()).collect()
    }

    /// Drive one run. `compose` is called once per level visited.
    pub async fn run<F>(&self, compose: F) -> Result<Accepted, GenerationError>
    where
        F: Fn(Strictness) -> ComposedPrompt,
    {
        let mut attempts = 0u32;
        let mut state = RunState::Trying(Strictness::Strict);

        loop {
            state = match state {
                RunState::Trying(strictness) => {
                    let prompt = compose(strictness);
                    match self.try_level(&prompt, &mut attempts).await {
                        Some((result, backend)) => RunState::Accepted(Accepted {
                            result,
                            backend,
                            strictness,
                            attempts,
                        }),
                        None => self.after_exhausting(strictness),
                    }
                }
                RunState::Accepted(accepted) => {
                    tracing::info!(
                        backend = %accepted.backend,
                        strictness = %accepted.strictness,
                        attempts = accepted.attempts,
                        "Generation accepted"
                    );
                    return Ok(accepted);
                }
                RunState::Exhausted => {
                    tracing::warn!(attempts, "Generation exhausted every backend and level");
                    return Err(GenerationError::Exhausted { attempts });
                }
            };
        }
    }

    fn after_exhausting(&self, strictness: Strictness) -> RunState {
        match (strictness, self.policy) {
            (Strictness::Strict, RelaxationPolicy::StrictThenRelaxed) => {
                RunState::Trying(Strictness::Relaxed)
            }
            _ => RunState::Exhausted,
        }
    }

    /// Try each backend in order with the same prompt.
    async fn try_level(
        &self,
        prompt: &ComposedPrompt,
        attempts: &mut u32,
    ) -> Option<(CandidateResult, BackendId)> {
        for backend in &self.backends {
            *attempts += 1;
            let attempt = PromptAttempt {
                backend: backend.id(),
                strictness: prompt.strictness,
                prompt: &prompt.text,
                shape: prompt.shape,
            };

            match self.trial(backend.as_ref(), &attempt).await {
                Ok(result) => {
                    tracing::debug!(
                        backend = %attempt.backend,
                        strictness = %attempt.strictness,
                        attempt = *attempts,
                        "Backend reply validated"
                    );
                    return Some((result, attempt.backend));
                }
                Err(e) => {
                    tracing::warn!(
                        backend = %attempt.backend,
                        strictness = %attempt.strictness,
                        shape = %attempt.shape,
                        attempt = *attempts,
                        timed_out = e.timed_out(),
                        error = %e,
                        "Backend trial failed"
                    );
                }
            }
        }
        None
    }

    async fn trial(
        &self,
        backend: &dyn GenerationBackend,
        attempt: &PromptAttempt<'_>,
    ) -> Result<CandidateResult, TrialFailure> {
        let raw = tokio::time::timeout(self.trial_timeout, backend.invoke(attempt.prompt))
            .await
            .map_err(|_| BackendError::Timeout(self.trial_timeout))??;
        Ok(validate(&raw, attempt.shape)?)
    }
}

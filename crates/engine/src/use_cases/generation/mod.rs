//! Structured-output generation: validation and the fallback controller.

mod controller;
mod validator;

pub use controller::{
    Accepted, ComposedPrompt, FallbackController, GenerationError, PromptAttempt,
    RelaxationPolicy, Strictness,
};
pub use validator::{validate, ValidationError, ValidationKind};

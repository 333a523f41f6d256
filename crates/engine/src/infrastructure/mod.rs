//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod backends;
pub mod clock;
pub mod config;
pub mod gemini;
pub mod groq;
pub mod ledger;
pub mod liveness;
pub mod nominatim;
pub mod ollama;
pub mod ports;

mod openai_compat;
mod transport;

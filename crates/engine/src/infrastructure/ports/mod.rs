//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Generative backends (Gemini, Groq, Ollama, or a scripted fake in tests)
//! - Ledger storage (could swap SQLite -> Postgres)
//! - Reverse geocoding and website liveness (external collaborators)
//! - Clock (for testing)

mod error;
mod external;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{ItineraryLedger, SuggestionLedger};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{BackendId, GenerationBackend, GeocoderPort, LivenessPort};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockItineraryLedger, MockSuggestionLedger};

#[cfg(test)]
pub use external::{MockGeocoderPort, MockLivenessPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::{BackendError, GeocodeError, RepoError};

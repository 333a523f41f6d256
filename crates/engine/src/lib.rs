//! Orderly engine library.
//!
//! Server-side code for the Orderly recommendation service.
//!
//! ## Structure
//!
//! - `use_cases/` - Request orchestration (generation, suggestions, itineraries)
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Test fixtures and fake backends.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;

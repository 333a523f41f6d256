//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific request family.

pub mod generation;
pub mod itinerary;
pub mod suggestion;
pub mod website;

pub use itinerary::ItineraryUseCases;
pub use suggestion::SuggestionUseCases;
pub use website::CheckWebsite;

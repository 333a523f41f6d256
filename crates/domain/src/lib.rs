//! Orderly domain types.
//!
//! Pure values shared by the engine: inbound request values and their
//! invariants, the validated generation results, and the persisted ledger
//! records. Nothing in this crate performs I/O.

pub mod candidate;
pub mod error;
pub mod ids;
pub mod location;
pub mod record;
pub mod request;
pub mod trip;

pub use candidate::{
    stop_identity, CandidateResult, ChainAlternative, CompositeSuggestion, ExpectedShape,
    GeoPoint, Itinerary, ItineraryStop, Lodging, RestaurantSuggestion, MAX_DETOUR_MINUTES,
};
pub use error::DomainError;
pub use ids::{ItineraryId, SuggestionId};
pub use location::ResolvedLocation;
pub use record::{
    ItineraryRecord, Page, PageRequest, RequestSnapshot, SuggestionRecord, TripSnapshot,
    ANONYMOUS_EMAIL,
};
pub use request::{Coordinates, SuggestionRequest, ANY};
pub use trip::{ActivityLevel, CostPreference, StopCount, StopDuration, TripRequest};

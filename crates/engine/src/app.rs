//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{
    ClockPort, GeocoderPort, ItineraryLedger, LivenessPort, SuggestionLedger,
};
use crate::use_cases::generation::FallbackController;
use crate::use_cases::itinerary::{ItineraryUseCases, ListItineraries, PlanRoadTrip};
use crate::use_cases::suggestion::{ListSuggestions, SuggestRestaurant, SuggestionUseCases};
use crate::use_cases::CheckWebsite;

/// Main application state.
///
/// Holds all use cases. Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
    pub clock: Arc<dyn ClockPort>,
}

/// Container for all use cases.
pub struct UseCases {
    pub suggestion: SuggestionUseCases,
    pub itinerary: ItineraryUseCases,
    pub website: Arc<CheckWebsite>,
}

/// Ports and controllers the application is assembled from.
pub struct AppDependencies {
    pub suggestion_controller: Arc<FallbackController>,
    pub itinerary_controller: Arc<FallbackController>,
    pub geocoder: Arc<dyn GeocoderPort>,
    pub liveness: Arc<dyn LivenessPort>,
    pub suggestion_ledger: Arc<dyn SuggestionLedger>,
    pub itinerary_ledger: Arc<dyn ItineraryLedger>,
    pub clock: Arc<dyn ClockPort>,
}

impl App {
    pub fn new(deps: AppDependencies) -> Self {
        let suggestion = SuggestionUseCases::new(
            Arc::new(SuggestRestaurant::new(
                deps.geocoder,
                deps.suggestion_controller,
                deps.suggestion_ledger.clone(),
            )),
            Arc::new(ListSuggestions::new(deps.suggestion_ledger)),
        );

        let itinerary = ItineraryUseCases::new(
            Arc::new(PlanRoadTrip::new(
                deps.itinerary_controller,
                deps.itinerary_ledger.clone(),
            )),
            Arc::new(ListItineraries::new(deps.itinerary_ledger)),
        );

        Self {
            use_cases: UseCases {
                suggestion,
                itinerary,
                website: Arc::new(CheckWebsite::new(deps.liveness)),
            },
            clock: deps.clock,
        }
    }
}

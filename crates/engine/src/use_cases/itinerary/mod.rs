//! Road trip itinerary use cases.
//!
//! Runs the fallback controller with a single strict pass over the configured
//! backends; there is no relaxed level for itineraries.

pub mod prompt;

use std::sync::Arc;

use orderly_domain::{CandidateResult, ItineraryId, ItineraryRecord, Page, PageRequest, TripRequest};

use crate::infrastructure::ports::{BackendId, ItineraryLedger, RepoError};
use crate::use_cases::generation::{FallbackController, GenerationError};

pub struct ItineraryUseCases {
    pub plan: Arc<PlanRoadTrip>,
    pub list: Arc<ListItineraries>,
}

impl ItineraryUseCases {
    pub fn new(plan: Arc<PlanRoadTrip>, list: Arc<ListItineraries>) -> Self {
        Self { plan, list }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryOutcome {
    pub result: CandidateResult,
    pub itinerary_id: Option<ItineraryId>,
    pub backend: BackendId,
}

#[derive(Debug, thiserror::Error)]
pub enum ItineraryError {
    #[error("{0}")]
    Exhausted(#[from] GenerationError),
}

pub struct PlanRoadTrip {
    controller: Arc<FallbackController>,
    ledger: Arc<dyn ItineraryLedger>,
}

impl PlanRoadTrip {
    pub fn new(controller: Arc<FallbackController>, ledger: Arc<dyn ItineraryLedger>) -> Self {
        Self { controller, ledger }
    }

    pub async fn execute(&self, trip: &TripRequest) -> Result<ItineraryOutcome, ItineraryError> {
        let accepted = self
            .controller
            .run(|strictness| prompt::compose(trip, strictness))
            .await?;

        let itinerary_id = match self.ledger.record(trip, &accepted.result).await {
            Ok(id) => {
                tracing::info!(itinerary_id = %id, start = %trip.start, end = %trip.end, "Itinerary recorded");
                Some(id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to record accepted itinerary");
                None
            }
        };

        Ok(ItineraryOutcome {
            result: accepted.result,
            itinerary_id,
            backend: accepted.backend,
        })
    }
}

pub struct ListItineraries {
    ledger: Arc<dyn ItineraryLedger>,
}

impl ListItineraries {
    pub fn new(ledger: Arc<dyn ItineraryLedger>) -> Self {
        Self { ledger }
    }

    pub async fn execute(
        &self,
        email: Option<String>,
        page: PageRequest,
    ) -> Result<Page<ItineraryRecord>, RepoError> {
        let email = email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty());
        self.ledger.list(email, page).await
    }
}

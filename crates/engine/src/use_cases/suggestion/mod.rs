//! Restaurant suggestion use cases.
//!
//! Flow: geocode -> compose -> fallback controller -> ledger.

pub mod prompt;

use std::sync::Arc;

use orderly_domain::{
    CandidateResult, Page, PageRequest, ResolvedLocation, SuggestionId, SuggestionRecord,
    SuggestionRequest,
};

use crate::infrastructure::ports::{BackendId, GeocoderPort, RepoError, SuggestionLedger};
use crate::use_cases::generation::{FallbackController, GenerationError, Strictness};

/// Container for suggestion use cases.
pub struct SuggestionUseCases {
    pub suggest: Arc<SuggestRestaurant>,
    pub list: Arc<ListSuggestions>,
}

impl SuggestionUseCases {
    pub fn new(suggest: Arc<SuggestRestaurant>, list: Arc<ListSuggestions>) -> Self {
        Self { suggest, list }
    }
}

/// An accepted suggestion and what happened to it.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionOutcome {
    pub result: CandidateResult,
    /// `None` when the ledger write failed.
    pub suggestion_id: Option<SuggestionId>,
    pub location: ResolvedLocation,
    pub backend: BackendId,
    pub strictness: Strictness,
}

#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    #[error("{0}")]
    Exhausted(#[from] GenerationError),
}

pub struct SuggestRestaurant {
    geocoder: Arc<dyn GeocoderPort>,
    controller: Arc<FallbackController>,
    ledger: Arc<dyn SuggestionLedger>,
}

impl SuggestRestaurant {
    pub fn new(
        geocoder: Arc<dyn GeocoderPort>,
        controller: Arc<FallbackController>,
        ledger: Arc<dyn SuggestionLedger>,
    ) -> Self {
        Self {
            geocoder,
            controller,
            ledger,
        }
    }

    /// Run one suggestion. The request is already validated, so every
    /// failure from here on is generation or persistence.
    pub async fn execute(
        &self,
        request: &SuggestionRequest,
    ) -> Result<SuggestionOutcome, SuggestError> {
        let location = match self.geocoder.reverse(request.coordinates()).await {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!(error = %e, "Reverse geocoding failed, continuing with unknown location");
                ResolvedLocation::unknown()
            }
        };

        let accepted = self
            .controller
            .run(|strictness| prompt::compose(request, &location, strictness))
            .await?;

        let suggestion_id = match self
            .ledger
            .record(request, &location, &accepted.result)
            .await
        {
            Ok(id) => {
                tracing::info!(suggestion_id = %id, cuisine = %request.cuisine(), "Suggestion recorded");
                Some(id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to record accepted suggestion");
                None
            }
        };

        Ok(SuggestionOutcome {
            result: accepted.result,
            suggestion_id,
            location,
            backend: accepted.backend,
            strictness: accepted.strictness,
        })
    }
}

pub struct ListSuggestions {
    ledger: Arc<dyn SuggestionLedger>,
}

impl ListSuggestions {
    pub fn new(ledger: Arc<dyn SuggestionLedger>) -> Self {
        Self { ledger }
    }

    pub async fn execute(
        &self,
        email: Option<String>,
        page: PageRequest,
    ) -> Result<Page<SuggestionRecord>, RepoError> {
        let email = email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        self.ledger.list(email, page).await
    }
}

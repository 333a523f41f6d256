//! Ledger ports.

use async_trait::async_trait;
use orderly_domain::{
    CandidateResult, ItineraryId, ItineraryRecord, Page, PageRequest, ResolvedLocation,
    SuggestionId, SuggestionRecord, SuggestionRequest, TripRequest,
};

use super::error::RepoError;

/// Append-only store of accepted suggestions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionLedger: Send + Sync {
    /// Persist one accepted outcome and return its generated identifier.
    async fn record(
        &self,
        request: &SuggestionRequest,
        location: &ResolvedLocation,
        result: &CandidateResult,
    ) -> Result<SuggestionId, RepoError>;

    /// Newest-first page, optionally filtered by requester email.
    ///
    /// An out-of-range page yields no items but correct counts.
    async fn list(
        &self,
        email: Option<String>,
        page: PageRequest,
    ) -> Result<Page<SuggestionRecord>, RepoError>;
}

/// Append-only store of accepted itineraries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItineraryLedger: Send + Sync {
    async fn record(
        &self,
        trip: &TripRequest,
        result: &CandidateResult,
    ) -> Result<ItineraryId, RepoError>;

    async fn list(
        &self,
        email: Option<String>,
        page: PageRequest,
    ) -> Result<Page<ItineraryRecord>, RepoError>;
}

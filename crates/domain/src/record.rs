//! Persisted ledger records and pagination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    CandidateResult, ItineraryId, ResolvedLocation, SuggestionId, SuggestionRequest, TripRequest,
    ANY,
};

/// Requester identity recorded when no email was supplied.
pub const ANONYMOUS_EMAIL: &str = "anonymous@unknown.com";

/// Snapshot of a suggestion request as it was composed into prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSnapshot {
    pub latitude: f64,
    pub longitude: f64,
    pub dining_preference: String,
    pub distance: String,
    pub budget: Vec<String>,
    pub cuisine: String,
    pub include_chains: bool,
    pub email: Option<String>,
    pub city: String,
    pub country: String,
    pub timestamp: DateTime<Utc>,
}

impl RequestSnapshot {
    pub fn capture(request: &SuggestionRequest, location: &ResolvedLocation) -> Self {
        let coordinates = request.coordinates();
        let budget = if request.budget().is_empty() {
            vec![ANY.to_string()]
        } else {
            request.budget().to_vec()
        };
        Self {
            latitude: coordinates.lat,
            longitude: coordinates.lng,
            dining_preference: request.dining_preference_label().to_string(),
            distance: request.distance_label().to_string(),
            budget,
            cuisine: request.cuisine().to_string(),
            include_chains: request.include_chains(),
            email: request.email().map(str::to_string),
            city: location.city.clone(),
            country: location.country.clone(),
            timestamp: request.requested_at(),
        }
    }
}

/// An accepted suggestion, as stored in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRecord {
    pub id: SuggestionId,
    pub email: String,
    pub latitude: f64,
    pub longitude: f64,
    pub dining_preference: Option<String>,
    pub distance: Option<String>,
    pub budget: Option<Vec<String>>,
    pub cuisine: String,
    pub include_chains: bool,
    pub request_details: RequestSnapshot,
    pub location: ResolvedLocation,
    pub result: CandidateResult,
    pub created_at: DateTime<Utc>,
}

/// Snapshot of a trip request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSnapshot {
    pub start: String,
    pub end: String,
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    pub number_of_stops: String,
    pub stop_duration: String,
    pub activity: String,
    pub cost_preference: String,
    pub email: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl TripSnapshot {
    pub fn capture(trip: &TripRequest) -> Self {
        Self {
            start: trip.start.clone(),
            end: trip.end.clone(),
            start_lat: trip.start_coords.lat,
            start_lng: trip.start_coords.lng,
            end_lat: trip.end_coords.lat,
            end_lng: trip.end_coords.lng,
            number_of_stops: trip.stop_count.as_str().to_string(),
            stop_duration: trip.stop_duration.as_str().to_string(),
            activity: trip.activity.as_str().to_string(),
            cost_preference: trip.cost.as_str().to_string(),
            email: trip.email.clone(),
            timestamp: trip.requested_at,
        }
    }
}

/// An accepted itinerary, as stored in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRecord {
    pub id: ItineraryId,
    pub email: Option<String>,
    pub start: String,
    pub end: String,
    pub request_details: TripSnapshot,
    pub result: CandidateResult,
    pub created_at: DateTime<Utc>,
}

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Zero page numbers become 1; page size is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, Self::MAX_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_PAGE_SIZE)
    }
}

/// One page of results plus count metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub request: PageRequest,
    pub total_count: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_count: u64) -> Self {
        Self {
            items,
            request,
            total_count,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(u64::from(self.request.page_size()))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.request.page()) < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.request.page() > 1
    }
}

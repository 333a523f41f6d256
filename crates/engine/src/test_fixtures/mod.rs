//! Test fixtures and common test helpers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{backends::{CallLog, ScriptedBackend}, requests};
//!
//! #[tokio::test]
//! async fn test_suggestion_flow() {
//!     let log = CallLog::default();
//!     let backend = ScriptedBackend::new(BackendId::Gemini, &log)
//!         .reply(r#"{"name":"A","address":"B"}"#)
//!         .shared();
//!     let request = requests::italian_in_new_york();
//!     // ... test logic
//! }
//! ```

pub mod backends;

use chrono::{DateTime, TimeZone, Utc};

/// Fixed instant used across fixtures.
pub fn instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 18, 30, 0).unwrap()
}

// =============================================================================
// Request Fixtures
// =============================================================================

pub mod requests {
    use orderly_domain::{Coordinates, SuggestionRequest};

    use super::instant;

    /// `{lat: 40.7, lng: -74.0, cuisine: "Italian"}` with every preference unset.
    pub fn italian_in_new_york() -> SuggestionRequest {
        SuggestionRequest::new(Coordinates::new(40.7, -74.0).unwrap(), "Italian", instant())
            .unwrap()
    }

    /// Fully specified request, chains included.
    pub fn detailed_with_chains() -> SuggestionRequest {
        italian_in_new_york()
            .with_budget(vec!["$".into(), "$$".into()])
            .with_dining_preference(Some("dine-in".into()))
            .with_distance(Some("within 5 miles".into()))
            .with_include_chains(true)
            .with_email(Some("diner@example.com".into()))
    }
}

pub mod trips {
    use orderly_domain::{
        ActivityLevel, Coordinates, CostPreference, StopCount, StopDuration, TripRequest,
    };

    use super::instant;

    pub fn new_york_to_boston() -> TripRequest {
        TripRequest::new(
            "New York, NY",
            "Boston, MA",
            Coordinates::new(40.7128, -74.006).unwrap(),
            Coordinates::new(42.3601, -71.0589).unwrap(),
            StopCount::Several,
            StopDuration::Medium,
            ActivityLevel::Light,
            CostPreference::Free,
            instant(),
        )
        .unwrap()
    }
}

// =============================================================================
// Canned Replies
// =============================================================================

pub mod replies {
    pub const TRATTORIA: &str = r#"{"name":"Trattoria X","address":"1 Main St"}"#;

    pub const COMPOSITE: &str = r#"{
        "mainSuggestion": {"name":"Trattoria X","address":"1 Main St","rating":"4.6"},
        "chainAlternatives": [{"name":"Olive Garden","address":"5 Broadway","cuisine":"Italian"}]
    }"#;

    pub fn itinerary(detours: &[(&str, u32)]) -> String {
        let stops: Vec<_> = detours
            .iter()
            .map(|(name, detour)| {
                serde_json::json!({
                    "name": name,
                    "description": "A stop",
                    "location": "Somewhere, CT",
                    "category": "Landmark",
                    "detour_time_minutes": detour
                })
            })
            .collect();
        serde_json::json!({
            "start_location": "New York, NY",
            "end_location": "Boston, MA",
            "total_drive_miles": 215,
            "total_drive_time_hours": "4",
            "route_description": "I-95 along the coast",
            "main_highways": ["I-95 N"],
            "stops": stops
        })
        .to_string()
    }
}

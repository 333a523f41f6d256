//! Restaurant suggestion request values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Sentinel for an unspecified preference.
pub const ANY: &str = "any";

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, DomainError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::validation(format!(
                "latitude must be between -90 and 90, got {lat}"
            )));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(DomainError::validation(format!(
                "longitude must be between -180 and 180, got {lng}"
            )));
        }
        Ok(Self { lat, lng })
    }

    /// Build from optional parts, failing when either half is absent.
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Result<Self, DomainError> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Self::new(lat, lng),
            _ => Err(DomainError::validation("lat and lng are required")),
        }
    }
}

/// An immutable restaurant suggestion request.
///
/// Coordinates and cuisine are always present. The soft preferences default to
/// [`ANY`] when absent or blank.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRequest {
    coordinates: Coordinates,
    cuisine: String,
    budget: Vec<String>,
    dining_preference: Option<String>,
    distance: Option<String>,
    include_chains: bool,
    email: Option<String>,
    requested_at: DateTime<Utc>,
}

impl SuggestionRequest {
    pub fn new(
        coordinates: Coordinates,
        cuisine: impl Into<String>,
        requested_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let cuisine = cuisine.into().trim().to_string();
        if cuisine.is_empty() {
            return Err(DomainError::validation("cuisine is required"));
        }
        Ok(Self {
            coordinates,
            cuisine,
            budget: Vec::new(),
            dining_preference: None,
            distance: None,
            include_chains: false,
            email: None,
            requested_at,
        })
    }

    pub fn with_budget(mut self, budget: Vec<String>) -> Self {
        self.budget = budget
            .into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();
        self
    }

    pub fn with_dining_preference(mut self, preference: Option<String>) -> Self {
        self.dining_preference = non_blank(preference);
        self
    }

    pub fn with_distance(mut self, distance: Option<String>) -> Self {
        self.distance = non_blank(distance);
        self
    }

    pub fn with_include_chains(mut self, include_chains: bool) -> Self {
        self.include_chains = include_chains;
        self
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = non_blank(email);
        self
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn cuisine(&self) -> &str {
        &self.cuisine
    }

    /// Budget tags as given; empty means any budget.
    pub fn budget(&self) -> &[String] {
        &self.budget
    }

    /// Budget tags joined for display, or [`ANY`].
    pub fn budget_label(&self) -> String {
        if self.budget.is_empty() {
            ANY.to_string()
        } else {
            self.budget.join(", ")
        }
    }

    /// The explicitly supplied dining preference, if any.
    pub fn dining_preference(&self) -> Option<&str> {
        self.dining_preference.as_deref()
    }

    pub fn dining_preference_label(&self) -> &str {
        self.dining_preference.as_deref().unwrap_or(ANY)
    }

    /// The explicitly supplied distance preference, if any.
    pub fn distance(&self) -> Option<&str> {
        self.distance.as_deref()
    }

    pub fn distance_label(&self) -> &str {
        self.distance.as_deref().unwrap_or(ANY)
    }

    pub fn include_chains(&self) -> bool {
        self.include_chains
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

//! Road trip request values and their fixed tag enumerations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Coordinates, DomainError};

macro_rules! define_tag {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($variant:ident => $tag:literal, $phrase:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $tag)] $variant,)+
        }

        impl $name {
            /// Wire tag for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $tag,)+
                }
            }

            /// Prompt phrasing for this value.
            pub fn describe(&self) -> &'static str {
                match self {
                    $(Self::$variant => $phrase,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($tag => Ok(Self::$variant),)+
                    other => Err(DomainError::parse(format!(
                        "unknown {}: {}",
                        $label, other
                    ))),
                }
            }
        }
    };
}

define_tag! {
    /// How many stops the trip should include.
    StopCount, "numberOfStops" {
        Few => "few", "one or two";
        Several => "some", "three to five";
        Alot => "alot", "six to eight";
    }
}

define_tag! {
    /// How long each stop should take.
    StopDuration, "stopDuration" {
        Short => "short", "less than 1 hour";
        Medium => "medium", "1 to 3 hours";
        Long => "long", "more than 3 hours";
    }
}

define_tag! {
    /// Physical intensity of stop activities.
    ActivityLevel, "activity" {
        Light => "light", "relaxing activities like scenic viewpoints, cafes, or easy walks";
        Medium => "medium", "moderate activities like museum visits, city exploration, or light hiking";
        Heavy => "heavy", "strenuous activities like long hikes, sports, or adventure parks";
    }
}

define_tag! {
    /// Acceptable cost of stop activities.
    CostPreference, "costPreference" {
        Free => "free", "only free activities or attractions";
        Mix => "mix", "any cost is acceptable, from free to paid";
        Paid => "paid", "activities with admission fees are preferred";
    }
}

/// A road trip itinerary request.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    pub start: String,
    pub end: String,
    pub start_coords: Coordinates,
    pub end_coords: Coordinates,
    pub stop_count: StopCount,
    pub stop_duration: StopDuration,
    pub activity: ActivityLevel,
    pub cost: CostPreference,
    pub email: Option<String>,
    pub requested_at: DateTime<Utc>,
}

impl TripRequest {
    /// Validate the free-text endpoints and assemble the request.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        start_coords: Coordinates,
        end_coords: Coordinates,
        stop_count: StopCount,
        stop_duration: StopDuration,
        activity: ActivityLevel,
        cost: CostPreference,
        requested_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let start = start.into().trim().to_string();
        let end = end.into().trim().to_string();
        if start.is_empty() || end.is_empty() {
            return Err(DomainError::validation("start and end are required"));
        }
        Ok(Self {
            start,
            end,
            start_coords,
            end_coords,
            stop_count,
            stop_duration,
            activity,
            cost,
            email: None,
            requested_at,
        })
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty());
        self
    }
}

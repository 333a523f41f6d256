//! Validated generation results.
//!
//! Backends produce free text of uneven quality: numbers arrive as strings,
//! booleans as `"yes"`, optional fields as `null`. The deserializers here are
//! lenient about representation so that the structural checks in the engine's
//! validator decide acceptance, not incidental typing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::DomainError;

/// Upper bound on a stop's round-trip detour, inclusive.
pub const MAX_DETOUR_MINUTES: f64 = 30.0;

/// Output shape a prompt asks for and the validator checks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedShape {
    /// One restaurant record.
    Single,
    /// A primary restaurant plus zero or more chain alternatives.
    WithAlternatives,
    /// A route with ordered stops.
    Itinerary,
}

impl ExpectedShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::WithAlternatives => "with_alternatives",
            Self::Itinerary => "itinerary",
        }
    }
}

impl fmt::Display for ExpectedShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpectedShape {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "with_alternatives" => Ok(Self::WithAlternatives),
            "itinerary" => Ok(Self::Itinerary),
            other => Err(DomainError::parse(format!("unknown result shape: {other}"))),
        }
    }
}

/// A single restaurant recommendation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSuggestion {
    #[serde(default, deserialize_with = "required_text")]
    pub name: String,
    #[serde(default, deserialize_with = "required_text")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub review_count: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub dining_option: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub selected_food: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool", skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    /// Fields the backend returned beyond the ones above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A nearby chain restaurant offered alongside a primary suggestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainAlternative {
    #[serde(default, deserialize_with = "required_text")]
    pub name: String,
    #[serde(default, deserialize_with = "required_text")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Primary suggestion with chain alternatives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeSuggestion {
    pub main_suggestion: RestaurantSuggestion,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub chain_alternatives: Vec<ChainAlternative>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// One stop along a road trip route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItineraryStop {
    #[serde(default, deserialize_with = "required_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub detour_time_minutes: Option<f64>,
    #[serde(default, deserialize_with = "lenient_lodging", skip_serializing_if = "Option::is_none")]
    pub hotel: Option<Lodging>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub airbnb_link: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A hotel suggested for an itinerary stop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lodging {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub booking_link: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Key under which stops are compared for duplicates: trimmed and
/// case-folded name.
pub fn stop_identity(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A planned road trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub start_location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub end_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_coords: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_coords: Option<GeoPoint>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub total_drive_miles: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub total_drive_time_hours: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub route_description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub main_highways: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub stops: Vec<ItineraryStop>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A parsed and schema-checked generation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CandidateResult {
    Single(RestaurantSuggestion),
    Composite(CompositeSuggestion),
    Itinerary(Itinerary),
}

impl CandidateResult {
    pub fn shape(&self) -> ExpectedShape {
        match self {
            Self::Single(_) => ExpectedShape::Single,
            Self::Composite(_) => ExpectedShape::WithAlternatives,
            Self::Itinerary(_) => ExpectedShape::Itinerary,
        }
    }

    /// The primary restaurant, for suggestion shapes.
    pub fn primary(&self) -> Option<&RestaurantSuggestion> {
        match self {
            Self::Single(s) => Some(s),
            Self::Composite(c) => Some(&c.main_suggestion),
            Self::Itinerary(_) => None,
        }
    }

    /// Chain alternatives; empty for anything but the composite shape.
    pub fn chain_alternatives(&self) -> &[ChainAlternative] {
        match self {
            Self::Composite(c) => &c.chain_alternatives,
            _ => &[],
        }
    }

    pub fn as_itinerary(&self) -> Option<&Itinerary> {
        match self {
            Self::Itinerary(i) => Some(i),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Rebuild a stored result whose shape is known.
    pub fn from_stored(shape: ExpectedShape, json: &str) -> Result<Self, serde_json::Error> {
        Ok(match shape {
            ExpectedShape::Single => Self::Single(serde_json::from_str(json)?),
            ExpectedShape::WithAlternatives => Self::Composite(serde_json::from_str(json)?),
            ExpectedShape::Itinerary => Self::Itinerary(serde_json::from_str(json)?),
        })
    }
}

// =============================================================================
// Lenient field deserializers
// =============================================================================

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

fn required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "open" => Some(true),
            "false" | "no" | "closed" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// A hotel given as an object, or just its name as a string.
fn lenient_lodging<'de, D>(deserializer: D) -> Result<Option<Lodging>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(object)) => {
            Some(serde_json::from_value(Value::Object(object)).map_err(serde::de::Error::custom)?)
        }
        Some(Value::String(name)) if !name.trim().is_empty() => Some(Lodging {
            name: Some(name),
            ..Default::default()
        }),
        _ => None,
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

//! Response validation: untrusted backend text to a typed result.
//!
//! Extraction tolerates markdown fences and prose around a single JSON value.
//! Structural checks run on the raw `serde_json::Value` before typed
//! deserialization so that failures name the offending field or stop.

use std::collections::HashSet;

use orderly_domain::{
    stop_identity, CandidateResult, ChainAlternative, CompositeSuggestion, ExpectedShape,
    Itinerary, RestaurantSuggestion, MAX_DETOUR_MINUTES,
};
use serde_json::{Map, Value};

/// Why a backend reply was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// No parseable JSON value in the reply.
    Malformed,
    /// Parsed, but a required field is missing or out of bounds.
    SchemaViolation,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind:?}: {detail}")]
pub struct ValidationError {
    pub kind: ValidationKind,
    pub detail: String,
}

impl ValidationError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self {
            kind: ValidationKind::Malformed,
            detail: detail.into(),
        }
    }

    pub fn schema(detail: impl Into<String>) -> Self {
        Self {
            kind: ValidationKind::SchemaViolation,
            detail: detail.into(),
        }
    }
}

/// Parse and check `raw` against `shape`. Pure.
pub fn validate(raw: &str, shape: ExpectedShape) -> Result<CandidateResult, ValidationError> {
    let value = extract_json(raw)?;

    match shape {
        ExpectedShape::Single => {
            let object = as_object(&value, "response")?;
            require_identity(object, "")?;
            let suggestion: RestaurantSuggestion = typed(value)?;
            Ok(CandidateResult::Single(suggestion))
        }
        ExpectedShape::WithAlternatives => validate_composite(value),
        ExpectedShape::Itinerary => {
            check_itinerary(&value)?;
            let itinerary: Itinerary = typed(value)?;
            Ok(CandidateResult::Itinerary(itinerary))
        }
    }
}

fn validate_composite(value: Value) -> Result<CandidateResult, ValidationError> {
    let object = as_object(&value, "response")?;

    match object.get("mainSuggestion") {
        Some(main) if !main.is_null() => {
            let main = as_object(main, "mainSuggestion")?;
            require_identity(main, "mainSuggestion.")?;
            if let Some(alternatives) = object.get("chainAlternatives") {
                check_alternatives(alternatives)?;
            }
            let composite: CompositeSuggestion = typed(value)?;
            Ok(CandidateResult::Composite(composite))
        }
        _ => {
            // Flat reply: the top-level record is the primary.
            require_identity(object, "")?;
            if let Some(alternatives) = object.get("chainAlternatives") {
                check_alternatives(alternatives)?;
            }
            let mut primary = object.clone();
            primary.remove("mainSuggestion");
            let chain_alternatives: Vec<ChainAlternative> =
                match primary.remove("chainAlternatives") {
                    None | Some(Value::Null) => Vec::new(),
                    Some(alternatives) => typed(alternatives)?,
                };
            let main_suggestion: RestaurantSuggestion = typed(Value::Object(primary))?;
            Ok(CandidateResult::Composite(CompositeSuggestion {
                main_suggestion,
                chain_alternatives,
                extra: Map::new(),
            }))
        }
    }
}

fn check_alternatives(value: &Value) -> Result<(), ValidationError> {
    let items = match value {
        Value::Null => return Ok(()),
        Value::Array(items) => items,
        _ => return Err(ValidationError::schema("chainAlternatives must be an array")),
    };
    for (index, item) in items.iter().enumerate() {
        let field = format!("chainAlternatives[{index}]");
        let object = as_object(item, &field)?;
        require_identity(object, &format!("{field}."))?;
    }
    Ok(())
}

fn check_itinerary(value: &Value) -> Result<(), ValidationError> {
    let object = as_object(value, "response")?;
    let stops = match object.get("stops") {
        Some(Value::Array(stops)) => stops,
        Some(_) => return Err(ValidationError::schema("stops must be an array")),
        None => return Err(ValidationError::schema("stops is required")),
    };

    let mut seen = HashSet::new();
    for (index, stop) in stops.iter().enumerate() {
        let stop = as_object(stop, &format!("stops[{index}]"))?;
        let name = non_empty_text(stop, "name")
            .ok_or_else(|| ValidationError::schema(format!("stops[{index}].name is required")))?;

        let detour = stop
            .get("detour_time_minutes")
            .and_then(number)
            .ok_or_else(|| {
                ValidationError::schema(format!(
                    "stop '{name}' is missing a numeric detour_time_minutes"
                ))
            })?;
        if !(0.0..=MAX_DETOUR_MINUTES).contains(&detour) {
            return Err(ValidationError::schema(format!(
                "stop '{name}' detour of {detour} minutes is outside 0 to {MAX_DETOUR_MINUTES}"
            )));
        }

        if !seen.insert(stop_identity(name)) {
            return Err(ValidationError::schema(format!(
                "duplicate stop '{name}'"
            )));
        }
    }
    Ok(())
}

// =============================================================================
// Extraction
// =============================================================================

/// Parse the first JSON value in a reply, ignoring anything after it.
fn extract_json(raw: &str) -> Result<Value, ValidationError> {
    let text = strip_fences(raw.trim());
    let payload = if text.starts_with('{') || text.starts_with('[') {
        text
    } else {
        balanced_object(text)
            .ok_or_else(|| ValidationError::malformed("no JSON value found in response"))?
    };

    match serde_json::Deserializer::from_str(payload)
        .into_iter::<Value>()
        .next()
    {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(ValidationError::malformed(format!("invalid JSON: {e}"))),
        None => Err(ValidationError::malformed("no JSON value found in response")),
    }
}

/// Body of the first ``` block, with or without a language tag. Text before
/// the opening fence and after the closing fence is dropped.
fn strip_fences(text: &str) -> &str {
    let Some(open) = text.find("```") else {
        return text;
    };
    let rest = &text[open + 3..];
    // Drop the info string ("json", "JSON", ...) on the opening line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    match body.find("```") {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

/// First `{ ... }` span with balanced braces, skipping braces inside strings.
fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

// =============================================================================
// Field checks
// =============================================================================

fn as_object<'a>(value: &'a Value, field: &str) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::schema(format!("{field} must be a JSON object")))
}

fn require_identity(object: &Map<String, Value>, prefix: &str) -> Result<(), ValidationError> {
    for field in ["name", "address"] {
        if non_empty_text(object, field).is_none() {
            return Err(ValidationError::schema(format!("{prefix}{field} is required")));
        }
    }
    Ok(())
}

fn non_empty_text<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    object
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Numbers, or strings that parse as numbers.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn typed<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ValidationError> {
    serde_json::from_value(value).map_err(|e| ValidationError::schema(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn itinerary_with(stops: Value) -> String {
        json!({
            "start_location": "New York",
            "end_location": "Boston",
            "route_description": "Coastal route",
            "stops": stops
        })
        .to_string()
    }

    fn stop(name: &str, detour: Value) -> Value {
        json!({ "name": name, "description": "d", "detour_time_minutes": detour })
    }

    #[test]
    fn accepts_bare_single_suggestion() {
        let result = validate(
            r#"{"name":"Trattoria X","address":"1 Main St"}"#,
            ExpectedShape::Single,
        )
        .unwrap();
        let primary = result.primary().unwrap();
        assert_eq!(primary.name, "Trattoria X");
        assert_eq!(primary.address, "1 Main St");
    }

    #[test]
    fn strips_fences() {
        let raw = "```json\n{\"name\":\"A\",\"address\":\"B\",\"rating\":4.6}\n```";
        let result = validate(raw, ExpectedShape::Single).unwrap();
        assert_eq!(result.primary().unwrap().rating.as_deref(), Some("4.6"));

        let bare_fence = "```\n{\"name\":\"A\",\"address\":\"B\"}\n```";
        assert!(validate(bare_fence, ExpectedShape::Single).is_ok());
    }

    #[test]
    fn ignores_text_after_the_payload() {
        let raw = "{\"name\":\"A\",\"address\":\"B\"}\nHope this helps!";
        let result = validate(raw, ExpectedShape::Single).unwrap();
        assert_eq!(result.primary().unwrap().name, "A");

        let fenced = "```json\n{\"name\":\"A\",\"address\":\"B\"}\n```\nHope this helps!";
        assert!(validate(fenced, ExpectedShape::Single).is_ok());

        let wrapped = "Sure! Here it is:\n```json\n{\"name\":\"A\",\"address\":\"B\"}\n```\nEnjoy.";
        assert!(validate(wrapped, ExpectedShape::Single).is_ok());
    }

    #[test]
    fn extracts_object_from_prose() {
        let raw = "Here is my pick: {\"name\":\"A {the best}\",\"address\":\"B\"} Enjoy!";
        let result = validate(raw, ExpectedShape::Single).unwrap();
        assert_eq!(result.primary().unwrap().name, "A {the best}");
    }

    #[test]
    fn unparseable_text_is_malformed() {
        let err = validate("Sorry, I can't help with that.", ExpectedShape::Single).unwrap_err();
        assert_eq!(err.kind, ValidationKind::Malformed);

        let err = validate("{\"name\": \"A\",", ExpectedShape::Single).unwrap_err();
        assert_eq!(err.kind, ValidationKind::Malformed);
    }

    #[test]
    fn blank_required_field_is_schema_violation() {
        let err = validate(r#"{"name":"A","address":"  "}"#, ExpectedShape::Single).unwrap_err();
        assert_eq!(err.kind, ValidationKind::SchemaViolation);
        assert!(err.detail.contains("address"));
    }

    #[test]
    fn array_is_not_a_single_suggestion() {
        let err = validate(r#"[{"name":"A","address":"B"}]"#, ExpectedShape::Single).unwrap_err();
        assert_eq!(err.kind, ValidationKind::SchemaViolation);
    }

    #[test]
    fn composite_with_nested_primary() {
        let raw = json!({
            "mainSuggestion": { "name": "Local", "address": "1 Main St" },
            "chainAlternatives": [ { "name": "Chain", "address": "2 Elm St" } ]
        })
        .to_string();
        let result = validate(&raw, ExpectedShape::WithAlternatives).unwrap();
        assert_eq!(result.primary().unwrap().name, "Local");
        assert_eq!(result.chain_alternatives().len(), 1);
    }

    #[test]
    fn flat_composite_splits_alternatives_from_primary() {
        let raw = json!({
            "name": "Local",
            "address": "1 Main St",
            "hours": "noon-10pm",
            "chainAlternatives": [ { "name": "Chain", "address": "2 Elm St" } ]
        })
        .to_string();
        let result = validate(&raw, ExpectedShape::WithAlternatives).unwrap();

        let primary = result.primary().unwrap();
        assert_eq!(primary.extra["hours"], "noon-10pm");
        assert!(!primary.extra.contains_key("chainAlternatives"));
        assert_eq!(result.chain_alternatives()[0].name, "Chain");

        let null_alternatives = r#"{"name":"Local","address":"1 Main St","chainAlternatives":null}"#;
        let result = validate(null_alternatives, ExpectedShape::WithAlternatives).unwrap();
        assert!(result.chain_alternatives().is_empty());
    }

    #[test]
    fn itinerary_keeps_lodging_fields() {
        let raw = itinerary_with(json!([{
            "name": "Falls",
            "detour_time_minutes": 10,
            "hotel": { "name": "Falls Inn", "booking_link": "https://book.example/falls" },
            "airbnb_link": "https://www.airbnb.com/s/Falls"
        }]));
        let result = validate(&raw, ExpectedShape::Itinerary).unwrap();

        let stored = serde_json::to_value(&result).unwrap();
        let stop = &stored["stops"][0];
        assert_eq!(stop["hotel"]["name"], "Falls Inn");
        assert_eq!(stop["hotel"]["booking_link"], "https://book.example/falls");
        assert_eq!(stop["airbnb_link"], "https://www.airbnb.com/s/Falls");
        assert_eq!(stored["start_location"], "New York");
    }

    #[test]
    fn composite_accepts_flat_primary() {
        let result = validate(
            r#"{"name":"Local","address":"1 Main St"}"#,
            ExpectedShape::WithAlternatives,
        )
        .unwrap();
        assert_eq!(result.shape(), ExpectedShape::WithAlternatives);
        assert_eq!(result.primary().unwrap().name, "Local");
        assert!(result.chain_alternatives().is_empty());
    }

    #[test]
    fn composite_without_any_primary_is_rejected() {
        let raw = json!({ "mainSuggestion": { "name": "Local" } }).to_string();
        let err = validate(&raw, ExpectedShape::WithAlternatives).unwrap_err();
        assert_eq!(err.kind, ValidationKind::SchemaViolation);
        assert!(err.detail.contains("mainSuggestion.address"));
    }

    #[test]
    fn composite_rejects_nameless_alternative() {
        let raw = json!({
            "mainSuggestion": { "name": "Local", "address": "1 Main St" },
            "chainAlternatives": [ { "address": "2 Elm St" } ]
        })
        .to_string();
        let err = validate(&raw, ExpectedShape::WithAlternatives).unwrap_err();
        assert!(err.detail.contains("chainAlternatives[0].name"));
    }

    #[test]
    fn detour_boundary_is_inclusive() {
        let raw = itinerary_with(json!([stop("Lighthouse", json!(30))]));
        assert!(validate(&raw, ExpectedShape::Itinerary).is_ok());

        let raw = itinerary_with(json!([stop("Lighthouse", json!(31))]));
        let err = validate(&raw, ExpectedShape::Itinerary).unwrap_err();
        assert_eq!(err.kind, ValidationKind::SchemaViolation);
        assert!(err.detail.contains("Lighthouse"));
    }

    #[test]
    fn missing_detour_is_rejected() {
        let raw = itinerary_with(json!([{ "name": "Diner" }]));
        let err = validate(&raw, ExpectedShape::Itinerary).unwrap_err();
        assert!(err.detail.contains("Diner"));
        assert!(err.detail.contains("detour_time_minutes"));

        let raw = itinerary_with(json!([stop("Diner", json!("soon"))]));
        assert!(validate(&raw, ExpectedShape::Itinerary).is_err());
    }

    #[test]
    fn numeric_string_detour_is_accepted() {
        let raw = itinerary_with(json!([stop("Diner", json!("15"))]));
        let result = validate(&raw, ExpectedShape::Itinerary).unwrap();
        let stops = &result.as_itinerary().unwrap().stops;
        assert_eq!(stops[0].detour_time_minutes, Some(15.0));
    }

    #[test]
    fn duplicate_stop_names_are_rejected_case_insensitively() {
        let raw = itinerary_with(json!([
            stop("Mystic Seaport", json!(10)),
            stop("  mystic seaport ", json!(12))
        ]));
        let err = validate(&raw, ExpectedShape::Itinerary).unwrap_err();
        assert_eq!(err.kind, ValidationKind::SchemaViolation);
        assert!(err.detail.contains("duplicate"));
    }

    #[test]
    fn itinerary_requires_stops_array() {
        let err = validate(r#"{"route_description":"x"}"#, ExpectedShape::Itinerary).unwrap_err();
        assert!(err.detail.contains("stops"));
    }

    #[test]
    fn revalidating_a_result_is_a_no_op() {
        let inputs = [
            (
                r#"{"name":"A","address":"B","reviewCount":"250","isOpen":"yes"}"#.to_string(),
                ExpectedShape::Single,
            ),
            (
                r#"{"name":"A","address":"B"}"#.to_string(),
                ExpectedShape::WithAlternatives,
            ),
            (
                itinerary_with(json!([stop("Diner", json!(5)), stop("Falls", json!(30))])),
                ExpectedShape::Itinerary,
            ),
        ];

        for (raw, shape) in inputs {
            let first = validate(&raw, shape).unwrap();
            let again = validate(&first.to_json().unwrap(), shape).unwrap();
            assert_eq!(first, again);
        }
    }
}

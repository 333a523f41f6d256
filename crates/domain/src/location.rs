use serde::{Deserialize, Serialize};

const UNKNOWN: &str = "Unknown";

/// City and country resolved from a coordinate pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub city: String,
    pub country: String,
}

impl ResolvedLocation {
    /// Build from optional parts; blank or missing parts become "Unknown".
    pub fn new(city: Option<String>, country: Option<String>) -> Self {
        Self {
            city: or_unknown(city),
            country: or_unknown(country),
        }
    }

    pub fn unknown() -> Self {
        Self::new(None, None)
    }

    pub fn is_unknown(&self) -> bool {
        self.city == UNKNOWN && self.country == UNKNOWN
    }
}

impl Default for ResolvedLocation {
    fn default() -> Self {
        Self::unknown()
    }
}

impl std::fmt::Display for ResolvedLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}

fn or_unknown(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parts_become_unknown() {
        let location = ResolvedLocation::new(Some("Lyon".into()), Some(" ".into()));
        assert_eq!(location.city, "Lyon");
        assert_eq!(location.country, "Unknown");
        assert!(!location.is_unknown());
        assert!(ResolvedLocation::default().is_unknown());
    }
}

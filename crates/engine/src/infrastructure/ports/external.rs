//! External service port traits (generative backends, geocoding, liveness).

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use orderly_domain::{Coordinates, DomainError, ResolvedLocation};
use serde::Serialize;

use super::error::{BackendError, GeocodeError};

// =============================================================================
// Generative Backends
// =============================================================================

/// Identity of a generative backend variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendId {
    Gemini,
    Groq,
    Ollama,
}

impl BackendId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Groq => "groq",
            Self::Ollama => "ollama",
        }
    }

    /// Parse a comma-separated priority list such as `"gemini,groq"`.
    pub fn parse_order(list: &str) -> Result<Vec<Self>, DomainError> {
        let mut order = Vec::new();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let id: Self = name.parse()?;
            if !order.contains(&id) {
                order.push(id);
            }
        }
        Ok(order)
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "groq" => Ok(Self::Groq),
            "ollama" => Ok(Self::Ollama),
            other => Err(DomainError::parse(format!("unknown backend: {other}"))),
        }
    }
}

/// One generative text backend.
///
/// Sends a single prompt and returns the raw completion text. Implementations
/// own their endpoint and credentials and never retry; retry and fallback
/// policy belongs to the caller.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    fn id(&self) -> BackendId;

    async fn invoke(&self, prompt: &str) -> Result<String, BackendError>;
}

// =============================================================================
// Collaborators
// =============================================================================

/// Reverse geocoding: coordinates to city/country.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeocoderPort: Send + Sync {
    async fn reverse(&self, coordinates: Coordinates) -> Result<ResolvedLocation, GeocodeError>;
}

/// Reachability check for an arbitrary URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LivenessPort: Send + Sync {
    /// True when the URL answers with a success status within the probe's bound.
    async fn is_reachable(&self, url: &str) -> bool;
}

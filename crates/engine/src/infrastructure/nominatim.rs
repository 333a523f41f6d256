//! Reverse geocoding against an OpenStreetMap Nominatim server.

use std::time::Duration;

use async_trait::async_trait;
use orderly_domain::{Coordinates, ResolvedLocation};
use reqwest::Client;
use serde::Deserialize;

use crate::infrastructure::ports::{GeocodeError, GeocoderPort};

pub const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

const USER_AGENT: &str = "Orderly/1.0";

pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl GeocoderPort for NominatimGeocoder {
    async fn reverse(&self, coordinates: Coordinates) -> Result<ResolvedLocation, GeocodeError> {
        let response = self
            .client
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("lat", coordinates.lat.to_string()),
                ("lon", coordinates.lng.to_string()),
                ("format", "json".to_string()),
                ("accept-language", "en".to_string()),
            ])
            .send()
            .await
            .map_err(|e| GeocodeError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeocodeError::RequestFailed(format!(
                "status {}",
                response.status()
            )));
        }

        let body: ReverseResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        Ok(body.into_location())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Address,
}

#[derive(Debug, Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    hamlet: Option<String>,
    country: Option<String>,
}

impl ReverseResponse {
    /// Settlement name falls back city, town, village, hamlet.
    fn into_location(self) -> ResolvedLocation {
        let Address {
            city,
            town,
            village,
            hamlet,
            country,
        } = self.address;
        let settlement = [city, town, village, hamlet]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty());
        ResolvedLocation::new(settlement, country)
    }
}

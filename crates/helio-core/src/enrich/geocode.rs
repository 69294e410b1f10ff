//! Reverse geocoding of coordinates to a country name.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::config::GeocodingConfig;

/// Resolves coordinates to a country name.
///
/// Implementations never fail: any error is reported as `None`.
pub trait ReverseGeocoder {
    fn resolve_country(&self, latitude: f64, longitude: f64) -> impl Future<Output = Option<String>> + Send;
}

/// A disabled geocoder resolves nothing.
impl<G: ReverseGeocoder + Sync> ReverseGeocoder for Option<G> {
    async fn resolve_country(&self, latitude: f64, longitude: f64) -> Option<String> {
        match self {
            Some(geocoder) => geocoder.resolve_country(latitude, longitude).await,
            None => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    address: Option<ReverseAddress>,
}

#[derive(Debug, Deserialize)]
struct ReverseAddress {
    country: Option<String>,
}

/// Nominatim (OpenStreetMap) reverse geocoding client.
///
/// One request per call at country-level zoom, bounded by the client timeout.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    endpoint: String,
    zoom: u8,
    language: String,
}

impl NominatimGeocoder {
    /// Build a client from configuration.
    pub fn new(config: &GeocodingConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            zoom: config.zoom,
            language: config.language.clone(),
        })
    }

    /// Build a client if geocoding is enabled.
    pub fn from_config(config: &GeocodingConfig) -> Option<Self> {
        if !config.enabled {
            debug!("Reverse geocoding disabled");
            return None;
        }
        match Self::new(config) {
            Ok(geocoder) => Some(geocoder),
            Err(e) => {
                warn!("Failed to build geocoding client: {}", e);
                None
            }
        }
    }

    async fn request(&self, latitude: f64, longitude: f64) -> Result<Option<String>, reqwest::Error> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("format", "json".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("zoom", self.zoom.to_string()),
                ("accept-language", self.language.clone()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: ReverseResponse = response.json().await?;
        Ok(body
            .address
            .and_then(|a| a.country)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()))
    }
}

impl ReverseGeocoder for NominatimGeocoder {
    async fn resolve_country(&self, latitude: f64, longitude: f64) -> Option<String> {
        match self.request(latitude, longitude).await {
            Ok(Some(country)) => {
                debug!("Resolved ({}, {}) to {}", latitude, longitude, country);
                Some(country)
            }
            Ok(None) => {
                debug!("No country for ({}, {})", latitude, longitude);
                None
            }
            Err(e) => {
                warn!("Reverse geocoding failed for ({}, {}): {}", latitude, longitude, e);
                None
            }
        }
    }
}

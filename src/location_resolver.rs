//! Location Resolution Module
//!
//! This module resolves free-text place names into coordinates through a
//! Nominatim-compatible geocoding search.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::TourismError;
use crate::models::Coordinates;
use crate::transport::{ApiRequest, Transport};

/// One hit of the geocoding search. Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
struct GeocodingMatch {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Service for resolving place names
pub struct LocationResolver {
    transport: Arc<dyn Transport>,
    endpoint: String,
    user_agent: String,
}

impl LocationResolver {
    pub fn new(
        transport: Arc<dyn Transport>,
        endpoint: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Resolve a place name to coordinates.
    ///
    /// Returns `None` both when nothing matched and when the lookup failed;
    /// callers only learn that the place could not be located.
    #[instrument(skip(self))]
    pub async fn resolve(&self, place_name: &str) -> Option<Coordinates> {
        match self.geocode(place_name).await {
            Ok(coords) => {
                debug!("Resolved {} to ({})", place_name, coords.format_coordinates());
                Some(coords)
            }
            Err(e) => {
                warn!("Could not resolve {}: {}", place_name, e);
                None
            }
        }
    }

    async fn geocode(&self, place_name: &str) -> Result<Coordinates> {
        let request = ApiRequest::get(&self.endpoint)
            .query("q", place_name)
            .query("format", "json")
            .query("limit", 1)
            .header("User-Agent", &self.user_agent);

        let body = self.transport.execute(request).await?;
        first_match(body, place_name)
    }
}

/// Take the best (first) hit of a geocoding response
fn first_match(body: Value, place_name: &str) -> Result<Coordinates> {
    let matches: Vec<GeocodingMatch> = serde_json::from_value(body)
        .map_err(|e| TourismError::invalid_response("geocoding", e.to_string()))?;

    let Some(hit) = matches.into_iter().next() else {
        return Err(TourismError::location_not_found(place_name));
    };

    if let Some(display_name) = &hit.display_name {
        debug!("Best match: {}", display_name);
    }

    let parse = |value: &str, axis: &str| {
        value.trim().parse::<f64>().map_err(|_| {
            TourismError::invalid_response("geocoding", format!("bad {axis} '{value}'"))
        })
    };

    Coordinates::new(parse(&hit.lat, "latitude")?, parse(&hit.lon, "longitude")?)
}

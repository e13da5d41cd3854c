//! Shared fixtures for integration tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use tourism_agent::{ApiRequest, TourismAgent, TourismConfig, Transport, TransportError};

pub const GEOCODING_URL: &str = "https://geo.test/search";
pub const OVERPASS_URL: &str = "https://overpass.test/api/interpreter";
pub const FORECAST_URL: &str = "https://meteo.test/v1/forecast";

/// Answers every request to a URL with the same canned outcome
#[derive(Default)]
pub struct CannedTransport {
    routes: HashMap<String, Result<Value, TransportError>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl CannedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: &str, outcome: Result<Value, TransportError>) -> Self {
        self.routes.insert(url.to_string(), outcome);
        self
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls().iter().filter(|c| c.url == url).count()
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let outcome = self
            .routes
            .get(&request.url)
            .cloned()
            .unwrap_or(Err(TransportError::Connection));
        self.calls.lock().unwrap().push(request);
        outcome
    }
}

pub fn test_config() -> TourismConfig {
    let mut config = TourismConfig::default();
    config.endpoints.geocoding_url = GEOCODING_URL.to_string();
    config.endpoints.overpass_url = OVERPASS_URL.to_string();
    config.endpoints.forecast_url = FORECAST_URL.to_string();
    config
}

pub fn agent(transport: Arc<CannedTransport>) -> TourismAgent {
    TourismAgent::with_transport(transport, &test_config())
}

pub fn bangalore() -> Value {
    json!([{"lat": "12.9767936", "lon": "77.590082", "display_name": "Bengaluru"}])
}

pub fn forecast() -> Value {
    json!({
        "timezone": "Asia/Kolkata",
        "current": {
            "temperature_2m": 27.4,
            "relative_humidity_2m": 62,
            "precipitation": 0.0,
            "weather_code": 3
        },
        "daily": {
            "time": ["2024-06-01", "2024-06-02", "2024-06-03"],
            "temperature_2m_max": [31.2, 30.8, 29.9],
            "temperature_2m_min": [21.0, 20.6, 20.1],
            "precipitation_probability_max": [40, 65, 80]
        }
    })
}

pub fn attractions() -> Value {
    json!({"elements": [
        {"type": "node", "lat": 12.9507, "lon": 77.5848,
         "tags": {"name": "Lalbagh Botanical Garden", "tourism": "attraction"}},
        {"type": "node", "lat": 12.96, "lon": 77.58, "tags": {"tourism": "artwork"}},
        {"type": "way", "center": {"lat": 12.9791, "lon": 77.5913},
         "tags": {"name": "Vidhana Soudha", "historic": "monument"}},
        {"type": "node", "lat": 12.97, "lon": 77.6,
         "tags": {"amenity": "place_of_worship", "description": "Old temple"}}
    ]})
}

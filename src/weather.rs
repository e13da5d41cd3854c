use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use crate::Result;
use crate::TourismError;
use crate::models::weather::FORECAST_DAYS;
use crate::models::{Coordinates, WeatherSnapshot};
use crate::transport::{ApiRequest, Transport};

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,precipitation,weather_code";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_probability_max";

/// Current conditions and a short forecast from Open-Meteo
pub struct WeatherFetcher {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl WeatherFetcher {
    pub fn new(transport: Arc<dyn Transport>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    #[instrument(skip(self), fields(lat = coords.latitude, lon = coords.longitude))]
    pub async fn fetch(&self, coords: Coordinates) -> Result<WeatherSnapshot> {
        let request = ApiRequest::get(&self.endpoint)
            .query("latitude", coords.latitude)
            .query("longitude", coords.longitude)
            .query("current", CURRENT_FIELDS)
            .query("daily", DAILY_FIELDS)
            .query("timezone", "auto")
            .query("forecast_days", FORECAST_DAYS);

        let body = self.transport.execute(request).await?;
        let snapshot = parse_snapshot(body)?;

        info!(
            "Weather for {} with {} forecast days",
            snapshot.timezone,
            snapshot.forecast.len()
        );
        Ok(snapshot)
    }
}

fn parse_snapshot(body: Value) -> Result<WeatherSnapshot> {
    let response: openmeteo::ForecastResponse = serde_json::from_value(body)
        .map_err(|e| TourismError::invalid_response("forecast", e.to_string()))?;
    Ok(response.into())
}

/// `OpenMeteo` API response structures and conversion utilities
mod openmeteo {
    use serde::Deserialize;

    use crate::models::{CurrentConditions, DailyForecast, WeatherSnapshot};

    /// Forecast response; every section is optional so gaps degrade to `None`
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub timezone: Option<String>,
        #[serde(default)]
        pub current: CurrentData,
        #[serde(default)]
        pub daily: DailyData,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct CurrentData {
        #[serde(rename = "temperature_2m")]
        pub temperature: Option<f64>,
        #[serde(rename = "relative_humidity_2m")]
        pub humidity: Option<f64>,
        pub precipitation: Option<f64>,
        pub weather_code: Option<i32>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct DailyData {
        #[serde(default)]
        pub time: Vec<String>,
        #[serde(rename = "temperature_2m_max", default)]
        pub temperature_max: Vec<Option<f64>>,
        #[serde(rename = "temperature_2m_min", default)]
        pub temperature_min: Vec<Option<f64>>,
        #[serde(rename = "precipitation_probability_max", default)]
        pub precipitation_probability: Vec<Option<f64>>,
    }

    impl From<ForecastResponse> for WeatherSnapshot {
        fn from(response: ForecastResponse) -> Self {
            let current = response.current;
            let daily = response.daily;

            Self {
                current: CurrentConditions {
                    temperature: current.temperature,
                    humidity: current.humidity,
                    precipitation: current.precipitation,
                    weather_code: current.weather_code,
                },
                forecast: DailyForecast::aligned(
                    daily.time,
                    &daily.temperature_max,
                    &daily.temperature_min,
                    &daily.precipitation_probability,
                ),
                timezone: response.timezone.unwrap_or_else(|| "UTC".to_string()),
            }
        }
    }
}

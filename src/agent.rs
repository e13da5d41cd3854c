//! Query orchestration
//!
//! [`TourismAgent`] drives one query end to end: interpret the text, resolve
//! the place, fan out to the weather and attraction services and fold their
//! outcomes into a single [`QueryResult`].

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::TourismError;
use crate::config::TourismConfig;
use crate::interpreter::{classify_intent, extract_location};
use crate::location_resolver::LocationResolver;
use crate::models::QueryResult;
use crate::places::AttractionFinder;
use crate::transport::{HttpTransport, Transport};
use crate::weather::WeatherFetcher;

/// Stateless orchestrator; one instance serves any number of queries
pub struct TourismAgent {
    resolver: LocationResolver,
    weather: WeatherFetcher,
    places: AttractionFinder,
    radius_m: u32,
    limit: usize,
}

impl TourismAgent {
    /// Build an agent talking to the configured upstream services over HTTP
    pub fn new(config: &TourismConfig) -> crate::Result<Self> {
        let transport = HttpTransport::new(&config.http)?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Build an agent on top of an arbitrary transport
    pub fn with_transport(transport: Arc<dyn Transport>, config: &TourismConfig) -> Self {
        let endpoints = &config.endpoints;
        Self {
            resolver: LocationResolver::new(
                transport.clone(),
                &endpoints.geocoding_url,
                &config.http.user_agent,
            ),
            weather: WeatherFetcher::new(transport.clone(), &endpoints.forecast_url),
            places: AttractionFinder::new(transport, &endpoints.overpass_url),
            radius_m: config.search.radius_m,
            limit: config.search.limit,
        }
    }

    /// Answer a free-text travel query.
    ///
    /// Fails outright only when no place can be found in the text or the place
    /// cannot be geocoded. After that the result is a success, with any failed
    /// sub-fetch reported as an advisory in `error` (weather first, then places).
    #[instrument(skip(self))]
    pub async fn process(&self, raw_text: &str) -> QueryResult {
        let Some(location) = extract_location(raw_text) else {
            warn!("No location in query");
            return QueryResult::failure(None, TourismError::NoLocationExtracted.to_string());
        };

        let intent = classify_intent(raw_text);
        info!(
            location = %location,
            weather = intent.wants_weather,
            places = intent.wants_places,
            "Interpreted query"
        );

        let Some(coords) = self.resolver.resolve(&location).await else {
            let error = TourismError::location_not_found(&location).to_string();
            return QueryResult::failure(Some(location), error);
        };

        let weather_call = async {
            if intent.wants_weather {
                Some(self.weather.fetch(coords).await)
            } else {
                None
            }
        };
        let places_call = async {
            if intent.wants_places {
                Some(self.places.find_near(coords, self.radius_m, self.limit).await)
            } else {
                None
            }
        };
        let (weather, places) = tokio::join!(weather_call, places_call);

        let mut result = QueryResult::resolved(location);

        match weather {
            Some(Ok(snapshot)) => result.weather = Some(snapshot),
            Some(Err(e)) => {
                warn!("Weather lookup failed: {}", e);
                result.add_advisory(e.to_string());
            }
            None => {}
        }

        match places {
            Some(Ok(found)) => result.places = Some(found),
            Some(Err(e)) => {
                warn!("Attraction lookup failed: {}", e);
                result.add_advisory(e.to_string());
            }
            None => {}
        }

        result
    }
}

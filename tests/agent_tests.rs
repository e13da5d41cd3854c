//! End-to-end behaviour of the tourism agent against canned upstream services

mod common;

use std::sync::Arc;

use rstest::rstest;
use serde_json::json;

use common::{
    CannedTransport, FORECAST_URL, GEOCODING_URL, OVERPASS_URL, agent, attractions, bangalore,
    forecast,
};
use tourism_agent::{AttractionCategory, AttractionFinder, Coordinates, TransportError};

fn healthy() -> CannedTransport {
    CannedTransport::new()
        .route(GEOCODING_URL, Ok(bangalore()))
        .route(FORECAST_URL, Ok(forecast()))
        .route(OVERPASS_URL, Ok(attractions()))
}

#[tokio::test]
async fn test_trip_planning_defaults_to_places() {
    let transport = Arc::new(healthy());
    let result = agent(transport.clone())
        .process("I'm going to Bangalore, let's plan my trip")
        .await;

    assert!(result.success);
    assert_eq!(result.location.as_deref(), Some("Bangalore"));
    assert!(result.weather.is_none());
    assert!(result.error.is_none());

    let places = result.places.unwrap();
    assert_eq!(places.count, 3);
    let names: Vec<_> = places.attractions.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        ["Lalbagh Botanical Garden", "Vidhana Soudha", "Place Of Worship"]
    );
    assert_eq!(
        places.attractions[2].category,
        AttractionCategory::PlaceOfWorship
    );

    assert_eq!(transport.calls_to(FORECAST_URL), 0);
    let geocode = &transport.calls()[0];
    assert_eq!(geocode.url, GEOCODING_URL);
    assert_eq!(geocode.query_param("q"), Some("Bangalore"));
}

#[tokio::test]
async fn test_weather_only_query() {
    let transport = Arc::new(healthy());
    let result = agent(transport.clone())
        .process("What's the weather in Tokyo?")
        .await;

    assert!(result.success);
    assert_eq!(result.location.as_deref(), Some("Tokyo"));
    assert!(result.places.is_none());

    let weather = result.weather.unwrap();
    assert_eq!(weather.timezone, "Asia/Kolkata");
    assert_eq!(weather.forecast.len(), 3);
    assert_eq!(transport.calls_to(OVERPASS_URL), 0);

    let call = transport
        .calls()
        .into_iter()
        .find(|c| c.url == FORECAST_URL)
        .unwrap();
    assert_eq!(call.query_param("latitude"), Some("12.9767936"));
    assert_eq!(call.query_param("timezone"), Some("auto"));
    assert_eq!(call.query_param("forecast_days"), Some("3"));
    assert_eq!(
        call.query_param("daily"),
        Some("temperature_2m_max,temperature_2m_min,precipitation_probability_max")
    );
}

#[tokio::test]
async fn test_weather_and_places_together() {
    let transport = Arc::new(healthy());
    let result = agent(transport)
        .process("Tell me about the weather and tourist spots in Paris")
        .await;

    assert!(result.success);
    assert_eq!(result.location.as_deref(), Some("Paris"));
    assert!(result.weather.is_some());
    assert!(result.places.is_some());
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_no_location_in_text() {
    let transport = Arc::new(healthy());
    let result = agent(transport.clone())
        .process("what is the weather like today")
        .await;

    assert!(!result.success);
    assert!(result.location.is_none());
    assert!(result.error.unwrap().contains("Could not identify a location"));
    assert!(transport.calls().is_empty());
}

#[rstest]
#[case(Ok(json!([])))]
#[case(Err(TransportError::Timeout))]
#[case(Err(TransportError::Status { status: 503 }))]
#[tokio::test]
async fn test_unknown_place(#[case] geocoding: Result<serde_json::Value, TransportError>) {
    let transport = Arc::new(healthy().route(GEOCODING_URL, geocoding));
    let result = agent(transport.clone())
        .process("trip to Nowhereistan")
        .await;

    assert!(!result.success);
    assert_eq!(result.location.as_deref(), Some("Nowhereistan"));
    assert!(result.error.unwrap().contains("Nowhereistan"));
    assert!(result.weather.is_none());
    assert!(result.places.is_none());
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn test_places_failure_keeps_weather() {
    let transport = Arc::new(
        healthy().route(OVERPASS_URL, Err(TransportError::Status { status: 504 })),
    );
    let result = agent(transport)
        .process("Weather and sights in Bangalore")
        .await;

    assert!(result.success);
    assert!(result.weather.is_some());
    assert!(result.places.is_none());
    assert_eq!(result.error.as_deref(), Some("HTTP error occurred: 504"));
}

#[tokio::test]
async fn test_both_failures_accumulate_weather_first() {
    let transport = Arc::new(
        healthy()
            .route(FORECAST_URL, Err(TransportError::Timeout))
            .route(OVERPASS_URL, Err(TransportError::Connection)),
    );
    let result = agent(transport)
        .process("Weather and sights in Bangalore")
        .await;

    assert!(result.success);
    assert!(result.weather.is_none());
    assert!(result.places.is_none());
    assert_eq!(
        result.error.as_deref(),
        Some(
            "Request timed out. Please try again. Also: Could not connect to the server. \
             Please check your internet connection."
        )
    );
}

#[tokio::test]
async fn test_empty_area_is_not_an_error() {
    let transport = Arc::new(healthy().route(OVERPASS_URL, Ok(json!({"elements": []}))));
    let result = agent(transport)
        .process("Places to visit in Bangalore")
        .await;

    assert!(result.success);
    assert!(result.error.is_none());
    let places = result.places.unwrap();
    assert_eq!(places.count, 0);
    assert_eq!(
        places.message.as_deref(),
        Some("No tourist attractions found in this area")
    );
}

#[tokio::test]
async fn test_find_near_is_idempotent() {
    let transport = Arc::new(healthy());
    let finder = AttractionFinder::new(transport.clone(), OVERPASS_URL);
    let coords = Coordinates::new(12.9767936, 77.590082).unwrap();

    let first = finder.find_near(coords, 5000, 5).await.unwrap();
    let second = finder.find_near(coords, 5000, 5).await.unwrap();
    assert_eq!(first, second);
    assert!(first.attractions.iter().all(|a| !a.name.is_empty()));

    let call = &transport.calls()[0];
    let query = call.form_field("data").unwrap();
    assert!(query.contains("(around:5000,12.9767936,77.590082)"));
    assert!(query.ends_with("out center 10;"));
}

#[tokio::test]
async fn test_find_near_accepts_unbounded_limit() {
    let transport = Arc::new(healthy());
    let finder = AttractionFinder::new(transport.clone(), OVERPASS_URL);
    let coords = Coordinates::new(12.9767936, 77.590082).unwrap();

    let result = finder.find_near(coords, 5000, usize::MAX).await.unwrap();
    assert_eq!(result.count, 3);

    let query = transport.calls()[0].form_field("data").unwrap().to_string();
    assert!(query.ends_with(&format!("out center {};", usize::MAX)));
}

#[tokio::test]
async fn test_agent_is_reusable_across_queries() {
    let transport = Arc::new(healthy());
    let agent = agent(transport);

    let first = agent.process("Weather in Bangalore").await;
    let second = agent.process("Weather in Bangalore").await;
    assert_eq!(first, second);
}

//! Tourism agent - weather and attractions for natural-language travel queries
//!
//! This library interprets free text such as "I'm going to Bangalore, let's
//! plan my trip", resolves the place to coordinates and aggregates the weather
//! forecast and nearby attractions into one [`QueryResult`].

pub mod agent;
pub mod config;
pub mod error;
pub mod format;
pub mod interpreter;
pub mod location_resolver;
pub mod models;
pub mod places;
pub mod transport;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use agent::TourismAgent;
pub use config::TourismConfig;
pub use error::{TourismError, TransportError};
pub use format::{format_percentage, format_temperature};
pub use interpreter::{classify_intent, extract_location};
pub use location_resolver::LocationResolver;
pub use models::{
    Attraction, AttractionCategory, Coordinates, PlacesResult, QueryIntent, QueryResult,
    WeatherSnapshot,
};
pub use places::AttractionFinder;
pub use transport::{ApiRequest, HttpMethod, HttpTransport, Transport};
pub use weather::WeatherFetcher;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TourismError>;

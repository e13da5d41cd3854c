//! Data models for the tourism agent
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates
//! - Attraction: Points of interest and their categories
//! - Weather: Current conditions and the short forecast
//! - Query: Intent classification and the aggregated result

pub mod attraction;
pub mod location;
pub mod query;
pub mod weather;

// Re-export all public types for convenient access
pub use attraction::{Attraction, AttractionCategory, PlacesResult};
pub use location::Coordinates;
pub use query::{QueryIntent, QueryResult};
pub use weather::{CurrentConditions, DailyForecast, WeatherSnapshot, weather_description};

//! Query intent and the aggregated result handed to the presentation layer

use serde::{Deserialize, Serialize};

use super::{PlacesResult, WeatherSnapshot};

/// What the user asked for. At least one flag is always set.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct QueryIntent {
    pub wants_weather: bool,
    pub wants_places: bool,
}

impl QueryIntent {
    /// Build an intent, falling back to trip planning (places) when nothing matched
    #[must_use]
    pub fn new(wants_weather: bool, wants_places: bool) -> Self {
        Self {
            wants_weather,
            wants_places: wants_places || !wants_weather,
        }
    }
}

/// Outcome of one query.
///
/// `success` is true as soon as the location resolved; `error` may then still
/// carry an advisory message for a sub-fetch that failed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QueryResult {
    pub success: bool,
    pub location: Option<String>,
    pub weather: Option<WeatherSnapshot>,
    pub places: Option<PlacesResult>,
    pub error: Option<String>,
}

impl QueryResult {
    /// Top-level failure; nothing else is attached
    #[must_use]
    pub fn failure(location: Option<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            location,
            weather: None,
            places: None,
            error: Some(error.into()),
        }
    }

    /// Successful lookup for `location`, without any data yet
    #[must_use]
    pub fn resolved(location: impl Into<String>) -> Self {
        Self {
            success: true,
            location: Some(location.into()),
            weather: None,
            places: None,
            error: None,
        }
    }

    /// Record an advisory message. The first one wins the slot; later ones
    /// are appended after `Also:`.
    pub fn add_advisory(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        self.error = Some(match self.error.take() {
            Some(existing) => format!("{existing} Also: {message}"),
            None => message.to_string(),
        });
    }
}

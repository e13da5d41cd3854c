//! Geographic coordinates produced by the location resolver

use haversine::{Location as HaversineLocation, Units, distance};
use serde::{Deserialize, Serialize};

use crate::TourismError;

/// A point on the globe in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees, within [-90, 90]
    pub latitude: f64,
    /// Longitude in decimal degrees, within [-180, 180]
    pub longitude: f64,
}

impl Coordinates {
    /// Create coordinates, rejecting out-of-range or non-finite values
    pub fn new(latitude: f64, longitude: f64) -> crate::Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(TourismError::invalid_response(
                "geocoding",
                format!("latitude {latitude} out of range"),
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(TourismError::invalid_response(
                "geocoding",
                format!("longitude {longitude} out of range"),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Format as a coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Great-circle distance in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        distance(
            HaversineLocation {
                latitude: self.latitude,
                longitude: self.longitude,
            },
            HaversineLocation {
                latitude: other.latitude,
                longitude: other.longitude,
            },
            Units::Kilometers,
        )
    }

    /// OpenStreetMap link centred on this point
    #[must_use]
    pub fn map_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={}&mlon={}&zoom=15",
            self.latitude, self.longitude
        )
    }
}

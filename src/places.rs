//! Attraction search around a point through the Overpass API

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::Result;
use crate::TourismError;
use crate::models::{Attraction, AttractionCategory, Coordinates, PlacesResult};
use crate::transport::{ApiRequest, Transport};

/// Message attached when the area has no matching features at all
pub const NO_RESULTS_MESSAGE: &str = "No tourist attractions found in this area";

/// Search radius used when none is configured
pub const DEFAULT_RADIUS_M: u32 = 5000;
/// Result cap used when none is configured
pub const DEFAULT_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    /// Centroid, present for ways when queried with `out center`
    center: Option<OverpassPoint>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassPoint {
    lat: f64,
    lon: f64,
}

/// Tag namespaces queried, in the order used to pick a category
const NAMESPACES: &[(&str, &[AttractionCategory])] = &[
    ("tourism", AttractionCategory::TOURISM),
    ("historic", AttractionCategory::HISTORIC),
    ("amenity", AttractionCategory::AMENITY),
];

/// Finds points of interest near a coordinate
pub struct AttractionFinder {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl AttractionFinder {
    pub fn new(transport: Arc<dyn Transport>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    /// Find up to `limit` named attractions within `radius_m` meters.
    ///
    /// An area without any features is a success with an explanatory message;
    /// only a failed upstream call is an error.
    #[instrument(skip(self), fields(lat = coords.latitude, lon = coords.longitude))]
    pub async fn find_near(
        &self,
        coords: Coordinates,
        radius_m: u32,
        limit: usize,
    ) -> Result<PlacesResult> {
        let query = build_query(coords, radius_m, limit.saturating_mul(2));
        debug!("Overpass query: {}", query);

        let request = ApiRequest::post(&self.endpoint).form("data", query);
        let body = self.transport.execute(request).await?;

        let result = parse_places(body, coords, limit)?;
        info!("Found {} attractions", result.count);
        Ok(result)
    }
}

/// Overpass QL selecting nodes and ways of every queried category
#[must_use]
pub fn build_query(coords: Coordinates, radius_m: u32, max_results: usize) -> String {
    let around = format!(
        "(around:{radius_m},{},{})",
        coords.latitude, coords.longitude
    );

    let mut selectors = Vec::new();
    for (namespace, vocabulary) in NAMESPACES {
        let filter = match vocabulary {
            [single] => format!("[\"{namespace}\"=\"{}\"]", single.tag_value()),
            many => format!(
                "[\"{namespace}\"~\"{}\"]",
                many.iter()
                    .map(|c| c.tag_value())
                    .collect::<Vec<_>>()
                    .join("|")
            ),
        };
        for kind in ["node", "way"] {
            selectors.push(format!("  {kind}{filter}{around};"));
        }
    }

    format!(
        "[out:json];\n(\n{}\n);\nout center {max_results};",
        selectors.join("\n")
    )
}

/// Turn a raw Overpass payload into at most `limit` attractions
fn parse_places(body: Value, origin: Coordinates, limit: usize) -> Result<PlacesResult> {
    let response: OverpassResponse = serde_json::from_value(body)
        .map_err(|e| TourismError::invalid_response("overpass", e.to_string()))?;

    if response.elements.is_empty() {
        return Ok(PlacesResult::empty(NO_RESULTS_MESSAGE));
    }

    let attractions = response
        .elements
        .into_iter()
        .take(limit.saturating_mul(2))
        .filter_map(|element| to_attraction(element, origin))
        .take(limit)
        .collect();

    Ok(PlacesResult::new(attractions))
}

fn to_attraction(element: OverpassElement, origin: Coordinates) -> Option<Attraction> {
    let tags = element.tags;
    let tag = |key: &str| {
        tags.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let name = tag("name");
    let description = tag("description");
    if name.is_none() && description.is_none() {
        return None;
    }

    let position = match (element.center, element.lat, element.lon) {
        (Some(center), _, _) => Coordinates::new(center.lat, center.lon).ok(),
        (None, Some(lat), Some(lon)) => Coordinates::new(lat, lon).ok(),
        _ => None,
    };
    let Some(position) = position else {
        debug!("Skipping element without position: {:?}", name);
        return None;
    };

    let category = NAMESPACES
        .iter()
        .find_map(|(namespace, vocabulary)| {
            tags.get(*namespace)
                .and_then(|value| AttractionCategory::from_tag(vocabulary, value))
        })
        .unwrap_or(AttractionCategory::Attraction);

    Some(Attraction {
        name: name.unwrap_or_else(|| category.title()),
        category,
        latitude: position.latitude,
        longitude: position.longitude,
        distance_km: origin.distance_km(&position),
        address: tag("addr:full").or_else(|| tag("addr:street")),
        website: tag("website"),
        description,
    })
}

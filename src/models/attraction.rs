//! Points of interest found around a location

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of attraction, drawn from the tag values the spatial query selects
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttractionCategory {
    Attraction,
    Museum,
    Artwork,
    Viewpoint,
    Zoo,
    ThemePark,
    Monument,
    Memorial,
    Castle,
    Ruins,
    PlaceOfWorship,
}

impl AttractionCategory {
    /// `tourism=*` values selected by the spatial query
    pub const TOURISM: &'static [AttractionCategory] = &[
        Self::Attraction,
        Self::Museum,
        Self::Artwork,
        Self::Viewpoint,
        Self::Zoo,
        Self::ThemePark,
    ];

    /// `historic=*` values selected by the spatial query
    pub const HISTORIC: &'static [AttractionCategory] =
        &[Self::Monument, Self::Memorial, Self::Castle, Self::Ruins];

    /// `amenity=*` values selected by the spatial query
    pub const AMENITY: &'static [AttractionCategory] = &[Self::PlaceOfWorship];

    /// The raw tag value, e.g. `theme_park`
    #[must_use]
    pub fn tag_value(self) -> &'static str {
        match self {
            Self::Attraction => "attraction",
            Self::Museum => "museum",
            Self::Artwork => "artwork",
            Self::Viewpoint => "viewpoint",
            Self::Zoo => "zoo",
            Self::ThemePark => "theme_park",
            Self::Monument => "monument",
            Self::Memorial => "memorial",
            Self::Castle => "castle",
            Self::Ruins => "ruins",
            Self::PlaceOfWorship => "place_of_worship",
        }
    }

    /// Find the category within `vocabulary` whose tag value is `value`
    #[must_use]
    pub fn from_tag(vocabulary: &[AttractionCategory], value: &str) -> Option<Self> {
        vocabulary.iter().copied().find(|c| c.tag_value() == value)
    }

    /// Title-cased label, e.g. `Place Of Worship`
    #[must_use]
    pub fn title(self) -> String {
        self.tag_value()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for AttractionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Attraction {
    /// Display name; never empty
    pub name: String,
    pub category: AttractionCategory,
    pub latitude: f64,
    pub longitude: f64,
    /// Distance from the searched location
    pub distance_km: f64,
    pub address: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
}

/// Attractions found around a location
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct PlacesResult {
    pub attractions: Vec<Attraction>,
    pub count: usize,
    /// Informational note, set when the area has nothing to show
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PlacesResult {
    #[must_use]
    pub fn new(attractions: Vec<Attraction>) -> Self {
        Self {
            count: attractions.len(),
            attractions,
            message: None,
        }
    }

    #[must_use]
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            attractions: Vec::new(),
            count: 0,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AttractionCategory::Museum, "Museum")]
    #[case(AttractionCategory::ThemePark, "Theme Park")]
    #[case(AttractionCategory::PlaceOfWorship, "Place Of Worship")]
    fn test_category_title(#[case] category: AttractionCategory, #[case] expected: &str) {
        assert_eq!(category.title(), expected);
        assert_eq!(category.to_string(), expected);
    }

    #[test]
    fn test_category_from_tag_respects_vocabulary() {
        assert_eq!(
            AttractionCategory::from_tag(AttractionCategory::HISTORIC, "castle"),
            Some(AttractionCategory::Castle)
        );
        assert_eq!(
            AttractionCategory::from_tag(AttractionCategory::TOURISM, "castle"),
            None
        );
        assert_eq!(
            AttractionCategory::from_tag(AttractionCategory::TOURISM, "hotel"),
            None
        );
    }

    #[test]
    fn test_category_serializes_as_tag_value() {
        let json = serde_json::to_string(&AttractionCategory::ThemePark).unwrap();
        assert_eq!(json, "\"theme_park\"");
    }

    #[test]
    fn test_places_result_count() {
        let empty = PlacesResult::empty("nothing here");
        assert_eq!(empty.count, 0);
        assert_eq!(empty.message.as_deref(), Some("nothing here"));
        assert_eq!(PlacesResult::new(Vec::new()).message, None);
    }
}

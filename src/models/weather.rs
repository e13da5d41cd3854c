//! Weather snapshot returned for a resolved location

use serde::{Deserialize, Serialize};

/// Number of forecast days kept in a snapshot
pub const FORECAST_DAYS: usize = 3;

/// Conditions at the time of the request. Fields the upstream omits stay `None`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temperature: Option<f64>,
    /// Relative humidity in percent
    pub humidity: Option<f64>,
    /// Precipitation in mm
    pub precipitation: Option<f64>,
    /// WMO weather code
    pub weather_code: Option<i32>,
}

impl CurrentConditions {
    /// Human-readable description of the current weather code
    #[must_use]
    pub fn description(&self) -> &'static str {
        self.weather_code.map_or("Unknown", weather_description)
    }
}

/// Day-by-day forecast. All four columns always have the same length.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct DailyForecast {
    pub dates: Vec<String>,
    pub max_temps: Vec<Option<f64>>,
    pub min_temps: Vec<Option<f64>>,
    pub precip_probability: Vec<Option<f64>>,
}

impl DailyForecast {
    /// Build a forecast aligned on `dates`, truncated to [`FORECAST_DAYS`].
    /// Missing values in the other columns become `None`.
    #[must_use]
    pub fn aligned(
        dates: Vec<String>,
        max_temps: &[Option<f64>],
        min_temps: &[Option<f64>],
        precip_probability: &[Option<f64>],
    ) -> Self {
        let days = dates.len().min(FORECAST_DAYS);
        let column = |values: &[Option<f64>]| -> Vec<Option<f64>> {
            (0..days).map(|i| values.get(i).copied().flatten()).collect()
        };

        Self {
            max_temps: column(max_temps),
            min_temps: column(min_temps),
            precip_probability: column(precip_probability),
            dates: dates.into_iter().take(days).collect(),
        }
    }

    /// Day rows as `(date, min, max, precipitation probability)`.
    /// Stops at the shortest column.
    pub fn days(&self) -> impl Iterator<Item = (&str, Option<f64>, Option<f64>, Option<f64>)> {
        self.dates
            .iter()
            .zip(&self.min_temps)
            .zip(&self.max_temps)
            .zip(&self.precip_probability)
            .map(|(((date, min), max), precip)| (date.as_str(), *min, *max, *precip))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub forecast: DailyForecast,
    /// IANA timezone detected by the upstream from the coordinates
    pub timezone: String,
}

/// Convert a WMO weather code to a human-readable description
#[must_use]
pub fn weather_description(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "Clear sky")]
    #[case(48, "Depositing rime fog")]
    #[case(82, "Violent rain showers")]
    #[case(99, "Thunderstorm with heavy hail")]
    #[case(4, "Unknown")]
    #[case(-1, "Unknown")]
    fn test_weather_description(#[case] code: i32, #[case] expected: &str) {
        assert_eq!(weather_description(code), expected);
    }

    #[test]
    fn test_current_description_without_code() {
        let current = CurrentConditions::default();
        assert_eq!(current.description(), "Unknown");
    }

    #[test]
    fn test_forecast_truncates_and_aligns() {
        let dates = (1..=7).map(|d| format!("2024-06-0{d}")).collect();
        let forecast = DailyForecast::aligned(
            dates,
            &[Some(30.0), Some(31.0), Some(32.0), Some(33.0)],
            &[Some(20.0)],
            &[],
        );

        assert_eq!(forecast.len(), 3);
        assert_eq!(forecast.max_temps, vec![Some(30.0), Some(31.0), Some(32.0)]);
        assert_eq!(forecast.min_temps, vec![Some(20.0), None, None]);
        assert_eq!(forecast.precip_probability, vec![None, None, None]);
    }

    #[test]
    fn test_forecast_without_dates_is_empty() {
        let forecast = DailyForecast::aligned(Vec::new(), &[Some(1.0)], &[], &[]);
        assert!(forecast.is_empty());
        assert!(forecast.max_temps.is_empty());
    }
}

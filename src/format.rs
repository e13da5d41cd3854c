//! Display helpers for query results

use std::fmt::{self, Write};

use crate::models::{Coordinates, PlacesResult, QueryResult, WeatherSnapshot};

/// Format a temperature with one decimal, e.g. `21.5°C`
#[must_use]
pub fn format_temperature(value: f64, unit: &str) -> String {
    format!("{value:.1}°{unit}")
}

/// Format a percentage without decimals, e.g. `7%`
#[must_use]
pub fn format_percentage(value: f64) -> String {
    format!("{value:.0}%")
}

fn temperature_or_dash(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format_temperature(v, "C"))
}

fn percentage_or_dash(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), format_percentage)
}

/// Append one line to the report. Writing into a `String` cannot fail.
fn push_line(out: &mut String, line: fmt::Arguments<'_>) {
    let _ = out.write_fmt(line);
    out.push('\n');
}

/// Render a query result as a plain-text report
#[must_use]
pub fn render(result: &QueryResult) -> String {
    let mut out = String::new();

    if !result.success {
        let message = result.error.as_deref().unwrap_or("Something went wrong");
        push_line(&mut out, format_args!("❌ {message}"));
        return out;
    }

    if let Some(location) = &result.location {
        push_line(&mut out, format_args!("📍 Location: {location}"));
    }
    if let Some(weather) = &result.weather {
        out.push('\n');
        render_weather(&mut out, weather);
    }
    if let Some(places) = &result.places {
        out.push('\n');
        render_places(&mut out, places);
    }
    if let Some(error) = &result.error {
        push_line(&mut out, format_args!("\n⚠️ {error}"));
    }
    out
}

fn render_weather(out: &mut String, weather: &WeatherSnapshot) {
    let current = &weather.current;
    push_line(out, format_args!("🌤️ Weather ({})", weather.timezone));
    push_line(
        out,
        format_args!(
            "  Temperature: {}   Humidity: {}",
            temperature_or_dash(current.temperature),
            percentage_or_dash(current.humidity)
        ),
    );
    push_line(out, format_args!("  ☁️ {}", current.description()));
    if let Some(precipitation) = current.precipitation.filter(|p| *p > 0.0) {
        push_line(
            out,
            format_args!("  🌧️ Current precipitation: {precipitation} mm"),
        );
    }

    let days: Vec<_> = weather.forecast.days().collect();
    if !days.is_empty() {
        push_line(out, format_args!("  {}-Day Forecast", days.len()));
    }
    for (date, min, max, precip) in days {
        push_line(
            out,
            format_args!(
                "    📅 {date}  🌡️ {} - {}  💧 Rain: {}",
                temperature_or_dash(min),
                temperature_or_dash(max),
                percentage_or_dash(precip)
            ),
        );
    }
}

fn render_places(out: &mut String, places: &PlacesResult) {
    push_line(out, format_args!("🏛️ Tourist Attractions"));
    if places.attractions.is_empty() {
        let message = places.message.as_deref().unwrap_or("No attractions found");
        push_line(out, format_args!("  {message}"));
        return;
    }

    push_line(
        out,
        format_args!("  Found {} attractions nearby:", places.count),
    );
    for (idx, attraction) in places.attractions.iter().enumerate() {
        push_line(
            out,
            format_args!(
                "  {}. {} ({}, {:.1} km)",
                idx + 1,
                attraction.name,
                attraction.category,
                attraction.distance_km
            ),
        );
        if let Some(address) = &attraction.address {
            push_line(out, format_args!("     📮 {address}"));
        }
        if let Some(description) = &attraction.description {
            push_line(out, format_args!("     ℹ️ {description}"));
        }
        if let Some(website) = &attraction.website {
            push_line(out, format_args!("     🔗 {website}"));
        }
        let position = Coordinates {
            latitude: attraction.latitude,
            longitude: attraction.longitude,
        };
        push_line(out, format_args!("     🗺️ {}", position.map_url()));
    }
}

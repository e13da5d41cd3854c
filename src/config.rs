//! Configuration management for the tourism agent
//!
//! Handles loading configuration from a TOML file and environment variables,
//! and provides validation for all configuration settings.

use crate::TourismError;
use crate::places;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TourismConfig {
    /// Outbound HTTP behaviour
    #[serde(default)]
    pub http: HttpConfig,
    /// Upstream service locations
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    /// Attraction search defaults
    #[serde(default)]
    pub search: SearchConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Outbound HTTP settings shared by every upstream call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-attempt timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Total attempts for a call failing with a timeout or connection error
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Linear backoff step; attempt `n` waits `n * backoff_seconds`
    #[serde(default = "default_backoff")]
    pub backoff_seconds: u64,
    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    #[serde(default = "default_overpass_url")]
    pub overpass_url: String,
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Attraction search radius in meters
    #[serde(default = "default_radius")]
    pub radius_m: u32,
    /// Maximum number of attractions to return
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_timeout() -> u64 {
    10
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff() -> u64 {
    1
}

fn default_user_agent() -> String {
    "TourismAIAgent/1.0".to_string()
}

fn default_geocoding_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

fn default_overpass_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_radius() -> u32 {
    places::DEFAULT_RADIUS_M
}

fn default_limit() -> usize {
    places::DEFAULT_LIMIT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_attempts: default_max_attempts(),
            backoff_seconds: default_backoff(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            overpass_url: default_overpass_url(),
            forecast_url: default_forecast_url(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_m: default_radius(),
            limit: default_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl HttpConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    #[must_use]
    pub fn backoff_step(&self) -> Duration {
        Duration::from_secs(self.backoff_seconds)
    }
}

impl TourismConfig {
    /// Load configuration from `config_path`, or the default file location
    /// when `None`, then apply environment overrides
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TOURISM__HTTP__TIMEOUT_SECONDS=5 style overrides
        builder = builder.add_source(
            Environment::with_prefix("TOURISM")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: TourismConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tourism-agent").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> std::result::Result<(), TourismError> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> std::result::Result<(), TourismError> {
        if self.http.timeout_seconds == 0 || self.http.timeout_seconds > 300 {
            return Err(TourismError::config(
                "HTTP timeout must be between 1 and 300 seconds",
            ));
        }

        if self.http.max_attempts == 0 || self.http.max_attempts > 10 {
            return Err(TourismError::config(
                "HTTP max attempts must be between 1 and 10",
            ));
        }

        if self.http.backoff_seconds > 60 {
            return Err(TourismError::config(
                "HTTP backoff cannot exceed 60 seconds",
            ));
        }

        if self.search.radius_m == 0 || self.search.radius_m > 50_000 {
            return Err(TourismError::config(
                "Search radius must be between 1 and 50000 meters",
            ));
        }

        if self.search.limit == 0 || self.search.limit > 50 {
            return Err(TourismError::config(
                "Search limit must be between 1 and 50",
            ));
        }

        Ok(())
    }

    fn validate_string_values(&self) -> std::result::Result<(), TourismError> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TourismError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TourismError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        if self.http.user_agent.trim().is_empty() {
            return Err(TourismError::config("User agent cannot be empty"));
        }

        for (name, url) in [
            ("geocoding", &self.endpoints.geocoding_url),
            ("overpass", &self.endpoints.overpass_url),
            ("forecast", &self.endpoints.forecast_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TourismError::config(format!(
                    "The {name} endpoint must be a valid HTTP or HTTPS URL"
                )));
            }
        }

        Ok(())
    }
}

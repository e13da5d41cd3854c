//! Error types and handling for the tourism agent

use thiserror::Error;

/// Failure of a single outbound HTTP exchange, after the retry budget is spent.
///
/// The display texts are what end users see in advisory messages, so they are
/// phrased as user guidance rather than diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request timed out. Please try again.")]
    Timeout,

    #[error("Could not connect to the server. Please check your internet connection.")]
    Connection,

    #[error("HTTP error occurred: {status}")]
    Status { status: u16 },

    #[error("Unsupported HTTP method: {method}")]
    UnsupportedMethod { method: String },

    #[error("An unexpected error occurred: {message}")]
    Unexpected { message: String },
}

impl TransportError {
    pub fn unexpected<S: Into<String>>(message: S) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Whether another attempt could plausibly succeed
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Connection)
    }

    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
            }
        } else {
            Self::unexpected(err.to_string())
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::from_reqwest(&err)
    }
}

impl From<reqwest_middleware::Error> for TransportError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(err) => Self::from_reqwest(&err),
            // The retry middleware wraps the last failure once retries are spent
            reqwest_middleware::Error::Middleware(err) => {
                for cause in err.chain() {
                    if let Some(reqwest_middleware::Error::Reqwest(inner)) =
                        cause.downcast_ref::<reqwest_middleware::Error>()
                    {
                        return Self::from_reqwest(inner);
                    }
                    if let Some(inner) = cause.downcast_ref::<reqwest::Error>() {
                        return Self::from_reqwest(inner);
                    }
                }
                Self::unexpected(err.to_string())
            }
        }
    }
}

/// Main error type for the tourism agent
#[derive(Error, Debug)]
pub enum TourismError {
    /// Outbound call failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Geocoding produced no usable match. Also covers an unreachable
    /// geocoding service, which the resolver cannot tell apart.
    #[error("I'm sorry, I don't know this place exists: {name}")]
    LocationNotFound { name: String },

    /// The query text had no discoverable place name
    #[error("Could not identify a location in your query. Please mention a place name.")]
    NoLocationExtracted,

    /// Upstream answered with a payload we could not interpret
    #[error("Invalid response from {service}: {message}")]
    InvalidResponse { service: String, message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl TourismError {
    pub fn location_not_found<S: Into<String>>(name: S) -> Self {
        Self::LocationNotFound { name: name.into() }
    }

    pub fn invalid_response<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::InvalidResponse {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_messages_are_user_facing() {
        assert_eq!(
            TransportError::Timeout.to_string(),
            "Request timed out. Please try again."
        );
        assert_eq!(
            TransportError::Status { status: 503 }.to_string(),
            "HTTP error occurred: 503"
        );
        assert!(
            TransportError::Connection
                .to_string()
                .contains("check your internet connection")
        );
    }

    #[test]
    fn test_transient_classification() {
        assert!(TransportError::Timeout.is_transient());
        assert!(TransportError::Connection.is_transient());
        assert!(!TransportError::Status { status: 500 }.is_transient());
        assert!(!TransportError::unexpected("boom").is_transient());
    }

    #[test]
    fn test_transport_error_is_transparent() {
        let err: TourismError = TransportError::Status { status: 429 }.into();
        assert_eq!(err.to_string(), "HTTP error occurred: 429");
    }

    #[test]
    fn test_location_errors() {
        let err = TourismError::location_not_found("Nowhereistan");
        assert!(err.to_string().contains("Nowhereistan"));
        assert!(
            TourismError::NoLocationExtracted
                .to_string()
                .contains("Please mention a place name")
        );
    }
}

//! Error types for place-picker

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for place-picker operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Request timed out")]
    Timeout,

    #[error("No connection to geocoding provider: {0}")]
    NoConnection(String),

    #[error("Geocoding provider returned status {status}")]
    ServerError { status: u16 },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Geocoding provider error: {message}")]
    ProviderError { message: String },

    #[error("Response has no usable coordinates")]
    MissingCoordinates,

    #[error("Location services are disabled")]
    ServicesDisabled,

    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location permission permanently denied")]
    PermissionDeniedForever,

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Fieldless classification of an [`Error`], reported to event sinks and API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Timeout,
    NoConnection,
    ServerError,
    MalformedResponse,
    ProviderError,
    MissingCoordinates,
    ServicesDisabled,
    PermissionDenied,
    PermissionDeniedForever,
    InvalidCoordinates,
    Config,
    Io,
    Server,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Timeout => ErrorKind::Timeout,
            Self::NoConnection(_) => ErrorKind::NoConnection,
            Self::ServerError { .. } => ErrorKind::ServerError,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::ProviderError { .. } => ErrorKind::ProviderError,
            Self::MissingCoordinates => ErrorKind::MissingCoordinates,
            Self::ServicesDisabled => ErrorKind::ServicesDisabled,
            Self::PermissionDenied => ErrorKind::PermissionDenied,
            Self::PermissionDeniedForever => ErrorKind::PermissionDeniedForever,
            Self::InvalidCoordinates(_) => ErrorKind::InvalidCoordinates,
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
            Self::Server(_) => ErrorKind::Server,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Timeout => "timeout",
            Self::NoConnection => "no_connection",
            Self::ServerError => "server_error",
            Self::MalformedResponse => "malformed_response",
            Self::ProviderError => "provider_error",
            Self::MissingCoordinates => "missing_coordinates",
            Self::ServicesDisabled => "services_disabled",
            Self::PermissionDenied => "permission_denied",
            Self::PermissionDeniedForever => "permission_denied_forever",
            Self::InvalidCoordinates => "invalid_coordinates",
            Self::Config => "config",
            Self::Io => "io",
            Self::Server => "server",
        };
        f.write_str(name)
    }
}

/// Result type alias for place-picker operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Error::Timeout.kind(), ErrorKind::Timeout);
        assert_eq!(
            Error::ServerError { status: 503 }.kind(),
            ErrorKind::ServerError
        );
        assert_eq!(
            Error::PermissionDeniedForever.kind(),
            ErrorKind::PermissionDeniedForever
        );
    }

    #[test]
    fn test_kind_display_is_snake_case() {
        assert_eq!(ErrorKind::NoConnection.to_string(), "no_connection");
        assert_eq!(
            ErrorKind::PermissionDeniedForever.to_string(),
            "permission_denied_forever"
        );
    }

    #[test]
    fn test_error_messages() {
        let err = Error::ProviderError {
            message: "Unable to geocode".to_string(),
        };
        assert_eq!(err.to_string(), "Geocoding provider error: Unable to geocode");
        assert_eq!(
            Error::ServerError { status: 500 }.to_string(),
            "Geocoding provider returned status 500"
        );
    }
}

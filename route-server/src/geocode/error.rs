//! Geocoder error types.

use crate::domain::InvalidCoordinate;

/// Errors from resolving a place name to a coordinate.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Geocoder returned an error status
    #[error("geocoder error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// No place matched the query
    #[error("no location found for {0:?}")]
    NoResults(String),

    /// The geocoder answered with something that is not a usable position
    #[error("geocoder returned an invalid coordinate: {0}")]
    InvalidCoordinate(#[from] InvalidCoordinate),
}

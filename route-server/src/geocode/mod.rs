//! Place-name geocoding.
//!
//! Turns the free-text origin and destination of a query into coordinates
//! via Nominatim, with a cache in front of it.

mod cache;
mod client;
mod error;

pub use cache::{CachedGeocoder, GeocodeCacheConfig};
pub use client::{GeocodeClient, GeocoderConfig, NominatimPlace};
pub use error::GeocodeError;

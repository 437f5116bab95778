//! Caching layer for geocoder lookups.
//!
//! Place names resolve to the same coordinate for a long time, and the
//! public geocoder is heavily rate limited, so successful lookups are kept
//! for a day. Failures are never cached.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::Coordinate;

use super::client::GeocodeClient;
use super::error::GeocodeError;

/// Configuration for the geocode cache.
#[derive(Debug, Clone)]
pub struct GeocodeCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for GeocodeCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 1000,
        }
    }
}

impl GeocodeCacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }
}

/// Cache key for a place name: trimmed, lowercased, inner whitespace collapsed.
fn normalize(place: &str) -> String {
    place
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Geocoder client with caching.
///
/// Wraps a `GeocodeClient` and caches resolved coordinates by place name.
pub struct CachedGeocoder {
    client: GeocodeClient,
    places: MokaCache<String, Coordinate>,
}

impl CachedGeocoder {
    /// Create a new cached geocoder.
    pub fn new(client: GeocodeClient, config: &GeocodeCacheConfig) -> Self {
        let places = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, places }
    }

    /// Resolve `place`, using the cache if available.
    ///
    /// Blank place names are rejected without a request.
    pub async fn geocode(&self, place: &str) -> Result<Coordinate, GeocodeError> {
        let key = normalize(place);
        if key.is_empty() {
            return Err(GeocodeError::NoResults(place.to_string()));
        }

        if let Some(cached) = self.places.get(&key).await {
            debug!(place = %key, "Geocode cache hit");
            return Ok(cached);
        }

        let coordinate = self.client.geocode(&key).await?;
        self.places.insert(key, coordinate).await;

        Ok(coordinate)
    }

    /// Seed the cache with a known position.
    pub async fn insert(&self, place: &str, coordinate: Coordinate) {
        self.places.insert(normalize(place), coordinate).await;
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.places.entry_count()
    }
}

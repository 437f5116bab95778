//! Nominatim HTTP client.
//!
//! Resolves free-text place names to coordinates using the Nominatim search
//! API, restricted to one country.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::Coordinate;

use super::error::GeocodeError;

/// Default base URL for the public Nominatim instance.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default country restriction (ISO 3166-1 alpha-2).
const DEFAULT_COUNTRY: &str = "MY";

/// Nominatim's usage policy allows very little parallelism.
const DEFAULT_MAX_CONCURRENT: usize = 2;

const DEFAULT_USER_AGENT: &str = concat!("route-server/", env!("CARGO_PKG_VERSION"));

/// One search hit. Nominatim encodes the position as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
}

impl NominatimPlace {
    /// Parse the position into a validated coordinate.
    pub fn coordinate(&self) -> Result<Coordinate, GeocodeError> {
        let parse = |field: &str, value: &str| {
            value.trim().parse::<f64>().map_err(|e| GeocodeError::Json {
                message: format!("invalid {field} {value:?}: {e}"),
            })
        };
        let lat = parse("lat", &self.lat)?;
        let lon = parse("lon", &self.lon)?;
        Ok(Coordinate::new(lat, lon)?)
    }
}

/// Configuration for the geocoder client.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Country code results are restricted to
    pub country: String,
    /// Sent as the `User-Agent` header; Nominatim rejects anonymous clients
    pub user_agent: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }
}

impl GeocoderConfig {
    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Restrict results to another country.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Nominatim search client.
///
/// Uses a semaphore to limit concurrent requests.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
    country: String,
    semaphore: Arc<Semaphore>,
}

impl GeocodeClient {
    /// Create a new geocoder client with the given configuration.
    pub fn new(config: GeocoderConfig) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();
        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|_| GeocodeError::Api {
                status: 0,
                message: "Invalid User-Agent format".to_string(),
            })?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            country: config.country,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Resolve `place` to the coordinate of its best match.
    pub async fn geocode(&self, place: &str) -> Result<Coordinate, GeocodeError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| GeocodeError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", place),
                ("countrycodes", self.country.as_str()),
                ("bounded", "1"),
                ("format", "json"),
                ("limit", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let coordinate = parse_search_response(&body, place)?;
        debug!(place, %coordinate, "Geocoded place");

        Ok(coordinate)
    }
}

/// Extract the first hit from a Nominatim search response body.
fn parse_search_response(body: &str, place: &str) -> Result<Coordinate, GeocodeError> {
    let places: Vec<NominatimPlace> =
        serde_json::from_str(body).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })?;

    places
        .first()
        .ok_or_else(|| GeocodeError::NoResults(place.to_string()))?
        .coordinate()
}

//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::geocode::{GeocodeCacheConfig, GeocoderConfig};
use crate::planner::CostConfig;

/// Default location of the network document.
const DEFAULT_NETWORK_PATH: &str = "cached.json";

/// Default listen address.
const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

/// Error for an environment variable that is set but unusable.
#[derive(Debug, thiserror::Error)]
#[error("invalid {name}={value:?}: {reason}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    reason: String,
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path to the `[stations, graph]` network document
    pub network_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub geocoder: GeocoderConfig,
    pub geocode_cache: GeocodeCacheConfig,
    pub cost: CostConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            network_path: PathBuf::from(DEFAULT_NETWORK_PATH),
            bind_addr: SocketAddr::from(DEFAULT_BIND_ADDR),
            geocoder: GeocoderConfig::default(),
            geocode_cache: GeocodeCacheConfig::default(),
            cost: CostConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// anything unset or empty.
    ///
    /// Recognised variables: `NETWORK_PATH`, `BIND_ADDR`, `NOMINATIM_URL`,
    /// `GEOCODE_COUNTRY`, `GEOCODE_CACHE_TTL_SECS`, `GEOCODE_CACHE_CAPACITY`,
    /// `RAPID_OPERATOR`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get("NETWORK_PATH") {
            config = config.with_network_path(path);
        }

        if let Some(addr) = get("BIND_ADDR") {
            let parsed = addr.trim().parse().map_err(|e: std::net::AddrParseError| ConfigError {
                name: "BIND_ADDR",
                value: addr.clone(),
                reason: e.to_string(),
            })?;
            config = config.with_bind_addr(parsed);
        }

        if let Some(url) = get("NOMINATIM_URL") {
            config.geocoder = config.geocoder.with_base_url(url);
        }

        if let Some(country) = get("GEOCODE_COUNTRY") {
            config.geocoder = config.geocoder.with_country(country.trim().to_uppercase());
        }

        if let Some(secs) = get("GEOCODE_CACHE_TTL_SECS") {
            let secs = parse_count("GEOCODE_CACHE_TTL_SECS", &secs)?;
            config.geocode_cache = config.geocode_cache.with_ttl(Duration::from_secs(secs));
        }

        if let Some(capacity) = get("GEOCODE_CACHE_CAPACITY") {
            let capacity = parse_count("GEOCODE_CACHE_CAPACITY", &capacity)?;
            config.geocode_cache = config.geocode_cache.with_max_capacity(capacity);
        }

        if let Some(operator) = get("RAPID_OPERATOR") {
            config.cost = CostConfig {
                rapid_operator: operator,
                ..config.cost
            };
        }

        Ok(config)
    }

    pub fn with_network_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.network_path = path.into();
        self
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }
}

fn parse_count(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

//! Station identifiers and reference data.

use std::fmt;

use serde::Serialize;

use super::Coordinate;

/// Tokens reserved for the virtual origin and destination nodes.
pub(crate) const VIRTUAL_ORIGIN_TOKEN: &str = "-1";
pub(crate) const VIRTUAL_DESTINATION_TOKEN: &str = "-2";

/// Error returned when parsing an invalid station ID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station ID {id:?}: {reason}")]
pub struct InvalidStationId {
    pub id: String,
    reason: &'static str,
}

/// Identifier of a real station in the catalog.
///
/// Station IDs are opaque non-empty tokens. The virtual node tokens
/// (`"-1"` and `"-2"`) can never be station IDs.
///
/// # Examples
///
/// ```
/// use route_server::domain::StationId;
///
/// let id = StationId::parse("1042").unwrap();
/// assert_eq!(id.as_str(), "1042");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("-1").is_err());
/// assert!(StationId::parse("-2").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Parse a station ID from a token.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.trim().is_empty() {
            return Err(InvalidStationId {
                id: s.to_string(),
                reason: "must not be empty",
            });
        }

        if s == VIRTUAL_ORIGIN_TOKEN || s == VIRTUAL_DESTINATION_TOKEN {
            return Err(InvalidStationId {
                id: s.to_string(),
                reason: "reserved for virtual nodes",
            });
        }

        Ok(StationId(s.to_string()))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fare zone a station belongs to.
///
/// Zones are opaque tokens; only equality matters for routing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Zone(String);

impl Zone {
    pub fn new(zone: impl Into<String>) -> Self {
        Zone(zone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference data for a single station.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Where the station is.
    pub coordinate: Coordinate,

    /// Fare zone.
    pub zone: Zone,

    /// Operator or line running the station (e.g. "Rapid KL Train").
    pub operator: String,

    /// Display name.
    pub name: String,
}

impl Station {
    /// Create a new station.
    pub fn new(
        coordinate: Coordinate,
        zone: Zone,
        operator: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            coordinate,
            zone,
            operator: operator.into(),
            name: name.into(),
        }
    }
}

//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, NodeId};
use crate::network::StationCatalog;
use crate::planner::{RideSegment, RouteOutcome, Walk};

/// Query for routing between two place names.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    /// Origin place name, e.g. "KL Sentral"
    pub from: String,

    /// Destination place name
    pub to: String,
}

/// Request to route between two coordinates.
#[derive(Debug, Deserialize)]
pub struct CoordinateRouteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
}

/// Response for a routing query.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Whether any route exists
    pub found: bool,

    pub origin: Coordinate,
    pub destination: Coordinate,

    /// Effective cost of the chosen route (absent when not found)
    pub total_cost: Option<f64>,

    /// Ride segments in travel order
    pub segments: Vec<SegmentResult>,

    /// Walks around the segments; one more than there are segments
    pub walks: Vec<WalkResult>,

    /// Total walking distance in meters
    pub walking_meters: u64,
}

/// A ride segment in a route.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    /// Operator name
    pub operator: String,

    /// Fare zone
    pub zone: String,

    /// Boarding station
    pub from: StationInfo,

    /// Alighting station
    pub to: StationInfo,

    /// Number of stations ridden through, ends included
    pub stations: usize,
}

/// A walking leg in a route.
#[derive(Debug, Serialize)]
pub struct WalkResult {
    pub from: StationInfo,
    pub to: StationInfo,
    pub meters: u64,
}

/// Station (or endpoint) information for display.
#[derive(Debug, Serialize)]
pub struct StationInfo {
    /// Station ID, or `-1`/`-2` for the traveller's origin/destination
    pub id: String,

    /// Display name
    pub name: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl RouteResponse {
    /// Create from a routing outcome.
    pub fn from_outcome(
        outcome: &RouteOutcome,
        catalog: &StationCatalog,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Self {
        match outcome.itinerary() {
            Some(itinerary) => Self {
                found: true,
                origin,
                destination,
                total_cost: Some(itinerary.total_cost),
                segments: itinerary
                    .segments
                    .iter()
                    .map(SegmentResult::from_segment)
                    .collect(),
                walks: itinerary
                    .walks
                    .iter()
                    .map(|w| WalkResult::from_walk(w, catalog))
                    .collect(),
                walking_meters: itinerary.walking_meters(),
            },
            None => Self {
                found: false,
                origin,
                destination,
                total_cost: None,
                segments: Vec::new(),
                walks: Vec::new(),
                walking_meters: 0,
            },
        }
    }
}

impl SegmentResult {
    /// Create from a ride segment.
    pub fn from_segment(segment: &RideSegment) -> Self {
        Self {
            operator: segment.operator.clone(),
            zone: segment.zone.as_str().to_string(),
            from: StationInfo {
                id: segment.from.as_str().to_string(),
                name: segment.from_name.clone(),
            },
            to: StationInfo {
                id: segment.to.as_str().to_string(),
                name: segment.to_name.clone(),
            },
            stations: segment.stations.len(),
        }
    }
}

impl WalkResult {
    /// Create from a walk, looking up station names in `catalog`.
    pub fn from_walk(walk: &Walk, catalog: &StationCatalog) -> Self {
        Self {
            from: StationInfo::from_node(&walk.from, catalog),
            to: StationInfo::from_node(&walk.to, catalog),
            meters: walk.meters,
        }
    }
}

impl StationInfo {
    /// Describe a route node: the station's name, or "Origin"/"Destination".
    pub fn from_node(node: &NodeId, catalog: &StationCatalog) -> Self {
        let name = match node {
            NodeId::VirtualOrigin => "Origin".to_string(),
            NodeId::VirtualDestination => "Destination".to_string(),
            NodeId::Real(id) => catalog
                .get(id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| id.as_str().to_string()),
        };

        Self {
            id: node.as_token().to_string(),
            name,
        }
    }
}

//! Rider-facing itineraries: ride segments with the walks around them.

use std::fmt;

use serde::Serialize;

use crate::domain::{Coordinate, NodeId};
use crate::geo::distance_meters;
use crate::network::{AugmentedGraph, NetworkError, StationCatalog};

use super::error::RouteError;
use super::segment::RideSegment;

/// A walking leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Walk {
    pub from: NodeId,
    pub to: NodeId,
    pub meters: u64,
}

/// A complete route: ride segments interleaved with walks.
///
/// `walks` always has one more entry than `segments`: the walk to the first
/// segment, a walk between each pair of consecutive segments, and the walk
/// from the last station on the path to the destination. That station is
/// usually the last segment's alighting station, but a path can end by
/// touching a single-station zone that forms no segment. With no segments
/// the single walk starts at the last station on the path, or at the origin
/// when the path holds no station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    /// Total effective cost of the chosen path.
    pub total_cost: f64,

    /// Raw node path, virtual endpoints included.
    pub path: Vec<NodeId>,

    pub segments: Vec<RideSegment>,

    pub walks: Vec<Walk>,
}

impl Itinerary {
    /// Assemble an itinerary from a solved path and its segments.
    pub fn new(
        augmented: &AugmentedGraph,
        catalog: &StationCatalog,
        total_cost: f64,
        path: Vec<NodeId>,
        segments: Vec<RideSegment>,
    ) -> Result<Self, RouteError> {
        let locate = |node: &NodeId| -> Result<Coordinate, RouteError> {
            augmented
                .locate(node, catalog)
                .ok_or_else(|| NetworkError::NotAStation(node.clone()).into())
        };
        let walk = |from: NodeId, to: NodeId| -> Result<Walk, RouteError> {
            let meters = distance_meters(locate(&from)?, locate(&to)?);
            Ok(Walk { from, to, meters })
        };

        let mut walks = Vec::with_capacity(segments.len() + 1);
        let mut last = NodeId::VirtualOrigin;
        for s in &segments {
            walks.push(walk(last, NodeId::Real(s.from.clone()))?);
            last = NodeId::Real(s.to.clone());
        }

        let exit = match path.as_slice() {
            [.., exit, _] => exit.clone(),
            _ => NodeId::VirtualOrigin,
        };
        walks.push(walk(exit, NodeId::VirtualDestination)?);

        Ok(Self {
            total_cost,
            path,
            segments,
            walks,
        })
    }

    /// Total walking distance in meters.
    pub fn walking_meters(&self) -> u64 {
        self.walks.iter().map(|w| w.meters).sum()
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, (walk, segment)) in self.walks.iter().zip(&self.segments).enumerate() {
            writeln!(f, "(Walk {}m)", walk.meters)?;
            writeln!(f, "{}. {} -- {}", n + 1, segment.operator, segment.zone)?;
            writeln!(f, "  {} {}", segment.from_name, segment.from_coordinate)?;
            writeln!(f, "  {} {}", segment.to_name, segment.to_coordinate)?;
        }
        if let Some(last) = self.walks.last() {
            writeln!(f, "(Walk {}m)", last.meters)?;
        }
        Ok(())
    }
}

//! Splitting a node path into zone ride segments.

use serde::Serialize;

use crate::domain::{Coordinate, NodeId, Station, StationId, Zone};
use crate::network::{NetworkError, StationCatalog};

use super::error::RouteError;

/// One leg of physical transit: a maximal run of at least two consecutive
/// path stations in the same zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RideSegment {
    /// Operator of the first station in the run.
    pub operator: String,

    /// Zone shared by every station in the run.
    pub zone: Zone,

    /// Boarding station.
    pub from: StationId,
    pub from_name: String,
    pub from_coordinate: Coordinate,

    /// Alighting station.
    pub to: StationId,
    pub to_name: String,
    pub to_coordinate: Coordinate,

    /// Every station in the run, in travel order.
    pub stations: Vec<StationId>,
}

impl RideSegment {
    /// Build from a run of at least two stations.
    fn from_run(run: &[(&StationId, &Station)]) -> Option<Self> {
        let [(first_id, first), .., (last_id, last)] = run else {
            return None;
        };

        Some(Self {
            operator: first.operator.clone(),
            zone: first.zone.clone(),
            from: (*first_id).clone(),
            from_name: first.name.clone(),
            from_coordinate: first.coordinate,
            to: (*last_id).clone(),
            to_name: last.name.clone(),
            to_coordinate: last.coordinate,
            stations: run.iter().map(|(id, _)| (*id).clone()).collect(),
        })
    }
}

/// Group the interior of a path (everything but its first and last node)
/// into ride segments, splitting wherever the zone changes.
///
/// A run of a single station is a zone touch with no ride and is dropped.
/// Every interior node must be a catalog station.
pub fn segment(path: &[NodeId], catalog: &StationCatalog) -> Result<Vec<RideSegment>, RouteError> {
    let interior: &[NodeId] = match path {
        [_, interior @ .., _] => interior,
        _ => &[],
    };

    let mut segments = Vec::new();
    let mut run: Vec<(&StationId, &Station)> = Vec::new();

    for node in interior {
        let id = node
            .station()
            .ok_or_else(|| NetworkError::NotAStation(node.clone()))?;
        let station = catalog
            .get(id)
            .ok_or_else(|| NetworkError::NotAStation(node.clone()))?;

        if run.last().is_some_and(|(_, prev)| prev.zone != station.zone) {
            segments.extend(RideSegment::from_run(&run));
            run.clear();
        }
        run.push((id, station));
    }
    segments.extend(RideSegment::from_run(&run));

    Ok(segments)
}

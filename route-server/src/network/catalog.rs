//! Station catalog.

use std::collections::BTreeMap;

use crate::domain::{NodeId, Station, StationId};

/// Read-only lookup of station reference data by ID.
///
/// Backed by an ordered map so iteration (and therefore graph augmentation)
/// is deterministic.
#[derive(Debug, Clone, Default)]
pub struct StationCatalog {
    stations: BTreeMap<StationId, Station>,
}

impl StationCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station, returning the previous entry for the ID if any.
    pub fn insert(&mut self, id: StationId, station: Station) -> Option<Station> {
        self.stations.insert(id, station)
    }

    pub fn get(&self, id: &StationId) -> Option<&Station> {
        self.stations.get(id)
    }

    /// Look up a graph node. Virtual nodes have no station.
    pub fn get_node(&self, node: &NodeId) -> Option<&Station> {
        node.station().and_then(|id| self.stations.get(id))
    }

    pub fn contains(&self, id: &StationId) -> bool {
        self.stations.contains_key(id)
    }

    /// Iterate stations in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&StationId, &Station)> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl FromIterator<(StationId, Station)> for StationCatalog {
    fn from_iter<I: IntoIterator<Item = (StationId, Station)>>(iter: I) -> Self {
        Self {
            stations: iter.into_iter().collect(),
        }
    }
}

//! Attaching the traveller's endpoints to the transit graph.
//!
//! The traveller starts and ends at arbitrary points, not stations. Two
//! virtual nodes stand in for those points, each joined to every station by
//! a walking edge weighted with the great-circle distance. The search can
//! then board and alight anywhere.

use tracing::debug;

use crate::domain::{Coordinate, NodeId};
use crate::geo::distance_meters;

use super::catalog::StationCatalog;
use super::error::NetworkError;
use super::graph::TransitGraph;

/// A transit graph extended with walking edges for one query.
///
/// Owns its own copy of the graph; the base graph it was built from is
/// left untouched and can be shared between concurrent queries.
#[derive(Debug, Clone)]
pub struct AugmentedGraph {
    graph: TransitGraph,
    origin: Coordinate,
    destination: Coordinate,
}

impl AugmentedGraph {
    pub fn graph(&self) -> &TransitGraph {
        &self.graph
    }

    /// Where a node is: the query endpoints for the virtual nodes, the
    /// station's position otherwise.
    pub fn locate(&self, node: &NodeId, catalog: &StationCatalog) -> Option<Coordinate> {
        match node {
            NodeId::VirtualOrigin => Some(self.origin),
            NodeId::VirtualDestination => Some(self.destination),
            NodeId::Real(_) => catalog.get_node(node).map(|s| s.coordinate),
        }
    }
}

/// Build the augmented graph for a query from `origin` to `destination`.
///
/// For every station, adds `origin <-> station` weighted with the distance
/// to `origin` and `destination <-> station` weighted with the distance to
/// `destination`. The virtual nodes are never joined to each other.
///
/// The base graph must already hold (possibly empty) adjacency entries for
/// both virtual nodes.
pub fn augment(
    base: &TransitGraph,
    catalog: &StationCatalog,
    origin: Coordinate,
    destination: Coordinate,
) -> Result<AugmentedGraph, NetworkError> {
    base.require_virtual_nodes()?;

    let mut graph = base.clone();

    for (id, station) in catalog.iter() {
        let node = NodeId::Real(id.clone());
        let to_origin = distance_meters(station.coordinate, origin) as f64;
        let to_destination = distance_meters(station.coordinate, destination) as f64;

        graph.add_symmetric_edge(NodeId::VirtualOrigin, node.clone(), to_origin);
        graph.add_symmetric_edge(NodeId::VirtualDestination, node, to_destination);
    }

    debug!(
        stations = catalog.len(),
        edges = graph.edge_count(),
        %origin,
        %destination,
        "Augmented graph with walking edges"
    );

    Ok(AugmentedGraph {
        graph,
        origin,
        destination,
    })
}

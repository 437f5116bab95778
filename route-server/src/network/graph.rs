//! Directed, weighted transit graph.

use std::collections::BTreeMap;

use crate::domain::NodeId;

use super::catalog::StationCatalog;
use super::error::NetworkError;

/// Outgoing edges of a node: neighbor → raw weight.
pub type Adjacency = BTreeMap<NodeId, f64>;

/// Directed graph of raw edge weights.
///
/// A weight `>= 0` is a distance in meters (rail link or walk). A weight
/// `< 0` marks a same-station transfer between operators; its magnitude is
/// the base transfer cost, not a distance.
///
/// Nodes are the keys of the adjacency map. A node that only ever appears
/// as a neighbor has no outgoing edges and is not "in" the graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitGraph {
    adjacency: BTreeMap<NodeId, Adjacency>,
}

impl TransitGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph holding empty adjacency entries for both virtual nodes,
    /// ready to be augmented.
    pub fn with_virtual_nodes() -> Self {
        let mut graph = Self::new();
        graph.add_node(NodeId::VirtualOrigin);
        graph.add_node(NodeId::VirtualDestination);
        graph
    }

    /// Ensure a node has an adjacency entry.
    pub fn add_node(&mut self, node: NodeId) {
        self.adjacency.entry(node).or_default();
    }

    /// Add or replace the directed edge `from -> to`.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) {
        self.adjacency.entry(from).or_default().insert(to, weight);
    }

    /// Add `a -> b` and `b -> a` with the same weight.
    pub fn add_symmetric_edge(&mut self, a: NodeId, b: NodeId, weight: f64) {
        self.add_edge(a.clone(), b.clone(), weight);
        self.add_edge(b, a, weight);
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Outgoing edges of a node, or `None` if the node is not in the graph.
    pub fn neighbors(&self, node: &NodeId) -> Option<&Adjacency> {
        self.adjacency.get(node)
    }

    /// Raw weight of the edge `from -> to`.
    pub fn weight(&self, from: &NodeId, to: &NodeId) -> Option<f64> {
        self.adjacency.get(from)?.get(to).copied()
    }

    /// Iterate nodes in order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.adjacency.keys()
    }

    /// Iterate every edge as `(from, to, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId, f64)> {
        self.adjacency
            .iter()
            .flat_map(|(from, adj)| adj.iter().map(move |(to, w)| (from, to, *w)))
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    /// Check that every real station referenced by the graph exists in the
    /// catalog and every weight is finite.
    pub fn validate(&self, catalog: &StationCatalog) -> Result<(), NetworkError> {
        for (from, to, weight) in self.edges() {
            let known = |node: &NodeId| node.station().is_none_or(|id| catalog.contains(id));
            if !known(from) || !known(to) {
                return Err(NetworkError::UnknownStation {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
            if !weight.is_finite() {
                return Err(NetworkError::InvalidWeight {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }

        // Isolated nodes carry no edges but must still be real stations.
        for node in self.nodes() {
            if let Some(id) = node.station()
                && !catalog.contains(id)
            {
                return Err(NetworkError::UnknownStation {
                    from: node.clone(),
                    to: node.clone(),
                });
            }
        }

        Ok(())
    }

    /// Check the virtual nodes have their pre-allocated adjacency entries.
    pub fn require_virtual_nodes(&self) -> Result<(), NetworkError> {
        for node in [NodeId::VirtualOrigin, NodeId::VirtualDestination] {
            if !self.contains(&node) {
                return Err(NetworkError::MissingVirtualNode(node));
            }
        }
        Ok(())
    }
}

//! Transit network reference data.
//!
//! Holds the station catalog and the base connectivity graph, loads them
//! from a network document, and builds per-query augmented graphs that
//! attach the traveller's origin and destination by walking edges.

mod augment;
mod catalog;
mod document;
mod error;
mod graph;

pub use augment::{AugmentedGraph, augment};
pub use catalog::StationCatalog;
pub use document::{load_network, parse_network};
pub use error::NetworkError;
pub use graph::{Adjacency, TransitGraph};

/// A validated station catalog and base graph.
///
/// Construction checks that every station referenced by the graph is in
/// the catalog and that both virtual nodes have adjacency entries, so a
/// `Network` can be routed over without further checks.
#[derive(Debug, Clone)]
pub struct Network {
    catalog: StationCatalog,
    graph: TransitGraph,
}

impl Network {
    /// Validate and bundle a catalog and base graph.
    pub fn new(catalog: StationCatalog, graph: TransitGraph) -> Result<Self, NetworkError> {
        graph.validate(&catalog)?;
        graph.require_virtual_nodes()?;
        Ok(Self { catalog, graph })
    }

    pub fn catalog(&self) -> &StationCatalog {
        &self.catalog
    }

    pub fn graph(&self) -> &TransitGraph {
        &self.graph
    }
}

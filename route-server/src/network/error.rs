//! Network data error types.

use std::path::PathBuf;

use crate::domain::{InvalidCoordinate, InvalidStationId, NodeId};

/// Errors from loading or validating the station catalog and graph.
///
/// All of these are fatal: routing over a network that fails validation
/// risks silently wrong routes.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// Network document could not be read
    #[error("failed to read network document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Network document is not valid JSON of the expected shape
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A catalog entry uses one of the tokens reserved for virtual nodes
    #[error("station ID {0:?} collides with a reserved virtual node ID")]
    ReservedStationId(String),

    /// A station or graph key is not a usable ID
    #[error(transparent)]
    InvalidStationId(#[from] InvalidStationId),

    /// A station has an out-of-range coordinate
    #[error("station {station} has an invalid coordinate: {source}")]
    InvalidCoordinate {
        station: String,
        #[source]
        source: InvalidCoordinate,
    },

    /// A graph edge references a station absent from the catalog
    #[error("edge {from} -> {to} references a station missing from the catalog")]
    UnknownStation { from: NodeId, to: NodeId },

    /// A graph edge weight is NaN or infinite
    #[error("edge {from} -> {to} has a non-finite weight")]
    InvalidWeight { from: NodeId, to: NodeId },

    /// A route passes through a node with no catalog station
    #[error("route node {0} is not a catalog station")]
    NotAStation(NodeId),

    /// The graph lacks the pre-allocated adjacency entry for a virtual node
    #[error("graph has no adjacency entry for the virtual {0} node")]
    MissingVirtualNode(NodeId),
}

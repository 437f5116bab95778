//! Network document loading.
//!
//! The network is persisted as a JSON array `[stations, graph]`:
//!
//! ```json
//! [
//!   {"1": {"coordinate": [3.13, 101.68], "zone": "KL", "application": "Rapid KL Train", "station": "KL Sentral"}},
//!   {"-1": {}, "-2": {}, "1": {"2": 812}}
//! ]
//! ```
//!
//! Graph keys `"-1"` and `"-2"` are the virtual origin and destination.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::domain::{Coordinate, NodeId, Station, StationId, Zone};

use super::catalog::StationCatalog;
use super::error::NetworkError;
use super::graph::TransitGraph;
use super::Network;

/// Top-level document: `[stations, graph]`.
#[derive(Debug, Deserialize)]
struct NetworkDocument(
    BTreeMap<String, StationRecord>,
    BTreeMap<String, BTreeMap<String, f64>>,
);

/// One catalog entry as stored on disk.
#[derive(Debug, Deserialize)]
struct StationRecord {
    /// `[lat, lon]` in degrees.
    coordinate: [f64; 2],
    zone: ZoneToken,
    /// Operator or line name.
    application: String,
    /// Display name.
    station: String,
}

/// Zones are written as strings or bare numbers depending on the source.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZoneToken {
    Text(String),
    Number(serde_json::Number),
}

impl From<ZoneToken> for Zone {
    fn from(token: ZoneToken) -> Self {
        match token {
            ZoneToken::Text(s) => Zone::new(s),
            ZoneToken::Number(n) => Zone::new(n.to_string()),
        }
    }
}

/// Read and validate a network document from disk.
pub fn load_network(path: impl AsRef<Path>) -> Result<Network, NetworkError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let network = parse_network(&contents)?;

    info!(
        path = %path.display(),
        stations = network.catalog().len(),
        edges = network.graph().edge_count(),
        "Loaded transit network"
    );

    Ok(network)
}

/// Parse and validate a network document.
pub fn parse_network(json: &str) -> Result<Network, NetworkError> {
    let NetworkDocument(stations, edges) =
        serde_json::from_str(json).map_err(|e| NetworkError::Json {
            message: e.to_string(),
        })?;

    let catalog = build_catalog(stations)?;
    let graph = build_graph(edges)?;

    Network::new(catalog, graph)
}

fn build_catalog(stations: BTreeMap<String, StationRecord>) -> Result<StationCatalog, NetworkError> {
    let mut catalog = StationCatalog::new();

    for (key, record) in stations {
        let id = parse_station_key(&key)?;

        let [lat, lon] = record.coordinate;
        let coordinate =
            Coordinate::new(lat, lon).map_err(|source| NetworkError::InvalidCoordinate {
                station: key.clone(),
                source,
            })?;

        catalog.insert(
            id,
            Station::new(
                coordinate,
                record.zone.into(),
                record.application,
                record.station,
            ),
        );
    }

    Ok(catalog)
}

fn build_graph(
    edges: BTreeMap<String, BTreeMap<String, f64>>,
) -> Result<TransitGraph, NetworkError> {
    let mut graph = TransitGraph::new();

    for (from, neighbors) in edges {
        let from = NodeId::parse(&from)?;
        graph.add_node(from.clone());
        for (to, weight) in neighbors {
            graph.add_edge(from.clone(), NodeId::parse(&to)?, weight);
        }
    }

    Ok(graph)
}

/// Parse a catalog key, rejecting the virtual node tokens.
fn parse_station_key(key: &str) -> Result<StationId, NetworkError> {
    match NodeId::parse(key)? {
        NodeId::Real(id) => Ok(id),
        NodeId::VirtualOrigin | NodeId::VirtualDestination => {
            Err(NetworkError::ReservedStationId(key.to_string()))
        }
    }
}

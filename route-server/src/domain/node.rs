//! Graph node identifiers.

use std::fmt;

use serde::Serialize;

use super::station::{InvalidStationId, VIRTUAL_DESTINATION_TOKEN, VIRTUAL_ORIGIN_TOKEN};
use super::StationId;

/// A node in the routing graph: a real station or one of the two virtual
/// endpoints standing in for the traveller's origin and destination.
///
/// Ordering is total and deterministic (origin < destination < stations),
/// which the shortest-path search uses to break ties.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeId {
    VirtualOrigin,
    VirtualDestination,
    Real(StationId),
}

impl NodeId {
    /// Parse a node token as used in network documents.
    ///
    /// `"-1"` is the virtual origin, `"-2"` the virtual destination, and
    /// anything else must be a valid station ID.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        match s {
            VIRTUAL_ORIGIN_TOKEN => Ok(NodeId::VirtualOrigin),
            VIRTUAL_DESTINATION_TOKEN => Ok(NodeId::VirtualDestination),
            other => StationId::parse(other).map(NodeId::Real),
        }
    }

    /// The station ID, if this is a real station.
    pub fn station(&self) -> Option<&StationId> {
        match self {
            NodeId::Real(id) => Some(id),
            NodeId::VirtualOrigin | NodeId::VirtualDestination => None,
        }
    }

    pub fn is_virtual(&self) -> bool {
        self.station().is_none()
    }

    /// The document token for this node.
    pub fn as_token(&self) -> &str {
        match self {
            NodeId::VirtualOrigin => VIRTUAL_ORIGIN_TOKEN,
            NodeId::VirtualDestination => VIRTUAL_DESTINATION_TOKEN,
            NodeId::Real(id) => id.as_str(),
        }
    }
}

impl From<StationId> for NodeId {
    fn from(id: StationId) -> Self {
        NodeId::Real(id)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::VirtualOrigin => f.write_str("VirtualOrigin"),
            NodeId::VirtualDestination => f.write_str("VirtualDestination"),
            NodeId::Real(id) => write!(f, "Real({id})"),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::VirtualOrigin => f.write_str("origin"),
            NodeId::VirtualDestination => f.write_str("destination"),
            NodeId::Real(id) => write!(f, "{id}"),
        }
    }
}

impl Serialize for NodeId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_token())
    }
}

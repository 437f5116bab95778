//! Domain types for the zone-aware transit router.
//!
//! These types represent validated network reference data. All types
//! enforce their invariants at construction time, so code that receives
//! them can trust their validity.

mod coordinate;
mod node;
mod station;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use node::NodeId;
pub use station::{InvalidStationId, Station, StationId, Zone};

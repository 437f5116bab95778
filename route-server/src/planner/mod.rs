//! Zone-aware route planning.
//!
//! Answers "what is the most sensible way to get from here to there by
//! public transport?" for two arbitrary coordinates. The origin and
//! destination are attached to the station graph by walking edges, the
//! cheapest path under the effective cost model is found with Dijkstra, and
//! the path is split into per-zone ride segments with walks between them.

mod config;
mod cost;
mod dijkstra;
mod error;
mod itinerary;
mod route;
mod segment;

pub use config::{CostConfig, DEFAULT_RAPID_OPERATOR};
pub use cost::CostModel;
pub use dijkstra::{ShortestPath, shortest_path};
pub use error::RouteError;
pub use itinerary::{Itinerary, Walk};
pub use route::{RouteOutcome, Router, route};
pub use segment::{RideSegment, segment};

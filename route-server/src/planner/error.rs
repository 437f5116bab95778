//! Routing error types.

use crate::domain::NodeId;
use crate::network::NetworkError;

/// Errors from routing a query.
///
/// An unreachable destination is not an error; it is reported as
/// [`RouteOutcome::NoRoute`](super::RouteOutcome::NoRoute).
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The network or a path through it references data that does not exist
    #[error("malformed network: {0}")]
    MalformedInput(#[from] NetworkError),

    /// The cost model produced a negative or NaN cost.
    /// This breaks Dijkstra's optimality guarantee and indicates a bug or a
    /// nonsensical configuration.
    #[error("effective cost {cost} for edge {from} -> {to} is not a non-negative number")]
    NumericAnomaly { from: NodeId, to: NodeId, cost: f64 },
}

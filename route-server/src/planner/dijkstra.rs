//! Single-source, single-target shortest path over effective costs.
//!
//! Label-setting Dijkstra with a binary-heap frontier. Edge weights are
//! passed through the [`CostModel`] before relaxation, so the path found is
//! the cheapest for a rider, not the shortest on the map.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, trace, warn};

use crate::domain::NodeId;
use crate::network::{StationCatalog, TransitGraph};

use super::cost::CostModel;
use super::error::RouteError;

/// Result of a shortest-path query.
#[derive(Debug, Clone, PartialEq)]
pub enum ShortestPath {
    /// Cheapest path from start to target, both inclusive.
    Found { total_cost: f64, path: Vec<NodeId> },

    /// No path exists, or an endpoint is not in the graph.
    Unreachable,
}

impl ShortestPath {
    /// Total effective cost, `f64::INFINITY` when unreachable.
    pub fn cost(&self) -> f64 {
        match self {
            ShortestPath::Found { total_cost, .. } => *total_cost,
            ShortestPath::Unreachable => f64::INFINITY,
        }
    }

    /// Node sequence, empty when unreachable.
    pub fn path(&self) -> &[NodeId] {
        match self {
            ShortestPath::Found { path, .. } => path,
            ShortestPath::Unreachable => &[],
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ShortestPath::Found { .. })
    }
}

/// Frontier entry.
#[derive(Debug)]
struct State {
    cost: f64,
    node: NodeId,
}

// The priority queue depends on `Ord`.
// Flip the ordering so `BinaryHeap` pops the cheapest entry first. Ties go to
// the smaller node so results are reproducible.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

/// Find the cheapest path from `start` to `target`.
///
/// Missing endpoints and disconnected targets yield
/// [`ShortestPath::Unreachable`]. A negative or NaN effective cost aborts the
/// search with [`RouteError::NumericAnomaly`], since optimality can no longer
/// be guaranteed.
pub fn shortest_path(
    graph: &TransitGraph,
    cost_model: &CostModel,
    catalog: &StationCatalog,
    start: &NodeId,
    target: &NodeId,
) -> Result<ShortestPath, RouteError> {
    if !graph.contains(start) || !graph.contains(target) {
        debug!(%start, %target, "Endpoint not in graph");
        return Ok(ShortestPath::Unreachable);
    }

    let mut distances: HashMap<NodeId, f64> = HashMap::new();
    let mut previous: HashMap<NodeId, NodeId> = HashMap::new();
    let mut heap = BinaryHeap::new();
    let mut settled = 0usize;

    distances.insert(start.clone(), 0.0);
    heap.push(State {
        cost: 0.0,
        node: start.clone(),
    });

    while let Some(State { cost, node }) = heap.pop() {
        // Skip stale heap entries.
        if cost > distances.get(&node).copied().unwrap_or(f64::INFINITY) {
            continue;
        }

        settled += 1;
        if &node == target {
            break;
        }

        let Some(neighbors) = graph.neighbors(&node) else {
            continue;
        };

        for (neighbor, &raw) in neighbors {
            let step = cost_model.checked_cost(raw, &node, neighbor, catalog)?;
            let candidate = cost + step;

            if candidate < distances.get(neighbor).copied().unwrap_or(f64::INFINITY) {
                trace!(from = %node, to = %neighbor, raw, step, candidate, "Relaxed edge");
                distances.insert(neighbor.clone(), candidate);
                previous.insert(neighbor.clone(), node.clone());
                heap.push(State {
                    cost: candidate,
                    node: neighbor.clone(),
                });
            }
        }
    }

    let Some(&total_cost) = distances.get(target) else {
        debug!(%start, %target, settled, "Target unreachable");
        return Ok(ShortestPath::Unreachable);
    };

    let Some(path) = reconstruct(&previous, start, target) else {
        warn!(%start, %target, "Predecessor chain broken; treating target as unreachable");
        return Ok(ShortestPath::Unreachable);
    };

    debug!(
        %start,
        %target,
        total_cost,
        hops = path.len().saturating_sub(1),
        settled,
        "Shortest path found"
    );

    Ok(ShortestPath::Found { total_cost, path })
}

/// Walk predecessor links back from `target` to `start`.
///
/// Returns `None` if the chain stops short of `start`.
fn reconstruct(
    previous: &HashMap<NodeId, NodeId>,
    start: &NodeId,
    target: &NodeId,
) -> Option<Vec<NodeId>> {
    let mut path = vec![target.clone()];
    let mut current = target;

    while current != start {
        let prev = previous.get(current)?;
        path.push(prev.clone());
        current = prev;
    }

    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, Station, StationId, Zone};
    use crate::network::augment;

    fn node(s: &str) -> NodeId {
        NodeId::parse(s).unwrap()
    }

    fn nodes(ids: &[&str]) -> Vec<NodeId> {
        ids.iter().map(|s| node(s)).collect()
    }

    fn catalog(entries: &[(&str, &str, &str)]) -> StationCatalog {
        entries
            .iter()
            .enumerate()
            .map(|(i, (id, zone, operator))| {
                (
                    StationId::parse(id).unwrap(),
                    Station::new(
                        Coordinate::new(3.0 + i as f64 * 0.01, 101.0).unwrap(),
                        Zone::new(*zone),
                        *operator,
                        *id,
                    ),
                )
            })
            .collect()
    }

    fn line_catalog() -> StationCatalog {
        catalog(&[("A", "Z1", "Line1"), ("B", "Z1", "Line1"), ("C", "Z1", "Line1")])
    }

    fn line_graph() -> TransitGraph {
        let mut graph = TransitGraph::with_virtual_nodes();
        graph.add_symmetric_edge(node("A"), node("B"), 500.0);
        graph.add_symmetric_edge(node("B"), node("C"), 250.0);
        graph
    }

    #[test]
    fn line_scenario_through_virtual_nodes() {
        let catalog = line_catalog();
        let a = catalog.get(&StationId::parse("A").unwrap()).unwrap().coordinate;
        let c = catalog.get(&StationId::parse("C").unwrap()).unwrap().coordinate;

        let augmented = augment(&line_graph(), &catalog, a, c).unwrap();
        let result = shortest_path(
            augmented.graph(),
            &CostModel::default(),
            &catalog,
            &NodeId::VirtualOrigin,
            &NodeId::VirtualDestination,
        )
        .unwrap();

        // 0 (walk) + 5250 (A-B) + 0 (B-C, under threshold) + 0 (walk)
        assert_eq!(result.cost(), 5250.0);
        assert_eq!(
            result.path(),
            &[
                NodeId::VirtualOrigin,
                node("A"),
                node("B"),
                node("C"),
                NodeId::VirtualDestination,
            ]
        );
    }

    #[test]
    fn self_route_is_free() {
        let result = shortest_path(
            &line_graph(),
            &CostModel::default(),
            &line_catalog(),
            &node("A"),
            &node("A"),
        )
        .unwrap();

        assert_eq!(result.cost(), 0.0);
        assert_eq!(result.path(), &[node("A")]);
    }

    #[test]
    fn missing_start_is_unreachable() {
        let result = shortest_path(
            &line_graph(),
            &CostModel::default(),
            &line_catalog(),
            &node("Q"),
            &node("A"),
        )
        .unwrap();

        assert_eq!(result, ShortestPath::Unreachable);
        assert_eq!(result.cost(), f64::INFINITY);
        assert!(result.path().is_empty());
    }

    #[test]
    fn missing_target_is_unreachable() {
        let result = shortest_path(
            &line_graph(),
            &CostModel::default(),
            &line_catalog(),
            &node("A"),
            &node("Q"),
        )
        .unwrap();

        assert!(!result.is_found());
    }

    #[test]
    fn disconnected_target_is_unreachable() {
        let catalog = catalog(&[
            ("A", "Z1", "Line1"),
            ("B", "Z1", "Line1"),
            ("X", "Z1", "Line1"),
            ("Y", "Z1", "Line1"),
        ]);
        let mut graph = TransitGraph::new();
        graph.add_symmetric_edge(node("A"), node("B"), 400.0);
        graph.add_symmetric_edge(node("X"), node("Y"), 400.0);

        let result =
            shortest_path(&graph, &CostModel::default(), &catalog, &node("A"), &node("Y")).unwrap();

        assert_eq!(result.cost(), f64::INFINITY);
        assert!(result.path().is_empty());
    }

    #[test]
    fn respects_edge_direction() {
        let catalog = line_catalog();
        let mut graph = TransitGraph::new();
        graph.add_edge(node("A"), node("B"), 400.0);
        graph.add_node(node("B"));

        let forward =
            shortest_path(&graph, &CostModel::default(), &catalog, &node("A"), &node("B")).unwrap();
        let backward =
            shortest_path(&graph, &CostModel::default(), &catalog, &node("B"), &node("A")).unwrap();

        assert!(forward.is_found());
        assert!(!backward.is_found());
    }

    #[test]
    fn prefers_short_hops_over_long_direct_edge() {
        // A-D direct is 1200m; A-B-C-D is three 400m hops.
        let catalog = catalog(&[
            ("A", "Z1", "Line1"),
            ("B", "Z1", "Line1"),
            ("C", "Z1", "Line1"),
            ("D", "Z1", "Line1"),
        ]);
        let mut graph = TransitGraph::new();
        graph.add_symmetric_edge(node("A"), node("D"), 1200.0);
        graph.add_symmetric_edge(node("A"), node("B"), 400.0);
        graph.add_symmetric_edge(node("B"), node("C"), 400.0);
        graph.add_symmetric_edge(node("C"), node("D"), 400.0);

        let result =
            shortest_path(&graph, &CostModel::default(), &catalog, &node("A"), &node("D")).unwrap();

        // direct: 1200 * 3 * 7 = 25200; hops: 3 * (400 * 3 * 3) = 10800
        assert_eq!(result.cost(), 10800.0);
        assert_eq!(result.path(), nodes(&["A", "B", "C", "D"]).as_slice());
    }

    #[test]
    fn avoids_zone_crossing_when_cheaper() {
        // A-B-D stays in Z1; A-C-D crosses into Z2 and back.
        let catalog = catalog(&[
            ("A", "Z1", "Line1"),
            ("B", "Z1", "Line1"),
            ("C", "Z2", "Line1"),
            ("D", "Z1", "Line1"),
        ]);
        let mut graph = TransitGraph::new();
        graph.add_symmetric_edge(node("A"), node("B"), 400.0);
        graph.add_symmetric_edge(node("B"), node("D"), 400.0);
        graph.add_symmetric_edge(node("A"), node("C"), 100.0);
        graph.add_symmetric_edge(node("C"), node("D"), 100.0);

        let result =
            shortest_path(&graph, &CostModel::default(), &catalog, &node("A"), &node("D")).unwrap();

        // in-zone: 2 * 3600 = 7200; crossing: 0 + 3000 + 0 + 3000 = 6000
        assert_eq!(result.cost(), 6000.0);
        assert_eq!(result.path(), nodes(&["A", "C", "D"]).as_slice());

        let pricier = CostModel::new(
            crate::planner::CostConfig::default().with_zone_crossing_surcharge(5000.0),
        );
        let result = shortest_path(&graph, &pricier, &catalog, &node("A"), &node("D")).unwrap();
        assert_eq!(result.cost(), 7200.0);
        assert_eq!(result.path(), nodes(&["A", "B", "D"]).as_slice());
    }

    #[test]
    fn transfer_edges_are_discounted() {
        // A (Line1) transfers onto A2 (Rapid KL Train) at the same station.
        let catalog = catalog(&[
            ("A", "Z1", "Line1"),
            ("A2", "Z1", "Rapid KL Train"),
            ("B", "Z1", "Rapid KL Train"),
        ]);
        let mut graph = TransitGraph::new();
        graph.add_symmetric_edge(node("A"), node("A2"), -100.0);
        graph.add_symmetric_edge(node("A2"), node("B"), 250.0);

        let result =
            shortest_path(&graph, &CostModel::default(), &catalog, &node("A"), &node("B")).unwrap();

        assert!((result.cost() - 10.0).abs() < 1e-9);
        assert_eq!(result.path(), nodes(&["A", "A2", "B"]).as_slice());
    }

    #[test]
    fn ties_are_broken_deterministically() {
        // Two equal-cost routes A-B-D and A-C-D.
        let catalog = catalog(&[
            ("A", "Z1", "Line1"),
            ("B", "Z1", "Line1"),
            ("C", "Z1", "Line1"),
            ("D", "Z1", "Line1"),
        ]);
        let mut graph = TransitGraph::new();
        graph.add_symmetric_edge(node("A"), node("B"), 400.0);
        graph.add_symmetric_edge(node("A"), node("C"), 400.0);
        graph.add_symmetric_edge(node("B"), node("D"), 400.0);
        graph.add_symmetric_edge(node("C"), node("D"), 400.0);

        let first =
            shortest_path(&graph, &CostModel::default(), &catalog, &node("A"), &node("D")).unwrap();
        for _ in 0..10 {
            let again =
                shortest_path(&graph, &CostModel::default(), &catalog, &node("A"), &node("D"))
                    .unwrap();
            assert_eq!(again, first);
        }
        assert_eq!(first.path(), nodes(&["A", "B", "D"]).as_slice());
    }

    #[test]
    fn negative_effective_cost_is_an_anomaly() {
        let broken = CostModel::new(
            crate::planner::CostConfig::default().with_transfer_factors(-0.1, -0.15),
        );
        let catalog = line_catalog();
        let mut graph = TransitGraph::new();
        graph.add_symmetric_edge(node("A"), node("B"), -100.0);

        let err = shortest_path(&graph, &broken, &catalog, &node("A"), &node("B")).unwrap_err();
        assert!(matches!(err, RouteError::NumericAnomaly { .. }));
    }

    #[test]
    fn reconstruct_follows_predecessors() {
        let previous: HashMap<NodeId, NodeId> =
            [(node("C"), node("B")), (node("B"), node("A"))].into_iter().collect();

        assert_eq!(
            reconstruct(&previous, &node("A"), &node("C")),
            Some(nodes(&["A", "B", "C"]))
        );
        assert_eq!(reconstruct(&previous, &node("A"), &node("A")), Some(nodes(&["A"])));
    }

    #[test]
    fn reconstruct_rejects_broken_chain() {
        // B has no predecessor, so the chain never reaches A.
        let previous: HashMap<NodeId, NodeId> = [(node("C"), node("B"))].into_iter().collect();

        assert_eq!(reconstruct(&previous, &node("A"), &node("C")), None);
    }
}

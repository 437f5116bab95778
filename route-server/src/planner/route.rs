//! End-to-end routing between two coordinates.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{Coordinate, NodeId};
use crate::network::{Network, augment};

use super::config::CostConfig;
use super::cost::CostModel;
use super::dijkstra::{ShortestPath, shortest_path};
use super::error::RouteError;
use super::itinerary::Itinerary;
use super::segment::segment;

/// Outcome of a routing query.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Found(Itinerary),

    /// The destination cannot be reached from the origin.
    NoRoute,
}

impl RouteOutcome {
    /// Total cost, `f64::INFINITY` when there is no route.
    pub fn total_cost(&self) -> f64 {
        match self {
            RouteOutcome::Found(itinerary) => itinerary.total_cost,
            RouteOutcome::NoRoute => f64::INFINITY,
        }
    }

    pub fn itinerary(&self) -> Option<&Itinerary> {
        match self {
            RouteOutcome::Found(itinerary) => Some(itinerary),
            RouteOutcome::NoRoute => None,
        }
    }
}

/// Route from `origin` to `destination` over `network`.
///
/// Builds a per-query augmented graph (the network itself is not modified),
/// finds the cheapest path between the virtual endpoints, and splits it
/// into ride segments.
pub fn route(
    network: &Network,
    cost_model: &CostModel,
    origin: Coordinate,
    destination: Coordinate,
) -> Result<RouteOutcome, RouteError> {
    let catalog = network.catalog();
    let augmented = augment(network.graph(), catalog, origin, destination)?;

    let result = shortest_path(
        augmented.graph(),
        cost_model,
        catalog,
        &NodeId::VirtualOrigin,
        &NodeId::VirtualDestination,
    )?;

    let ShortestPath::Found { total_cost, path } = result else {
        info!(%origin, %destination, "No route found");
        return Ok(RouteOutcome::NoRoute);
    };

    let segments = segment(&path, catalog)?;
    debug!(
        path_len = path.len(),
        segments = segments.len(),
        "Segmented path by zone"
    );

    let itinerary = Itinerary::new(&augmented, catalog, total_cost, path, segments)?;

    info!(
        %origin,
        %destination,
        total_cost,
        segments = itinerary.segments.len(),
        walking_m = itinerary.walking_meters(),
        "Route found"
    );

    Ok(RouteOutcome::Found(itinerary))
}

/// Shared router over a fixed, validated network.
///
/// Cheap to clone; every query builds its own augmented graph, so one
/// router can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Router {
    network: Arc<Network>,
    cost_model: Arc<CostModel>,
}

impl Router {
    /// Create a router over `network` with the given cost parameters.
    pub fn new(network: Network, config: CostConfig) -> Self {
        Self {
            network: Arc::new(network),
            cost_model: Arc::new(CostModel::new(config)),
        }
    }

    /// Route between two coordinates.
    pub fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteOutcome, RouteError> {
        route(&self.network, &self.cost_model, origin, destination)
    }

    pub fn network(&self) -> &Network {
        &self.network
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Station, StationId, Zone};
    use crate::network::{StationCatalog, TransitGraph, parse_network};

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn node(s: &str) -> NodeId {
        NodeId::parse(s).unwrap()
    }

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    /// A, B, C on one line, about 1.1km apart.
    fn line_network() -> Network {
        let catalog: StationCatalog = [
            ("A", coord(3.00, 101.0), "Alpha"),
            ("B", coord(3.01, 101.0), "Bravo"),
            ("C", coord(3.02, 101.0), "Charlie"),
        ]
        .into_iter()
        .map(|(key, c, name)| (id(key), Station::new(c, Zone::new("Z1"), "Line1", name)))
        .collect();

        let mut graph = TransitGraph::with_virtual_nodes();
        graph.add_symmetric_edge(node("A"), node("B"), 500.0);
        graph.add_symmetric_edge(node("B"), node("C"), 250.0);

        Network::new(catalog, graph).unwrap()
    }

    #[test]
    fn line_route() {
        let network = line_network();
        let outcome = route(
            &network,
            &CostModel::default(),
            coord(3.00, 101.0),
            coord(3.02, 101.0),
        )
        .unwrap();

        let itinerary = outcome.itinerary().unwrap();
        assert_eq!(itinerary.total_cost, 5250.0);
        assert_eq!(
            itinerary.path,
            vec![
                NodeId::VirtualOrigin,
                node("A"),
                node("B"),
                node("C"),
                NodeId::VirtualDestination,
            ]
        );

        assert_eq!(itinerary.segments.len(), 1);
        let s = &itinerary.segments[0];
        assert_eq!(s.operator, "Line1");
        assert_eq!(s.from_name, "Alpha");
        assert_eq!(s.to_name, "Charlie");

        assert_eq!(itinerary.walks.len(), 2);
        assert_eq!(itinerary.walking_meters(), 0);
    }

    #[test]
    fn nearby_endpoints_just_walk() {
        // Both points next to A: walking there and back out is free, and
        // A alone forms no ride segment.
        let network = line_network();
        let outcome = route(
            &network,
            &CostModel::default(),
            coord(3.0001, 101.0),
            coord(3.0002, 101.0),
        )
        .unwrap();

        let itinerary = outcome.itinerary().unwrap();
        assert_eq!(itinerary.total_cost, 0.0);
        assert!(itinerary.segments.is_empty());
        assert_eq!(itinerary.walks.len(), 1);
        assert_eq!(itinerary.walks[0].from, node("A"));
        assert_eq!(itinerary.walks[0].to, NodeId::VirtualDestination);
        assert_eq!(itinerary.walks[0].meters, 22);
    }

    #[test]
    fn trailing_single_station_zone_walks_from_last_station() {
        // C sits alone in Z2 at the destination. Riding on to it is far
        // cheaper than walking from B, but it forms no segment.
        let catalog: StationCatalog = [
            ("A", coord(3.00, 101.0), "Z1", "Alpha"),
            ("B", coord(3.01, 101.0), "Z1", "Bravo"),
            ("C", coord(3.02, 101.0), "Z2", "Charlie"),
        ]
        .into_iter()
        .map(|(key, c, zone, name)| (id(key), Station::new(c, Zone::new(zone), "Line1", name)))
        .collect();
        let mut graph = TransitGraph::with_virtual_nodes();
        graph.add_symmetric_edge(node("A"), node("B"), 250.0);
        graph.add_symmetric_edge(node("B"), node("C"), 250.0);
        let network = Network::new(catalog, graph).unwrap();

        let outcome = route(
            &network,
            &CostModel::default(),
            coord(3.00, 101.0),
            coord(3.02, 101.0),
        )
        .unwrap();

        let itinerary = outcome.itinerary().unwrap();
        assert_eq!(itinerary.total_cost, 3000.0);
        assert_eq!(itinerary.segments.len(), 1);
        assert_eq!(itinerary.segments[0].to_name, "Bravo");
        assert_eq!(itinerary.walks.len(), 2);
        assert_eq!(itinerary.walks[1].from, node("C"));
        assert_eq!(itinerary.walks[1].meters, 0);
        assert!(itinerary.to_string().ends_with("  Bravo 3.01,101\n(Walk 0m)\n"));
    }

    #[test]
    fn empty_catalog_has_no_route() {
        let network = Network::new(StationCatalog::new(), TransitGraph::with_virtual_nodes()).unwrap();
        let outcome = route(
            &network,
            &CostModel::default(),
            coord(3.0, 101.0),
            coord(3.1, 101.0),
        )
        .unwrap();

        assert_eq!(outcome, RouteOutcome::NoRoute);
        assert_eq!(outcome.total_cost(), f64::INFINITY);
        assert!(outcome.itinerary().is_none());
    }

    #[test]
    fn router_does_not_mutate_network() {
        let router = Router::new(line_network(), CostConfig::default());
        let edges_before = router.network().graph().edge_count();

        let first = router.route(coord(3.00, 101.0), coord(3.02, 101.0)).unwrap();
        let second = router.route(coord(3.00, 101.0), coord(3.02, 101.0)).unwrap();

        assert_eq!(first, second);
        assert_eq!(router.network().graph().edge_count(), edges_before);
        assert!(
            router
                .network()
                .graph()
                .neighbors(&NodeId::VirtualOrigin)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn router_is_shareable_across_threads() {
        let router = Router::new(line_network(), CostConfig::default());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let router = router.clone();
                std::thread::spawn(move || {
                    router
                        .route(coord(3.00, 101.0), coord(3.02, 101.0))
                        .unwrap()
                        .total_cost()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 5250.0);
        }
    }

    #[test]
    fn zone_split_route_from_document() {
        // Rapid line in zone KL (1-2-3), commuter line in zone SB (4-5),
        // with a transfer between 3 and 4. Every ride hop is under the
        // free threshold, so riding beats walking the last 334m from 3.
        let doc = r#"[
            {
                "1": {"coordinate": [3.000, 101.600], "zone": "KL", "application": "Rapid KL Train", "station": "One"},
                "2": {"coordinate": [3.003, 101.600], "zone": "KL", "application": "Rapid KL Train", "station": "Two"},
                "3": {"coordinate": [3.006, 101.600], "zone": "KL", "application": "Rapid KL Train", "station": "Three"},
                "4": {"coordinate": [3.006, 101.600], "zone": "SB", "application": "KTM Komuter", "station": "Three (KTM)"},
                "5": {"coordinate": [3.009, 101.600], "zone": "SB", "application": "KTM Komuter", "station": "Five"}
            },
            {
                "-1": {}, "-2": {},
                "1": {"2": 250},
                "2": {"1": 250, "3": 250},
                "3": {"2": 250, "4": -100},
                "4": {"3": -100, "5": 250},
                "5": {"4": 250}
            }
        ]"#;
        let network = parse_network(doc).unwrap();
        let outcome = route(
            &network,
            &CostModel::default(),
            coord(3.000, 101.600),
            coord(3.009, 101.600),
        )
        .unwrap();

        let itinerary = outcome.itinerary().unwrap();
        let zones: Vec<&str> = itinerary.segments.iter().map(|s| s.zone.as_str()).collect();
        assert_eq!(zones, vec!["KL", "SB"]);
        assert_eq!(itinerary.segments[0].from_name, "One");
        assert_eq!(itinerary.segments[0].to_name, "Three");
        assert_eq!(itinerary.segments[1].from_name, "Three (KTM)");
        assert_eq!(itinerary.segments[1].to_name, "Five");
        assert_eq!(itinerary.walks.len(), 3);
        assert_eq!(itinerary.walks[1].meters, 0);
    }
}

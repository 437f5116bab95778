//! Effective edge costs.
//!
//! The search never minimises raw distance. Each raw edge weight is mapped
//! to an effective cost that encodes how unpleasant or expensive the hop is
//! for a rider:
//!
//! - transfers (negative weights) cost a fraction of their magnitude, with a
//!   cheaper rate onto the rapid operator;
//! - hops shorter than the minimum-fare threshold are free;
//! - longer hops get a convex penalty so many short, well-served hops beat
//!   one kilometers-long edge;
//! - moving between two stations in different zones adds a flat surcharge.

use crate::domain::NodeId;
use crate::network::StationCatalog;

use super::config::CostConfig;
use super::error::RouteError;

/// Maps raw edge weights to effective traversal costs.
#[derive(Debug, Clone, Default)]
pub struct CostModel {
    config: CostConfig,
}

impl CostModel {
    pub fn new(config: CostConfig) -> Self {
        Self { config }
    }

    /// Effective cost of traversing an edge with raw weight `raw` from
    /// `source` to `target`.
    ///
    /// The zone surcharge only applies between two real stations; a zone
    /// change at a virtual endpoint is never charged.
    pub fn effective_cost(
        &self,
        raw: f64,
        source: &NodeId,
        target: &NodeId,
        catalog: &StationCatalog,
    ) -> f64 {
        if raw < 0.0 {
            return self.transfer_cost(-raw, target, catalog);
        }

        let distance_cost = if raw < self.config.free_threshold_m {
            0.0
        } else {
            raw * self.config.distance_factor * (1.0 + raw / self.config.convexity_m)
        };

        distance_cost + self.zone_crossing_cost(source, target, catalog)
    }

    /// [`effective_cost`](Self::effective_cost), rejecting negative or NaN
    /// results.
    pub fn checked_cost(
        &self,
        raw: f64,
        source: &NodeId,
        target: &NodeId,
        catalog: &StationCatalog,
    ) -> Result<f64, RouteError> {
        let cost = self.effective_cost(raw, source, target, catalog);
        // NaN fails this comparison too
        if cost >= 0.0 {
            Ok(cost)
        } else {
            Err(RouteError::NumericAnomaly {
                from: source.clone(),
                to: target.clone(),
                cost,
            })
        }
    }

    fn transfer_cost(&self, magnitude: f64, target: &NodeId, catalog: &StationCatalog) -> f64 {
        let onto_rapid = catalog
            .get_node(target)
            .is_some_and(|s| s.operator == self.config.rapid_operator);

        if onto_rapid {
            magnitude * self.config.rapid_transfer_factor
        } else {
            magnitude * self.config.transfer_factor
        }
    }

    fn zone_crossing_cost(&self, source: &NodeId, target: &NodeId, catalog: &StationCatalog) -> f64 {
        match (catalog.get_node(source), catalog.get_node(target)) {
            (Some(a), Some(b)) if a.zone != b.zone => self.config.zone_crossing_surcharge,
            _ => 0.0,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Coordinate, Station, StationId, Zone};
    use proptest::prelude::*;

    fn catalog() -> StationCatalog {
        [("A", "Z1", "Rapid KL Train"), ("B", "Z2", "KTM Komuter")]
            .into_iter()
            .map(|(id, zone, operator)| {
                (
                    StationId::parse(id).unwrap(),
                    Station::new(
                        Coordinate::new(3.0, 101.0).unwrap(),
                        Zone::new(zone),
                        operator,
                        id,
                    ),
                )
            })
            .collect()
    }

    fn any_node() -> impl Strategy<Value = NodeId> {
        prop_oneof![
            Just(NodeId::VirtualOrigin),
            Just(NodeId::VirtualDestination),
            Just(NodeId::parse("A").unwrap()),
            Just(NodeId::parse("B").unwrap()),
        ]
    }

    proptest! {
        /// The default model never produces a negative cost for finite weights
        #[test]
        fn never_negative(raw in -1.0e6f64..1.0e6, from in any_node(), to in any_node()) {
            let model = CostModel::default();
            let cost = model.checked_cost(raw, &from, &to, &catalog());
            prop_assert!(cost.is_ok());
            prop_assert!(cost.unwrap() >= 0.0);
        }

        /// Longer distance edges never cost less than shorter ones
        #[test]
        fn monotone_in_distance(a in 0.0f64..1.0e5, b in 0.0f64..1.0e5) {
            let model = CostModel::default();
            let c = catalog();
            let from = NodeId::parse("A").unwrap();
            let to = NodeId::parse("B").unwrap();
            let (short, long) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                model.effective_cost(short, &from, &to, &c) <= model.effective_cost(long, &from, &to, &c)
            );
        }
    }
}

//! Cost model configuration for the router.

/// Operator whose transfers are discounted by default.
pub const DEFAULT_RAPID_OPERATOR: &str = "Rapid KL Train";

/// Parameters of the effective-cost function.
#[derive(Debug, Clone, PartialEq)]
pub struct CostConfig {
    /// Operator name whose inbound transfers get the cheaper factor.
    pub rapid_operator: String,

    /// Multiplier for transfers onto the rapid operator.
    pub rapid_transfer_factor: f64,

    /// Multiplier for every other transfer.
    pub transfer_factor: f64,

    /// Distance edges shorter than this (meters) cost nothing.
    /// Models the minimum fare.
    pub free_threshold_m: f64,

    /// Linear factor applied to distance edges.
    pub distance_factor: f64,

    /// Scale of the convex penalty (meters).
    /// Cost grows as `d * factor * (1 + d / convexity_m)`.
    pub convexity_m: f64,

    /// Flat surcharge for a hop between two stations in different zones.
    pub zone_crossing_surcharge: f64,
}

impl CostConfig {
    /// Create a configuration with default factors and the given rapid operator.
    pub fn new(rapid_operator: impl Into<String>) -> Self {
        Self {
            rapid_operator: rapid_operator.into(),
            ..Self::default()
        }
    }

    /// Set the free-distance threshold in meters.
    pub fn with_free_threshold(mut self, meters: f64) -> Self {
        self.free_threshold_m = meters;
        self
    }

    /// Set the zone-crossing surcharge.
    pub fn with_zone_crossing_surcharge(mut self, surcharge: f64) -> Self {
        self.zone_crossing_surcharge = surcharge;
        self
    }

    /// Set both transfer factors.
    pub fn with_transfer_factors(mut self, rapid: f64, other: f64) -> Self {
        self.rapid_transfer_factor = rapid;
        self.transfer_factor = other;
        self
    }
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            rapid_operator: DEFAULT_RAPID_OPERATOR.to_string(),
            rapid_transfer_factor: 0.10,
            transfer_factor: 0.15,
            free_threshold_m: 300.0,
            distance_factor: 3.0,
            convexity_m: 200.0,
            zone_crossing_surcharge: 3000.0,
        }
    }
}

//! Great-circle distance between coordinates.

use crate::domain::Coordinate;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two coordinates, rounded to the nearest meter.
///
/// # Examples
///
/// ```
/// use route_server::domain::Coordinate;
/// use route_server::geo::distance_meters;
///
/// let a = Coordinate::new(3.1390, 101.6869).unwrap();
/// assert_eq!(distance_meters(a, a), 0);
/// ```
pub fn distance_meters(a: Coordinate, b: Coordinate) -> u64 {
    let phi1 = a.lat().to_radians();
    let phi2 = b.lat().to_radians();
    let d_phi = (b.lat() - a.lat()).to_radians();
    let d_lambda = (b.lon() - a.lon()).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Clamp guards atan2 against h drifting just past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    (EARTH_RADIUS_M * c).round() as u64
}

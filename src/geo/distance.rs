//! Great-circle distance on a spherical Earth.

use super::region::Coordinate;

/// Mean Earth radius in meters used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Distance in meters between two coordinates using the haversine formula.
///
/// Total over finite inputs. Coordinates outside the usual latitude and
/// longitude ranges are not rejected; the trigonometry simply wraps them.
/// Accuracy is bounded by the spherical approximation (~0.5%), which is
/// plenty for fences tens to hundreds of meters wide.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1.0 for antipodal points
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

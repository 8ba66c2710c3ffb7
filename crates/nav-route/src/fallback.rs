//! Straight-line fallback route.

use nav_core::{GeoPoint, NavResult, Route};

/// Interpolation fractions of the synthesized path.
const DIRECT_FRACTIONS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// A five-point straight route from `start` to `end`, with haversine length
/// and an ETA at `walking_speed_m_per_min`.  Marked as a direct fallback.
pub fn direct_route(start: GeoPoint, end: GeoPoint, walking_speed_m_per_min: f64) -> NavResult<Route> {
    let path = DIRECT_FRACTIONS.iter().map(|&t| start.lerp(end, t)).collect();
    let distance = start.distance_m(end);
    let eta = distance / walking_speed_m_per_min;
    Ok(Route::new(path, distance, eta)?.into_direct_fallback())
}

//! Point and segment proximity tests against obstacles.
//!
//! All distances are haversine metres.  Boundaries are inclusive: a point
//! exactly `radius + margin` away is near.

use nav_core::GeoPoint;
use nav_geo::min_distance_point_to_segment;

use crate::obstacle::Obstacle;

/// Segments shorter than this are scanned point by point, metres.
pub const FINE_SCAN_MAX_LEN_M: f64 = 30.0;

/// Interpolation steps of the fine scan (`steps + 1` points).
pub const FINE_SCAN_STEPS: usize = 5;

/// How much closer to the centre a leg leaving an obstacle may dip, metres.
pub const DEPARTURE_SLACK_M: f64 = 0.5;

/// `true` if `point` is within `radius + margin_m` of any obstacle.
pub fn is_near_obstacle(point: GeoPoint, obstacles: &[Obstacle], margin_m: f64) -> bool {
    first_near(point, obstacles, margin_m).is_some()
}

/// The first obstacle whose reach contains `point`.
pub fn first_near(point: GeoPoint, obstacles: &[Obstacle], margin_m: f64) -> Option<&Obstacle> {
    obstacles.iter().find(|o| o.is_within_reach(point, margin_m))
}

/// `true` if the segment `a → b` passes through `obstacle`.
///
/// 1. An endpoint inside the contact radius is a hit.
/// 2. A segment whose closest approach stays outside `radius + margin_m` is clear.
/// 3. Otherwise short segments are scanned at evenly spaced points against
///    the contact radius; long segments count as a hit on the distance
///    check alone.
pub fn segment_intersects_obstacle(a: GeoPoint, b: GeoPoint, obstacle: &Obstacle, margin_m: f64) -> bool {
    let centre = obstacle.position();
    let contact = obstacle.contact_radius_m();

    if a.distance_m(centre) <= contact || b.distance_m(centre) <= contact {
        return true;
    }
    if min_distance_point_to_segment(centre, a, b) >= obstacle.reach_m(margin_m) {
        return false;
    }
    if a.distance_m(b) >= FINE_SCAN_MAX_LEN_M {
        return true;
    }

    (0..=FINE_SCAN_STEPS).any(|k| {
        let p = a.lerp(b, k as f64 / FINE_SCAN_STEPS as f64);
        p.distance_m(centre) <= contact
    })
}

/// Like [`segment_intersects_obstacle`], but `a` is where the traveler
/// stands and may already be inside the obstacle.
///
/// From inside, the leg is clear only if `b` lies outside the contact radius
/// and no point of the leg comes closer to the centre than `a` does.
/// Distance to a point is convex along a line, so such a leg moves steadily
/// away once it starts.
pub fn departure_intersects_obstacle(a: GeoPoint, b: GeoPoint, obstacle: &Obstacle, margin_m: f64) -> bool {
    let centre = obstacle.position();
    let contact = obstacle.contact_radius_m();
    let start = a.distance_m(centre);

    if start > contact {
        return segment_intersects_obstacle(a, b, obstacle, margin_m);
    }
    if b.distance_m(centre) <= contact {
        return true;
    }
    min_distance_point_to_segment(centre, a, b) < start - DEPARTURE_SLACK_M
}

/// Number of segments of `path` that intersect at least one obstacle.
pub fn route_obstacle_intersections(path: &[GeoPoint], obstacles: &[Obstacle], margin_m: f64) -> u32 {
    let hits = path
        .windows(2)
        .filter(|w| obstacles.iter().any(|o| segment_intersects_obstacle(w[0], w[1], o, margin_m)))
        .count();
    u32::try_from(hits).unwrap_or(u32::MAX)
}

/// `true` if no segment of `path` intersects any obstacle.
pub fn path_is_clear(path: &[GeoPoint], obstacles: &[Obstacle], margin_m: f64) -> bool {
    path.windows(2)
        .all(|w| !obstacles.iter().any(|o| segment_intersects_obstacle(w[0], w[1], o, margin_m)))
}

/// `true` if an obstacle lies within `radius + margin_m` of the next
/// `segments` segments ahead of `current`.
///
/// The first scanned segment runs from `current` (the interpolated traveler
/// position) to `path[from_segment + 1]`; later ones follow the path.
pub fn look_ahead_blocked(
    current: GeoPoint,
    path: &[GeoPoint],
    from_segment: usize,
    segments: usize,
    obstacles: &[Obstacle],
    margin_m: f64,
) -> bool {
    if obstacles.is_empty() || segments == 0 || from_segment + 1 >= path.len() {
        return false;
    }

    let last = (from_segment + segments).min(path.len() - 1);
    let mut start = current;
    for end_idx in from_segment + 1..=last {
        let end = path[end_idx];
        let blocked = obstacles
            .iter()
            .any(|o| min_distance_point_to_segment(o.position(), start, end) <= o.reach_m(margin_m));
        if blocked {
            return true;
        }
        start = end;
    }
    false
}

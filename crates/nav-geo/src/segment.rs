//! Point/segment and point/path projection.
//!
//! Projection runs in degree space (linear, clamped to the segment).  The
//! distance reported for a projection is the haversine distance in metres
//! from the query point to the projected point.
//!
//! All functions are total.  A path with fewer than two points yields
//! [`PathProjection::none`], whose `distance_m` is `f64::INFINITY`; callers
//! check [`PathProjection::is_none`] instead of handling an error.

use nav_core::GeoPoint;

// ── SegmentProjection ─────────────────────────────────────────────────────────

/// Closest point on a single segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SegmentProjection {
    pub point: GeoPoint,
    /// Fraction along the segment, `0.0 ..= 1.0`.
    pub t:     f64,
}

/// Project `p` onto the segment `a → b`.
///
/// Degenerate segments (`a == b`) return `a` with `t = 0`.
pub fn closest_point_on_segment(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> SegmentProjection {
    let dx = b.lon - a.lon;
    let dy = b.lat - a.lat;
    let len2 = dx * dx + dy * dy;

    if len2 == 0.0 || !len2.is_finite() {
        return SegmentProjection { point: a, t: 0.0 };
    }

    let raw = ((p.lon - a.lon) * dx + (p.lat - a.lat) * dy) / len2;
    let t = if raw.is_finite() { raw.clamp(0.0, 1.0) } else { 0.0 };

    SegmentProjection { point: a.lerp(b, t), t }
}

/// Haversine distance in metres from `p` to the nearest point of `a → b`.
pub fn min_distance_point_to_segment(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> f64 {
    p.distance_m(closest_point_on_segment(p, a, b).point)
}

// ── PathProjection ────────────────────────────────────────────────────────────

/// Closest point on a polyline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathProjection {
    pub point:         GeoPoint,
    /// Index of the segment `path[i] → path[i + 1]` holding `point`.
    pub segment_index: usize,
    pub t:             f64,
    /// Metres from the query point; `INFINITY` for the sentinel.
    pub distance_m:    f64,
}

impl PathProjection {
    /// Sentinel returned for paths shorter than two points.
    pub fn none(p: GeoPoint) -> Self {
        Self { point: p, segment_index: 0, t: 0.0, distance_m: f64::INFINITY }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        self.distance_m == f64::INFINITY
    }

    /// Fractional position along the path (`segment_index + t`), used to
    /// order points of interest by where they fall on the route.
    #[inline]
    pub fn path_position(&self) -> f64 {
        self.segment_index as f64 + self.t
    }
}

/// Project `p` onto every segment of `path` and return the global minimum.
///
/// Ties keep the earliest segment.
pub fn closest_point_on_path(p: GeoPoint, path: &[GeoPoint]) -> PathProjection {
    if path.len() < 2 {
        return PathProjection::none(p);
    }

    let mut best = PathProjection::none(p);
    for (i, w) in path.windows(2).enumerate() {
        let proj = closest_point_on_segment(p, w[0], w[1]);
        let d = p.distance_m(proj.point);
        if d < best.distance_m || (best.is_none() && i == 0) {
            best = PathProjection { point: proj.point, segment_index: i, t: proj.t, distance_m: d };
        }
    }
    best
}

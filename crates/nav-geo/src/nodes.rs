//! Direction-change nodes, cross-route intersections, and waypoint assembly.
//!
//! Nodes are descriptive projections of a route for display and instructions.
//! They are regenerated whenever the active path changes.

use nav_core::{GeoPoint, bearing_delta_deg};

use crate::params::NodeParams;
use crate::segment::closest_point_on_path;

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    Start,
    End,
    DirectionChange,
    Intersection,
}

/// A labelled point of interest along a path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaypointNode {
    pub position:      GeoPoint,
    pub label:         String,
    pub kind:          NodeKind,
    /// Fractional position along the primary path (`segment + t`).
    pub path_position: f64,
}

// ── Direction changes ─────────────────────────────────────────────────────────

/// Indices of interior points where the path turns by more than
/// `turn_deg`, or where more than `cadence_points` points have passed since
/// the previous node.
pub fn direction_change_indices(path: &[GeoPoint], params: &NodeParams) -> Vec<usize> {
    let mut out = Vec::new();
    if path.len() < 3 {
        return out;
    }

    let mut last_node = 0usize;
    for i in 1..path.len() - 1 {
        let turn = bearing_delta_deg(
            path[i - 1].bearing_deg(path[i]),
            path[i].bearing_deg(path[i + 1]),
        )
        .abs();

        if turn > params.turn_deg || i - last_node > params.cadence_points {
            out.push(i);
            last_node = i;
        }
    }
    out
}

// ── Intersections ─────────────────────────────────────────────────────────────

/// Points where `a` and `b` come within `intersection_deg` of each other,
/// excluding their shared start and end.  Nearby hits are merged.
pub fn intersections(a: &[GeoPoint], b: &[GeoPoint], params: &NodeParams) -> Vec<GeoPoint> {
    let mut found: Vec<GeoPoint> = Vec::new();
    if a.len() < 2 || b.len() < 2 {
        return found;
    }

    let thresh = params.intersection_deg;
    let steps = params.samples_per_segment.max(2) - 1;
    let endpoints = [a[0], a[a.len() - 1], b[0], b[b.len() - 1]];

    for sa in a.windows(2) {
        for sb in b.windows(2) {
            if !boxes_overlap(sa, sb, thresh) {
                continue;
            }
            for i in 0..=steps {
                let pa = sa[0].lerp(sa[1], i as f64 / steps as f64);
                for j in 0..=steps {
                    let pb = sb[0].lerp(sb[1], j as f64 / steps as f64);
                    if pa.planar_deg(pb) >= thresh {
                        continue;
                    }
                    let hit = pa.lerp(pb, 0.5);
                    let near_endpoint = endpoints.iter().any(|e| e.planar_deg(hit) < thresh);
                    let near_existing = found.iter().any(|f| f.planar_deg(hit) < thresh);
                    if !near_endpoint && !near_existing {
                        found.push(hit);
                    }
                }
            }
        }
    }
    found
}

fn boxes_overlap(sa: &[GeoPoint], sb: &[GeoPoint], pad: f64) -> bool {
    let (a_lat_lo, a_lat_hi) = (sa[0].lat.min(sa[1].lat), sa[0].lat.max(sa[1].lat));
    let (a_lon_lo, a_lon_hi) = (sa[0].lon.min(sa[1].lon), sa[0].lon.max(sa[1].lon));
    let (b_lat_lo, b_lat_hi) = (sb[0].lat.min(sb[1].lat), sb[0].lat.max(sb[1].lat));
    let (b_lon_lo, b_lon_hi) = (sb[0].lon.min(sb[1].lon), sb[0].lon.max(sb[1].lon));

    a_lat_lo - pad <= b_lat_hi
        && b_lat_lo - pad <= a_lat_hi
        && a_lon_lo - pad <= b_lon_hi
        && b_lon_lo - pad <= a_lon_hi
}

// ── Waypoints ─────────────────────────────────────────────────────────────────

/// Assemble the waypoint list for `primary`: start `S`, direction changes
/// `N1..`, intersections with any alternative `I1..` (only those lying on the
/// primary path), end `E`.  Sorted by position along the primary path.
pub fn waypoints(
    primary: &[GeoPoint],
    alternatives: &[&[GeoPoint]],
    params: &NodeParams,
) -> Vec<WaypointNode> {
    if primary.len() < 2 {
        return Vec::new();
    }
    let last = primary.len() - 1;

    let mut nodes = vec![WaypointNode {
        position:      primary[0],
        label:         "S".into(),
        kind:          NodeKind::Start,
        path_position: 0.0,
    }];

    for (n, idx) in direction_change_indices(primary, params).into_iter().enumerate() {
        nodes.push(WaypointNode {
            position:      primary[idx],
            label:         format!("N{}", n + 1),
            kind:          NodeKind::DirectionChange,
            path_position: idx as f64,
        });
    }

    let mut paths: Vec<&[GeoPoint]> = Vec::with_capacity(alternatives.len() + 1);
    paths.push(primary);
    paths.extend_from_slice(alternatives);

    let mut hits: Vec<(f64, GeoPoint)> = Vec::new();
    for i in 0..paths.len() {
        for j in i + 1..paths.len() {
            for p in intersections(paths[i], paths[j], params) {
                let proj = closest_point_on_path(p, primary);
                if proj.is_none() || proj.distance_m > params.attach_m {
                    continue;
                }
                if hits.iter().any(|(_, h)| h.planar_deg(p) < params.intersection_deg) {
                    continue;
                }
                hits.push((proj.path_position(), p));
            }
        }
    }
    hits.sort_by(|a, b| a.0.total_cmp(&b.0));
    for (n, (pos, p)) in hits.into_iter().enumerate() {
        nodes.push(WaypointNode {
            position:      p,
            label:         format!("I{}", n + 1),
            kind:          NodeKind::Intersection,
            path_position: pos,
        });
    }

    nodes.push(WaypointNode {
        position:      primary[last],
        label:         "E".into(),
        kind:          NodeKind::End,
        path_position: last as f64,
    });

    // Stable sort keeps S first and E last on ties.
    nodes.sort_by(|a, b| a.path_position.total_cmp(&b.path_position));
    nodes
}

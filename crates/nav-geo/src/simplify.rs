//! Polyline simplification.
//!
//! One reduction pass walks the path keeping an anchor (the last kept point):
//!
//! - points closer than `duplicate_deg` to the anchor are dropped;
//! - a point is kept when the turn it makes exceeds `max_turn_deg`;
//! - a gentle point is still kept when dropping it would make the original
//!   polyline from the anchor more than `max_detour_ratio` times longer than
//!   the straight chord that replaces it (stops long arcs collapsing).
//!
//! If a pass on a path of more than `subsample_min_len` points keeps fewer
//! than `collapse_ratio` of them, uniform subsampling is used instead.
//!
//! [`simplify`] repeats passes until nothing changes.  Every pass returns a
//! subsequence of its input, so the loop terminates and the result is a fixed
//! point: simplifying twice equals simplifying once.

use nav_core::{GeoPoint, bearing_delta_deg};

use crate::params::SimplifyParams;

/// Simplify `path`.  Invalid coordinates are discarded first.
pub fn simplify(path: &[GeoPoint], params: &SimplifyParams) -> Vec<GeoPoint> {
    let mut current: Vec<GeoPoint> = path.iter().copied().filter(|p| p.is_valid()).collect();
    loop {
        let next = reduce_once(&current, params);
        // Subsequence of equal length means nothing was removed.
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

fn reduce_once(path: &[GeoPoint], params: &SimplifyParams) -> Vec<GeoPoint> {
    if path.len() < 3 {
        return path.to_vec();
    }

    let greedy = greedy_reduce(path, params);
    let collapsed = (greedy.len() as f64) < path.len() as f64 * params.collapse_ratio;

    if path.len() > params.subsample_min_len && collapsed {
        log::debug!(
            "simplify: {} -> {} points collapsed the path, subsampling instead",
            path.len(),
            greedy.len()
        );
        return subsample(path, params);
    }
    greedy
}

fn greedy_reduce(path: &[GeoPoint], params: &SimplifyParams) -> Vec<GeoPoint> {
    let n = path.len();

    // cum[k] = polyline length from path[0] to path[k], metres.
    let mut cum = Vec::with_capacity(n);
    cum.push(0.0);
    for w in path.windows(2) {
        let last = cum[cum.len() - 1];
        cum.push(last + w[0].distance_m(w[1]));
    }

    let mut out = vec![path[0]];
    let mut anchor_idx = 0usize;

    for i in 1..n - 1 {
        let anchor = path[anchor_idx];
        let (prev, cur, next) = (path[i - 1], path[i], path[i + 1]);

        if cur.planar_deg(anchor) < params.duplicate_deg {
            continue;
        }

        let turn = bearing_delta_deg(prev.bearing_deg(cur), cur.bearing_deg(next)).abs();
        let keep = if turn > params.max_turn_deg {
            true
        } else {
            let chord = anchor.distance_m(next);
            let along = cum[i + 1] - cum[anchor_idx];
            chord <= 0.0 || along / chord > params.max_detour_ratio
        };

        if keep {
            out.push(cur);
            anchor_idx = i;
        }
    }

    push_last(&mut out, path[n - 1], params.duplicate_deg);
    out
}

fn subsample(path: &[GeoPoint], params: &SimplifyParams) -> Vec<GeoPoint> {
    let step = (path.len() / params.subsample_target.max(1)).max(1);
    let mut out: Vec<GeoPoint> = Vec::with_capacity(params.subsample_target + 2);

    for &p in path[..path.len() - 1].iter().step_by(step) {
        match out.last() {
            Some(&last) if p.planar_deg(last) < params.duplicate_deg => {}
            _ => out.push(p),
        }
    }
    push_last(&mut out, path[path.len() - 1], params.duplicate_deg);
    out
}

/// Append the final point, replacing the previous kept point (never the
/// first) if the two are near-duplicates.
fn push_last(out: &mut Vec<GeoPoint>, last: GeoPoint, duplicate_deg: f64) {
    if out.len() > 1 {
        if let Some(&prev) = out.last() {
            if prev.planar_deg(last) < duplicate_deg {
                out.pop();
            }
        }
    }
    out.push(last);
}

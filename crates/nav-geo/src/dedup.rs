//! Near-duplicate detection and selection of distinct alternative routes.
//!
//! Similarity compares `samples` evenly spaced points of two paths pairwise
//! (sample `i` of one against sample `i` of the other), so it is symmetric by
//! construction.  Paths that do not share start and end points score zero.

use nav_core::{GeoPoint, Route};

use crate::params::DedupParams;

/// Fraction of sampled points that coincide, `0.0 ..= 1.0`.
pub fn similarity(a: &[GeoPoint], b: &[GeoPoint], params: &DedupParams) -> f64 {
    if a.len() < 2 || b.len() < 2 || params.samples == 0 {
        return 0.0;
    }
    if a[0].planar_deg(b[0]) > params.endpoint_deg
        || a[a.len() - 1].planar_deg(b[b.len() - 1]) > params.endpoint_deg
    {
        return 0.0;
    }

    let matches = (0..params.samples)
        .filter(|&i| {
            let pa = a[a.len() * i / params.samples];
            let pb = b[b.len() * i / params.samples];
            pa.planar_deg(pb) < params.match_deg
        })
        .count();

    matches as f64 / params.samples as f64
}

/// `true` if `a` and `b` should be treated as the same alternative.
pub fn is_duplicate(a: &Route, b: &Route, params: &DedupParams) -> bool {
    let sim = similarity(a.path(), b.path(), params);
    let close = (a.distance_m() - b.distance_m()).abs() < params.near_distance_m;
    (close && sim > params.near_similarity) || sim > params.high_similarity
}

/// Retain at most `cap` mutually distinct routes, sorted ascending by distance.
///
/// 1. Greedy accept in distance order, skipping duplicates of anything kept.
/// 2. If fewer than `cap` survive but at least `cap` candidates were offered,
///    fill up with the least similar leftovers.
/// 3. Final uniqueness pass drops routes nearly identical in distance, ETA,
///    and shape to an earlier retained one.
pub fn select_distinct(mut candidates: Vec<Route>, cap: usize, params: &DedupParams) -> Vec<Route> {
    if cap == 0 {
        return Vec::new();
    }
    let raw = candidates.len();
    candidates.sort_by(|a, b| a.distance_m().total_cmp(&b.distance_m()));

    let mut kept: Vec<Route> = Vec::with_capacity(cap);
    let mut rest: Vec<Route> = Vec::new();
    for c in candidates {
        if kept.len() < cap && !kept.iter().any(|k| is_duplicate(k, &c, params)) {
            kept.push(c);
        } else {
            rest.push(c);
        }
    }

    if kept.len() < cap && raw >= cap {
        log::debug!("dedup: {} distinct of {raw}, relaxing to fill {cap}", kept.len());
        while kept.len() < cap && !rest.is_empty() {
            let idx = least_similar(&rest, &kept, params);
            kept.push(rest.remove(idx));
        }
    }

    let mut unique: Vec<Route> = Vec::with_capacity(kept.len());
    for r in kept {
        if !unique.iter().any(|u| is_near_identical(u, &r, params)) {
            unique.push(r);
        }
    }

    unique.sort_by(|a, b| a.distance_m().total_cmp(&b.distance_m()));
    unique
}

fn least_similar(rest: &[Route], kept: &[Route], params: &DedupParams) -> usize {
    let score = |r: &Route| {
        kept.iter()
            .map(|k| similarity(k.path(), r.path(), params))
            .fold(0.0_f64, f64::max)
    };
    let mut best = 0;
    let mut best_score = f64::INFINITY;
    for (i, r) in rest.iter().enumerate() {
        let s = score(r);
        if s < best_score {
            best = i;
            best_score = s;
        }
    }
    best
}

fn is_near_identical(a: &Route, b: &Route, params: &DedupParams) -> bool {
    (a.distance_m() - b.distance_m()).abs() < params.final_distance_m
        && (a.eta_min() - b.eta_min()).abs() < params.final_eta_min
        && similarity(a.path(), b.path(), params) > params.final_similarity
}

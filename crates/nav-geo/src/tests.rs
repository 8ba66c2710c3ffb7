//! Unit tests for nav-geo.

#[cfg(test)]
mod helpers {
    use nav_core::{GeoPoint, Route};

    pub fn p(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon)
    }

    /// `n` evenly spaced points heading north from the campus origin.
    pub fn straight(n: usize, step_deg: f64) -> Vec<GeoPoint> {
        (0..n).map(|i| p(10.9 + i as f64 * step_deg, 76.9)).collect()
    }

    pub fn route(path: Vec<GeoPoint>, distance_m: f64) -> Route {
        Route::new(path, distance_m, distance_m / 83.3).unwrap()
    }
}

#[cfg(test)]
mod segment {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::helpers::p;
    use crate::{closest_point_on_path, closest_point_on_segment, min_distance_point_to_segment};

    #[test]
    fn projects_onto_interior() {
        let proj = closest_point_on_segment(p(10.9005, 76.9001), p(10.9, 76.9), p(10.901, 76.9));
        assert!((proj.t - 0.5).abs() < 1e-9);
        assert!((proj.point.lat - 10.9005).abs() < 1e-12);
        assert_eq!(proj.point.lon, 76.9);
    }

    #[test]
    fn clamps_past_endpoints() {
        let a = p(10.9, 76.9);
        let b = p(10.901, 76.9);
        assert_eq!(closest_point_on_segment(p(10.95, 76.9), a, b).t, 1.0);
        assert_eq!(closest_point_on_segment(p(10.85, 76.9), a, b).t, 0.0);
    }

    #[test]
    fn degenerate_segment_returns_start() {
        let a = p(10.9, 76.9);
        let proj = closest_point_on_segment(p(10.91, 76.91), a, a);
        assert_eq!(proj.t, 0.0);
        assert_eq!(proj.point, a);
    }

    #[test]
    fn short_path_is_sentinel() {
        let q = p(10.9, 76.9);
        let proj = closest_point_on_path(q, &[q]);
        assert!(proj.is_none());
        assert_eq!(proj.point, q);
        assert!(closest_point_on_path(q, &[]).is_none());
    }

    #[test]
    fn perpendicular_distance_in_metres() {
        let a = p(10.9, 76.9);
        let b = p(10.901, 76.9);
        let q = a.lerp(b, 0.5).offset_m(0.0, 10.0);
        let d = min_distance_point_to_segment(q, a, b);
        assert!((d - 10.0).abs() < 0.1, "got {d}");
    }

    #[test]
    fn path_projection_bounds() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..200 {
            let len = rng.gen_range(2..12);
            let path: Vec<_> = (0..len)
                .map(|_| p(10.9 + rng.gen_range(0.0..0.01), 76.9 + rng.gen_range(0.0..0.01)))
                .collect();
            let q = p(10.9 + rng.gen_range(-0.01..0.02), 76.9 + rng.gen_range(-0.01..0.02));
            let proj = closest_point_on_path(q, &path);
            assert!(proj.distance_m >= 0.0);
            assert!(proj.segment_index <= len - 2);
            assert!((0.0..=1.0).contains(&proj.t));
        }
    }

    #[test]
    fn picks_nearest_segment() {
        let path = [p(10.9, 76.9), p(10.901, 76.9), p(10.901, 76.901)];
        let proj = closest_point_on_path(p(10.9009, 76.9006), &path);
        assert_eq!(proj.segment_index, 1);
    }
}

#[cfg(test)]
mod simplify {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::helpers::{p, straight};
    use crate::{SimplifyParams, simplify};

    #[test]
    fn straight_line_collapses_to_chord() {
        let path = straight(5, 0.0002);
        let out = simplify(&path, &SimplifyParams::default());
        assert_eq!(out, vec![path[0], path[4]]);
    }

    #[test]
    fn right_angle_is_kept() {
        let path = vec![p(10.9, 76.9), p(10.901, 76.9), p(10.901, 76.901)];
        let out = simplify(&path, &SimplifyParams::default());
        assert_eq!(out, path);
    }

    #[test]
    fn near_duplicates_are_removed() {
        let path = vec![p(10.9, 76.9), p(10.900001, 76.9), p(10.901, 76.9), p(10.901, 76.901)];
        let out = simplify(&path, &SimplifyParams::default());
        assert_eq!(out, vec![path[0], path[2], path[3]]);
    }

    #[test]
    fn invalid_points_are_dropped() {
        let path = vec![p(10.9, 76.9), p(f64::NAN, 76.9), p(10.901, 76.9)];
        let out = simplify(&path, &SimplifyParams::default());
        assert_eq!(out, vec![path[0], path[2]]);
    }

    #[test]
    fn long_straight_path_subsamples_instead_of_collapsing() {
        let path = straight(30, 0.0001);
        let out = simplify(&path, &SimplifyParams::default());
        assert_eq!(out.len(), 11);
        assert_eq!(out[0], path[0]);
        assert_eq!(out[10], path[29]);
    }

    #[test]
    fn winding_path_keeps_shape() {
        // Full circle in 10° steps: every turn is gentle but the chord is tiny.
        let path: Vec<_> = (0..=36)
            .map(|i| {
                let a = (i as f64 * 10.0).to_radians();
                p(10.9 + 0.001 * a.sin(), 76.9 + 0.001 * a.cos())
            })
            .collect();
        let out = simplify(&path, &SimplifyParams::default());
        assert!(out.len() > 3, "got {} points", out.len());
    }

    #[test]
    fn idempotent_on_random_walks() {
        let params = SimplifyParams::default();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let len = rng.gen_range(2..40);
            let mut cur = p(10.9, 76.9);
            let mut path = vec![cur];
            for _ in 1..len {
                cur = p(cur.lat + rng.gen_range(-0.0003..0.0003), cur.lon + rng.gen_range(-0.0003..0.0003));
                path.push(cur);
            }
            let once = simplify(&path, &params);
            let twice = simplify(&once, &params);
            assert_eq!(once, twice);
            assert_eq!(once[0], path[0]);
        }
    }
}

#[cfg(test)]
mod dedup {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::helpers::{p, route, straight};
    use crate::{DedupParams, is_duplicate, select_distinct, similarity};

    /// Same endpoints as `straight(10, ..)` but bowed far to the east.
    fn detour() -> Vec<nav_core::GeoPoint> {
        let mut path = straight(10, 0.000122);
        for q in &mut path[1..9] {
            q.lon += 0.002;
        }
        path
    }

    /// Matches `straight(10, ..)` on 6 of 8 samples.
    fn mostly_same() -> Vec<nav_core::GeoPoint> {
        let mut path = straight(10, 0.000122);
        path[7].lon += 0.0005;
        path[8].lon += 0.0005;
        path
    }

    #[test]
    fn similarity_is_symmetric() {
        let params = DedupParams::default();
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..200 {
            let mut a = straight(rng.gen_range(2..15), 0.0001);
            let mut b = straight(rng.gen_range(2..15), 0.0001);
            for q in a.iter_mut().chain(b.iter_mut()) {
                q.lon += rng.gen_range(-0.0003..0.0003);
            }
            let ab = similarity(&a, &b, &params);
            let ba = similarity(&b, &a, &params);
            assert_eq!(ab, ba);

            let ra = route(a, 100.0);
            let rb = route(b, 105.0);
            assert_eq!(is_duplicate(&ra, &rb, &params), is_duplicate(&rb, &ra, &params));
        }
    }

    #[test]
    fn different_endpoints_score_zero() {
        let a = straight(10, 0.0001);
        let b: Vec<_> = a.iter().map(|q| p(q.lat, q.lon + 0.001)).collect();
        assert_eq!(similarity(&a, &b, &DedupParams::default()), 0.0);
    }

    #[test]
    fn close_routes_with_high_overlap_keep_shorter() {
        let params = DedupParams::default();
        let a = route(straight(10, 0.000122), 120.0);
        let b = route(mostly_same(), 124.0);
        assert!(similarity(a.path(), b.path(), &params) >= 0.75);

        let kept = select_distinct(vec![b, a], 3, &params);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].distance_m(), 120.0);
    }

    #[test]
    fn distinct_routes_are_sorted() {
        let params = DedupParams::default();
        let kept = select_distinct(
            vec![route(detour(), 300.0), route(straight(10, 0.000122), 120.0)],
            3,
            &params,
        );
        let d: Vec<_> = kept.iter().map(|r| r.distance_m()).collect();
        assert_eq!(d, vec![120.0, 300.0]);
    }

    #[test]
    fn relaxed_fill_admits_least_similar() {
        let params = DedupParams::default();
        let kept = select_distinct(
            vec![
                route(straight(10, 0.000122), 120.0),
                route(mostly_same(), 140.0),
                route(detour(), 300.0),
            ],
            3,
            &params,
        );
        let d: Vec<_> = kept.iter().map(|r| r.distance_m()).collect();
        assert_eq!(d, vec![120.0, 140.0, 300.0]);
    }

    #[test]
    fn final_pass_drops_near_identical_refill() {
        let params = DedupParams::default();
        let kept = select_distinct(
            vec![
                route(straight(10, 0.000122), 120.0),
                route(straight(10, 0.000122), 124.0),
                route(detour(), 300.0),
            ],
            3,
            &params,
        );
        let d: Vec<_> = kept.iter().map(|r| r.distance_m()).collect();
        assert_eq!(d, vec![120.0, 300.0]);
    }

    #[test]
    fn cap_is_respected() {
        let params = DedupParams::default();
        let candidates: Vec<_> = (0..6)
            .map(|k| {
                let path: Vec<_> = straight(10, 0.0001)
                    .into_iter()
                    .map(|q| p(q.lat, q.lon + k as f64 * 0.01))
                    .collect();
                route(path, 100.0 + k as f64 * 50.0)
            })
            .collect();
        assert_eq!(select_distinct(candidates, 3, &params).len(), 3);
    }
}

#[cfg(test)]
mod nodes {
    use super::helpers::{p, straight};
    use crate::{NodeKind, NodeParams, direction_change_indices, intersections, waypoints};

    #[test]
    fn right_angle_emits_node() {
        let path = [p(10.9, 76.9), p(10.901, 76.9), p(10.901, 76.901)];
        assert_eq!(direction_change_indices(&path, &NodeParams::default()), vec![1]);
    }

    #[rstest::rstest]
    #[case::gentle(12.0, false)]
    #[case::bend(30.0, true)]
    #[case::right(90.0, true)]
    #[case::hairpin(150.0, true)]
    fn turn_threshold(#[case] turn_deg: f64, #[case] emits: bool) {
        let a = p(10.9, 76.9);
        let b = p(10.901, 76.9);
        let t = turn_deg.to_radians();
        let c = b.offset_m(100.0 * t.cos(), 100.0 * t.sin());
        let nodes = direction_change_indices(&[a, b, c], &NodeParams::default());
        assert_eq!(!nodes.is_empty(), emits);
    }

    #[test]
    fn cadence_emits_on_long_straights() {
        let path = straight(25, 0.0001);
        assert_eq!(direction_change_indices(&path, &NodeParams::default()), vec![11, 22]);
    }

    #[test]
    fn crossing_paths_intersect_once() {
        let a = [p(10.9, 76.899), p(10.9, 76.901)];
        let b = [p(10.899, 76.9), p(10.901, 76.9)];
        let hits = intersections(&a, &b, &NodeParams::default());
        assert_eq!(hits.len(), 1);
        assert!(hits[0].planar_deg(p(10.9, 76.9)) < 1e-9);
    }

    #[test]
    fn shared_endpoints_are_not_intersections() {
        let a = straight(3, 0.001);
        let b = vec![a[0], p(10.901, 76.902), a[2]];
        assert!(intersections(&a, &b, &NodeParams::default()).is_empty());
    }

    #[test]
    fn waypoints_are_ordered_along_primary() {
        let primary = [p(10.9, 76.899), p(10.9, 76.901), p(10.902, 76.901)];
        let alt = [p(10.899, 76.9), p(10.901, 76.9)];
        let nodes = waypoints(&primary, &[&alt], &NodeParams::default());

        let labels: Vec<_> = nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["S", "I1", "N1", "E"]);
        assert_eq!(nodes[0].kind, NodeKind::Start);
        assert_eq!(nodes[1].kind, NodeKind::Intersection);
        assert_eq!(nodes[3].kind, NodeKind::End);
    }

    #[test]
    fn short_primary_has_no_waypoints() {
        assert!(waypoints(&[p(10.9, 76.9)], &[], &NodeParams::default()).is_empty());
    }
}

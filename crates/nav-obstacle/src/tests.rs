//! Unit tests for nav-obstacle.

#[cfg(test)]
mod helpers {
    use nav_core::{GeoPoint, ObstacleId};

    use crate::Obstacle;

    pub const ORIGIN: GeoPoint = GeoPoint::new(10.9, 76.9);

    pub fn obstacle(id: u32, position: GeoPoint, radius_m: f64) -> Obstacle {
        Obstacle::new(ObstacleId(id), position, radius_m).unwrap()
    }
}

#[cfg(test)]
mod obstacle {
    use nav_core::{GeoPoint, NavError, ObstacleId};
    use rstest::rstest;

    use super::helpers::{ORIGIN, obstacle};
    use crate::{Obstacle, is_near_obstacle};

    #[test]
    fn rejects_negative_radius() {
        assert_eq!(
            Obstacle::new(ObstacleId(0), ORIGIN, -1.0).unwrap_err(),
            NavError::InvalidRadius(-1.0)
        );
        assert!(Obstacle::new(ObstacleId(0), GeoPoint::new(f64::NAN, 0.0), 1.0).is_err());
    }

    #[test]
    fn confirmed_is_permanent() {
        let o = obstacle(0, ORIGIN, 5.0).confirmed();
        assert!(o.is_detected());
        assert!(o.is_permanent());
    }

    #[rstest]
    #[case(0.0, 3.0)]
    #[case(5.0, 3.0)]
    #[case(5.0, 0.0)]
    #[case(12.5, 25.0)]
    fn proximity_boundary(#[case] radius: f64, #[case] margin: f64) {
        let obs = [obstacle(0, ORIGIN, radius)];
        assert!(is_near_obstacle(ORIGIN, &obs, margin));

        let reach = radius + margin;
        assert!(is_near_obstacle(ORIGIN.offset_m(reach - 0.01, 0.0), &obs, margin));
        assert!(!is_near_obstacle(ORIGIN.offset_m(reach + 0.01, 0.0), &obs, margin));
    }
}

#[cfg(test)]
mod proximity {
    use super::helpers::{ORIGIN, obstacle};
    use crate::{
        departure_intersects_obstacle, look_ahead_blocked, path_is_clear, route_obstacle_intersections,
        segment_intersects_obstacle,
    };

    #[test]
    fn departing_from_the_centre_is_clear() {
        let o = obstacle(0, ORIGIN, 5.0);
        let b = ORIGIN.offset_m(0.0, 60.0);
        assert!(segment_intersects_obstacle(ORIGIN, b, &o, 0.0));
        assert!(!departure_intersects_obstacle(ORIGIN, b, &o, 0.0));
    }

    #[test]
    fn departing_through_the_centre_hits() {
        let o = obstacle(0, ORIGIN, 5.0);
        // Starts 3 m south, heads north across the centre.
        let a = ORIGIN.offset_m(-3.0, 0.0);
        let b = ORIGIN.offset_m(60.0, 0.0);
        assert!(departure_intersects_obstacle(a, b, &o, 0.0));
    }

    #[test]
    fn departure_ending_inside_hits() {
        let o = obstacle(0, ORIGIN, 5.0);
        assert!(departure_intersects_obstacle(ORIGIN, ORIGIN.offset_m(0.0, 2.0), &o, 0.0));
    }

    #[test]
    fn departure_from_outside_is_a_plain_segment_test() {
        let o = obstacle(0, ORIGIN, 5.0);
        let a = ORIGIN.offset_m(-50.0, 0.0);
        let b = ORIGIN.offset_m(50.0, 0.0);
        assert!(departure_intersects_obstacle(a, b, &o, 0.0));
        let b = ORIGIN.offset_m(-50.0, 60.0);
        assert!(!departure_intersects_obstacle(a, b, &o, 0.0));
    }

    #[test]
    fn long_segment_through_centre_hits() {
        let o = obstacle(0, ORIGIN, 5.0);
        let a = ORIGIN.offset_m(-50.0, 0.0);
        let b = ORIGIN.offset_m(50.0, 0.0);
        assert!(segment_intersects_obstacle(a, b, &o, 5.0));
    }

    #[test]
    fn far_segment_is_clear() {
        let o = obstacle(0, ORIGIN, 5.0);
        let a = ORIGIN.offset_m(-50.0, 50.0);
        let b = ORIGIN.offset_m(50.0, 50.0);
        assert!(!segment_intersects_obstacle(a, b, &o, 5.0));
    }

    #[test]
    fn short_segment_uses_fine_scan() {
        let o = obstacle(0, ORIGIN, 5.0);

        // Passes 3 m from the centre: a scan point lands inside the radius.
        let a = ORIGIN.offset_m(-10.0, 3.0);
        let b = ORIGIN.offset_m(10.0, 3.0);
        assert!(segment_intersects_obstacle(a, b, &o, 5.0));

        // Passes 7 m away: within the margin but never inside the radius.
        let a = ORIGIN.offset_m(-10.0, 7.0);
        let b = ORIGIN.offset_m(10.0, 7.0);
        assert!(!segment_intersects_obstacle(a, b, &o, 5.0));
    }

    #[test]
    fn long_segment_relies_on_distance_check() {
        let o = obstacle(0, ORIGIN, 5.0);
        let a = ORIGIN.offset_m(-50.0, 7.0);
        let b = ORIGIN.offset_m(50.0, 7.0);
        assert!(segment_intersects_obstacle(a, b, &o, 5.0));
    }

    #[test]
    fn zero_radius_endpoint_hit() {
        let o = obstacle(0, ORIGIN, 0.0);
        assert!(segment_intersects_obstacle(ORIGIN, ORIGIN.offset_m(100.0, 0.0), &o, 0.0));
    }

    #[test]
    fn counts_blocked_segments() {
        let obs = [obstacle(0, ORIGIN.offset_m(100.0, 0.0), 5.0)];
        let path = [
            ORIGIN,
            ORIGIN.offset_m(60.0, 0.0),
            ORIGIN.offset_m(140.0, 0.0),
            ORIGIN.offset_m(140.0, 80.0),
        ];
        assert_eq!(route_obstacle_intersections(&path, &obs, 5.0), 1);
        assert!(!path_is_clear(&path, &obs, 5.0));
        assert!(path_is_clear(&path, &[], 5.0));
    }

    #[test]
    fn look_ahead_window() {
        let path: Vec<_> = (0..6).map(|i| ORIGIN.offset_m(i as f64 * 50.0, 0.0)).collect();
        // 20 m beside segment 2 → 3.
        let obs = [obstacle(0, ORIGIN.offset_m(125.0, 20.0), 5.0)];

        assert!(look_ahead_blocked(path[0], &path, 0, 3, &obs, 25.0));
        assert!(!look_ahead_blocked(path[0], &path, 0, 2, &obs, 25.0));
        assert!(!look_ahead_blocked(path[0], &path, 0, 3, &obs, 10.0));
        // Past the obstacle.
        assert!(!look_ahead_blocked(path[4], &path, 4, 3, &obs, 25.0));
        assert!(!look_ahead_blocked(path[5], &path, 5, 3, &obs, 25.0));
    }
}

#[cfg(test)]
mod set {
    use nav_core::{GeoPoint, ObstacleId};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::helpers::{ORIGIN, obstacle};
    use crate::{ObstacleSet, is_near_obstacle};

    #[test]
    fn index_agrees_with_linear_scan() {
        let mut rng = SmallRng::seed_from_u64(17);
        for _ in 0..50 {
            let obs: Vec<_> = (0..rng.gen_range(0..12))
                .map(|i| {
                    let pos = ORIGIN.offset_m(rng.gen_range(-200.0..200.0), rng.gen_range(-200.0..200.0));
                    obstacle(i, pos, rng.gen_range(0.0..15.0))
                })
                .collect();
            let set = ObstacleSet::from_obstacles(obs.clone());
            for _ in 0..40 {
                let q = ORIGIN.offset_m(rng.gen_range(-220.0..220.0), rng.gen_range(-220.0..220.0));
                let margin = rng.gen_range(0.0..25.0);
                assert_eq!(set.is_near(q, margin), is_near_obstacle(q, &obs, margin));
            }
        }
    }

    #[test]
    fn added_obstacles_get_fresh_ids() {
        let set = ObstacleSet::new()
            .with_added(obstacle(99, ORIGIN, 5.0))
            .with_added(obstacle(99, ORIGIN.offset_m(100.0, 0.0), 5.0));
        let ids: Vec<_> = set.iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec![ObstacleId(0), ObstacleId(1)]);
    }

    #[test]
    fn removal_does_not_reuse_ids() {
        let set = ObstacleSet::new()
            .with_added(obstacle(0, ORIGIN, 5.0))
            .with_added(obstacle(0, ORIGIN.offset_m(100.0, 0.0), 5.0));
        let set = set.without(ObstacleId(1));
        assert_eq!(set.len(), 1);
        assert_eq!(set.next_id(), ObstacleId(2));
        assert_eq!(set.without(ObstacleId(42)).len(), 1);
    }

    #[test]
    fn old_snapshot_is_untouched() {
        let before = ObstacleSet::new().with_added(obstacle(0, ORIGIN, 5.0));
        let after = before.with_added(obstacle(0, ORIGIN.offset_m(100.0, 0.0), 5.0));
        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn confirmed_detection_supersedes_transient() {
        let set = ObstacleSet::new().with_added(obstacle(0, ORIGIN, 3.0));
        let merged = set.merge_candidate(obstacle(0, ORIGIN.offset_m(6.0, 0.0), 8.0).confirmed(), 10.0);

        assert_eq!(merged.len(), 1);
        let o = merged.get(ObstacleId(0)).unwrap();
        assert!(o.is_detected());
        assert_eq!(o.radius_m(), 8.0);
    }

    #[test]
    fn permanent_marker_is_kept() {
        let set = ObstacleSet::new().with_added(obstacle(0, ORIGIN, 3.0).confirmed());
        let merged = set.merge_candidate(obstacle(0, ORIGIN.offset_m(4.0, 0.0), 9.0), 10.0);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.as_slice()[0].radius_m(), 3.0);
    }

    #[test]
    fn distant_candidate_is_added() {
        let set = ObstacleSet::new().with_added(obstacle(0, ORIGIN, 3.0));
        let merged = set.merge_detections(
            [
                obstacle(0, ORIGIN.offset_m(50.0, 0.0), 5.0).confirmed(),
                obstacle(0, ORIGIN.offset_m(52.0, 0.0), 5.0).confirmed(),
            ],
            10.0,
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn nearest_centre() {
        let set = ObstacleSet::new()
            .with_added(obstacle(0, ORIGIN, 3.0))
            .with_added(obstacle(0, ORIGIN.offset_m(100.0, 0.0), 3.0));
        let q = ORIGIN.offset_m(80.0, 0.0);
        assert_eq!(set.nearest(q).map(|o| o.id()), Some(ObstacleId(1)));
        assert!(ObstacleSet::new().nearest(q).is_none());
        assert!(!set.is_near(GeoPoint::new(f64::NAN, 0.0), 3.0));
    }
}

#[cfg(test)]
mod detection {
    use nav_core::NavError;

    use crate::{actionable_obstacles, parse_report};

    const REPORT: &str = r#"{
        "objects": [
            {"position": [10.9005, 76.9], "confidence": 0.9, "class": "bench", "is_obstacle": true},
            {"position": [10.9006, 76.9], "confidence": 0.4, "class": "person", "is_obstacle": true},
            {"position": [10.9007, 76.9], "confidence": 0.9, "class": "bird", "is_obstacle": false},
            {"position": null, "confidence": 0.95, "class": "cone", "is_obstacle": true},
            {"position": [10.9008, 76.9], "radius": 2.5, "confidence": 0.7, "class": "cart", "is_obstacle": true},
            {"position": [95.0, 76.9], "confidence": 0.9, "class": "glitch", "is_obstacle": true}
        ]
    }"#;

    #[test]
    fn filters_and_converts() {
        let obstacles = actionable_obstacles(parse_report(REPORT).unwrap());
        assert_eq!(obstacles.len(), 2);

        assert_eq!(obstacles[0].radius_m(), 5.0);
        assert!(obstacles[0].is_detected() && obstacles[0].is_permanent());
        assert_eq!(obstacles[1].radius_m(), 2.5);
    }

    #[test]
    fn missing_flag_means_not_an_obstacle() {
        let c = parse_report(r#"{"objects":[{"position":[10.9,76.9],"confidence":0.9}]}"#).unwrap();
        assert!(actionable_obstacles(c).is_empty());
    }

    #[test]
    fn malformed_payload_is_rejected() {
        assert!(matches!(parse_report("{\"objects\": 3}"), Err(NavError::Parse(_))));
        assert!(parse_report("{}").unwrap().is_empty());
    }
}

#[cfg(test)]
mod avoid {
    use super::helpers::{ORIGIN, obstacle};
    use crate::avoid::POLYGON_VERTICES;
    use crate::avoidance_polygons;

    #[test]
    fn closed_octagon_scaled() {
        let polys = avoidance_polygons(&[obstacle(0, ORIGIN, 5.0)], 2.0);
        assert_eq!(polys.len(), 1);

        let ring = &polys[0].ring;
        assert_eq!(ring.len(), POLYGON_VERTICES + 1);
        assert_eq!(ring[0], ring[POLYGON_VERTICES]);

        // Vertex 2 sits due north at 10 m (within the degree approximation).
        let d = ORIGIN.distance_m(ring[2]);
        assert!((d - 10.0).abs() < 0.1, "got {d}");
        assert_eq!(polys[0].lon_lat_ring()[0], [ring[0].lon, ring[0].lat]);
    }
}

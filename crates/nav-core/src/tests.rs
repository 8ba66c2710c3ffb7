//! Unit tests for nav-core primitives.

#[cfg(test)]
mod ids {
    use crate::{Epoch, ObstacleId};

    #[test]
    fn ordering_and_next() {
        assert!(ObstacleId(0) < ObstacleId(1));
        assert_eq!(ObstacleId(4).next(), ObstacleId(5));
        assert_eq!(Epoch(9).next(), Epoch(10));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(ObstacleId::INVALID.0, u32::MAX);
        assert_eq!(Epoch::INVALID.0, u64::MAX);
        assert_eq!(ObstacleId::INVALID.next(), ObstacleId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(ObstacleId(7).to_string(), "ObstacleId(7)");
    }
}

#[cfg(test)]
mod geo {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;

    use crate::geo::{deg_to_m, m_to_deg};
    use crate::{GeoPoint, path_length_m};

    fn random_campus_point(rng: &mut SmallRng) -> GeoPoint {
        GeoPoint::new(10.9 + rng.gen_range(-0.01..0.01), 76.9 + rng.gen_range(-0.01..0.01))
    }

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(10.9, 76.9);
        assert_eq!(p.distance_m(p), 0.0);
    }

    #[test]
    fn one_degree_latitude() {
        let a = GeoPoint::new(10.0, 76.9);
        let b = GeoPoint::new(11.0, 76.9);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            let a = random_campus_point(&mut rng);
            let b = random_campus_point(&mut rng);
            assert_eq!(a.distance_m(b), b.distance_m(a));
            assert_eq!(a.planar_deg(b), b.planar_deg(a));
            assert_eq!(a.distance_m(a), 0.0);
        }
    }

    #[rstest]
    #[case(GeoPoint::new(10.901, 76.9), 0.0)]
    #[case(GeoPoint::new(10.9, 76.901), 90.0)]
    #[case(GeoPoint::new(10.899, 76.9), 180.0)]
    #[case(GeoPoint::new(10.9, 76.899), 270.0)]
    fn cardinal_bearings(#[case] to: GeoPoint, #[case] expected: f64) {
        let from = GeoPoint::new(10.9, 76.9);
        let b = from.bearing_deg(to);
        assert!((b - expected).abs() < 0.1, "expected {expected}, got {b}");
    }

    #[test]
    fn bearing_range() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..500 {
            let b = random_campus_point(&mut rng).bearing_deg(random_campus_point(&mut rng));
            assert!((0.0..360.0).contains(&b), "bearing {b}");
        }
    }

    #[test]
    fn offset_matches_haversine() {
        let p = GeoPoint::new(10.9, 76.9);
        let q = p.offset_m(30.0, 40.0);
        assert!((p.distance_m(q) - 50.0).abs() < 0.5);
    }

    #[test]
    fn lerp_endpoints() {
        let a = GeoPoint::new(10.9, 76.9);
        let b = GeoPoint::new(10.91, 76.91);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert!((mid.lat - 10.905).abs() < 1e-12);
    }

    #[test]
    fn degree_conversion_is_pinned() {
        assert!((deg_to_m(1e-4) - 11.1).abs() < 1e-9);
        assert!((m_to_deg(111.0) - 1e-3).abs() < 1e-15);
    }

    #[test]
    fn path_length_sums_segments() {
        let a = GeoPoint::new(10.9, 76.9);
        let b = GeoPoint::new(10.9005, 76.9);
        let c = GeoPoint::new(10.901, 76.9);
        let total = path_length_m(&[a, b, c]);
        assert!((total - a.distance_m(c)).abs() < 1e-6);
        assert_eq!(path_length_m(&[a]), 0.0);
    }

    #[rstest]
    #[case(0.0, 90.0, 90.0)]
    #[case(350.0, 10.0, 20.0)]
    #[case(10.0, 350.0, -20.0)]
    #[case(0.0, 180.0, 180.0)]
    #[case(180.0, 0.0, 180.0)]
    fn bearing_delta_is_normalized(#[case] from: f64, #[case] to: f64, #[case] expected: f64) {
        assert!((crate::bearing_delta_deg(from, to) - expected).abs() < 1e-9);
    }

    #[test]
    fn validity() {
        assert!(GeoPoint::new(10.9, 76.9).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 76.9).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, f64::INFINITY).is_valid());
    }
}

#[cfg(test)]
mod route {
    use crate::{GeoPoint, NavError, Route};

    fn line() -> Vec<GeoPoint> {
        vec![GeoPoint::new(10.9, 76.9), GeoPoint::new(10.901, 76.9)]
    }

    #[test]
    fn rejects_short_path() {
        let err = Route::new(vec![GeoPoint::new(10.9, 76.9)], 1.0, 1.0).unwrap_err();
        assert_eq!(err, NavError::PathTooShort(1));
    }

    #[test]
    fn rejects_bad_coordinate() {
        let path = vec![GeoPoint::new(10.9, 76.9), GeoPoint::new(f64::NAN, 76.9)];
        assert!(matches!(
            Route::new(path, 1.0, 1.0),
            Err(NavError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn rejects_negative_distance() {
        assert!(matches!(
            Route::new(line(), -1.0, 1.0),
            Err(NavError::InvalidQuantity { what: "distance_m", .. })
        ));
        assert!(Route::new(line(), 1.0, f64::NAN).is_err());
    }

    #[test]
    fn from_path_derives_eta() {
        let r = Route::from_path(line(), 83.3).unwrap();
        assert!((r.distance_m() - 111.2).abs() < 0.5);
        assert!((r.eta_min() - r.distance_m() / 83.3).abs() < 1e-9);
        assert_eq!(r.segment_count(), 1);
        assert!(!r.is_direct_fallback());
        assert!(r.into_direct_fallback().is_direct_fallback());
    }
}

#[cfg(test)]
mod time {
    use std::time::Duration;

    use crate::{Tick, TickClock};

    #[test]
    fn tick_order_and_display() {
        assert!(Tick::ZERO < Tick(1));
        assert_eq!(Tick(12).to_string(), "T12");
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = TickClock::new(Duration::from_millis(100));
        assert_eq!(clock.elapsed(), Duration::ZERO);
        clock.advance();
        clock.advance();
        assert_eq!(clock.elapsed(), Duration::from_millis(200));
        clock.reset();
        assert_eq!(clock.current_tick, Tick::ZERO);
    }
}

#[cfg(test)]
mod config {
    use crate::NavConfig;

    #[test]
    fn defaults_are_valid() {
        let cfg = NavConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.max_reroute_attempts, 3);
        assert_eq!(cfg.tick_period().as_millis(), 100);
    }

    #[test]
    fn rejects_zero_speed() {
        let cfg = NavConfig { speed_pct_per_tick: 0.0, ..NavConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_nan_margin() {
        let cfg = NavConfig { live_margin_m: f64::NAN, ..NavConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

//! Avoidance geometry handed to the routing provider.

use std::f64::consts::TAU;

use nav_core::{GeoPoint, geo::m_to_deg};

use crate::obstacle::Obstacle;

/// Vertices per polygon (the ring repeats the first one to close).
pub const POLYGON_VERTICES: usize = 8;

/// Closed octagon around one obstacle.
#[derive(Clone, Debug, PartialEq)]
pub struct AvoidancePolygon {
    /// `POLYGON_VERTICES + 1` points; first equals last.
    pub ring: Vec<GeoPoint>,
}

impl AvoidancePolygon {
    /// Octagon of radius `radius_m * scale` centred on `obstacle`.
    pub fn around(obstacle: &Obstacle, scale: f64) -> Self {
        let r = m_to_deg(obstacle.radius_m() * scale);
        let c = obstacle.position();
        let mut ring: Vec<GeoPoint> = (0..POLYGON_VERTICES)
            .map(|k| {
                let angle = TAU * k as f64 / POLYGON_VERTICES as f64;
                GeoPoint::new(c.lat + r * angle.sin(), c.lon + r * angle.cos())
            })
            .collect();
        ring.push(ring[0]);
        Self { ring }
    }

    /// Ring as `[lon, lat]` pairs, the order GeoJSON expects.
    pub fn lon_lat_ring(&self) -> Vec<[f64; 2]> {
        self.ring.iter().map(|p| [p.lon, p.lat]).collect()
    }
}

/// One polygon per obstacle, each scaled by `scale`.
pub fn avoidance_polygons(obstacles: &[Obstacle], scale: f64) -> Vec<AvoidancePolygon> {
    obstacles.iter().map(|o| AvoidancePolygon::around(o, scale)).collect()
}

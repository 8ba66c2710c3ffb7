//! The `Route` value type.
//!
//! A `Route` is immutable once built.  Rerouting produces a new `Route`; the
//! old one is dropped, never edited.  Sessions share routes via `Arc<Route>`.

use crate::geo::{GeoPoint, path_length_m};
use crate::{NavError, NavResult};

/// A walkable path annotated with length, ETA, and provenance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    path:                   Vec<GeoPoint>,
    distance_m:             f64,
    eta_min:                f64,
    obstacle_intersections: u32,
    is_direct_fallback:     bool,
}

impl Route {
    /// Build a route, rejecting invalid coordinates, paths shorter than two
    /// points, and non-finite or negative distance/ETA.
    pub fn new(path: Vec<GeoPoint>, distance_m: f64, eta_min: f64) -> NavResult<Self> {
        if let Some(bad) = path.iter().find(|p| !p.is_valid()) {
            return Err(NavError::InvalidCoordinate { lat: bad.lat, lon: bad.lon });
        }
        if path.len() < 2 {
            return Err(NavError::PathTooShort(path.len()));
        }
        if !distance_m.is_finite() || distance_m < 0.0 {
            return Err(NavError::InvalidQuantity { what: "distance_m", value: distance_m });
        }
        if !eta_min.is_finite() || eta_min < 0.0 {
            return Err(NavError::InvalidQuantity { what: "eta_min", value: eta_min });
        }
        Ok(Self {
            path,
            distance_m,
            eta_min,
            obstacle_intersections: 0,
            is_direct_fallback: false,
        })
    }

    /// Build a route whose distance is the haversine length of `path` and whose
    /// ETA follows from `walking_speed_m_per_min`.
    pub fn from_path(path: Vec<GeoPoint>, walking_speed_m_per_min: f64) -> NavResult<Self> {
        if !(walking_speed_m_per_min.is_finite() && walking_speed_m_per_min > 0.0) {
            return Err(NavError::InvalidQuantity {
                what: "walking_speed_m_per_min",
                value: walking_speed_m_per_min,
            });
        }
        let distance = path_length_m(&path);
        Self::new(path, distance, distance / walking_speed_m_per_min)
    }

    pub fn with_obstacle_intersections(mut self, count: u32) -> Self {
        self.obstacle_intersections = count;
        self
    }

    /// Mark the route as a synthesized straight-line fallback.
    pub fn into_direct_fallback(mut self) -> Self {
        self.is_direct_fallback = true;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn path(&self) -> &[GeoPoint] {
        &self.path
    }

    #[inline]
    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }

    #[inline]
    pub fn eta_min(&self) -> f64 {
        self.eta_min
    }

    #[inline]
    pub fn obstacle_intersections(&self) -> u32 {
        self.obstacle_intersections
    }

    #[inline]
    pub fn is_direct_fallback(&self) -> bool {
        self.is_direct_fallback
    }

    #[inline]
    pub fn start(&self) -> GeoPoint {
        self.path[0]
    }

    #[inline]
    pub fn end(&self) -> GeoPoint {
        self.path[self.path.len() - 1]
    }

    /// Number of segments; always `>= 1`.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.path.len() - 1
    }
}

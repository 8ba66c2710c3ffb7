//! The `Obstacle` value type.

use nav_core::{GeoPoint, NavError, NavResult, ObstacleId};

/// Smallest radius treated as "inside" for endpoint tests, metres.
///
/// A zero-radius obstacle would otherwise be impossible to hit exactly.
pub const MIN_CONTACT_RADIUS_M: f64 = 1.0;

/// A circular exclusion zone.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Obstacle {
    id:        ObstacleId,
    position:  GeoPoint,
    radius_m:  f64,
    detected:  bool,
    permanent: bool,
}

impl Obstacle {
    /// Build a user-placed obstacle.  Rejects invalid coordinates and
    /// negative or non-finite radii.
    pub fn new(id: ObstacleId, position: GeoPoint, radius_m: f64) -> NavResult<Self> {
        if !position.is_valid() {
            return Err(NavError::InvalidCoordinate { lat: position.lat, lon: position.lon });
        }
        if !radius_m.is_finite() || radius_m < 0.0 {
            return Err(NavError::InvalidRadius(radius_m));
        }
        Ok(Self { id, position, radius_m, detected: false, permanent: false })
    }

    /// Mark as confirmed by the detection service.  Confirmed obstacles are
    /// also permanent.
    pub fn confirmed(mut self) -> Self {
        self.detected = true;
        self.permanent = true;
        self
    }

    pub fn permanent(mut self) -> Self {
        self.permanent = true;
        self
    }

    pub(crate) fn with_id(mut self, id: ObstacleId) -> Self {
        self.id = id;
        self
    }

    #[inline]
    pub fn id(&self) -> ObstacleId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> GeoPoint {
        self.position
    }

    #[inline]
    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    #[inline]
    pub fn is_detected(&self) -> bool {
        self.detected
    }

    #[inline]
    pub fn is_permanent(&self) -> bool {
        self.permanent
    }

    /// Radius used for "point is inside" tests.
    #[inline]
    pub fn contact_radius_m(&self) -> f64 {
        self.radius_m.max(MIN_CONTACT_RADIUS_M)
    }

    /// Distance within which a point counts as near, for a given margin.
    #[inline]
    pub fn reach_m(&self, margin_m: f64) -> f64 {
        self.radius_m + margin_m
    }

    /// `true` if `point` lies within `radius + margin`.  Inclusive boundary.
    #[inline]
    pub fn is_within_reach(&self, point: GeoPoint, margin_m: f64) -> bool {
        point.distance_m(self.position) <= self.reach_m(margin_m)
    }
}

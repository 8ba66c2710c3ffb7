//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Two distance measures exist and
//! they must not be mixed without an explicit conversion:
//!
//! - [`GeoPoint::distance_m`] — haversine great-circle distance in metres.
//!   Used for every real-world comparison (margins, radii, route lengths).
//! - [`GeoPoint::planar_deg`] — Euclidean distance in raw degree space.  Only
//!   for fast *relative* comparisons such as route similarity sampling.
//!
//! Converting between the two uses the pinned [`METERS_PER_DEGREE`] constant
//! (1×10⁻⁴° ≈ 11 m at campus latitude) so results are reproducible.

/// Mean Earth radius, metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Fixed degrees → metres factor for planar approximations.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Convert a planar degree-space length to approximate metres.
#[inline]
pub fn deg_to_m(deg: f64) -> f64 {
    deg * METERS_PER_DEGREE
}

/// Convert metres to an approximate planar degree-space length.
#[inline]
pub fn m_to_deg(m: f64) -> f64 {
    m / METERS_PER_DEGREE
}

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` if both components are finite and inside WGS-84 bounds.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        // Clamp guards against a > 1 from rounding on antipodal inputs.
        let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Euclidean distance in degree space.  Relative comparisons only.
    #[inline]
    pub fn planar_deg(self, other: GeoPoint) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        (dlat * dlat + dlon * dlon).sqrt()
    }

    /// Initial great-circle bearing from `self` to `other`, degrees in `[0, 360)`.
    ///
    /// Identical points yield `0.0`.
    pub fn bearing_deg(self, other: GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

        let deg = y.atan2(x).to_degrees().rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs.
        if deg >= 360.0 { 0.0 } else { deg }
    }

    /// Linear interpolation in degree space; `t = 0` is `self`, `t = 1` is `other`.
    #[inline]
    pub fn lerp(self, other: GeoPoint, t: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }

    /// Shift by `north_m` / `east_m` metres using a local flat-earth
    /// approximation.  Accurate to well under a metre over campus distances.
    pub fn offset_m(self, north_m: f64, east_m: f64) -> GeoPoint {
        let d_lat = (north_m / EARTH_RADIUS_M).to_degrees();
        let d_lon = (east_m / (EARTH_RADIUS_M * self.lat.to_radians().cos())).to_degrees();
        GeoPoint::new(self.lat + d_lat, self.lon + d_lon)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Total haversine length of a polyline in metres.  Zero for fewer than two points.
pub fn path_length_m(path: &[GeoPoint]) -> f64 {
    path.windows(2).map(|w| w[0].distance_m(w[1])).sum()
}

/// Signed change from bearing `from` to bearing `to`, degrees in `(-180, 180]`.
///
/// Positive values turn clockwise (right), negative counter-clockwise (left).
pub fn bearing_delta_deg(from: f64, to: f64) -> f64 {
    let d = (to - from).rem_euclid(360.0);
    if d > 180.0 { d - 360.0 } else { d }
}

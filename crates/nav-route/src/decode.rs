//! GraphHopper response decoding.
//!
//! Expected shape (points unencoded):
//!
//! ```json
//! {"paths": [{"distance": 212.4, "time": 152900,
//!             "points": {"coordinates": [[76.9, 10.9], [76.9, 10.9019]]}}]}
//! ```
//!
//! Coordinates are `[lon, lat]`; `distance` is metres, `time` milliseconds.

use serde::Deserialize;

use nav_core::GeoPoint;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::RawRoute;

#[derive(Deserialize)]
struct GhResponse {
    #[serde(default)]
    paths: Vec<GhPath>,
}

#[derive(Deserialize)]
struct GhPath {
    #[serde(default)]
    distance: f64,
    /// Milliseconds.
    #[serde(default)]
    time:     f64,
    points:   GhPoints,
}

#[derive(Deserialize)]
struct GhPoints {
    coordinates: Vec<[f64; 2]>,
}

/// Decode a GraphHopper route response.  An empty `paths` array is not an
/// error here; the caller decides what zero routes mean.
pub fn decode_graphhopper(json: &str) -> ProviderResult<Vec<RawRoute>> {
    let resp: GhResponse =
        serde_json::from_str(json).map_err(|e| ProviderError::Decode(e.to_string()))?;

    Ok(resp
        .paths
        .into_iter()
        .map(|p| RawRoute {
            coordinates: p.points.coordinates.iter().map(|&[lon, lat]| GeoPoint::new(lat, lon)).collect(),
            distance_m:  p.distance,
            duration_s:  p.time / 1000.0,
        })
        .collect())
}

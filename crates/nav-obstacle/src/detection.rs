//! Detection-service payload intake.
//!
//! The service reports camera-observed objects as JSON:
//!
//! ```json
//! {"objects": [{"position": [10.9005, 76.9], "radius": 4.0,
//!               "confidence": 0.82, "class": "person", "is_obstacle": true}]}
//! ```
//!
//! Only objects that carry a position, are flagged `is_obstacle`, and have
//! confidence above [`MIN_CONFIDENCE`] become obstacles.  Malformed payloads
//! are rejected as a whole before anything enters the engine.

use serde::Deserialize;

use nav_core::{GeoPoint, NavError, NavResult, ObstacleId};

use crate::obstacle::Obstacle;

/// Detections at or below this confidence are ignored.
pub const MIN_CONFIDENCE: f64 = 0.5;

/// Radius assigned when a detection carries none, metres.
pub const DEFAULT_DETECTION_RADIUS_M: f64 = 5.0;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DetectionCandidate {
    /// `[lat, lon]`; `null` when the camera could not geolocate the object.
    #[serde(default)]
    pub position:    Option<[f64; 2]>,
    #[serde(default)]
    pub radius:      Option<f64>,
    pub confidence:  f64,
    #[serde(default)]
    pub class:       String,
    #[serde(default)]
    pub is_obstacle: bool,
}

#[derive(Debug, Deserialize)]
struct DetectionReport {
    #[serde(default)]
    objects: Vec<DetectionCandidate>,
}

/// Decode a detection report.
pub fn parse_report(json: &str) -> NavResult<Vec<DetectionCandidate>> {
    serde_json::from_str::<DetectionReport>(json)
        .map(|r| r.objects)
        .map_err(|e| NavError::Parse(format!("detection report: {e}")))
}

impl DetectionCandidate {
    /// `true` if this candidate should become an obstacle.
    pub fn is_actionable(&self) -> bool {
        self.is_obstacle && self.position.is_some() && self.confidence > MIN_CONFIDENCE
    }

    /// Convert into a confirmed obstacle.  The id is provisional; the
    /// obstacle set assigns the final one on merge.
    pub fn into_obstacle(self, id: ObstacleId) -> NavResult<Obstacle> {
        let [lat, lon] = self
            .position
            .ok_or_else(|| NavError::Parse(format!("detection '{}' has no position", self.class)))?;
        let radius = self.radius.unwrap_or(DEFAULT_DETECTION_RADIUS_M);
        Ok(Obstacle::new(id, GeoPoint::new(lat, lon), radius)?.confirmed())
    }
}

/// Filter and convert a batch of candidates.  Invalid entries are logged and
/// skipped so one bad detection does not drop the rest.
pub fn actionable_obstacles(candidates: Vec<DetectionCandidate>) -> Vec<Obstacle> {
    candidates
        .into_iter()
        .filter(DetectionCandidate::is_actionable)
        .filter_map(|c| match c.into_obstacle(ObstacleId::INVALID) {
            Ok(o) => Some(o),
            Err(e) => {
                log::warn!("rejected detection: {e}");
                None
            }
        })
        .collect()
}

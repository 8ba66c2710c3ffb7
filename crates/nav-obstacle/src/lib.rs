//! `nav-obstacle` — obstacles and proximity testing.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`obstacle`]  | `Obstacle` (validated circular exclusion zone)             |
//! | [`proximity`] | point, segment and departure tests, look-ahead             |
//! | [`set`]       | `ObstacleSet` (immutable snapshot + R-tree)                |
//! | [`detection`] | detection-service JSON intake                              |
//! | [`avoid`]     | `AvoidancePolygon` for provider requests                   |
//!
//! Validation failures use [`nav_core::NavError`]; proximity tests are total.

pub mod avoid;
pub mod detection;
pub mod obstacle;
pub mod proximity;
pub mod set;

#[cfg(test)]
mod tests;

pub use avoid::{AvoidancePolygon, avoidance_polygons};
pub use detection::{DetectionCandidate, actionable_obstacles, parse_report};
pub use obstacle::Obstacle;
pub use proximity::{
    departure_intersects_obstacle, first_near, is_near_obstacle, look_ahead_blocked, path_is_clear,
    route_obstacle_intersections, segment_intersects_obstacle,
};
pub use set::ObstacleSet;

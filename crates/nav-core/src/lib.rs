//! `nav-core` — foundational types for the campus navigation engine.
//!
//! This crate is a dependency of every other `nav-*` crate.  It has no `nav-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`geo`]       | `GeoPoint`, haversine and planar distance, bearing      |
//! | [`route`]     | `Route` (validated, immutable)                          |
//! | [`ids`]       | `ObstacleId`, `Epoch`                                   |
//! | [`time`]      | `Tick`, `TickClock`                                     |
//! | [`config`]    | `NavConfig` session constants                           |
//! | [`error`]     | `NavError`, `NavResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!
//! The `serde` flag is required to load a `NavConfig` from JSON.

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod route;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::NavConfig;
pub use error::{NavError, NavResult};
pub use geo::{GeoPoint, METERS_PER_DEGREE, bearing_delta_deg, path_length_m};
pub use ids::{Epoch, ObstacleId};
pub use route::Route;
pub use time::{Tick, TickClock};

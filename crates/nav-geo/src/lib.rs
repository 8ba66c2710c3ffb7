//! `nav-geo` — path geometry for the campus navigation engine.
//!
//! Everything here is a total function over plain slices of `GeoPoint`.
//! Degenerate input produces sentinels or empty results, never errors.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`segment`]  | `closest_point_on_segment`, `closest_point_on_path`          |
//! | [`simplify`] | `simplify` (turn/detour reduction, subsample fallback)       |
//! | [`dedup`]    | `similarity`, `is_duplicate`, `select_distinct`              |
//! | [`nodes`]    | direction changes, intersections, `waypoints`                |
//! | [`params`]   | `SimplifyParams`, `DedupParams`, `NodeParams`                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on params and nodes.       |

pub mod dedup;
pub mod nodes;
pub mod params;
pub mod segment;
pub mod simplify;

#[cfg(test)]
mod tests;

pub use dedup::{is_duplicate, select_distinct, similarity};
pub use nodes::{NodeKind, WaypointNode, direction_change_indices, intersections, waypoints};
pub use params::{DedupParams, NodeParams, SimplifyParams};
pub use segment::{
    PathProjection, SegmentProjection, closest_point_on_path, closest_point_on_segment,
    min_distance_point_to_segment,
};
pub use simplify::simplify;

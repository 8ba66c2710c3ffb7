//! Per-session mutable state.

use std::sync::Arc;

use nav_core::{GeoPoint, Route};
use nav_guide::{CommandDedup, InstructionList, InstructionTracker, TrackerParams};

/// Lifecycle phase of a navigation session.
///
/// ```text
/// Idle → Running → ObstacleHalted → Rerouting → Running (new route)
///                                             ↘ Idle (arrived | exhausted)
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Running,
    ObstacleHalted,
    Rerouting,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub fn flipped(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Everything the simulation mutates while a session runs.
///
/// The route is shared behind an `Arc` and only ever swapped whole, so a
/// reader holding the old one never sees a half-updated path.  The
/// instruction tracker and device dedup live here rather than in the
/// components that use them, so `reset` clears them with everything else.
#[derive(Clone, Debug, Default)]
pub struct SimulationState {
    pub route:                Option<Arc<Route>>,
    pub segment_index:        usize,
    /// Progress along the current segment in the direction of travel, 0..=100.
    pub progress_pct:         f64,
    pub direction:            Direction,
    pub obstacle_encountered: bool,
    pub reroute_attempts:     u8,
    pub instructions:         InstructionList,
    pub tracker:              InstructionTracker,
    pub device:               CommandDedup,
}

impl SimulationState {
    /// Fresh state on `route`, at its first point, moving forward.
    pub fn on_route(route: Arc<Route>, tracker: TrackerParams) -> Self {
        Self {
            instructions: InstructionList::for_path(route.path()),
            tracker: InstructionTracker::new(tracker),
            route: Some(route),
            ..Self::default()
        }
    }

    /// Swap in a new route after a reroute.  Attempts carry over; position,
    /// instructions, and the displayed text start over.
    pub fn replace_route(&mut self, route: Arc<Route>) {
        self.instructions = InstructionList::for_path(route.path());
        self.tracker.reset();
        self.route = Some(route);
        self.segment_index = 0;
        self.progress_pct = 0.0;
        self.direction = Direction::Forward;
        self.obstacle_encountered = false;
    }

    /// Back to the empty state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn path(&self) -> &[GeoPoint] {
        self.route.as_deref().map(Route::path).unwrap_or(&[])
    }

    /// Interpolated traveler position.  Moving backward, progress runs from
    /// `path[i + 1]` toward `path[i]`.
    pub fn position(&self) -> Option<GeoPoint> {
        let path = self.path();
        let a = *path.get(self.segment_index)?;
        let b = *path.get(self.segment_index + 1)?;
        let frac = (self.progress_pct / 100.0).clamp(0.0, 1.0);
        let t = match self.direction {
            Direction::Forward => frac,
            Direction::Backward => 1.0 - frac,
        };
        Some(a.lerp(b, t))
    }

    /// Index of the final segment, if there is a route.
    pub fn last_segment(&self) -> Option<usize> {
        self.route.as_deref().map(|r| r.segment_count().saturating_sub(1))
    }
}

//! Flicker-free instruction updates while moving.

use nav_core::{GeoPoint, NavConfig};

use crate::instruction::Guidance;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrackerParams {
    /// Minimum change in rounded distance before the shown text is replaced.
    pub quantum_m:        u32,
    /// Getting this close to the maneuver point replaces the text at once.
    pub turn_proximity_m: f64,
}

impl TrackerParams {
    pub fn from_config(config: &NavConfig) -> Self {
        Self {
            quantum_m:        config.instruction_quantum_m.max(0.0).round() as u32,
            turn_proximity_m: config.turn_proximity_m,
        }
    }
}

impl Default for TrackerParams {
    fn default() -> Self {
        Self::from_config(&NavConfig::default())
    }
}

/// Holds the instruction currently on display and decides when a freshly
/// computed one replaces it.
///
/// The shown guidance is replaced when:
/// - nothing is shown yet, or the segment index changed;
/// - the maneuver itself changed;
/// - the traveler first comes within `turn_proximity_m` of the maneuver point;
/// - the rounded distance moved by at least `quantum_m`.
#[derive(Clone, Debug, Default)]
pub struct InstructionTracker {
    params:  TrackerParams,
    shown:   Option<Guidance>,
    segment: usize,
    /// The proximity replacement already happened for this segment.
    forced:  bool,
}

impl InstructionTracker {
    pub fn new(params: TrackerParams) -> Self {
        Self { params, shown: None, segment: 0, forced: false }
    }

    /// Re-evaluate at `position` on segment `segment_index` of `path`.
    /// Returns the new guidance only when the displayed one changes.
    pub fn update(&mut self, position: GeoPoint, path: &[GeoPoint], segment_index: usize) -> Option<Guidance> {
        let next = *path.get(segment_index + 1)?;
        let fresh = Guidance::describe(position, next, path.get(segment_index + 2).copied());
        let within = position.distance_m(next) <= self.params.turn_proximity_m;

        let replace = match self.shown {
            None => true,
            Some(_) if self.segment != segment_index => true,
            Some(shown) if shown.maneuver != fresh.maneuver => true,
            Some(_) if within && !self.forced => true,
            Some(shown) => shown.distance_m.abs_diff(fresh.distance_m) >= self.params.quantum_m,
        };
        if !replace || (self.shown == Some(fresh) && self.segment == segment_index) {
            return None;
        }

        self.shown = Some(fresh);
        self.segment = segment_index;
        self.forced = within;
        Some(fresh)
    }

    /// The guidance currently on display.
    pub fn current(&self) -> Option<Guidance> {
        self.shown
    }

    /// Forget the displayed instruction, e.g. after a route swap.
    pub fn reset(&mut self) {
        self.shown = None;
        self.segment = 0;
        self.forced = false;
    }
}

//! Instruction text for a single upcoming maneuver, and the full-path list.

use std::fmt;

use nav_core::{GeoPoint, bearing_delta_deg};

use crate::turn::TurnKind;

/// Displayed distances are rounded to a multiple of this, metres.
pub const DISTANCE_STEP_M: u32 = 5;

/// Round `distance_m` to the nearest [`DISTANCE_STEP_M`].
pub fn round_distance(distance_m: f64) -> u32 {
    if !distance_m.is_finite() || distance_m <= 0.0 {
        return 0;
    }
    let step = f64::from(DISTANCE_STEP_M);
    ((distance_m / step).round() * step) as u32
}

// ── Guidance ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Maneuver {
    Turn(TurnKind),
    Arrive,
}

/// The structured form of one instruction: what happens, and how far ahead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Guidance {
    /// Rounded distance to the maneuver point.
    pub distance_m: u32,
    pub maneuver:   Maneuver,
}

impl Guidance {
    /// Guidance for a traveler at `current` heading to `next`.  With no
    /// `after` point, `next` is the destination.
    pub fn describe(current: GeoPoint, next: GeoPoint, after: Option<GeoPoint>) -> Guidance {
        let distance_m = round_distance(current.distance_m(next));
        let maneuver = match after {
            None => Maneuver::Arrive,
            Some(after) => {
                let delta = bearing_delta_deg(current.bearing_deg(next), next.bearing_deg(after));
                Maneuver::Turn(TurnKind::classify(delta))
            }
        };
        Guidance { distance_m, maneuver }
    }

    pub fn is_arrival(&self) -> bool {
        self.maneuver == Maneuver::Arrive
    }

    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Guidance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.maneuver {
            Maneuver::Arrive => write!(f, "In {} meters, you will reach your destination", self.distance_m),
            Maneuver::Turn(kind) => write!(f, "In {} meters, {kind}", self.distance_m),
        }
    }
}

// ── Instruction list ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    pub text:          String,
    pub segment_index: usize,
    pub completed:     bool,
}

/// One instruction per path segment, generated once per route.  Only the
/// `completed` flags change afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstructionList {
    items: Vec<Instruction>,
}

impl InstructionList {
    /// Segment `i` is described from its start point: distance to
    /// `path[i + 1]` and the turn taken there.
    pub fn for_path(path: &[GeoPoint]) -> Self {
        let items = path
            .windows(2)
            .enumerate()
            .map(|(i, w)| Instruction {
                text:          Guidance::describe(w[0], w[1], path.get(i + 2).copied()).text(),
                segment_index: i,
                completed:     false,
            })
            .collect();
        Self { items }
    }

    /// Mark every instruction for a segment before `segment_index` completed.
    /// Returns how many flags flipped.
    pub fn mark_passed(&mut self, segment_index: usize) -> usize {
        let mut flipped = 0;
        for item in self.items.iter_mut().filter(|i| i.segment_index < segment_index && !i.completed) {
            item.completed = true;
            flipped += 1;
        }
        flipped
    }

    /// Mark everything completed, on arrival.
    pub fn complete_all(&mut self) {
        let len = self.items.len();
        self.mark_passed(len);
    }

    /// First instruction not yet completed.
    pub fn current(&self) -> Option<&Instruction> {
        self.items.iter().find(|i| !i.completed)
    }

    pub fn as_slice(&self) -> &[Instruction] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Free-function form of [`InstructionList::for_path`].
pub fn full_path_instructions(path: &[GeoPoint]) -> InstructionList {
    InstructionList::for_path(path)
}

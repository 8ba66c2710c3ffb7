//! Events emitted by the navigator, and how a session ends.

use std::sync::Arc;

use nav_core::{Epoch, GeoPoint, ObstacleId, Route};
use nav_guide::DeviceCommand;
use nav_obstacle::ObstacleSet;
use nav_route::RerouteFailure;

#[derive(Clone, Debug, PartialEq)]
pub enum NavEvent {
    Started {
        epoch:        Epoch,
        distance_m:   f64,
        alternatives: usize,
    },
    /// The displayed instruction changed.  Voice output keys off this.
    InstructionChanged {
        text:          String,
        segment_index: usize,
    },
    /// A command for the steered device; never two identical in a row.
    Device(DeviceCommand),
    SegmentCompleted {
        segment_index: usize,
    },
    /// Backward travel reached the start and turned around.
    TurnedForward,
    /// An obstacle lies within look-ahead range.  Warning only.
    ObstacleAhead {
        segment_index: usize,
    },
    Halted {
        obstacle:      ObstacleId,
        position:      GeoPoint,
        segment_index: usize,
        progress_pct:  f64,
    },
    RerouteStarted {
        attempt: u8,
    },
    Rerouted {
        attempt:    u8,
        distance_m: f64,
    },
    RerouteFailed {
        attempt: u8,
        reason:  RerouteFailure,
    },
    /// Terminal: the reroute cap was reached with no viable path.
    RerouteExhausted {
        attempts: u8,
    },
    /// Terminal: the destination was reached.
    Arrived,
    Stopped,
}

impl NavEvent {
    /// Short machine-friendly label, used for logs and trace output.
    pub fn kind(&self) -> &'static str {
        match self {
            NavEvent::Started { .. } => "started",
            NavEvent::InstructionChanged { .. } => "instruction",
            NavEvent::Device(_) => "device",
            NavEvent::SegmentCompleted { .. } => "segment_completed",
            NavEvent::TurnedForward => "turned_forward",
            NavEvent::ObstacleAhead { .. } => "obstacle_ahead",
            NavEvent::Halted { .. } => "halted",
            NavEvent::RerouteStarted { .. } => "reroute_started",
            NavEvent::Rerouted { .. } => "rerouted",
            NavEvent::RerouteFailed { .. } => "reroute_failed",
            NavEvent::RerouteExhausted { .. } => "reroute_exhausted",
            NavEvent::Arrived => "arrived",
            NavEvent::Stopped => "stopped",
        }
    }

    /// Free-form detail for the event, empty when there is none.
    pub fn detail(&self) -> String {
        match self {
            NavEvent::Started { epoch, distance_m, alternatives } => {
                format!("{epoch} {distance_m:.1} m, {alternatives} alternatives")
            }
            NavEvent::InstructionChanged { text, .. } => text.clone(),
            NavEvent::Device(cmd) => format!("{} m {:?}", cmd.distance_m, cmd.direction),
            NavEvent::SegmentCompleted { segment_index } | NavEvent::ObstacleAhead { segment_index } => {
                format!("segment {segment_index}")
            }
            NavEvent::Halted { obstacle, position, .. } => format!("{obstacle} at {position}"),
            NavEvent::RerouteStarted { attempt } => format!("attempt {attempt}"),
            NavEvent::Rerouted { attempt, distance_m } => format!("attempt {attempt}, {distance_m:.1} m"),
            NavEvent::RerouteFailed { attempt, reason } => format!("attempt {attempt}: {reason}"),
            NavEvent::RerouteExhausted { attempts } => format!("no viable path after {attempts} attempts"),
            NavEvent::TurnedForward | NavEvent::Arrived | NavEvent::Stopped => String::new(),
        }
    }
}

/// How a session ended.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionOutcome {
    Arrived {
        ticks:    u64,
        reroutes: u8,
    },
    RerouteExhausted {
        attempts: u8,
    },
    Cancelled,
}

/// One reroute cycle to run: where from, against which snapshots, and the
/// epoch its result must match.
#[derive(Clone, Debug)]
pub struct RerouteTicket {
    pub epoch:        Epoch,
    pub attempt:      u8,
    pub from:         GeoPoint,
    pub destination:  GeoPoint,
    pub alternatives: Arc<Vec<Route>>,
    pub obstacles:    Arc<ObstacleSet>,
}

/// Result of [`Navigator::begin_reroute`](crate::Navigator::begin_reroute).
#[derive(Clone, Debug)]
pub enum RerouteStep {
    /// Run this cycle and hand the result to `resolve_reroute`.
    Request(RerouteTicket, Vec<NavEvent>),
    /// The cap was already reached; the session is now idle.
    Exhausted(Vec<NavEvent>),
}

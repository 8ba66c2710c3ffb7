//! Commands for an externally steered device.
//!
//! A command is the `(distance, direction)` pair carried by an instruction.
//! On the wire it is a small JSON object:
//!
//! ```json
//! {"type": "navigation", "distance": 45, "direction": "left", "speed": 50}
//! ```

use serde::Serialize;

use crate::instruction::{Guidance, Maneuver};
use crate::turn::Side;

/// Speed sent with every command, percent of the device maximum.
pub const DEFAULT_DEVICE_SPEED_PCT: u8 = 50;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnDirection {
    Left,
    Right,
    Straight,
    Arrive,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeviceCommand {
    pub distance_m: u32,
    pub direction:  TurnDirection,
}

#[derive(Serialize)]
struct WireCommand {
    #[serde(rename = "type")]
    kind:      &'static str,
    distance:  u32,
    direction: TurnDirection,
    speed:     u8,
}

impl DeviceCommand {
    pub fn from_guidance(guidance: &Guidance) -> Self {
        let direction = match guidance.maneuver {
            Maneuver::Arrive => TurnDirection::Arrive,
            Maneuver::Turn(kind) => match kind.side() {
                None => TurnDirection::Straight,
                Some(Side::Left) => TurnDirection::Left,
                Some(Side::Right) => TurnDirection::Right,
            },
        };
        Self { distance_m: guidance.distance_m, direction }
    }

    /// Parse rendered instruction text (`"In 45 meters, turn left"`).
    /// `None` if the text does not have that shape.
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.trim().strip_prefix("In ")?;
        let (distance, action) = rest.split_once(" meters, ")?;
        let distance_m = distance.trim().parse().ok()?;

        let direction = if action.contains("destination") {
            TurnDirection::Arrive
        } else if action.contains("left") {
            TurnDirection::Left
        } else if action.contains("right") {
            TurnDirection::Right
        } else if action.contains("straight") {
            TurnDirection::Straight
        } else {
            return None;
        };
        Some(Self { distance_m, direction })
    }

    /// JSON wire form.
    pub fn to_wire(&self, speed_pct: u8) -> serde_json::Result<String> {
        serde_json::to_string(&WireCommand {
            kind:      "navigation",
            distance:  self.distance_m,
            direction: self.direction,
            speed:     speed_pct,
        })
    }
}

/// Suppresses repeats: a command is forwarded only if it differs from the
/// last one forwarded.
#[derive(Clone, Debug, Default)]
pub struct CommandDedup {
    last: Option<DeviceCommand>,
}

impl CommandDedup {
    /// `Some(command)` if it should be sent.
    pub fn admit(&mut self, command: DeviceCommand) -> Option<DeviceCommand> {
        if self.last == Some(command) {
            log::trace!("device command {command:?} suppressed as duplicate");
            return None;
        }
        self.last = Some(command);
        Some(command)
    }

    pub fn last(&self) -> Option<DeviceCommand> {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

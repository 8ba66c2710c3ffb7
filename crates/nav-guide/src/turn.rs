//! Turn classification from a signed heading change.

use std::fmt;

/// Below this absolute heading change the maneuver is "continue straight", degrees.
pub const STRAIGHT_MAX_DEG: f64 = 10.0;
/// Below this it is a slight turn.
pub const SLIGHT_MAX_DEG: f64 = 45.0;
/// Below this it is a normal turn; at or above, a sharp one.
pub const TURN_MAX_DEG: f64 = 135.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TurnKind {
    Straight,
    Slight(Side),
    Turn(Side),
    Sharp(Side),
}

impl TurnKind {
    /// Classify a signed heading change in degrees.  Positive is clockwise
    /// (right); the input is expected in (−180, 180].
    pub fn classify(delta_deg: f64) -> TurnKind {
        let side = if delta_deg < 0.0 { Side::Left } else { Side::Right };
        let a = delta_deg.abs();
        if a < STRAIGHT_MAX_DEG {
            TurnKind::Straight
        } else if a < SLIGHT_MAX_DEG {
            TurnKind::Slight(side)
        } else if a < TURN_MAX_DEG {
            TurnKind::Turn(side)
        } else {
            TurnKind::Sharp(side)
        }
    }

    /// `None` for straight.
    pub fn side(self) -> Option<Side> {
        match self {
            TurnKind::Straight => None,
            TurnKind::Slight(s) | TurnKind::Turn(s) | TurnKind::Sharp(s) => Some(s),
        }
    }
}

impl fmt::Display for TurnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnKind::Straight => f.write_str("continue straight"),
            TurnKind::Slight(s) => write!(f, "turn slightly {}", s.as_str()),
            TurnKind::Turn(s) => write!(f, "turn {}", s.as_str()),
            TurnKind::Sharp(s) => write!(f, "make a sharp {}", s.as_str()),
        }
    }
}

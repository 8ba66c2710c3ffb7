//! Session-level numeric configuration.

use std::time::Duration;

use crate::{NavError, NavResult};

/// Every tunable constant a navigation session uses.
///
/// Passed in at session start; never mutated while a session runs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    /// Wall time between simulation ticks, milliseconds.
    pub tick_period_ms: u64,

    /// Progress added along the current segment per tick, percentage points.
    pub speed_pct_per_tick: f64,

    /// Safety margin around an obstacle for the live traveler position, metres.
    pub live_margin_m: f64,

    /// Safety margin used when checking candidate route segments, metres.
    pub segment_margin_m: f64,

    /// Safety margin for the look-ahead scan, metres.
    pub look_ahead_margin_m: f64,

    /// Number of upcoming segments the look-ahead scan covers.
    pub look_ahead_segments: usize,

    /// Reroute cycles allowed per navigation session.
    pub max_reroute_attempts: u8,

    /// Minimum change in rounded remaining distance before the displayed
    /// instruction is replaced, metres.
    pub instruction_quantum_m: f64,

    /// Distance to the upcoming turn that forces an instruction advance, metres.
    pub turn_proximity_m: f64,

    /// Two obstacles closer than this are treated as the same location, metres.
    pub obstacle_merge_m: f64,

    /// Walking speed for ETA estimates, metres per minute.
    pub walking_speed_m_per_min: f64,

    /// Maximum number of alternative routes retained after deduplication.
    pub max_alternatives: usize,

    /// Length of the bounded movement trail.
    pub trail_len: usize,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            tick_period_ms:          100,
            speed_pct_per_tick:      5.0,
            live_margin_m:           3.0,
            segment_margin_m:        5.0,
            look_ahead_margin_m:     25.0,
            look_ahead_segments:     3,
            max_reroute_attempts:    3,
            instruction_quantum_m:   50.0,
            turn_proximity_m:        30.0,
            obstacle_merge_m:        10.0,
            walking_speed_m_per_min: 83.3,
            max_alternatives:        3,
            trail_len:               100,
        }
    }
}

impl NavConfig {
    /// Tick period as a `Duration`.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Reject non-positive or non-finite values.
    pub fn validate(&self) -> NavResult<()> {
        if self.tick_period_ms == 0 {
            return Err(NavError::Config("tick_period_ms must be > 0".into()));
        }
        if !(self.speed_pct_per_tick > 0.0 && self.speed_pct_per_tick <= 100.0) {
            return Err(NavError::Config(format!(
                "speed_pct_per_tick must be in (0, 100], got {}",
                self.speed_pct_per_tick
            )));
        }

        let margins = [
            ("live_margin_m", self.live_margin_m),
            ("segment_margin_m", self.segment_margin_m),
            ("look_ahead_margin_m", self.look_ahead_margin_m),
            ("instruction_quantum_m", self.instruction_quantum_m),
            ("turn_proximity_m", self.turn_proximity_m),
            ("obstacle_merge_m", self.obstacle_merge_m),
        ];
        for (name, v) in margins {
            if !v.is_finite() || v < 0.0 {
                return Err(NavError::Config(format!("{name} must be finite and >= 0, got {v}")));
            }
        }

        if !(self.walking_speed_m_per_min.is_finite() && self.walking_speed_m_per_min > 0.0) {
            return Err(NavError::Config(format!(
                "walking_speed_m_per_min must be > 0, got {}",
                self.walking_speed_m_per_min
            )));
        }
        if self.max_alternatives == 0 {
            return Err(NavError::Config("max_alternatives must be > 0".into()));
        }
        if self.trail_len == 0 {
            return Err(NavError::Config("trail_len must be > 0".into()));
        }
        Ok(())
    }
}

//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  `TickClock` maps it to
//! elapsed wall time using the fixed tick period of the session:
//!
//!   elapsed = tick * period
//!
//! Integer ticks keep step arithmetic exact; wall time is only derived for
//! display and logging.

use std::fmt;
use std::time::Duration;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickClock ─────────────────────────────────────────────────────────────────

/// Tracks the current tick of a navigation session and its wall-time mapping.
#[derive(Clone, Debug)]
pub struct TickClock {
    /// Wall time represented by one tick.
    pub period: Duration,
    /// The current tick, advanced by [`TickClock::advance`] once per step.
    pub current_tick: Tick,
}

impl TickClock {
    pub fn new(period: Duration) -> Self {
        Self { period, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Rewind to tick zero.
    #[inline]
    pub fn reset(&mut self) {
        self.current_tick = Tick::ZERO;
    }

    /// Wall time elapsed since tick zero.
    pub fn elapsed(&self) -> Duration {
        let ticks = u32::try_from(self.current_tick.0).unwrap_or(u32::MAX);
        self.period.saturating_mul(ticks)
    }
}

impl fmt::Display for TickClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{:.1}s)", self.current_tick, self.elapsed().as_secs_f64())
    }
}

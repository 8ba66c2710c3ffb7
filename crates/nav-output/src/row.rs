//! Plain data row types written by output backends.

/// The traveler's position after one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRow {
    pub tick:          u64,
    /// Wall time since the session started, milliseconds.
    pub elapsed_ms:    u64,
    pub lat:           f64,
    pub lon:           f64,
    pub segment_index: usize,
    pub progress_pct:  f64,
    pub backward:      bool,
    pub reroutes:      u8,
}

/// One navigation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub tick:   u64,
    pub kind:   &'static str,
    /// Free text; empty when the event carries no detail.
    pub detail: String,
}

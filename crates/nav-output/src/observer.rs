//! `TraceObserver<W>` — bridges `NavObserver` to a `TraceWriter`.

use nav_core::{Epoch, NavConfig, Route, Tick};
use nav_route::FallbackNotice;
use nav_sim::{Direction, NavEvent, NavObserver, SessionOutcome, SimulationState};

use crate::row::{EventRow, TraceRow};
use crate::trail::Trail;
use crate::writer::TraceWriter;
use crate::{OutputError, OutputResult};

/// A [`NavObserver`] that writes a trace row per tick and an event row per
/// event to any [`TraceWriter`], and keeps the movement trail.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After the session returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct TraceObserver<W: TraceWriter> {
    writer:     W,
    period_ms:  u64,
    trail:      Trail,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    /// Create an observer backed by `writer`, using `config` for the tick
    /// period and trail length.
    pub fn new(writer: W, config: &NavConfig) -> Self {
        Self {
            writer,
            period_ms:  config.tick_period_ms,
            trail:      Trail::new(config.trail_len),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the session returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Unwrap the inner writer (e.g. to inspect files after the session).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn event(&mut self, tick: Tick, kind: &'static str, detail: String) {
        let result = self.writer.write_event(&EventRow { tick: tick.0, kind, detail });
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                log::warn!("trace output failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> NavObserver for TraceObserver<W> {
    fn on_start(&mut self, _epoch: Epoch, route: &Route) {
        self.trail.clear();
        self.trail.push(route.start());
    }

    fn on_fallback(&mut self, notice: &FallbackNotice) {
        self.event(Tick::ZERO, "fallback", notice.reason.to_string());
    }

    fn on_tick(&mut self, tick: Tick, state: &SimulationState) {
        let Some(position) = state.position() else {
            return;
        };
        self.trail.push(position);

        let row = TraceRow {
            tick:          tick.0,
            elapsed_ms:    tick.0.saturating_mul(self.period_ms),
            lat:           position.lat,
            lon:           position.lon,
            segment_index: state.segment_index,
            progress_pct:  state.progress_pct,
            backward:      state.direction == Direction::Backward,
            reroutes:      state.reroute_attempts,
        };
        let result = self.writer.write_trace(&row);
        self.store_err(result);
    }

    fn on_event(&mut self, tick: Tick, event: &NavEvent) {
        self.event(tick, event.kind(), event.detail());
    }

    fn on_end(&mut self, tick: Tick, outcome: &SessionOutcome) {
        let detail = match outcome {
            SessionOutcome::Arrived { ticks, reroutes } => format!("arrived after {ticks} ticks, {reroutes} reroutes"),
            SessionOutcome::RerouteExhausted { attempts } => format!("no viable path after {attempts} attempts"),
            SessionOutcome::Cancelled => "cancelled".to_owned(),
        };
        self.event(tick, "end", detail);
        let result = self.writer.finish();
        self.store_err(result);
    }
}

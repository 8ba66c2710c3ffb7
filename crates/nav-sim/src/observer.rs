//! Session observer trait for progress reporting and data collection.

use nav_core::{Epoch, Route, Tick};
use nav_route::FallbackNotice;

use crate::event::{NavEvent, SessionOutcome};
use crate::state::SimulationState;

/// Callbacks invoked by [`Session`][crate::Session] as it drives a
/// [`Navigator`][crate::Navigator].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Rendering, voice output, and device
/// forwarding are all observers.
///
/// # Example — instruction printer
///
/// ```rust,ignore
/// struct Speaker;
///
/// impl NavObserver for Speaker {
///     fn on_event(&mut self, _tick: Tick, event: &NavEvent) {
///         if let NavEvent::InstructionChanged { text, .. } = event {
///             println!("{text}");
///         }
///     }
/// }
/// ```
pub trait NavObserver {
    /// A route was handed to the navigator (initially, not on reroute).
    fn on_start(&mut self, _epoch: Epoch, _route: &Route) {}

    /// The provider could not be used and a straight-line route was
    /// synthesized.
    fn on_fallback(&mut self, _notice: &FallbackNotice) {}

    /// Called after every tick while running, with the post-tick state.
    fn on_tick(&mut self, _tick: Tick, _state: &SimulationState) {}

    /// Called for every event, in emission order.
    fn on_event(&mut self, _tick: Tick, _event: &NavEvent) {}

    /// Called once when the session ends.
    fn on_end(&mut self, _tick: Tick, _outcome: &SessionOutcome) {}
}

/// A [`NavObserver`] that does nothing.
pub struct NoopObserver;

impl NavObserver for NoopObserver {}

//! Async session driver: one tick timer, one reroute in flight at most.

use std::sync::Arc;

use nav_core::{GeoPoint, Route};
use nav_obstacle::ObstacleSet;
use nav_route::{RouteAcquirer, RoutingProvider};
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

use crate::event::{NavEvent, RerouteStep, SessionOutcome};
use crate::machine::Navigator;
use crate::observer::NavObserver;
use crate::state::Phase;
use crate::{SimError, SimResult};

// ── SessionHandle ─────────────────────────────────────────────────────────────

/// Control surface for a running [`Session`], usable from other tasks.
///
/// Cancellation is cooperative: the session notices it at its next await
/// point and abandons any pending provider call.
#[derive(Clone)]
pub struct SessionHandle {
    cancel:    Arc<watch::Sender<bool>>,
    obstacles: Arc<watch::Sender<Arc<ObstacleSet>>>,
}

impl SessionHandle {
    /// Stop the session.  Idempotent.
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Publish a new obstacle set.  The session picks it up before its next
    /// tick.
    pub fn replace_obstacles(&self, obstacles: ObstacleSet) {
        self.obstacles.send_replace(Arc::new(obstacles));
    }

    /// The most recently published obstacle set.
    pub fn obstacles(&self) -> Arc<ObstacleSet> {
        Arc::clone(&self.obstacles.borrow())
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Drives a [`Navigator`] in real time against a routing provider.
///
/// Create via [`SessionBuilder`][crate::SessionBuilder].
pub struct Session<P: RoutingProvider> {
    pub navigator: Navigator,
    pub acquirer:  RouteAcquirer<P>,
    cancel:        watch::Receiver<bool>,
    obstacles:     watch::Receiver<Arc<ObstacleSet>>,
    handle_open:   bool,
}

impl<P: RoutingProvider> Session<P> {
    pub(crate) fn new(navigator: Navigator, acquirer: RouteAcquirer<P>, obstacles: ObstacleSet) -> (Self, SessionHandle) {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (obstacles_tx, obstacles_rx) = watch::channel(Arc::new(obstacles));
        let session = Self {
            navigator,
            acquirer,
            cancel: cancel_rx,
            obstacles: obstacles_rx,
            handle_open: true,
        };
        let handle = SessionHandle { cancel: Arc::new(cancel_tx), obstacles: Arc::new(obstacles_tx) };
        (session, handle)
    }

    /// Acquire routes from `start` to `end`, then [`run`](Self::run) the
    /// shortest with the rest kept as reroute alternatives.
    pub async fn navigate<O: NavObserver>(
        &mut self,
        start:    GeoPoint,
        end:      GeoPoint,
        observer: &mut O,
    ) -> SimResult<SessionOutcome> {
        let obstacles = Arc::clone(&self.obstacles.borrow());
        let acquisition = self
            .acquirer
            .acquire(start, end, obstacles.as_slice())
            .await
            .map_err(|e| SimError::InvalidRoute(e.to_string()))?;

        if let Some(notice) = &acquisition.notice {
            log::warn!("using fallback route: {}", notice.reason);
            observer.on_fallback(notice);
        }

        let mut routes = acquisition.routes;
        if routes.is_empty() {
            return Err(SimError::InvalidRoute("acquisition returned no routes".into()));
        }
        let primary = routes.remove(0);
        self.run(primary, routes, observer).await
    }

    /// Navigate `route` until arrival, reroute exhaustion, or cancellation.
    pub async fn run<O: NavObserver>(
        &mut self,
        route:        Route,
        alternatives: Vec<Route>,
        observer:     &mut O,
    ) -> SimResult<SessionOutcome> {
        let obstacles = Arc::clone(&self.obstacles.borrow_and_update());
        self.navigator.set_obstacles(obstacles);

        let events = self.navigator.start(route, alternatives);
        if let Some(active) = self.navigator.route() {
            observer.on_start(self.navigator.epoch(), active);
        }
        self.dispatch(&events, observer);

        let mut interval = time::interval(self.navigator.config().tick_period());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of an interval completes immediately.
        interval.tick().await;

        loop {
            if *self.cancel.borrow() {
                return Ok(self.finish_cancelled(observer));
            }

            match self.navigator.phase() {
                Phase::Idle => break,

                Phase::Running => {
                    tokio::select! {
                        biased;
                        _ = cancelled(&mut self.cancel) => {
                            return Ok(self.finish_cancelled(observer));
                        }
                        changed = self.obstacles.changed(), if self.handle_open => match changed {
                            Ok(()) => self.take_obstacles(),
                            Err(_) => self.handle_open = false,
                        },
                        _ = interval.tick() => {
                            let events = self.navigator.tick()?;
                            observer.on_tick(self.navigator.current_tick(), self.navigator.state());
                            self.dispatch(&events, observer);
                        }
                    }
                }

                Phase::ObstacleHalted => {
                    // Each cycle plans against the latest published set.
                    self.refresh_obstacles();
                    match self.navigator.begin_reroute()? {
                        RerouteStep::Exhausted(events) => self.dispatch(&events, observer),
                        RerouteStep::Request(ticket, events) => {
                            self.dispatch(&events, observer);
                            let result = tokio::select! {
                                biased;
                                _ = cancelled(&mut self.cancel) => None,
                                r = self.acquirer.reroute(
                                    ticket.from,
                                    ticket.destination,
                                    &ticket.alternatives,
                                    ticket.obstacles.as_slice(),
                                ) => Some(r),
                            };
                            let Some(result) = result else {
                                return Ok(self.finish_cancelled(observer));
                            };
                            let events = self.navigator.resolve_reroute(ticket.epoch, result)?;
                            self.dispatch(&events, observer);
                            interval.reset();
                        }
                    }
                }

                Phase::Rerouting => {
                    return Err(SimError::NotRunning { expected: Phase::ObstacleHalted, actual: Phase::Rerouting });
                }
            }
        }

        let outcome = self.navigator.outcome().cloned().unwrap_or(SessionOutcome::Cancelled);
        observer.on_end(self.navigator.current_tick(), &outcome);
        Ok(outcome)
    }

    /// Pick up a set published since the last look, without waiting.
    fn refresh_obstacles(&mut self) {
        if !self.handle_open {
            return;
        }
        match self.obstacles.has_changed() {
            Ok(true) => self.take_obstacles(),
            Ok(false) => {}
            Err(_) => self.handle_open = false,
        }
    }

    fn take_obstacles(&mut self) {
        let set = Arc::clone(&self.obstacles.borrow_and_update());
        log::debug!("obstacle set replaced ({} obstacles)", set.len());
        self.navigator.set_obstacles(set);
    }

    fn dispatch<O: NavObserver>(&self, events: &[NavEvent], observer: &mut O) {
        let tick = self.navigator.current_tick();
        for event in events {
            log::trace!("{tick} {}: {}", event.kind(), event.detail());
            observer.on_event(tick, event);
        }
    }

    fn finish_cancelled<O: NavObserver>(&mut self, observer: &mut O) -> SessionOutcome {
        let tick = self.navigator.current_tick();
        let events = self.navigator.stop();
        self.dispatch(&events, observer);
        let outcome = SessionOutcome::Cancelled;
        observer.on_end(tick, &outcome);
        outcome
    }
}

/// Resolves once cancellation is requested; never, if the handle is gone.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    let closed = rx.wait_for(|&c| c).await.is_err();
    if closed {
        std::future::pending::<()>().await;
    }
}

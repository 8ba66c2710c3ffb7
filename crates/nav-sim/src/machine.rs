//! The `Navigator` state machine.
//!
//! # Tick
//!
//! ```text
//! ① Advance  — progress += speed; at 100 % step to the next segment
//!              (forward) or the previous one (backward).  Finishing the
//!              last segment forward arrives; passing the first backward
//!              turns around.
//! ② Obstacle — live position within radius + live margin of any obstacle
//!              not in the grace set → ObstacleHalted.
//! ③ Ahead    — look-ahead scan over the next segments, warning once per
//!              segment.
//! ④ Guide    — instruction tracker; a changed instruction also yields a
//!              device command unless it repeats the previous one.
//! ```
//!
//! The navigator never awaits.  The reroute cycle is split into
//! [`Navigator::begin_reroute`] and [`Navigator::resolve_reroute`] so the
//! caller can await the provider in between; a result carrying an old epoch
//! is dropped.

use std::borrow::Cow;
use std::sync::Arc;

use nav_core::{Epoch, GeoPoint, NavConfig, ObstacleId, Route, Tick, TickClock};
use nav_guide::{DeviceCommand, TrackerParams};
use nav_obstacle::{Obstacle, ObstacleSet, look_ahead_blocked};
use nav_route::RerouteFailure;

use crate::event::{NavEvent, RerouteStep, RerouteTicket, SessionOutcome};
use crate::state::{Direction, Phase, SimulationState};
use crate::{SimError, SimResult};

pub struct Navigator {
    config:       NavConfig,
    tracker:      TrackerParams,
    state:        SimulationState,
    phase:        Phase,
    epoch:        Epoch,
    clock:        TickClock,
    destination:  Option<GeoPoint>,
    alternatives: Arc<Vec<Route>>,
    obstacles:    Arc<ObstacleSet>,
    /// Obstacles the traveler is inside after a reroute; ignored by the live
    /// check until the traveler leaves their reach.
    grace:        Vec<ObstacleId>,
    halt:         Option<GeoPoint>,
    warned_ahead: Option<usize>,
    outcome:      Option<SessionOutcome>,
}

impl Navigator {
    pub fn new(config: NavConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            tracker:      TrackerParams::from_config(&config),
            clock:        TickClock::new(config.tick_period()),
            config,
            state:        SimulationState::default(),
            phase:        Phase::Idle,
            epoch:        Epoch(0),
            destination:  None,
            alternatives: Arc::new(Vec::new()),
            obstacles:    Arc::new(ObstacleSet::new()),
            grace:        Vec::new(),
            halt:         None,
            warned_ahead: None,
            outcome:      None,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    pub fn route(&self) -> Option<&Arc<Route>> {
        self.state.route.as_ref()
    }

    pub fn obstacles(&self) -> &Arc<ObstacleSet> {
        &self.obstacles
    }

    pub fn alternatives(&self) -> &[Route] {
        &self.alternatives
    }

    pub fn position(&self) -> Option<GeoPoint> {
        self.state.position()
    }

    /// Text of the instruction currently on display.
    pub fn current_instruction(&self) -> Option<String> {
        self.state.tracker.current().map(|g| g.text())
    }

    /// Set once the session reaches a terminal state.
    pub fn outcome(&self) -> Option<&SessionOutcome> {
        self.outcome.as_ref()
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Begin navigating `route`.  Any previous session is abandoned and its
    /// epoch retired.
    pub fn start(&mut self, route: Route, alternatives: Vec<Route>) -> Vec<NavEvent> {
        self.epoch = self.epoch.next();
        self.clock.reset();
        self.destination = Some(route.end());
        self.alternatives = Arc::new(alternatives);
        self.grace.clear();
        self.halt = None;
        self.warned_ahead = None;
        self.outcome = None;
        self.phase = Phase::Running;

        let route = Arc::new(route);
        log::info!(
            "{}: navigating {:.1} m over {} segments",
            self.epoch,
            route.distance_m(),
            route.segment_count()
        );
        let mut events = vec![NavEvent::Started {
            epoch:        self.epoch,
            distance_m:   route.distance_m(),
            alternatives: self.alternatives.len(),
        }];
        self.state = SimulationState::on_route(Arc::clone(&route), self.tracker);
        self.refresh_instruction(route.start(), &route, &mut events);
        events
    }

    /// Replace the obstacle set wholesale.  Valid in any phase; takes effect
    /// from the next tick.
    pub fn set_obstacles(&mut self, obstacles: Arc<ObstacleSet>) {
        self.grace.retain(|&id| obstacles.get(id).is_some());
        self.obstacles = obstacles;
    }

    /// Turn around in place.  Only while running.
    pub fn reverse(&mut self) -> SimResult<()> {
        self.expect_phase(Phase::Running)?;
        self.state.direction = self.state.direction.flipped();
        self.state.progress_pct = 100.0 - self.state.progress_pct;
        log::debug!("{}: direction now {:?}", self.epoch, self.state.direction);
        Ok(())
    }

    /// Abandon the session from any phase.  Bumps the epoch so an in-flight
    /// reroute result is recognised as stale.
    pub fn stop(&mut self) -> Vec<NavEvent> {
        self.epoch = self.epoch.next();
        self.state.reset();
        self.grace.clear();
        self.halt = None;
        self.warned_ahead = None;
        if self.outcome.is_none() && self.phase != Phase::Idle {
            self.outcome = Some(SessionOutcome::Cancelled);
        }
        self.phase = Phase::Idle;
        log::info!("{}: stopped", self.epoch);
        vec![NavEvent::Stopped]
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance one tick.  Errors unless running.
    pub fn tick(&mut self) -> SimResult<Vec<NavEvent>> {
        self.expect_phase(Phase::Running)?;
        let route = self.state.route.clone().ok_or_else(|| SimError::InvalidRoute("no active route".into()))?;
        self.clock.advance();
        let mut events = Vec::new();

        // ① Advance.
        self.state.progress_pct += self.config.speed_pct_per_tick;
        if self.state.progress_pct >= 100.0 {
            let seg = self.state.segment_index;
            match self.state.direction {
                Direction::Forward => {
                    self.state.instructions.mark_passed(seg + 1);
                    events.push(NavEvent::SegmentCompleted { segment_index: seg });
                    if seg + 1 >= route.segment_count() {
                        self.state.progress_pct = 100.0;
                        self.arrive(&mut events);
                        return Ok(events);
                    }
                    self.state.segment_index = seg + 1;
                    self.state.progress_pct = 0.0;
                }
                Direction::Backward if seg == 0 => {
                    self.state.direction = Direction::Forward;
                    self.state.progress_pct = 0.0;
                    events.push(NavEvent::TurnedForward);
                }
                Direction::Backward => {
                    self.state.segment_index = seg - 1;
                    self.state.progress_pct = 0.0;
                }
            }
        }

        let Some(position) = self.state.position() else {
            return Err(SimError::InvalidRoute(format!("segment {} out of range", self.state.segment_index)));
        };

        // ② Obstacle.
        self.release_grace(position);
        if let Some(obstacle) = self.first_blocking(position) {
            self.halt_at(obstacle, position, &mut events);
            return Ok(events);
        }

        if self.state.direction == Direction::Forward {
            // ③ Ahead.
            self.scan_ahead(position, &route, &mut events);
            // ④ Guide.
            self.refresh_instruction(position, &route, &mut events);
        }
        Ok(events)
    }

    // ── Reroute cycle ─────────────────────────────────────────────────────

    /// Leave `ObstacleHalted`.  Either hands out a ticket for one reroute
    /// cycle (entering `Rerouting`), or, with the cap already spent, ends the
    /// session.
    pub fn begin_reroute(&mut self) -> SimResult<RerouteStep> {
        self.expect_phase(Phase::ObstacleHalted)?;
        if self.state.reroute_attempts >= self.config.max_reroute_attempts {
            let mut events = Vec::new();
            self.exhaust(&mut events);
            return Ok(RerouteStep::Exhausted(events));
        }

        let from = self.halt.ok_or_else(|| SimError::InvalidRoute("halted without a position".into()))?;
        let destination = self.destination.ok_or_else(|| SimError::InvalidRoute("no destination".into()))?;

        self.state.reroute_attempts += 1;
        self.phase = Phase::Rerouting;
        let attempt = self.state.reroute_attempts;
        log::info!("{}: reroute attempt {attempt} from {from}", self.epoch);

        let ticket = RerouteTicket {
            epoch: self.epoch,
            attempt,
            from,
            destination,
            alternatives: Arc::clone(&self.alternatives),
            obstacles: Arc::clone(&self.obstacles),
        };
        Ok(RerouteStep::Request(ticket, vec![NavEvent::RerouteStarted { attempt }]))
    }

    /// Apply the result of the cycle started with the ticket of `epoch`.
    ///
    /// A stale result is dropped without effect.
    pub fn resolve_reroute(&mut self, epoch: Epoch, result: Result<Route, RerouteFailure>) -> SimResult<Vec<NavEvent>> {
        if epoch != self.epoch || self.phase != Phase::Rerouting {
            log::debug!("discarding reroute result for {epoch} (now {}, {:?})", self.epoch, self.phase);
            return Ok(Vec::new());
        }

        let attempt = self.state.reroute_attempts;
        let mut events = Vec::new();
        match result {
            Ok(route) => {
                let route = Arc::new(route);
                self.grace = self
                    .obstacles
                    .iter()
                    .filter(|o| o.is_within_reach(route.start(), self.config.live_margin_m))
                    .map(Obstacle::id)
                    .collect();
                self.state.replace_route(Arc::clone(&route));
                self.halt = None;
                self.warned_ahead = None;
                self.phase = Phase::Running;
                log::info!("{}: rerouted on attempt {attempt}, {:.1} m", self.epoch, route.distance_m());
                events.push(NavEvent::Rerouted { attempt, distance_m: route.distance_m() });
                self.refresh_instruction(route.start(), &route, &mut events);
            }
            Err(reason) => {
                log::warn!("{}: reroute attempt {attempt} failed: {reason}", self.epoch);
                events.push(NavEvent::RerouteFailed { attempt, reason });
                if attempt >= self.config.max_reroute_attempts {
                    self.exhaust(&mut events);
                } else {
                    self.phase = Phase::ObstacleHalted;
                }
            }
        }
        Ok(events)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn expect_phase(&self, expected: Phase) -> SimResult<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SimError::NotRunning { expected, actual: self.phase })
        }
    }

    fn arrive(&mut self, events: &mut Vec<NavEvent>) {
        self.state.instructions.complete_all();
        self.phase = Phase::Idle;
        self.outcome = Some(SessionOutcome::Arrived {
            ticks:    self.clock.current_tick.0,
            reroutes: self.state.reroute_attempts,
        });
        log::info!("{}: destination reached at {}", self.epoch, self.clock.current_tick);
        events.push(NavEvent::Arrived);
    }

    fn exhaust(&mut self, events: &mut Vec<NavEvent>) {
        let attempts = self.state.reroute_attempts;
        self.phase = Phase::Idle;
        self.outcome = Some(SessionOutcome::RerouteExhausted { attempts });
        log::warn!("{}: no viable path after {attempts} reroute attempts", self.epoch);
        events.push(NavEvent::RerouteExhausted { attempts });
    }

    fn halt_at(&mut self, obstacle: Obstacle, position: GeoPoint, events: &mut Vec<NavEvent>) {
        self.phase = Phase::ObstacleHalted;
        self.state.obstacle_encountered = true;
        self.halt = Some(position);
        log::info!(
            "{}: halted by {} at {position} (segment {}, {:.0} %)",
            self.epoch,
            obstacle.id(),
            self.state.segment_index,
            self.state.progress_pct
        );
        events.push(NavEvent::Halted {
            obstacle:      obstacle.id(),
            position,
            segment_index: self.state.segment_index,
            progress_pct:  self.state.progress_pct,
        });
    }

    fn release_grace(&mut self, position: GeoPoint) {
        if self.grace.is_empty() {
            return;
        }
        let margin = self.config.live_margin_m;
        let obstacles = &self.obstacles;
        self.grace
            .retain(|&id| obstacles.get(id).is_some_and(|o| o.is_within_reach(position, margin)));
    }

    fn active_obstacles(&self) -> Cow<'_, [Obstacle]> {
        if self.grace.is_empty() {
            Cow::Borrowed(self.obstacles.as_slice())
        } else {
            Cow::Owned(self.obstacles.iter().filter(|o| !self.grace.contains(&o.id())).copied().collect())
        }
    }

    fn first_blocking(&self, position: GeoPoint) -> Option<Obstacle> {
        let margin = self.config.live_margin_m;
        if self.grace.is_empty() {
            return self.obstacles.first_near(position, margin).copied();
        }
        self.active_obstacles()
            .iter()
            .filter(|o| o.is_within_reach(position, margin))
            .min_by_key(|o| o.id())
            .copied()
    }

    fn scan_ahead(&mut self, position: GeoPoint, route: &Route, events: &mut Vec<NavEvent>) {
        let seg = self.state.segment_index;
        if self.warned_ahead == Some(seg) {
            return;
        }
        let blocked = look_ahead_blocked(
            position,
            route.path(),
            seg,
            self.config.look_ahead_segments,
            &self.active_obstacles(),
            self.config.look_ahead_margin_m,
        );
        if blocked {
            log::debug!("{}: obstacle ahead of segment {seg}", self.epoch);
            self.warned_ahead = Some(seg);
            events.push(NavEvent::ObstacleAhead { segment_index: seg });
        }
    }

    fn refresh_instruction(&mut self, position: GeoPoint, route: &Route, events: &mut Vec<NavEvent>) {
        let seg = self.state.segment_index;
        let Some(guidance) = self.state.tracker.update(position, route.path(), seg) else {
            return;
        };
        let text = guidance.text();
        let command = DeviceCommand::parse(&text).and_then(|c| self.state.device.admit(c));
        events.push(NavEvent::InstructionChanged { text, segment_index: seg });
        if let Some(command) = command {
            events.push(NavEvent::Device(command));
        }
    }
}

//! campus_walk — one simulated walk across a campus quad.
//!
//! Acquires candidate routes from an offline grid provider, walks the
//! shortest, and partway through publishes a camera detection report that
//! drops a bench on the walkway.  The session halts short of it, reroutes
//! around it, and arrives.
//!
//! Usage: `campus_walk [config.json] [output_dir]`
//!
//! Set `RUST_LOG=debug` for engine logs.  The trace is written to
//! `<output_dir>/trace.csv` and `<output_dir>/events.csv`.

mod provider;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::json;

use nav_core::{Epoch, GeoPoint, NavConfig, Route, Tick};
use nav_geo::{NodeParams, waypoints};
use nav_guide::{DEFAULT_DEVICE_SPEED_PCT, full_path_instructions};
use nav_obstacle::{actionable_obstacles, parse_report};
use nav_output::{CsvTraceWriter, TraceObserver, TraceWriter};
use nav_route::{Acquisition, FallbackNotice};
use nav_sim::{NavEvent, NavObserver, SessionBuilder, SessionHandle, SessionOutcome, SimulationState};

use provider::CampusGrid;

// ── Constants ─────────────────────────────────────────────────────────────────

const START: GeoPoint = GeoPoint::new(10.9000, 76.9000); // library steps
const END:   GeoPoint = GeoPoint::new(10.9027, 76.9018); // engineering block

/// Where the bench lands, as a fraction of the direct walkway.
const BENCH_AT:            f64      = 0.7;
const REPORT_DELAY:        Duration = Duration::from_millis(900);
const PROVIDER_LATENCY:    Duration = Duration::from_millis(150);
const DEFAULT_OUTPUT_DIR:  &str     = "output";

// ── Console observer ──────────────────────────────────────────────────────────

/// Prints what a walker would hear and what the steered device receives,
/// and forwards everything to the CSV trace.
struct Console<W: TraceWriter> {
    trace: TraceObserver<W>,
}

impl<W: TraceWriter> NavObserver for Console<W> {
    fn on_start(&mut self, epoch: Epoch, route: &Route) {
        println!("[{epoch}] walking {:.0} m, about {:.1} min", route.distance_m(), route.eta_min());
        self.trace.on_start(epoch, route);
    }

    fn on_fallback(&mut self, notice: &FallbackNotice) {
        println!("provider unavailable, walking the direct line: {}", notice.reason);
        self.trace.on_fallback(notice);
    }

    fn on_tick(&mut self, tick: Tick, state: &SimulationState) {
        self.trace.on_tick(tick, state);
    }

    fn on_event(&mut self, tick: Tick, event: &NavEvent) {
        match event {
            NavEvent::InstructionChanged { text, .. } => println!("{tick:>5}  voice   {text}"),
            NavEvent::Device(cmd) => match cmd.to_wire(DEFAULT_DEVICE_SPEED_PCT) {
                Ok(wire) => println!("{tick:>5}  device  {wire}"),
                Err(e) => log::error!("device command not encodable: {e}"),
            },
            NavEvent::ObstacleAhead { .. }
            | NavEvent::Halted { .. }
            | NavEvent::RerouteStarted { .. }
            | NavEvent::Rerouted { .. }
            | NavEvent::RerouteFailed { .. }
            | NavEvent::RerouteExhausted { .. }
            | NavEvent::Arrived => println!("{tick:>5}  {:<7} {}", event.kind(), event.detail()),
            _ => {}
        }
        self.trace.on_event(tick, event);
    }

    fn on_end(&mut self, tick: Tick, outcome: &SessionOutcome) {
        self.trace.on_end(tick, outcome);
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: Option<&str>) -> Result<NavConfig> {
    let Some(path) = path else {
        return Ok(NavConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
    let config: NavConfig = serde_json::from_str(&text).with_context(|| format!("parsing config {path}"))?;
    config.validate()?;
    Ok(config)
}

/// The payload the detection service would post when its camera spots the
/// bench: two overlapping sightings, one unlocated person, one low-confidence
/// shadow.
fn detection_report(at: GeoPoint) -> String {
    json!({
        "objects": [
            { "position": [at.lat, at.lon], "radius": 4.0, "confidence": 0.91,
              "class": "bench", "is_obstacle": true },
            { "position": [at.lat + 0.00002, at.lon], "radius": 3.0, "confidence": 0.74,
              "class": "bench", "is_obstacle": true },
            { "position": null, "confidence": 0.95, "class": "person", "is_obstacle": true },
            { "position": [at.lat, at.lon + 0.0003], "confidence": 0.30,
              "class": "shadow", "is_obstacle": true },
        ]
    })
    .to_string()
}

/// Wait, then publish whatever the report turns into.
async fn publish_report(handle: SessionHandle, merge_m: f64) {
    tokio::time::sleep(REPORT_DELAY).await;
    if handle.is_cancelled() {
        return;
    }
    match parse_report(&detection_report(START.lerp(END, BENCH_AT))) {
        Ok(candidates) => {
            let found = actionable_obstacles(candidates);
            let merged = handle.obstacles().merge_detections(found, merge_m);
            log::info!("detection report: {} obstacle(s) known", merged.len());
            handle.replace_obstacles(merged);
        }
        Err(e) => log::error!("detection report rejected: {e}"),
    }
}

fn print_plan(acquisition: &Acquisition) {
    let primary = acquisition.primary();
    let others: Vec<&[GeoPoint]> = acquisition.alternatives().iter().map(Route::path).collect();

    println!("{} candidate route(s):", acquisition.routes.len());
    for (i, r) in acquisition.routes.iter().enumerate() {
        println!("  #{i}  {:>6.0} m  {} points", r.distance_m(), r.path().len());
    }

    println!("waypoints:");
    for node in waypoints(primary.path(), &others, &NodeParams::default()) {
        println!("  {:<3} {:?} {}", node.label, node.kind, node.position);
    }

    println!("directions:");
    for step in full_path_instructions(primary.path()).as_slice() {
        println!("  {}", step.text);
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str))?;
    let out_dir = PathBuf::from(args.get(1).map_or(DEFAULT_OUTPUT_DIR, String::as_str));
    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    // 1. Session and its control handle.
    let (mut session, handle) = SessionBuilder::new(CampusGrid::new(PROVIDER_LATENCY))
        .config(config.clone())
        .build()?;

    // 2. Acquire and show the plan.
    let acquisition = session.acquirer.acquire(START, END, handle.obstacles().as_slice()).await?;
    print_plan(&acquisition);

    // 3. Walk, with the detection report arriving mid-route.
    let mut console = Console { trace: TraceObserver::new(CsvTraceWriter::new(&out_dir)?, &config) };
    if let Some(notice) = &acquisition.notice {
        console.on_fallback(notice);
    }
    let mut routes = acquisition.routes;
    let primary = routes.remove(0);

    let (outcome, ()) = tokio::join!(
        session.run(primary, routes, &mut console),
        publish_report(handle.clone(), config.obstacle_merge_m),
    );
    let outcome = outcome?;

    // 4. Summary.
    println!("outcome: {outcome:?}");
    println!("provider requests: {}", session.acquirer.provider.requests());
    println!("trail: {} recent positions", console.trace.trail().len());
    if let Some(e) = console.trace.take_error() {
        log::error!("trace output incomplete: {e}");
    }
    println!("trace written to {}", out_dir.display());

    Ok(())
}

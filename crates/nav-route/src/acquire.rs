//! Route acquisition and rerouting.
//!
//! # Acquisition strategies
//!
//! 1. **Primary** — request alternatives for `(start, end)`.
//! 2. **Widening** — if fewer than `max_alternatives` came back, request
//!    single routes through via points offset to either side of the first
//!    geometry.  Best effort; failures are logged and skipped.
//! 3. **Fallback** — if the primary request failed or returned nothing,
//!    request a single plain route.
//! 4. **Direct** — if that fails too, synthesize a straight-line route and
//!    attach a [`FallbackNotice`].
//!
//! Raw geometries are simplified, annotated with their obstacle-intersection
//! count, deduplicated, capped, and sorted ascending by distance.
//!
//! # Reroute cycle
//!
//! [`RouteAcquirer::reroute`] tries, in order: the shortest precomputed
//! alternative that passes by the halt point and is clear from there on, a
//! provider route avoiding obstacle polygons at `avoid_scale_first`, then one
//! at `avoid_scale_retry`.  The returned route always starts exactly at the halt
//! point.

use nav_core::{GeoPoint, NavConfig, NavError, NavResult, Route};
use nav_geo::{DedupParams, SimplifyParams, closest_point_on_path, select_distinct, simplify};
use nav_obstacle::{
    Obstacle, avoidance_polygons, departure_intersects_obstacle, route_obstacle_intersections,
    segment_intersects_obstacle,
};

use crate::error::{ProviderError, ProviderResult, RerouteFailure};
use crate::fallback::direct_route;
use crate::provider::{RawRoute, RouteRequest, RoutingProvider};

/// Points closer than this are treated as the same point, metres.
const SAME_START_M: f64 = 1.0;

// ── Parameters ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct AcquireParams {
    pub simplify:                SimplifyParams,
    pub dedup:                   DedupParams,
    pub max_alternatives:        usize,
    pub walking_speed_m_per_min: f64,
    /// Safety margin for candidate route segments, metres.
    pub segment_margin_m:        f64,
    /// A precomputed alternative is reused only if it passes this close to
    /// the halt point, metres.
    pub alternative_join_m:      f64,
    /// Perpendicular distance of widening via points, metres.
    pub via_offset_m:            f64,
    /// Upper bound on widening requests per acquisition.
    pub max_via_requests:        usize,
    pub avoid_scale_first:       f64,
    pub avoid_scale_retry:       f64,
}

impl AcquireParams {
    pub fn from_config(config: &NavConfig) -> Self {
        Self {
            simplify:                SimplifyParams::default(),
            dedup:                   DedupParams::default(),
            max_alternatives:        config.max_alternatives,
            walking_speed_m_per_min: config.walking_speed_m_per_min,
            segment_margin_m:        config.segment_margin_m,
            alternative_join_m:      config.segment_margin_m,
            via_offset_m:            60.0,
            max_via_requests:        6,
            avoid_scale_first:       2.0,
            avoid_scale_retry:       3.0,
        }
    }
}

impl Default for AcquireParams {
    fn default() -> Self {
        Self::from_config(&NavConfig::default())
    }
}

// ── Results ───────────────────────────────────────────────────────────────────

/// Non-fatal signal that the provider could not be used and a straight-line
/// route was synthesized instead.
#[derive(Clone, Debug, PartialEq)]
pub struct FallbackNotice {
    pub reason: ProviderError,
}

#[derive(Clone, Debug)]
pub struct Acquisition {
    /// Never empty; ascending by distance.
    pub routes: Vec<Route>,
    pub notice: Option<FallbackNotice>,
}

impl Acquisition {
    /// The shortest route.
    pub fn primary(&self) -> &Route {
        &self.routes[0]
    }

    /// Every route except the primary.
    pub fn alternatives(&self) -> &[Route] {
        &self.routes[1..]
    }
}

// ── RouteAcquirer ─────────────────────────────────────────────────────────────

/// Wraps a [`RoutingProvider`] and turns its raw geometries into ranked routes.
///
/// # Type parameter
///
/// `P` must implement [`RoutingProvider`].  Swap it at compile time for a
/// different backend with no runtime overhead.
pub struct RouteAcquirer<P: RoutingProvider> {
    pub provider: P,
    pub params:   AcquireParams,
}

impl<P: RoutingProvider> RouteAcquirer<P> {
    pub fn new(provider: P, params: AcquireParams) -> Self {
        Self { provider, params }
    }

    /// Acquire ranked candidate routes from `start` to `end`.
    ///
    /// Returns a route even with the provider down; only invalid endpoints
    /// are an error.
    pub async fn acquire(&self, start: GeoPoint, end: GeoPoint, obstacles: &[Obstacle]) -> NavResult<Acquisition> {
        for p in [start, end] {
            if !p.is_valid() {
                return Err(NavError::InvalidCoordinate { lat: p.lat, lon: p.lon });
            }
        }

        let mut raws: Vec<RawRoute> = Vec::new();
        let mut last_err = ProviderError::Empty;

        match non_empty(self.provider.fetch(&RouteRequest::alternatives(start, end)).await) {
            Ok(found) => {
                log::debug!("primary request returned {} routes", found.len());
                raws = found;
            }
            Err(e) => {
                log::warn!("primary route request failed: {e}");
                last_err = e;
            }
        }

        if !raws.is_empty() && raws.len() < self.params.max_alternatives {
            let via = widening_points(&raws[0].coordinates, &self.params);
            for point in via.into_iter().take(self.params.max_via_requests) {
                match non_empty(self.provider.fetch(&RouteRequest::single(start, end).via(point)).await) {
                    Ok(mut found) => raws.push(found.swap_remove(0)),
                    Err(e) => log::debug!("via {point} request failed: {e}"),
                }
            }
        }

        if raws.is_empty() {
            match non_empty(self.provider.fetch(&RouteRequest::single(start, end)).await) {
                Ok(found) => raws = found,
                Err(e) => {
                    log::warn!("fallback route request failed: {e}");
                    last_err = e;
                }
            }
        }

        let candidates: Vec<Route> = raws
            .into_iter()
            .filter_map(|raw| self.build_route(raw, obstacles))
            .collect();
        let routes = select_distinct(candidates, self.params.max_alternatives, &self.params.dedup);

        if routes.is_empty() {
            log::info!("using direct fallback route: {last_err}");
            let direct = direct_route(start, end, self.params.walking_speed_m_per_min)?;
            let count = route_obstacle_intersections(direct.path(), obstacles, self.params.segment_margin_m);
            return Ok(Acquisition {
                routes: vec![direct.with_obstacle_intersections(count)],
                notice: Some(FallbackNotice { reason: last_err }),
            });
        }

        Ok(Acquisition { routes, notice: None })
    }

    /// Run one reroute cycle from the halt point `from` to `end`.
    pub async fn reroute(
        &self,
        from: GeoPoint,
        end: GeoPoint,
        alternatives: &[Route],
        obstacles: &[Obstacle],
    ) -> Result<Route, RerouteFailure> {
        if let Some(route) = self.clear_alternative(from, alternatives, obstacles) {
            log::info!("reroute: reusing precomputed alternative ({:.0} m)", route.distance_m());
            return Ok(route);
        }

        let mut last_err = RerouteFailure::NoClearRoute;
        for scale in [self.params.avoid_scale_first, self.params.avoid_scale_retry] {
            let request = RouteRequest::alternatives(from, end).avoiding(avoidance_polygons(obstacles, scale));
            match non_empty(self.provider.fetch(&request).await) {
                Ok(raws) => {
                    let best = raws
                        .into_iter()
                        .filter_map(|raw| self.build_route(raw, obstacles))
                        .filter_map(|r| starting_at(from, &r, self.params.walking_speed_m_per_min))
                        .filter(|r| clear_from_halt(r.path(), obstacles, self.params.segment_margin_m))
                        .min_by(|a, b| a.distance_m().total_cmp(&b.distance_m()));
                    if let Some(route) = best {
                        log::info!("reroute: provider route at avoidance scale {scale} ({:.0} m)", route.distance_m());
                        return Ok(route);
                    }
                    log::debug!("reroute: no clear provider route at scale {scale}");
                    last_err = RerouteFailure::NoClearRoute;
                }
                Err(e) => {
                    log::warn!("reroute request at scale {scale} failed: {e}");
                    last_err = RerouteFailure::Provider(e);
                }
            }
        }
        Err(last_err)
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn build_route(&self, raw: RawRoute, obstacles: &[Obstacle]) -> Option<Route> {
        let path = simplify(&raw.coordinates, &self.params.simplify);
        let speed = self.params.walking_speed_m_per_min;

        let built = if raw.distance_m > 0.0 && raw.duration_s > 0.0 {
            Route::new(path, raw.distance_m, raw.duration_s / 60.0)
        } else {
            Route::from_path(path, speed)
        };

        match built {
            Ok(route) => {
                let count = route_obstacle_intersections(route.path(), obstacles, self.params.segment_margin_m);
                Some(route.with_obstacle_intersections(count))
            }
            Err(e) => {
                log::debug!("discarding provider geometry: {e}");
                None
            }
        }
    }

    /// Shortest alternative that passes within `alternative_join_m` of the
    /// halt point and, joined there, clears every obstacle.
    fn clear_alternative(&self, from: GeoPoint, alternatives: &[Route], obstacles: &[Obstacle]) -> Option<Route> {
        let speed = self.params.walking_speed_m_per_min;
        alternatives
            .iter()
            .filter_map(|alt| {
                let proj = closest_point_on_path(from, alt.path());
                if proj.is_none() || proj.distance_m > self.params.alternative_join_m {
                    return None;
                }
                let mut path = vec![from];
                push_distinct(&mut path, proj.point);
                for &p in &alt.path()[proj.segment_index + 1..] {
                    push_distinct(&mut path, p);
                }
                Route::from_path(path, speed).ok()
            })
            .filter(|r| clear_from_halt(r.path(), obstacles, self.params.segment_margin_m))
            .min_by(|a, b| a.distance_m().total_cmp(&b.distance_m()))
    }
}

fn non_empty(result: ProviderResult<Vec<RawRoute>>) -> ProviderResult<Vec<RawRoute>> {
    match result {
        Ok(v) if v.is_empty() => Err(ProviderError::Empty),
        other => other,
    }
}

/// `true` if `path` is clear of obstacles.  The first leg leaves the halt
/// point, which lies within the live margin of an obstacle and may be inside
/// it, so that leg only has to move away and stay out of the obstacle itself.
fn clear_from_halt(path: &[GeoPoint], obstacles: &[Obstacle], margin_m: f64) -> bool {
    path.windows(2).enumerate().all(|(i, w)| {
        !obstacles.iter().any(|o| {
            if i == 0 {
                departure_intersects_obstacle(w[0], w[1], o, 0.0)
            } else {
                segment_intersects_obstacle(w[0], w[1], o, margin_m)
            }
        })
    })
}

/// Append `p` unless it repeats the last point.
fn push_distinct(path: &mut Vec<GeoPoint>, p: GeoPoint) {
    if path.last().is_none_or(|last| last.distance_m(p) > SAME_START_M) {
        path.push(p);
    }
}

/// Re-anchor `route` so its first point is exactly `from`.
fn starting_at(from: GeoPoint, route: &Route, speed: f64) -> Option<Route> {
    let mut path = route.path().to_vec();
    if path[0].distance_m(from) <= SAME_START_M {
        path[0] = from;
    } else {
        path.insert(0, from);
    }
    let extra = path_delta(route.path(), &path);
    let distance = (route.distance_m() + extra).max(0.0);
    Route::new(path, distance, distance / speed)
        .ok()
        .map(|r| r.with_obstacle_intersections(route.obstacle_intersections()))
}

fn path_delta(before: &[GeoPoint], after: &[GeoPoint]) -> f64 {
    nav_core::path_length_m(after) - nav_core::path_length_m(before)
}

/// Via points offset perpendicular to `reference` at its quarter points.
fn widening_points(reference: &[GeoPoint], params: &AcquireParams) -> Vec<GeoPoint> {
    let n = reference.len();
    if n < 3 {
        return Vec::new();
    }

    let mut out: Vec<GeoPoint> = Vec::new();
    for q in 1..4 {
        let idx = (n * q / 4).clamp(1, n - 2);
        let heading = reference[idx - 1].bearing_deg(reference[idx + 1]);
        for side in [90.0_f64, -90.0] {
            let dir = (heading + side).to_radians();
            let p = reference[idx].offset_m(params.via_offset_m * dir.cos(), params.via_offset_m * dir.sin());
            if !out.iter().any(|o| o.distance_m(p) < params.via_offset_m * 0.5) {
                out.push(p);
            }
        }
    }
    out
}

//! Offline stand-in for a GraphHopper foot-routing endpoint.
//!
//! Candidates are built on a flat grid: the direct walkway plus the two
//! L-shaped paths along the quad edges.  Avoidance polygons drop every
//! candidate that crosses one and add a swing path around each polygon.
//! Responses are serialized to GraphHopper JSON and decoded back, so the
//! engine sees exactly what it would see over the wire.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::json;

use nav_core::{GeoPoint, path_length_m};
use nav_geo::min_distance_point_to_segment;
use nav_obstacle::AvoidancePolygon;
use nav_route::{ProviderResult, RawRoute, RouteRequest, RoutingProvider, decode_graphhopper};

/// Extra sideways distance a swing path keeps beyond the polygon, metres.
const SWING_CLEARANCE_M: f64 = 30.0;

/// Pedestrian speed used for the reported `time`, m/s.
const WALK_M_PER_S: f64 = 1.4;

pub struct CampusGrid {
    latency:  Duration,
    requests: AtomicUsize,
}

impl CampusGrid {
    pub fn new(latency: Duration) -> Self {
        Self { latency, requests: AtomicUsize::new(0) }
    }

    /// Requests served so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    fn candidates(request: &RouteRequest) -> Vec<Vec<GeoPoint>> {
        let (start, end) = (request.start, request.end);

        if !request.via.is_empty() {
            let mut path = Vec::with_capacity(request.via.len() + 2);
            path.push(start);
            path.extend_from_slice(&request.via);
            path.push(end);
            return vec![path];
        }

        let mut paths = vec![
            vec![start, end],
            vec![start, GeoPoint::new(end.lat, start.lon), end],
            vec![start, GeoPoint::new(start.lat, end.lon), end],
        ];

        if !request.avoid.is_empty() {
            paths.retain(|path| !request.avoid.iter().any(|poly| crosses(path, poly)));
            paths.extend(request.avoid.iter().map(|poly| swing_path(start, end, poly)));
        }

        if !request.alternatives {
            paths.truncate(1);
        }
        paths
    }
}

impl RoutingProvider for CampusGrid {
    async fn fetch(&self, request: &RouteRequest) -> ProviderResult<Vec<RawRoute>> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        tokio::time::sleep(self.latency).await;

        let body = graphhopper_body(&Self::candidates(request));
        decode_graphhopper(&body)
    }
}

fn graphhopper_body(paths: &[Vec<GeoPoint>]) -> String {
    let paths: Vec<_> = paths
        .iter()
        .map(|path| {
            let distance = path_length_m(path);
            let coordinates: Vec<[f64; 2]> = path.iter().map(|p| [p.lon, p.lat]).collect();
            json!({
                "distance": distance,
                "time":     (distance / WALK_M_PER_S * 1000.0).round(),
                "points":   { "coordinates": coordinates },
            })
        })
        .collect();
    json!({ "paths": paths }).to_string()
}

/// Centre and radius of a polygon ring, metres.
fn circle(poly: &AvoidancePolygon) -> (GeoPoint, f64) {
    let open = &poly.ring[..poly.ring.len().saturating_sub(1).max(1)];
    let n = open.len() as f64;
    let centre = GeoPoint::new(
        open.iter().map(|p| p.lat).sum::<f64>() / n,
        open.iter().map(|p| p.lon).sum::<f64>() / n,
    );
    (centre, centre.distance_m(open[0]))
}

fn crosses(path: &[GeoPoint], poly: &AvoidancePolygon) -> bool {
    let (centre, radius) = circle(poly);
    path.windows(2)
        .any(|w| min_distance_point_to_segment(centre, w[0], w[1]) < radius)
}

/// `start → pivot → end`, the pivot pushed sideways off the polygon, to the
/// left of the direct line.
fn swing_path(start: GeoPoint, end: GeoPoint, poly: &AvoidancePolygon) -> Vec<GeoPoint> {
    let (centre, radius) = circle(poly);
    let heading = start.bearing_deg(end).to_radians();
    let offset = radius + SWING_CLEARANCE_M;
    let pivot = centre.offset_m(heading.sin() * offset, -heading.cos() * offset);
    vec![start, pivot, end]
}

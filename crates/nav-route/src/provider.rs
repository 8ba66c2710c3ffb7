//! Routing-provider contract.
//!
//! # Pluggability
//!
//! The acquirer calls routing via the [`RoutingProvider`] trait, so a session
//! can run against a remote HTTP service, a recorded fixture, or a test stub
//! without touching the engine.  The engine never performs its own
//! shortest-path search.
//!
//! # Cancellation
//!
//! Requests are plain futures.  Dropping one abandons the request; a session
//! that is cancelled mid-flight simply stops polling it.

use std::future::Future;

use nav_core::GeoPoint;
use nav_obstacle::AvoidancePolygon;

use crate::error::ProviderResult;

/// One routing request.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteRequest {
    pub start:        GeoPoint,
    pub end:          GeoPoint,
    /// Intermediate points the route must pass, in order.
    pub via:          Vec<GeoPoint>,
    /// Areas the route must avoid.
    pub avoid:        Vec<AvoidancePolygon>,
    /// Ask for alternative routes rather than a single best one.
    pub alternatives: bool,
}

impl RouteRequest {
    /// Request for alternatives between two points.
    pub fn alternatives(start: GeoPoint, end: GeoPoint) -> Self {
        Self { start, end, via: Vec::new(), avoid: Vec::new(), alternatives: true }
    }

    /// Request for a single route between two points.
    pub fn single(start: GeoPoint, end: GeoPoint) -> Self {
        Self { start, end, via: Vec::new(), avoid: Vec::new(), alternatives: false }
    }

    pub fn via(mut self, point: GeoPoint) -> Self {
        self.via.push(point);
        self
    }

    pub fn avoiding(mut self, polygons: Vec<AvoidancePolygon>) -> Self {
        self.avoid = polygons;
        self
    }
}

/// One route geometry as the provider returned it.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRoute {
    pub coordinates: Vec<GeoPoint>,
    /// Provider-reported length, metres.
    pub distance_m:  f64,
    /// Provider-reported duration, seconds.
    pub duration_s:  f64,
}

/// Remote routing engine.
///
/// Implementations must be `Send + Sync` so a session can hold one across
/// `.await` points on a multi-threaded runtime.  A provider may return zero,
/// one, or many geometries; the acquirer handles each case.
pub trait RoutingProvider: Send + Sync {
    fn fetch(&self, request: &RouteRequest) -> impl Future<Output = ProviderResult<Vec<RawRoute>>> + Send;
}

impl<P: RoutingProvider> RoutingProvider for &P {
    fn fetch(&self, request: &RouteRequest) -> impl Future<Output = ProviderResult<Vec<RawRoute>>> + Send {
        (**self).fetch(request)
    }
}

//! Routing error types.

use nav_core::NavError;
use thiserror::Error;

/// Failure of a single routing-provider request.
///
/// Never escapes [`RouteAcquirer::acquire`](crate::RouteAcquirer::acquire);
/// there it becomes a direct fallback route plus a [`FallbackNotice`](crate::FallbackNotice).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProviderError {
    #[error("routing provider unavailable: {0}")]
    Unavailable(String),

    #[error("could not decode provider response: {0}")]
    Decode(String),

    #[error("routing provider returned no routes")]
    Empty,
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Why one reroute cycle produced no route.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RerouteFailure {
    #[error("reroute provider request failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("no candidate route clears the known obstacles")]
    NoClearRoute,

    #[error("invalid reroute geometry: {0}")]
    Geometry(#[from] NavError),
}

//! `nav-route` — routing-provider contract and route acquisition.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`provider`] | `RoutingProvider` trait, `RouteRequest`, `RawRoute`           |
//! | [`decode`]   | `decode_graphhopper` (JSON → `RawRoute`)                      |
//! | [`fallback`] | `direct_route` straight-line interpolation                    |
//! | [`acquire`]  | `RouteAcquirer<P>` — acquisition strategies + reroute cycle   |
//! | [`error`]    | `ProviderError`, `RerouteFailure`                             |
//!
//! Provider failures never escape [`RouteAcquirer::acquire`]: they are
//! recovered locally by the direct fallback and surfaced only as a
//! [`FallbackNotice`].

pub mod acquire;
pub mod decode;
pub mod error;
pub mod fallback;
pub mod provider;


pub use acquire::{AcquireParams, Acquisition, FallbackNotice, RouteAcquirer};
pub use decode::decode_graphhopper;
pub use error::{ProviderError, ProviderResult, RerouteFailure};
pub use fallback::direct_route;
pub use provider::{RawRoute, RouteRequest, RoutingProvider};

//! `nav-sim` — movement simulation and the rerouting state machine.
//!
//! # Phases
//!
//! ```text
//! Idle ──start──▶ Running ──obstacle──▶ ObstacleHalted ──begin_reroute──▶ Rerouting
//!   ▲                │  ▲                                                   │
//!   │             arrive └──────────────── resolve_reroute (Ok) ───────────┘
//!   │                │                                                      │
//!   └────────────────┴──────── stop | cap reached ◀── resolve_reroute (Err) ┘
//! ```
//!
//! [`Navigator`] is the synchronous state machine; [`Session`] drives it on a
//! tokio interval and awaits the routing provider during `Rerouting`.  Both
//! report through [`NavObserver`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use nav_sim::{NoopObserver, SessionBuilder};
//!
//! let (mut session, handle) = SessionBuilder::new(provider).config(config).build()?;
//! let outcome = session.navigate(start, end, &mut NoopObserver).await?;
//! ```

pub mod builder;
pub mod driver;
pub mod error;
pub mod event;
pub mod machine;
pub mod observer;
pub mod state;


pub use builder::SessionBuilder;
pub use driver::{Session, SessionHandle};
pub use error::{SimError, SimResult};
pub use event::{NavEvent, RerouteStep, RerouteTicket, SessionOutcome};
pub use machine::Navigator;
pub use observer::{NavObserver, NoopObserver};
pub use state::{Direction, Phase, SimulationState};

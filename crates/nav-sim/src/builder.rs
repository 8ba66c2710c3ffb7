//! Fluent builder for constructing a [`Session`].

use nav_core::NavConfig;
use nav_obstacle::ObstacleSet;
use nav_route::{AcquireParams, RouteAcquirer, RoutingProvider};

use crate::driver::{Session, SessionHandle};
use crate::machine::Navigator;
use crate::SimResult;

/// Fluent builder for [`Session<P>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                                  |
/// |-----------------------|------------------------------------------|
/// | `.config(c)`          | `NavConfig::default()`                   |
/// | `.obstacles(s)`       | empty `ObstacleSet`                      |
/// | `.acquire_params(p)`  | `AcquireParams::from_config(&config)`    |
///
/// # Example
///
/// ```rust,ignore
/// let (mut session, handle) = SessionBuilder::new(provider)
///     .config(config)
///     .obstacles(obstacles)
///     .build()?;
/// let outcome = session.navigate(start, end, &mut NoopObserver).await?;
/// ```
pub struct SessionBuilder<P: RoutingProvider> {
    provider:  P,
    config:    Option<NavConfig>,
    obstacles: Option<ObstacleSet>,
    params:    Option<AcquireParams>,
}

impl<P: RoutingProvider> SessionBuilder<P> {
    pub fn new(provider: P) -> Self {
        Self { provider, config: None, obstacles: None, params: None }
    }

    pub fn config(mut self, config: NavConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Initial obstacle set.  Later changes go through
    /// [`SessionHandle::replace_obstacles`].
    pub fn obstacles(mut self, obstacles: ObstacleSet) -> Self {
        self.obstacles = Some(obstacles);
        self
    }

    /// Override acquisition thresholds.  Without this they are derived from
    /// the config.
    pub fn acquire_params(mut self, params: AcquireParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Validate the config and return the session with its control handle.
    pub fn build(self) -> SimResult<(Session<P>, SessionHandle)> {
        let config = self.config.unwrap_or_default();
        let params = self.params.unwrap_or_else(|| AcquireParams::from_config(&config));
        let navigator = Navigator::new(config)?;
        let acquirer = RouteAcquirer::new(self.provider, params);
        Ok(Session::new(navigator, acquirer, self.obstacles.unwrap_or_default()))
    }
}

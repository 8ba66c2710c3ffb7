//! Engine-wide validation error type.
//!
//! Raised only by validating constructors at the engine boundary.  Geometry
//! functions never return it; they use sentinel results instead.

use thiserror::Error;

/// Rejection of a malformed value before it enters the engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NavError {
    #[error("invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("path has {0} valid points, need at least 2")]
    PathTooShort(usize),

    #[error("invalid obstacle radius {0} m")]
    InvalidRadius(f64),

    #[error("invalid {what}: {value}")]
    InvalidQuantity { what: &'static str, value: f64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for all `nav-*` crates.
pub type NavResult<T> = Result<T, NavError>;

use nav_core::NavError;
use thiserror::Error;

use crate::state::Phase;

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("session configuration error: {0}")]
    Config(#[from] NavError),

    #[error("route cannot be navigated: {0}")]
    InvalidRoute(String),

    #[error("operation needs phase {expected:?}, session is {actual:?}")]
    NotRunning {
        expected: Phase,
        actual:   Phase,
    },
}

pub type SimResult<T> = Result<T, SimError>;

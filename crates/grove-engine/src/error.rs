//! Controller error type.

use std::error::Error;
use std::fmt;

use grove_core::{ConfigError, PoolError};

/// Errors surfaced by [`Game`](crate::Game) operations.
#[derive(Clone, Debug, PartialEq)]
pub enum GameError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// A pool rejected an acquire/release. This indicates an internal
    /// bookkeeping bug, not bad input.
    Pool(PoolError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Pool(e) => write!(f, "pool: {e}"),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Pool(e) => Some(e),
        }
    }
}

impl From<ConfigError> for GameError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<PoolError> for GameError {
    fn from(e: PoolError) -> Self {
        Self::Pool(e)
    }
}

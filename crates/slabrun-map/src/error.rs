//! Error types for map operations.

use std::error::Error;
use std::fmt;

use slabrun_alloc::AllocError;

/// Errors from [`ChainedMap`](crate::ChainedMap) operations.
#[derive(Clone, Debug, PartialEq)]
pub enum MapError {
    /// `at`/`at_mut` found no entry for the key.
    KeyNotFound,
    /// A position did not name a live entry of this map.
    InvalidPosition,
    /// A configuration value was out of range.
    InvalidConfig {
        /// What was wrong.
        reason: String,
    },
    /// Storage for an entry or the bucket table could not be obtained.
    Alloc(AllocError),
}

impl From<AllocError> for MapError {
    fn from(err: AllocError) -> Self {
        Self::Alloc(err)
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyNotFound => write!(f, "key not found"),
            Self::InvalidPosition => write!(f, "position does not name a live entry"),
            Self::InvalidConfig { reason } => write!(f, "invalid map config: {reason}"),
            Self::Alloc(err) => write!(f, "map allocation failed: {err}"),
        }
    }
}

impl Error for MapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Alloc(err) => Some(err),
            _ => None,
        }
    }
}

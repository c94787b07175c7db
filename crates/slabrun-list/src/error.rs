//! Construction error types.

use std::error::Error;
use std::fmt;

use slabrun_alloc::AllocError;

/// Why a single element could not be created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstructError<E> {
    /// Storage for the node could not be obtained.
    Alloc(AllocError),
    /// The value constructor reported a failure.
    Value(E),
}

impl<E> From<AllocError> for ConstructError<E> {
    fn from(err: AllocError) -> Self {
        Self::Alloc(err)
    }
}

impl<E: fmt::Display> fmt::Display for ConstructError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alloc(err) => write!(f, "node allocation failed: {err}"),
            Self::Value(err) => write!(f, "value construction failed: {err}"),
        }
    }
}

impl<E: Error + 'static> Error for ConstructError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Alloc(err) => Some(err),
            Self::Value(err) => Some(err),
        }
    }
}

/// Failure of an all-or-nothing bulk construction.
///
/// By the time this is returned every element built so far has been
/// destroyed and its storage released; the list was never created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildError<E> {
    /// Number of elements that had been built when the failure occurred.
    pub constructed: usize,
    /// What failed while building element `constructed`.
    pub cause: ConstructError<E>,
}

impl<E: fmt::Display> fmt::Display for BuildError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "list construction rolled back after {} elements: {}",
            self.constructed, self.cause
        )
    }
}

impl<E: Error + 'static> Error for BuildError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

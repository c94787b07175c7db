//! Allocator error types.

use std::alloc::Layout;
use std::error::Error;
use std::fmt;

/// Errors that can occur while obtaining memory.
///
/// Allocation failures are never retried: the arena or heap has already
/// asked the system once and been refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The system allocator returned null for a slab or an oversized block.
    OutOfMemory {
        /// The layout that could not be satisfied.
        layout: Layout,
    },
    /// The requested size does not fit in `isize::MAX` bytes.
    CapacityOverflow,
}

impl AllocError {
    /// The layout that failed, if the failure came from the system allocator.
    pub fn layout(&self) -> Option<Layout> {
        match self {
            Self::OutOfMemory { layout } => Some(*layout),
            Self::CapacityOverflow => None,
        }
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory { layout } => {
                write!(
                    f,
                    "out of memory: failed to allocate {} bytes (align {})",
                    layout.size(),
                    layout.align()
                )
            }
            Self::CapacityOverflow => write!(f, "capacity overflow"),
        }
    }
}

impl Error for AllocError {}

/// Diverge on an allocation failure that the caller has no way to report.
///
/// Used by trait impls that cannot return a `Result` (`Clone`, `Extend`,
/// `FromIterator`). Mirrors what the standard collections do on OOM.
pub fn handle_alloc_failure(err: AllocError) -> ! {
    match err {
        AllocError::OutOfMemory { layout } => std::alloc::handle_alloc_error(layout),
        AllocError::CapacityOverflow => panic!("capacity overflow"),
    }
}

/// Errors from validating an [`ArenaConfig`](crate::ArenaConfig).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `blocks_per_slab` was zero, so no slab could ever hold a block.
    ZeroBlocksPerSlab,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroBlocksPerSlab => write!(f, "blocks_per_slab must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

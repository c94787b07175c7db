//! Arena configuration parameters.

use crate::error::ConfigError;

/// Configuration for a set of size-class arenas.
///
/// Controls how many blocks each arena carves out of the system allocator
/// when its free pool runs dry. Validated at registry construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Number of blocks allocated per slab.
    ///
    /// Default: 150. Must be at least 1.
    pub blocks_per_slab: usize,
}

impl ArenaConfig {
    /// Default number of blocks per slab.
    pub const DEFAULT_BLOCKS_PER_SLAB: usize = 150;

    /// Create a config with the given slab size (in blocks).
    pub fn new(blocks_per_slab: usize) -> Self {
        Self { blocks_per_slab }
    }

    /// Check that the configuration can produce non-empty slabs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blocks_per_slab == 0 {
            return Err(ConfigError::ZeroBlocksPerSlab);
        }
        Ok(())
    }

    /// Size in bytes of one slab for a class of `chunk_size` bytes.
    ///
    /// Returns `None` if the product overflows `usize`.
    pub fn slab_bytes(&self, chunk_size: usize) -> Option<usize> {
        chunk_size.checked_mul(self.blocks_per_slab)
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BLOCKS_PER_SLAB)
    }
}

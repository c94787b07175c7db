//! Fixed-size block arenas.
//!
//! An [`Arena`] hands out blocks of exactly one size. Blocks are carved from
//! slabs obtained from the system allocator; freed blocks go back to a free
//! pool and are reused before any new slab is requested. Slabs are never
//! returned to the system while the arena is alive.

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use tracing::{debug, trace};

use crate::config::ArenaConfig;
use crate::error::AllocError;
use crate::size_class::SLAB_ALIGN;

/// A pool of fixed-size blocks grown in slabs.
///
/// Invariant: every block address ever returned by [`allocate`](Arena::allocate)
/// is either in use by a caller, in the free pool, or was leaked by a
/// mismatched [`deallocate`](Arena::deallocate).
pub struct Arena {
    chunk_size: usize,
    config: ArenaConfig,
    /// Free blocks awaiting reuse. Popped from the back.
    pool: Vec<NonNull<u8>>,
    /// Base address of every slab this arena owns.
    slabs: Vec<NonNull<u8>>,
    /// Frees dropped because their size hint did not match `chunk_size`.
    dropped_frees: usize,
}

impl Arena {
    /// Create an empty arena for blocks of `chunk_size` bytes.
    ///
    /// No memory is requested until the first [`allocate`](Arena::allocate).
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn new(chunk_size: usize, config: &ArenaConfig) -> Self {
        assert!(chunk_size > 0, "arena chunk size must be non-zero");
        Self {
            chunk_size,
            config: ArenaConfig::new(config.blocks_per_slab.max(1)),
            pool: Vec::new(),
            slabs: Vec::new(),
            dropped_frees: 0,
        }
    }

    /// Block size served by this arena.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Take one uninitialized block, growing by a slab if the pool is empty.
    pub fn allocate(&mut self) -> Result<NonNull<u8>, AllocError> {
        if let Some(block) = self.pool.pop() {
            return Ok(block);
        }
        self.grow()?;
        self.pool.pop().ok_or(AllocError::CapacityOverflow)
    }

    /// Return a block to the pool.
    ///
    /// The block is recycled only when `size_hint == chunk_size`. Any other
    /// hint is ignored and the block is leaked: it stays inside its slab but
    /// is never handed out again.
    ///
    /// # Safety
    ///
    /// `block` must have been returned by [`allocate`](Arena::allocate) on
    /// this arena and must not be in use or already freed.
    pub unsafe fn deallocate(&mut self, block: NonNull<u8>, size_hint: usize) {
        if size_hint != self.chunk_size {
            self.dropped_frees += 1;
            trace!(
                chunk_size = self.chunk_size,
                size_hint,
                "dropping free with mismatched size"
            );
            return;
        }
        self.pool.push(block);
    }

    /// Current occupancy.
    pub fn stats(&self) -> ArenaStats {
        let capacity = self.slabs.len() * self.config.blocks_per_slab;
        ArenaStats {
            chunk_size: self.chunk_size,
            slabs: self.slabs.len(),
            capacity,
            free_blocks: self.pool.len(),
            in_use: capacity.saturating_sub(self.pool.len() + self.dropped_frees),
            dropped_frees: self.dropped_frees,
        }
    }

    fn slab_layout(&self) -> Result<Layout, AllocError> {
        let bytes = self
            .config
            .slab_bytes(self.chunk_size)
            .ok_or(AllocError::CapacityOverflow)?;
        Layout::from_size_align(bytes, SLAB_ALIGN).map_err(|_| AllocError::CapacityOverflow)
    }

    fn grow(&mut self) -> Result<(), AllocError> {
        let layout = self.slab_layout()?;
        // SAFETY: `layout` has non-zero size: chunk_size > 0 and
        // blocks_per_slab >= 1.
        let raw = unsafe { alloc::alloc(layout) };
        let base = NonNull::new(raw).ok_or(AllocError::OutOfMemory { layout })?;

        self.pool.reserve(self.config.blocks_per_slab);
        // Pushed in reverse so that pops walk the slab front to back.
        for i in (0..self.config.blocks_per_slab).rev() {
            // SAFETY: i * chunk_size < layout.size(), so the offset stays
            // inside the slab allocation.
            let block = unsafe { base.add(i * self.chunk_size) };
            self.pool.push(block);
        }
        self.slabs.push(base);

        debug!(
            chunk_size = self.chunk_size,
            slabs = self.slabs.len(),
            blocks = self.config.blocks_per_slab,
            "arena grew by one slab"
        );
        Ok(())
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        let Ok(layout) = self.slab_layout() else {
            return;
        };
        for slab in self.slabs.drain(..) {
            // SAFETY: every slab was allocated in `grow` with this exact layout.
            unsafe { alloc::dealloc(slab.as_ptr(), layout) };
        }
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("chunk_size", &self.chunk_size)
            .field("slabs", &self.slabs.len())
            .field("free_blocks", &self.pool.len())
            .finish()
    }
}

/// Snapshot of one arena's occupancy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Block size in bytes.
    pub chunk_size: usize,
    /// Number of slabs obtained from the system.
    pub slabs: usize,
    /// Total blocks across all slabs.
    pub capacity: usize,
    /// Blocks in the free pool.
    pub free_blocks: usize,
    /// Blocks currently handed out.
    pub in_use: usize,
    /// Blocks lost to mismatched frees.
    pub dropped_frees: usize,
}

impl ArenaStats {
    /// Bytes obtained from the system for this arena.
    pub fn reserved_bytes(&self) -> usize {
        self.capacity * self.chunk_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena(chunk: usize, blocks: usize) -> Arena {
        Arena::new(chunk, &ArenaConfig::new(blocks))
    }

    #[test]
    fn first_allocation_grows_one_slab() {
        let mut a = arena(16, 150);
        assert_eq!(a.stats().slabs, 0);
        let _block = a.allocate().unwrap();
        let stats = a.stats();
        assert_eq!(stats.slabs, 1);
        assert_eq!(stats.capacity, 150);
        assert_eq!(stats.free_blocks, 149);
        assert_eq!(stats.in_use, 1);
    }

    #[test]
    fn blocks_within_a_slab_are_contiguous() {
        let mut a = arena(24, 4);
        let first = a.allocate().unwrap().as_ptr() as usize;
        let second = a.allocate().unwrap().as_ptr() as usize;
        assert_eq!(second - first, 24);
        assert_eq!(first % 8, 0);
    }

    #[test]
    fn freed_block_is_reused_first() {
        let mut a = arena(4, 8);
        let block = a.allocate().unwrap();
        unsafe { a.deallocate(block, 4) };
        assert_eq!(a.allocate().unwrap(), block);
        assert_eq!(a.stats().slabs, 1);
    }

    #[test]
    fn exhausting_pool_adds_slab() {
        let mut a = arena(16, 2);
        a.allocate().unwrap();
        a.allocate().unwrap();
        a.allocate().unwrap();
        assert_eq!(a.stats().slabs, 2);
        assert_eq!(a.stats().in_use, 3);
    }

    #[test]
    fn mismatched_size_hint_is_dropped() {
        let mut a = arena(16, 2);
        let block = a.allocate().unwrap();
        unsafe { a.deallocate(block, 8) };
        let stats = a.stats();
        assert_eq!(stats.free_blocks, 1);
        assert_eq!(stats.dropped_frees, 1);
        assert_eq!(stats.in_use, 0);
        // The leaked block is never handed out again.
        let next = a.allocate().unwrap();
        assert_ne!(next, block);
    }

    #[test]
    fn written_blocks_do_not_overlap() {
        let mut a = arena(4, 16);
        let blocks: Vec<_> = (0..16).map(|_| a.allocate().unwrap()).collect();
        for (i, b) in blocks.iter().enumerate() {
            unsafe { b.cast::<u32>().as_ptr().write(i as u32) };
        }
        for (i, b) in blocks.iter().enumerate() {
            assert_eq!(unsafe { b.cast::<u32>().as_ptr().read() }, i as u32);
        }
    }

    #[test]
    fn oversized_slab_is_capacity_overflow() {
        let mut a = arena(16, usize::MAX);
        assert_eq!(a.allocate(), Err(AllocError::CapacityOverflow));
        assert_eq!(a.stats().slabs, 0);
    }

    #[test]
    fn reserved_bytes_counts_whole_slabs() {
        let mut a = arena(24, 150);
        a.allocate().unwrap();
        assert_eq!(a.stats().reserved_bytes(), 3600);
    }
}

//! The set of arenas behind one allocator.
//!
//! An [`ArenaRegistry`] owns one [`Arena`] per [`SizeClass`] and routes each
//! request by its layout. It uses interior mutability so that allocators can
//! share it by reference; it is not `Sync`.

use std::alloc::Layout;
use std::cell::{Cell, RefCell};
use std::ptr::NonNull;

use smallvec::SmallVec;
use tracing::trace;

use crate::arena::{Arena, ArenaStats};
use crate::config::ArenaConfig;
use crate::error::{AllocError, ConfigError};
use crate::size_class::{Route, SizeClass};

/// One arena per size class plus the heap fallback.
///
/// Dropping a registry releases all of its slabs. Containers that borrow a
/// registry through [`RegistryRef`](crate::RegistryRef) cannot outlive it.
pub struct ArenaRegistry {
    arenas: [RefCell<Arena>; SizeClass::COUNT],
    /// Oversized blocks currently live on the heap.
    heap_live: Cell<usize>,
}

impl ArenaRegistry {
    /// Create a registry with the default slab size.
    pub fn new() -> Self {
        Self::build(&ArenaConfig::default())
    }

    /// Create a registry with a validated config.
    pub fn with_config(config: ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(&config))
    }

    fn build(config: &ArenaConfig) -> Self {
        Self {
            arenas: SizeClass::ALL.map(|class| RefCell::new(Arena::new(class.chunk_size(), config))),
            heap_live: Cell::new(0),
        }
    }

    /// Allocate a block satisfying `layout`.
    pub fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        match Route::for_layout(layout) {
            Route::Pooled(class) => self.arenas[class.index()].borrow_mut().allocate(),
            Route::Heap => {
                trace!(size = layout.size(), align = layout.align(), "heap fallback");
                let block = heap_allocate(layout)?;
                self.heap_live.set(self.heap_live.get() + 1);
                Ok(block)
            }
        }
    }

    /// Release a block.
    ///
    /// # Safety
    ///
    /// `block` must have been returned by [`allocate`](Self::allocate) on
    /// this registry with the same `layout`, and not released since.
    pub unsafe fn deallocate(&self, block: NonNull<u8>, layout: Layout) {
        match Route::for_layout(layout) {
            Route::Pooled(class) => {
                // SAFETY: the caller guarantees `block` came from this
                // registry with `layout`, which routes to the same arena.
                unsafe {
                    self.arenas[class.index()]
                        .borrow_mut()
                        .deallocate(block, class.chunk_size())
                }
            }
            Route::Heap => {
                // SAFETY: forwarded caller guarantee.
                unsafe { heap_deallocate(block, layout) };
                self.heap_live.set(self.heap_live.get().saturating_sub(1));
            }
        }
    }

    /// Occupancy of every arena, smallest class first.
    pub fn stats(&self) -> SmallVec<[ArenaStats; SizeClass::COUNT]> {
        self.arenas.iter().map(|arena| arena.borrow().stats()).collect()
    }

    /// Occupancy of one arena.
    pub fn arena_stats(&self, class: SizeClass) -> ArenaStats {
        self.arenas[class.index()].borrow().stats()
    }

    /// Number of oversized blocks currently live on the heap.
    pub fn heap_allocations(&self) -> usize {
        self.heap_live.get()
    }

    /// Total slabs across all arenas.
    pub fn slab_count(&self) -> usize {
        self.stats().iter().map(|s| s.slabs).sum()
    }
}

impl Default for ArenaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ArenaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArenaRegistry")
            .field("arenas", &self.stats())
            .field("heap_live", &self.heap_live.get())
            .finish()
    }
}

/// Allocate from the global heap. Zero-sized layouts get a dangling,
/// well-aligned pointer.
pub(crate) fn heap_allocate(layout: Layout) -> Result<NonNull<u8>, AllocError> {
    if layout.size() == 0 {
        let dangling = std::ptr::without_provenance_mut::<u8>(layout.align());
        return NonNull::new(dangling).ok_or(AllocError::CapacityOverflow);
    }
    // SAFETY: layout has non-zero size.
    let raw = unsafe { std::alloc::alloc(layout) };
    NonNull::new(raw).ok_or(AllocError::OutOfMemory { layout })
}

/// # Safety
///
/// `block` must come from [`heap_allocate`] with the same `layout`.
pub(crate) unsafe fn heap_deallocate(block: NonNull<u8>, layout: Layout) {
    if layout.size() == 0 {
        return;
    }
    // SAFETY: forwarded caller guarantee.
    unsafe { std::alloc::dealloc(block.as_ptr(), layout) }
}

//! The allocator seam used by slabrun collections.
//!
//! Collections are generic over [`Allocator`]. Three implementations ship
//! here:
//!
//! - [`PoolAllocator`]: zero-sized, backed by a per-thread
//!   [`ArenaRegistry`] that lives until the process exits.
//! - [`RegistryRef`]: borrows an explicit registry.
//! - [`Heap`]: the global allocator, no pooling.

use std::alloc::Layout;
use std::mem::ManuallyDrop;
use std::ptr::{self, NonNull};

use smallvec::SmallVec;

use crate::arena::ArenaStats;
use crate::error::AllocError;
use crate::registry::{heap_allocate, heap_deallocate, ArenaRegistry};
use crate::size_class::SizeClass;

/// A source of raw memory blocks.
///
/// Equality means "blocks from one may be released through the other".
/// Containers compare allocators before moving nodes between each other.
pub trait Allocator: Clone + PartialEq {
    /// Allocate an uninitialized block for `layout`.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Release a block.
    ///
    /// # Safety
    ///
    /// `block` must have been returned by `allocate` on an allocator equal
    /// to `self`, with the same `layout`, and not released since.
    unsafe fn deallocate(&self, block: NonNull<u8>, layout: Layout);

    /// Allocate storage for one `T`.
    fn allocate_one<T>(&self) -> Result<NonNull<T>, AllocError> {
        self.allocate(Layout::new::<T>()).map(NonNull::cast)
    }

    /// Release storage obtained from [`allocate_one`](Self::allocate_one).
    ///
    /// # Safety
    ///
    /// Same contract as [`deallocate`](Self::deallocate) with
    /// `Layout::new::<T>()`. The pointee is not dropped.
    unsafe fn deallocate_one<T>(&self, ptr: NonNull<T>) {
        // SAFETY: forwarded caller guarantee.
        unsafe { self.deallocate(ptr.cast(), Layout::new::<T>()) }
    }

    /// Allocate storage for `count` contiguous `T`s.
    fn allocate_array<T>(&self, count: usize) -> Result<NonNull<T>, AllocError> {
        let layout = Layout::array::<T>(count).map_err(|_| AllocError::CapacityOverflow)?;
        self.allocate(layout).map(NonNull::cast)
    }

    /// Release storage obtained from [`allocate_array`](Self::allocate_array).
    ///
    /// # Safety
    ///
    /// `ptr` and `count` must match a prior `allocate_array` call on an
    /// equal allocator. The pointees are not dropped.
    unsafe fn deallocate_array<T>(&self, ptr: NonNull<T>, count: usize) {
        // The layout was valid when the block was allocated.
        if let Ok(layout) = Layout::array::<T>(count) {
            // SAFETY: forwarded caller guarantee.
            unsafe { self.deallocate(ptr.cast(), layout) }
        }
    }
}

thread_local! {
    // Never dropped: slabs handed out on this thread stay valid until the
    // process exits, even when a block is freed after thread teardown has
    // started or from another thread.
    static THREAD_REGISTRY: ManuallyDrop<ArenaRegistry> = ManuallyDrop::new(ArenaRegistry::new());
}

/// Stateless pooling allocator.
///
/// Every instance routes through the calling thread's registry, so all
/// instances compare equal. A block freed on a different thread than the one
/// that allocated it joins the freeing thread's pool; since slabs are never
/// released this is memory-safe, it only moves capacity between threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct PoolAllocator;

impl PoolAllocator {
    /// Occupancy of the calling thread's arenas.
    pub fn stats() -> SmallVec<[ArenaStats; SizeClass::COUNT]> {
        THREAD_REGISTRY.with(|registry| registry.stats())
    }

    /// Occupancy of one of the calling thread's arenas.
    pub fn arena_stats(class: SizeClass) -> ArenaStats {
        THREAD_REGISTRY.with(|registry| registry.arena_stats(class))
    }
}

impl PartialEq for PoolAllocator {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for PoolAllocator {}

impl Allocator for PoolAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        THREAD_REGISTRY.with(|registry| registry.allocate(layout))
    }

    unsafe fn deallocate(&self, block: NonNull<u8>, layout: Layout) {
        // SAFETY: all PoolAllocators are equal and slabs are never released,
        // so any thread's registry may take the block back.
        THREAD_REGISTRY.with(|registry| unsafe { registry.deallocate(block, layout) })
    }
}

/// Allocator borrowing an explicit [`ArenaRegistry`].
///
/// Two `RegistryRef`s are equal only when they borrow the same registry.
#[derive(Clone, Copy, Debug)]
pub struct RegistryRef<'r> {
    registry: &'r ArenaRegistry,
}

impl<'r> RegistryRef<'r> {
    /// Borrow `registry` as an allocator.
    pub fn new(registry: &'r ArenaRegistry) -> Self {
        Self { registry }
    }

    /// The borrowed registry.
    pub fn registry(&self) -> &'r ArenaRegistry {
        self.registry
    }
}

impl PartialEq for RegistryRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.registry, other.registry)
    }
}

impl Eq for RegistryRef<'_> {}

impl Allocator for RegistryRef<'_> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        self.registry.allocate(layout)
    }

    unsafe fn deallocate(&self, block: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller guarantee; equal RegistryRefs share the
        // registry.
        unsafe { self.registry.deallocate(block, layout) }
    }
}

/// The global heap, without pooling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Heap;

impl Allocator for Heap {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        heap_allocate(layout)
    }

    unsafe fn deallocate(&self, block: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller guarantee.
        unsafe { heap_deallocate(block, layout) }
    }
}

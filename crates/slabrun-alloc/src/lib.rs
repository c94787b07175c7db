//! Fixed size-class pooling allocator for slabrun collections.
//!
//! Small allocations are served from per-size-class arenas that grow in
//! slabs and recycle freed blocks; anything larger than the biggest class
//! goes straight to the global heap.
//!
//! # Architecture
//!
//! ```text
//! PoolAllocator (zero-sized, all instances equal)
//! └── per-thread ArenaRegistry (never dropped, process-lifetime slabs)
//!     ├── Arena(4B)  → pool: [free blocks], slabs: [150 × 4B, ...]
//!     ├── Arena(16B) → pool: [...],        slabs: [150 × 16B, ...]
//!     ├── Arena(24B) → pool: [...],        slabs: [150 × 24B, ...]
//!     └── heap fallback (≥ 25 bytes, unpooled)
//! ```
//!
//! An [`ArenaRegistry`] can also be created explicitly and borrowed through
//! [`RegistryRef`]; in that case the registry's slabs are released when it
//! is dropped, and the borrow keeps every container that uses it from
//! outliving it.
//!
//! # Threading
//!
//! Arenas are not synchronized. [`PoolAllocator`] keeps one registry per
//! thread, so no free list is ever shared between threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod allocator;
pub mod arena;
pub mod config;
pub mod error;
pub mod registry;
pub mod size_class;

pub use allocator::{Allocator, Heap, PoolAllocator, RegistryRef};
pub use arena::{Arena, ArenaStats};
pub use config::ArenaConfig;
pub use error::{handle_alloc_failure, AllocError, ConfigError};
pub use registry::ArenaRegistry;
pub use size_class::{Route, SizeClass};

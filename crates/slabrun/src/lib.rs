//! slabrun: a pooling size-class allocator, an allocator-aware linked list,
//! and a hash map that keeps all of its entries in one list.
//!
//! This is the facade crate re-exporting the public API of the slabrun
//! sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use slabrun::prelude::*;
//!
//! let mut map: ChainedMap<u32, &str> = ChainedMap::new();
//! map.insert(1, "one").unwrap();
//! map.insert(2, "two").unwrap();
//! assert_eq!(map.at(&1), Ok(&"one"));
//! assert_eq!(map.at(&3), Err(MapError::KeyNotFound));
//!
//! let mut list: List<u32> = (0..3).collect();
//! let mut other: List<u32> = List::new();
//! {
//!     let mut src = list.cursor_front_mut();
//!     let mut dst = other.cursor_end_mut();
//!     dst.splice_before(&mut src);
//! }
//! assert_eq!(list.len(), 2);
//! assert_eq!(other.front(), Some(&0));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`alloc`] | `slabrun-alloc` | Size classes, arenas, registries, the `Allocator` trait |
//! | [`list`] | `slabrun-list` | `List`, positions, cursors, construction errors |
//! | [`map`] | `slabrun-map` | `ChainedMap`, map positions, config and errors |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Size classes, per-class arenas and the allocator seam (`slabrun-alloc`).
///
/// [`alloc::PoolAllocator`] is the default allocator of every collection;
/// [`alloc::RegistryRef`] lends an explicit [`alloc::ArenaRegistry`].
pub use slabrun_alloc as alloc;

/// Doubly linked list with O(1) splice (`slabrun-list`).
pub use slabrun_list as list;

/// Separate-chaining hash map over one shared list (`slabrun-map`).
pub use slabrun_map as map;

/// Common imports for typical slabrun usage.
///
/// ```rust
/// use slabrun::prelude::*;
/// ```
pub mod prelude {
    // Allocation
    pub use slabrun_alloc::{AllocError, Allocator, ArenaRegistry, Heap, PoolAllocator, RegistryRef};

    // List
    pub use slabrun_list::{BuildError, ConstructError, Cursor, CursorMut, List};

    // Map
    pub use slabrun_map::{ChainedMap, MapConfig, MapError};
}

//! Allocator-aware doubly linked list with O(1) splice.
//!
//! [`List`] is a circular doubly linked list anchored by a sentinel node.
//! Every node, and the sentinel itself, is obtained from the list's
//! [`Allocator`](slabrun_alloc::Allocator), which defaults to the pooling
//! [`PoolAllocator`](slabrun_alloc::PoolAllocator).
//!
//! # Layout
//!
//! ```text
//!        ┌────────────────────────────────────────────┐
//!        ▼                                            │
//!   [sentinel] ⇄ [node 0] ⇄ [node 1] ⇄ ... ⇄ [node n-1]
//!     end()       begin()
//! ```
//!
//! # Positions
//!
//! A [`Position`] names one node (or the sentinel, which doubles as
//! `end()`). Positions are non-owning and stay valid until the node they
//! name is erased; inserting or erasing elsewhere, or splicing the node
//! into another list, does not invalidate them. Because the list cannot
//! check that a position is still valid, operations taking a raw
//! `Position` are `unsafe`. [`CursorMut`] offers the same operations
//! safely while it borrows the list.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod cursor;
pub mod error;
pub mod iter;
pub mod list;
mod node;

pub use cursor::{Cursor, CursorMut};
pub use error::{BuildError, ConstructError};
pub use iter::{IntoIter, Iter, IterMut};
pub use list::List;
pub use node::Position;

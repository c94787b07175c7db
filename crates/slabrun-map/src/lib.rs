//! Separate-chaining hash map over a single shared entry list.
//!
//! [`ChainedMap`] keeps every entry in one
//! [`List`](slabrun_list::List) and a table of bucket starts: slot `i`
//! holds the position of the first entry of bucket `i`, or the list's end
//! when the bucket is empty. Each bucket is a contiguous run of the list.
//!
//! ```text
//!   buckets:  [0]──┐   [1]=end   [2]──────────┐
//!                  ▼                         ▼
//!   entries:  (k0a) (k0b) (k0c)   ...       (k2a) (k2b)   [end]
//!             └─ bucket 0 run ─┘            └─ run 2 ─┘
//! ```
//!
//! Entries carry their key's full hash, so scans and rehashes never call
//! the hasher on stored keys. Rehashing splices entries into a fresh list,
//! so entries are never reallocated and [`Position`]s stay valid across
//! growth.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod config;
pub mod error;
pub mod iter;
pub mod map;
pub mod position;

pub use config::MapConfig;
pub use error::MapError;
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use map::ChainedMap;
pub use position::Position;

//! Test fixtures for slabrun development.
//!
//! - [`DropCounter`] hands out [`Tracked`] values and counts their drops.
//! - [`FailAt`] makes the n-th construction attempt fail.
//! - [`FailingAllocator`] refuses allocations once its budget is spent.
//! - [`CollidingState`] and [`IdentityState`] are `BuildHasher`s that force
//!   bucket collisions or make bucket placement predictable.
//! - [`MapModel`] is an insertion-ordered reference map for property tests.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod allocator;
mod fixtures;
mod hashers;
mod model;

pub use allocator::FailingAllocator;
pub use fixtures::{DropCounter, FailAt, Failed, Tracked};
pub use hashers::{CollidingState, ConstantHasher, IdentityHasher, IdentityState};
pub use model::MapModel;

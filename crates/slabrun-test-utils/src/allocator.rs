//! An allocator that runs out on cue.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;
use std::rc::Rc;

use slabrun_alloc::{AllocError, Allocator, Heap};

#[derive(Debug, Default)]
struct Budget {
    /// `None` means unlimited.
    remaining: Cell<Option<usize>>,
    live: Cell<usize>,
    refused: Cell<usize>,
}

/// Heap-backed allocator that lets a fixed number of allocations through
/// and refuses every one after that.
///
/// Clones share one budget and compare equal. Separately created instances
/// never compare equal.
#[derive(Clone, Debug)]
pub struct FailingAllocator {
    budget: Rc<Budget>,
}

impl FailingAllocator {
    /// `allowed` allocations succeed, then every request is refused.
    pub fn new(allowed: usize) -> Self {
        let alloc = Self::unlimited();
        alloc.refuse_after(allowed);
        alloc
    }

    /// Never refuses until [`refuse_after`](Self::refuse_after) is called.
    pub fn unlimited() -> Self {
        Self {
            budget: Rc::default(),
        }
    }

    /// Resets the budget: `allowed` more allocations succeed.
    pub fn refuse_after(&self, allowed: usize) {
        self.budget.remaining.set(Some(allowed));
    }

    /// Lifts the budget.
    pub fn allow_all(&self) {
        self.budget.remaining.set(None);
    }

    /// Blocks handed out and not yet released.
    pub fn live(&self) -> usize {
        self.budget.live.get()
    }

    /// Requests refused so far.
    pub fn refused(&self) -> usize {
        self.budget.refused.get()
    }
}

impl PartialEq for FailingAllocator {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.budget, &other.budget)
    }
}

impl Allocator for FailingAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        match self.budget.remaining.get() {
            Some(0) => {
                self.budget.refused.set(self.budget.refused.get() + 1);
                return Err(AllocError::OutOfMemory { layout });
            }
            Some(n) => self.budget.remaining.set(Some(n - 1)),
            None => {}
        }
        let block = Heap.allocate(layout)?;
        self.budget.live.set(self.budget.live.get() + 1);
        Ok(block)
    }

    unsafe fn deallocate(&self, block: NonNull<u8>, layout: Layout) {
        self.budget.live.set(self.budget.live.get() - 1);
        // SAFETY: every block handed out came from `Heap` with `layout`.
        unsafe { Heap.deallocate(block, layout) }
    }
}

//! Borrowing and owning iterators.

use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use slabrun_alloc::{Allocator, PoolAllocator};

use crate::list::List;
use crate::node::{Links, Node};

/// Shared iterator, front to back and back to front.
pub struct Iter<'a, T> {
    head: NonNull<Links>,
    tail: NonNull<Links>,
    remaining: usize,
    _marker: PhantomData<&'a Node<T>>,
}

impl<T> Iter<'_, T> {
    /// # Safety
    ///
    /// `head..=tail` must be `remaining` element nodes of a list borrowed
    /// for the iterator's lifetime.
    pub(crate) unsafe fn new(head: NonNull<Links>, tail: NonNull<Links>, remaining: usize) -> Self {
        Self {
            head,
            tail,
            remaining,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let node = self.head;
        // SAFETY: `node` is within the live range promised to `new`.
        unsafe {
            self.head = Links::next_of(node);
            Some(Node::value(node))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let node = self.tail;
        // SAFETY: as `next`.
        unsafe {
            self.tail = Links::prev_of(node);
            Some(Node::value(node))
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Exclusive iterator.
pub struct IterMut<'a, T> {
    head: NonNull<Links>,
    tail: NonNull<Links>,
    remaining: usize,
    _marker: PhantomData<&'a mut Node<T>>,
}

impl<T> IterMut<'_, T> {
    /// # Safety
    ///
    /// As [`Iter::new`], with the list borrowed exclusively.
    pub(crate) unsafe fn new(head: NonNull<Links>, tail: NonNull<Links>, remaining: usize) -> Self {
        Self {
            head,
            tail,
            remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let node = self.head;
        // SAFETY: each node is yielded at most once, so the mutable
        // references never alias.
        unsafe {
            self.head = Links::next_of(node);
            Some(Node::value_mut(node))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let node = self.tail;
        // SAFETY: as `next`.
        unsafe {
            self.tail = Links::prev_of(node);
            Some(Node::value_mut(node))
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator; unconsumed elements are dropped with it.
pub struct IntoIter<T, A: Allocator = PoolAllocator> {
    list: List<T, A>,
}

impl<T, A: Allocator> IntoIter<T, A> {
    pub(crate) fn new(list: List<T, A>) -> Self {
        Self { list }
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

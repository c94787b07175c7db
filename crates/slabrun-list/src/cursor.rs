//! Cursors: safe position-based traversal and editing.
//!
//! A cursor rests on an element or on the end ("ghost") position. Moving
//! past either end lands on the ghost; moving again wraps around.

use std::ptr::NonNull;

use slabrun_alloc::{AllocError, Allocator, PoolAllocator};

use crate::error::ConstructError;
use crate::list::List;
use crate::node::{Links, Node, Position};

/// Read-only cursor over a [`List`].
pub struct Cursor<'a, T, A: Allocator = PoolAllocator> {
    list: &'a List<T, A>,
    current: NonNull<Links>,
}

impl<T, A: Allocator> Clone for Cursor<'_, T, A> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            current: self.current,
        }
    }
}

impl<'a, T, A: Allocator> Cursor<'a, T, A> {
    pub(crate) fn new(list: &'a List<T, A>, current: NonNull<Links>) -> Self {
        Self { list, current }
    }

    /// Element under the cursor, `None` on the ghost.
    pub fn current(&self) -> Option<&'a T> {
        if self.current == self.list.sentinel() {
            return None;
        }
        // SAFETY: `current` is an element node of the borrowed list.
        Some(unsafe { Node::value(self.current) })
    }

    /// Position under the cursor.
    pub fn position(&self) -> Position<T> {
        Position::new(self.current)
    }

    /// Step toward the back.
    pub fn move_next(&mut self) {
        // SAFETY: `current` is live while the list is borrowed.
        self.current = unsafe { Links::next_of(self.current) };
    }

    /// Step toward the front.
    pub fn move_prev(&mut self) {
        // SAFETY: as `move_next`.
        self.current = unsafe { Links::prev_of(self.current) };
    }

    /// Element after the cursor without moving.
    pub fn peek_next(&self) -> Option<&'a T> {
        let mut ahead = self.clone();
        ahead.move_next();
        ahead.current()
    }

    /// Element before the cursor without moving.
    pub fn peek_prev(&self) -> Option<&'a T> {
        let mut behind = self.clone();
        behind.move_prev();
        behind.current()
    }
}

/// Editing cursor over a [`List`].
///
/// Holds the list mutably, so every edit it makes is checked by the borrow
/// checker rather than by the caller.
pub struct CursorMut<'a, T, A: Allocator = PoolAllocator> {
    list: &'a mut List<T, A>,
    current: NonNull<Links>,
}

impl<'a, T, A: Allocator> CursorMut<'a, T, A> {
    pub(crate) fn new(list: &'a mut List<T, A>, current: NonNull<Links>) -> Self {
        Self { list, current }
    }

    fn at_ghost(&self) -> bool {
        self.current == self.list.sentinel()
    }

    /// Element under the cursor, `None` on the ghost.
    pub fn current(&mut self) -> Option<&mut T> {
        if self.at_ghost() {
            return None;
        }
        // SAFETY: element node of the exclusively borrowed list.
        Some(unsafe { Node::value_mut(self.current) })
    }

    /// Position under the cursor.
    pub fn position(&self) -> Position<T> {
        Position::new(self.current)
    }

    /// The list being edited.
    pub fn as_list(&self) -> &List<T, A> {
        self.list
    }

    /// Step toward the back.
    pub fn move_next(&mut self) {
        // SAFETY: `current` is live while the list is borrowed.
        self.current = unsafe { Links::next_of(self.current) };
    }

    /// Step toward the front.
    pub fn move_prev(&mut self) {
        // SAFETY: as `move_next`.
        self.current = unsafe { Links::prev_of(self.current) };
    }

    /// Element after the cursor without moving.
    pub fn peek_next(&mut self) -> Option<&mut T> {
        // SAFETY: live neighbour of a live node.
        let next = unsafe { Links::next_of(self.current) };
        if next == self.list.sentinel() {
            return None;
        }
        // SAFETY: element node of the exclusively borrowed list.
        Some(unsafe { Node::value_mut(next) })
    }

    /// Element before the cursor without moving.
    pub fn peek_prev(&mut self) -> Option<&mut T> {
        // SAFETY: live neighbour of a live node.
        let prev = unsafe { Links::prev_of(self.current) };
        if prev == self.list.sentinel() {
            return None;
        }
        // SAFETY: element node of the exclusively borrowed list.
        Some(unsafe { Node::value_mut(prev) })
    }

    /// Insert before the cursor; the cursor stays put.
    pub fn insert_before(&mut self, value: T) -> Result<Position<T>, AllocError> {
        // SAFETY: `current` is a position of the borrowed list.
        unsafe { self.list.insert(self.position(), value) }
    }

    /// Insert after the cursor; the cursor stays put.
    pub fn insert_after(&mut self, value: T) -> Result<Position<T>, AllocError> {
        // SAFETY: the successor is a position of the borrowed list.
        unsafe {
            let after = self.list.next(self.position());
            self.list.insert(after, value)
        }
    }

    /// Construct in place before the cursor; see [`List::emplace`].
    pub fn emplace_before<E, F>(&mut self, make: F) -> Result<Position<T>, ConstructError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        // SAFETY: `current` is a position of the borrowed list.
        unsafe { self.list.emplace(self.position(), make) }
    }

    /// Remove the element under the cursor and advance to its successor.
    /// Returns `None` on the ghost.
    pub fn remove_current(&mut self) -> Option<T> {
        if self.at_ghost() {
            return None;
        }
        // SAFETY: element node of the borrowed list.
        let (value, next) = unsafe { self.list.remove(self.position()) };
        self.current = next.link;
        Some(value)
    }

    /// Take the element under `source` out of its list and link it before
    /// this cursor; `source` advances to its successor.
    ///
    /// Returns `false`, changing nothing, if `source` is on its ghost.
    ///
    /// # Panics
    ///
    /// Panics if the two lists' allocators are not equal.
    pub fn splice_before(&mut self, source: &mut CursorMut<'_, T, A>) -> bool {
        if source.at_ghost() {
            return false;
        }
        let moving = source.position();
        // SAFETY: `moving` is an element of `source.list`, the target a
        // position of `self.list`; the two `&mut` borrows make them distinct
        // lists.
        unsafe {
            source.current = Links::next_of(moving.link);
            self.list.splice(self.position(), source.list, moving);
        }
        true
    }
}

//! The list itself: construction, element access and position-based editing.

use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use slabrun_alloc::{handle_alloc_failure, AllocError, Allocator, PoolAllocator};

use crate::cursor::{Cursor, CursorMut};
use crate::error::{BuildError, ConstructError};
use crate::iter::{IntoIter, Iter, IterMut};
use crate::node::{Links, Node, Position};

/// A circular doubly linked list with a sentinel, allocating through `A`.
///
/// All element storage and the sentinel come from the list's allocator
/// instance. Two lists may exchange nodes with [`splice`](List::splice) or
/// [`append`](List::append) only when their allocators compare equal.
pub struct List<T, A: Allocator = PoolAllocator> {
    sentinel: NonNull<Links>,
    len: usize,
    alloc: A,
    _marker: PhantomData<Box<Node<T>>>,
}

// SAFETY: the list owns its nodes exclusively; sending it sends the `T`s
// and the allocator handle with it.
unsafe impl<T: Send, A: Allocator + Send> Send for List<T, A> {}

// SAFETY: shared access only hands out `&T` and `&A`.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for List<T, A> {}

/// Releases node storage if value construction fails or unwinds.
struct UninitNode<'a, T, A: Allocator> {
    alloc: &'a A,
    node: NonNull<Node<T>>,
}

impl<T, A: Allocator> Drop for UninitNode<'_, T, A> {
    fn drop(&mut self) {
        // SAFETY: the node came from `alloc` and holds no value yet.
        unsafe { self.alloc.deallocate_one(self.node) };
    }
}

fn alloc_only(err: ConstructError<Infallible>) -> AllocError {
    match err {
        ConstructError::Alloc(err) => err,
        ConstructError::Value(never) => match never {},
    }
}

impl<T> List<T, PoolAllocator> {
    /// Creates an empty list on this thread's pooling allocator.
    pub fn new() -> Self {
        Self::new_in(PoolAllocator)
    }
}

impl<T, A: Allocator> List<T, A> {
    /// Creates an empty list, reporting sentinel allocation failure.
    pub fn try_new_in(alloc: A) -> Result<Self, AllocError> {
        let sentinel = alloc.allocate_one::<Links>()?;
        // SAFETY: freshly allocated, correctly sized and aligned for `Links`.
        unsafe {
            sentinel.as_ptr().write(Links {
                next: sentinel,
                prev: sentinel,
            });
        }
        Ok(Self {
            sentinel,
            len: 0,
            alloc,
            _marker: PhantomData,
        })
    }

    /// Creates an empty list.
    ///
    /// # Panics
    ///
    /// Diverges through [`handle_alloc_failure`] if the sentinel cannot be
    /// allocated.
    pub fn new_in(alloc: A) -> Self {
        Self::try_new_in(alloc).unwrap_or_else(|err| handle_alloc_failure(err))
    }

    /// Builds a list of `count` elements, element `i` produced by
    /// `make(i)`.
    ///
    /// All or nothing: on any failure the elements already built are
    /// destroyed in reverse order, all storage is released, and the error
    /// reports how far construction got.
    pub fn try_from_fn_in<E, F>(count: usize, mut make: F, alloc: A) -> Result<Self, BuildError<E>>
    where
        F: FnMut(usize) -> Result<T, E>,
    {
        let mut list = Self::try_new_in(alloc).map_err(|err| BuildError {
            constructed: 0,
            cause: ConstructError::Alloc(err),
        })?;
        for i in 0..count {
            let end = list.end();
            // SAFETY: `end` belongs to `list`.
            if let Err(cause) = unsafe { list.emplace(end, || make(i)) } {
                let constructed = list.len;
                list.clear_reverse();
                return Err(BuildError { constructed, cause });
            }
        }
        Ok(list)
    }

    /// Builds a list of `count` clones of `value`.
    pub fn from_elem_in(count: usize, value: &T, alloc: A) -> Result<Self, BuildError<Infallible>>
    where
        T: Clone,
    {
        Self::try_from_fn_in(count, |_| Ok(value.clone()), alloc)
    }

    /// Builds a list of `count` default values.
    pub fn with_default_in(count: usize, alloc: A) -> Result<Self, BuildError<Infallible>>
    where
        T: Default,
    {
        Self::try_from_fn_in(count, |_| Ok(T::default()), alloc)
    }

    /// Builds a list from an iterator, rolling back on allocation failure.
    pub fn try_from_iter_in<I>(iter: I, alloc: A) -> Result<Self, AllocError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = Self::try_new_in(alloc)?;
        for value in iter {
            if let Err(err) = list.push_back(value) {
                list.clear_reverse();
                return Err(err);
            }
        }
        Ok(list)
    }

    /// Deep copy on a clone of this list's allocator.
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        Self::try_from_iter_in(self.iter().cloned(), self.alloc.clone())
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The allocator instance this list was built with.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// First element.
    pub fn front(&self) -> Option<&T> {
        // SAFETY: begin is a node of this list or the end.
        unsafe { self.get(self.begin()) }
    }

    /// First element, mutably.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let begin = self.begin();
        // SAFETY: as `front`.
        unsafe { self.get_mut(begin) }
    }

    /// Last element.
    pub fn back(&self) -> Option<&T> {
        // SAFETY: the end belongs to this list.
        unsafe { self.get(self.prev(self.end())) }
    }

    /// Last element, mutably.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        // SAFETY: as `back`.
        unsafe {
            let last = self.prev(self.end());
            self.get_mut(last)
        }
    }

    /// Whether any element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Inserts at the front.
    pub fn push_front(&mut self, value: T) -> Result<(), AllocError> {
        let begin = self.begin();
        // SAFETY: begin belongs to this list.
        unsafe { self.insert(begin, value) }.map(|_| ())
    }

    /// Inserts at the back.
    pub fn push_back(&mut self, value: T) -> Result<(), AllocError> {
        let end = self.end();
        // SAFETY: end belongs to this list.
        unsafe { self.insert(end, value) }.map(|_| ())
    }

    /// Removes the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let begin = self.begin();
        // SAFETY: non-empty, so begin is an element node of this list.
        Some(unsafe { self.remove(begin) }.0)
    }

    /// Removes the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: non-empty, so prev(end) is an element node of this list.
        unsafe {
            let last = self.prev(self.end());
            Some(self.remove(last).0)
        }
    }

    /// Destroys every element front to back; the list stays usable.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    fn clear_reverse(&mut self) {
        while self.pop_back().is_some() {}
    }

    /// Moves every element of `other` to the back of `self` in O(1).
    ///
    /// # Panics
    ///
    /// Panics if the two allocators are not equal.
    pub fn append(&mut self, other: &mut Self) {
        assert!(
            self.alloc == other.alloc,
            "cannot append lists with unequal allocators"
        );
        if other.is_empty() {
            return;
        }
        // SAFETY: both rings are well formed; the chain first..=last is
        // detached from `other` and re-linked before our sentinel.
        unsafe {
            let first = Links::next_of(other.sentinel);
            let last = Links::prev_of(other.sentinel);
            (*other.sentinel.as_ptr()).next = other.sentinel;
            (*other.sentinel.as_ptr()).prev = other.sentinel;

            let tail = Links::prev_of(self.sentinel);
            (*tail.as_ptr()).next = first;
            (*first.as_ptr()).prev = tail;
            (*last.as_ptr()).next = self.sentinel;
            (*self.sentinel.as_ptr()).prev = last;
        }
        self.len += mem::take(&mut other.len);
    }

    // ── Positions ───────────────────────────────────────────────────

    /// Position of the first element, or [`end`](List::end) when empty.
    pub fn begin(&self) -> Position<T> {
        // SAFETY: the sentinel is always live.
        Position::new(unsafe { Links::next_of(self.sentinel) })
    }

    /// One-past-the-last position (the sentinel).
    pub fn end(&self) -> Position<T> {
        Position::new(self.sentinel)
    }

    /// Element at `pos`, or `None` for the end.
    ///
    /// # Safety
    ///
    /// `pos` must be a valid position of this list.
    pub unsafe fn get(&self, pos: Position<T>) -> Option<&T> {
        if pos.link == self.sentinel {
            return None;
        }
        // SAFETY: caller guarantees `pos` is a live element node.
        Some(unsafe { Node::value(pos.link) })
    }

    /// Element at `pos`, mutably, or `None` for the end.
    ///
    /// # Safety
    ///
    /// `pos` must be a valid position of this list.
    pub unsafe fn get_mut(&mut self, pos: Position<T>) -> Option<&mut T> {
        if pos.link == self.sentinel {
            return None;
        }
        // SAFETY: caller guarantee; `&mut self` excludes other borrows.
        Some(unsafe { Node::value_mut(pos.link) })
    }

    /// The position after `pos`; the end's successor is the first element.
    ///
    /// # Safety
    ///
    /// `pos` must be a valid position of this list.
    pub unsafe fn next(&self, pos: Position<T>) -> Position<T> {
        // SAFETY: caller guarantee.
        Position::new(unsafe { Links::next_of(pos.link) })
    }

    /// The position before `pos`; the first element's predecessor is the
    /// end.
    ///
    /// # Safety
    ///
    /// `pos` must be a valid position of this list.
    pub unsafe fn prev(&self, pos: Position<T>) -> Position<T> {
        // SAFETY: caller guarantee.
        Position::new(unsafe { Links::prev_of(pos.link) })
    }

    /// Inserts `value` before `pos` and returns the new element's position.
    ///
    /// # Safety
    ///
    /// `pos` must be a valid position of this list.
    pub unsafe fn insert(&mut self, pos: Position<T>, value: T) -> Result<Position<T>, AllocError> {
        // SAFETY: forwarded caller guarantee.
        unsafe { self.emplace(pos, || Ok::<T, Infallible>(value)) }.map_err(alloc_only)
    }

    /// Allocates a node, constructs its value in place with `make`, and
    /// links it before `pos`.
    ///
    /// If allocation fails `make` is never called. If `make` fails or
    /// unwinds the node storage is released and the list is unchanged.
    ///
    /// # Safety
    ///
    /// `pos` must be a valid position of this list.
    pub unsafe fn emplace<E, F>(&mut self, pos: Position<T>, make: F) -> Result<Position<T>, ConstructError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let node = self.alloc.allocate_one::<Node<T>>()?;
        let guard = UninitNode {
            alloc: &self.alloc,
            node,
        };
        let value = make().map_err(ConstructError::Value)?;
        mem::forget(guard);

        let link = node.cast::<Links>();
        // SAFETY: `node` is exclusively ours and sized for `Node<T>`; the
        // caller guarantees `pos` is linked into this list.
        unsafe {
            ptr::addr_of_mut!((*node.as_ptr()).value).write(value);
            Links::link_before(pos.link, link);
        }
        self.len += 1;
        Ok(Position::new(link))
    }

    /// Unlinks the element at `pos`, returning its value and the position
    /// that followed it.
    ///
    /// # Safety
    ///
    /// `pos` must be a valid position of this list.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is the end.
    pub unsafe fn remove(&mut self, pos: Position<T>) -> (T, Position<T>) {
        assert!(pos.link != self.sentinel, "cannot erase the end position");
        let link = pos.link;
        // SAFETY: caller guarantees `link` is an element node of this list;
        // after unlinking nothing else refers to it.
        unsafe {
            let next = Links::next_of(link);
            Links::unlink(link);
            self.len -= 1;
            let node = link.cast::<Node<T>>();
            let value = ptr::addr_of!((*node.as_ptr()).value).read();
            self.alloc.deallocate_one(node);
            (value, Position::new(next))
        }
    }

    /// Destroys the element at `pos` and returns the position that followed
    /// it.
    ///
    /// # Safety
    ///
    /// `pos` must be a valid position of this list.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is the end.
    pub unsafe fn erase(&mut self, pos: Position<T>) -> Position<T> {
        // SAFETY: forwarded caller guarantee.
        let (value, next) = unsafe { self.remove(pos) };
        drop(value);
        next
    }

    /// Moves the node at `source_pos` out of `source` and links it before
    /// `pos` in `self`, in O(1) and without allocating.
    ///
    /// `source_pos` stays valid and now names a node of `self`.
    ///
    /// # Safety
    ///
    /// `pos` must be a valid position of `self` and `source_pos` a valid
    /// position of `source`.
    ///
    /// # Panics
    ///
    /// Panics if the allocators are not equal or `source_pos` is the end of
    /// `source`.
    pub unsafe fn splice(&mut self, pos: Position<T>, source: &mut Self, source_pos: Position<T>) {
        assert!(
            self.alloc == source.alloc,
            "cannot splice between lists with unequal allocators"
        );
        assert!(source_pos.link != source.sentinel, "cannot splice the end position");
        // SAFETY: caller guarantees both positions; the node is detached
        // from `source` before being linked into `self`.
        unsafe {
            Links::unlink(source_pos.link);
            Links::link_before(pos.link, source_pos.link);
        }
        source.len -= 1;
        self.len += 1;
    }

    /// Moves the node at `node` so it sits immediately before `pos`, within
    /// this list.
    ///
    /// # Safety
    ///
    /// Both must be valid positions of this list.
    ///
    /// # Panics
    ///
    /// Panics if `node` is the end.
    pub unsafe fn relocate(&mut self, pos: Position<T>, node: Position<T>) {
        assert!(node.link != self.sentinel, "cannot relocate the end position");
        if pos == node {
            return;
        }
        // SAFETY: caller guarantee; unlink-then-link keeps the ring intact.
        unsafe {
            Links::unlink(node.link);
            Links::link_before(pos.link, node.link);
        }
    }

    // ── Traversal ───────────────────────────────────────────────────

    /// Front-to-back iterator; `.rev()` walks back to front.
    pub fn iter(&self) -> Iter<'_, T> {
        // SAFETY: the sentinel is always live.
        unsafe {
            Iter::new(
                Links::next_of(self.sentinel),
                Links::prev_of(self.sentinel),
                self.len,
            )
        }
    }

    /// Front-to-back iterator over mutable references.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        // SAFETY: as `iter`; `&mut self` makes the borrow exclusive.
        unsafe {
            IterMut::new(
                Links::next_of(self.sentinel),
                Links::prev_of(self.sentinel),
                self.len,
            )
        }
    }

    /// Read-only cursor at the first element (or the end when empty).
    pub fn cursor_front(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, self.begin().link)
    }

    /// Read-only cursor at the last element (or the end when empty).
    pub fn cursor_back(&self) -> Cursor<'_, T, A> {
        // SAFETY: the sentinel is always live.
        let last = unsafe { Links::prev_of(self.sentinel) };
        Cursor::new(self, last)
    }

    /// Editing cursor at the first element (or the end when empty).
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, A> {
        let begin = self.begin().link;
        CursorMut::new(self, begin)
    }

    /// Editing cursor at the last element (or the end when empty).
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T, A> {
        // SAFETY: the sentinel is always live.
        let last = unsafe { Links::prev_of(self.sentinel) };
        CursorMut::new(self, last)
    }

    /// Editing cursor parked on the end.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T, A> {
        let end = self.sentinel;
        CursorMut::new(self, end)
    }

    /// Editing cursor at `pos`.
    ///
    /// # Safety
    ///
    /// `pos` must be a valid position of this list.
    pub unsafe fn cursor_at_mut(&mut self, pos: Position<T>) -> CursorMut<'_, T, A> {
        CursorMut::new(self, pos.link)
    }

    pub(crate) fn sentinel(&self) -> NonNull<Links> {
        self.sentinel
    }
}

impl<T, A: Allocator> Drop for List<T, A> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the sentinel came from `alloc` and nothing links to it now.
        unsafe { self.alloc.deallocate_one(self.sentinel) };
    }
}

impl<T> Default for List<T, PoolAllocator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, A: Allocator> Clone for List<T, A> {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| handle_alloc_failure(err))
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for List<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, A: Allocator> PartialEq for List<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: Allocator> Eq for List<T, A> {}

impl<T, A: Allocator> Extend<T> for List<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            if let Err(err) = self.push_back(value) {
                handle_alloc_failure(err);
            }
        }
    }
}

impl<T> FromIterator<T> for List<T, PoolAllocator> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, A: Allocator> IntoIterator for List<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a List<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut List<T, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slabrun_alloc::{ArenaRegistry, RegistryRef, SizeClass};
    use slabrun_test_utils::{DropCounter, FailAt};

    fn collect<T: Clone, A: Allocator>(list: &List<T, A>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn empty_list_begin_equals_end() {
        let list: List<u32> = List::new();
        assert!(list.is_empty());
        assert_eq!(list.begin(), list.end());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
    }

    #[test]
    fn push_and_pop_at_both_ends() {
        let mut list = List::new();
        list.push_back(2).unwrap();
        list.push_back(3).unwrap();
        list.push_front(1).unwrap();
        assert_eq!(collect(&list), [1, 2, 3]);
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&3));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_front(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn insert_before_end_appends() {
        let mut list = List::new();
        let end = list.end();
        let a = unsafe { list.insert(end, 'a') }.unwrap();
        let b = unsafe { list.insert(end, 'b') }.unwrap();
        assert_eq!(unsafe { list.next(a) }, b);
        assert_eq!(unsafe { list.next(b) }, list.end());
        assert_eq!(unsafe { list.prev(list.begin()) }, list.end());
    }

    #[test]
    fn erase_returns_following_position() {
        let mut list: List<u32> = (1..=4).collect();
        let second = unsafe { list.next(list.begin()) };
        let next = unsafe { list.erase(second) };
        assert_eq!(unsafe { list.get(next) }, Some(&3));
        assert_eq!(collect(&list), [1, 3, 4]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    #[should_panic(expected = "cannot erase the end position")]
    fn erasing_end_panics() {
        let mut list: List<u32> = List::new();
        let end = list.end();
        unsafe { list.erase(end) };
    }

    #[test]
    fn positions_survive_unrelated_edits() {
        let mut list: List<u32> = (0..5).collect();
        let third = unsafe { list.next(list.next(list.begin())) };
        list.pop_front();
        list.push_front(9).unwrap();
        list.push_back(10).unwrap();
        assert_eq!(unsafe { list.get(third) }, Some(&2));
    }

    #[test]
    fn splice_moves_node_between_lists() {
        let mut a: List<u32> = [10, 20, 30].into_iter().collect();
        let mut b: List<u32> = [1, 2].into_iter().collect();
        let moved = unsafe { a.next(a.begin()) };
        let head = b.begin();
        unsafe { b.splice(head, &mut a, moved) };
        assert_eq!(collect(&a), [10, 30]);
        assert_eq!(collect(&b), [20, 1, 2]);
        assert_eq!((a.len(), b.len()), (2, 3));
        // The spliced position now names a node of `b`.
        assert_eq!(unsafe { b.get(moved) }, Some(&20));
        assert_eq!(b.begin(), moved);
    }

    #[test]
    fn splice_does_not_allocate() {
        let registry = ArenaRegistry::new();
        let alloc = RegistryRef::new(&registry);
        let mut a = List::try_from_iter_in(0u32..100, alloc).unwrap();
        let mut b = List::new_in(alloc);
        let before = registry.arena_stats(SizeClass::Medium);
        while !a.is_empty() {
            let first = a.begin();
            let end = b.end();
            unsafe { b.splice(end, &mut a, first) };
        }
        assert_eq!(registry.arena_stats(SizeClass::Medium), before);
        assert_eq!(collect(&b), (0..100).collect::<Vec<_>>());
    }

    #[test]
    #[should_panic(expected = "unequal allocators")]
    fn splice_across_registries_panics() {
        let left = ArenaRegistry::new();
        let right = ArenaRegistry::new();
        let mut a = List::new_in(RegistryRef::new(&left));
        let mut b = List::new_in(RegistryRef::new(&right));
        a.push_back(1u32).unwrap();
        let first = a.begin();
        let end = b.end();
        unsafe { b.splice(end, &mut a, first) };
    }

    #[test]
    fn relocate_within_list() {
        let mut list: List<u32> = (0..4).collect();
        let last = unsafe { list.prev(list.end()) };
        let begin = list.begin();
        unsafe { list.relocate(begin, last) };
        assert_eq!(collect(&list), [3, 0, 1, 2]);
        unsafe { list.relocate(last, last) };
        assert_eq!(collect(&list), [3, 0, 1, 2]);
    }

    #[test]
    fn append_moves_everything() {
        let mut a: List<u32> = (0..3).collect();
        let mut b: List<u32> = (3..6).collect();
        a.append(&mut b);
        assert_eq!(collect(&a), [0, 1, 2, 3, 4, 5]);
        assert!(b.is_empty());
        assert_eq!(b.begin(), b.end());
        b.push_back(7).unwrap();
        assert_eq!(collect(&b), [7]);
    }

    #[test]
    fn nodes_and_sentinel_use_expected_classes() {
        let registry = ArenaRegistry::new();
        let alloc = RegistryRef::new(&registry);
        let mut list = List::new_in(alloc);
        assert_eq!(registry.arena_stats(SizeClass::Small).in_use, 1);
        list.push_back(7u32).unwrap();
        assert_eq!(registry.arena_stats(SizeClass::Medium).in_use, 1);
        drop(list);
        assert!(registry.stats().iter().all(|s| s.in_use == 0));
    }

    #[test]
    fn large_values_fall_back_to_heap() {
        let registry = ArenaRegistry::new();
        let alloc = RegistryRef::new(&registry);
        let list = List::try_from_iter_in((0..5).map(|i| [i as u64; 4]), alloc).unwrap();
        assert_eq!(registry.heap_allocations(), 5);
        drop(list);
        assert_eq!(registry.heap_allocations(), 0);
    }

    #[test]
    fn from_elem_clones_value() {
        let list = List::from_elem_in(3, &"x".to_string(), PoolAllocator).unwrap();
        assert_eq!(collect(&list), ["x", "x", "x"]);
    }

    #[test]
    fn with_default_builds_defaults() {
        let list: List<u32> = List::with_default_in(4, PoolAllocator).unwrap();
        assert_eq!(collect(&list), [0, 0, 0, 0]);
    }

    #[test]
    fn failed_bulk_build_destroys_prefix() {
        let drops = DropCounter::new();
        let fail = FailAt::new(3);
        let registry = ArenaRegistry::new();
        let result = List::try_from_fn_in(
            5,
            |_| fail.attempt().map(|()| drops.track()),
            RegistryRef::new(&registry),
        );
        let err = result.unwrap_err();
        assert_eq!(err.constructed, 3);
        assert!(matches!(err.cause, ConstructError::Value(_)));
        assert_eq!(drops.dropped(), 3);
        assert_eq!(drops.live(), 0);
        assert!(registry.stats().iter().all(|s| s.in_use == 0));
    }

    #[test]
    fn failed_emplace_leaves_list_unchanged() {
        let registry = ArenaRegistry::new();
        let mut list = List::try_from_iter_in([1u32, 2], RegistryRef::new(&registry)).unwrap();
        let begin = list.begin();
        let result = unsafe { list.emplace(begin, || Err::<u32, _>("nope")) };
        assert_eq!(result.unwrap_err(), ConstructError::Value("nope"));
        assert_eq!(collect(&list), [1, 2]);
        assert_eq!(registry.arena_stats(SizeClass::Medium).in_use, 2);
    }

    #[test]
    fn clone_is_deep_and_equal() {
        let original: List<String> = ["a", "b"].into_iter().map(String::from).collect();
        let mut copy = original.clone();
        assert_eq!(copy, original);
        copy.front_mut().unwrap().push('!');
        assert_eq!(original.front().map(String::as_str), Some("a"));
        assert_ne!(copy, original);
    }

    #[test]
    fn drop_destroys_every_element_once() {
        let drops = DropCounter::new();
        let list: List<_> = (0..10).map(|_| drops.track()).collect();
        assert_eq!(drops.live(), 10);
        drop(list);
        assert_eq!(drops.dropped(), 10);
    }

    #[test]
    fn clear_keeps_list_usable() {
        let mut list: List<u32> = (0..3).collect();
        list.clear();
        assert!(list.is_empty());
        list.push_back(5).unwrap();
        assert_eq!(collect(&list), [5]);
    }

    #[test]
    fn debug_lists_elements() {
        let list: List<u32> = (1..=3).collect();
        assert_eq!(format!("{list:?}"), "[1, 2, 3]");
    }

    #[test]
    fn contains_and_back_mut() {
        let mut list: List<u32> = (1..=3).collect();
        assert!(list.contains(&2));
        assert!(!list.contains(&9));
        *list.back_mut().unwrap() = 30;
        assert_eq!(list.back(), Some(&30));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::VecDeque;

        #[derive(Clone, Debug)]
        enum Op {
            PushFront(u16),
            PushBack(u16),
            PopFront,
            PopBack,
            EraseAt(usize),
            InsertAt(usize, u16),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                any::<u16>().prop_map(Op::PushFront),
                any::<u16>().prop_map(Op::PushBack),
                Just(Op::PopFront),
                Just(Op::PopBack),
                any::<usize>().prop_map(Op::EraseAt),
                (any::<usize>(), any::<u16>()).prop_map(|(i, v)| Op::InsertAt(i, v)),
            ]
        }

        fn nth<T, A: Allocator>(list: &List<T, A>, n: usize) -> Position<T> {
            let mut pos = list.begin();
            for _ in 0..n {
                pos = unsafe { list.next(pos) };
            }
            pos
        }

        proptest! {
            #[test]
            fn matches_vecdeque(ops in prop::collection::vec(op_strategy(), 0..200)) {
                let mut list = List::new();
                let mut model = VecDeque::new();
                for op in ops {
                    match op {
                        Op::PushFront(v) => { list.push_front(v).unwrap(); model.push_front(v); }
                        Op::PushBack(v) => { list.push_back(v).unwrap(); model.push_back(v); }
                        Op::PopFront => { prop_assert_eq!(list.pop_front(), model.pop_front()); }
                        Op::PopBack => { prop_assert_eq!(list.pop_back(), model.pop_back()); }
                        Op::EraseAt(i) if !model.is_empty() => {
                            let i = i % model.len();
                            let pos = nth(&list, i);
                            unsafe { list.erase(pos) };
                            model.remove(i);
                        }
                        Op::EraseAt(_) => {}
                        Op::InsertAt(i, v) => {
                            let i = i % (model.len() + 1);
                            let pos = nth(&list, i);
                            unsafe { list.insert(pos, v) }.unwrap();
                            model.insert(i, v);
                        }
                    }
                    prop_assert_eq!(list.len(), model.len());
                }
                prop_assert!(list.iter().eq(model.iter()));
                prop_assert!(list.iter().rev().eq(model.iter().rev()));
            }
        }
    }
}

//! Node layout and position handles.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Neighbour links. The sentinel is a bare `Links`; every element node
/// starts with one, so a `NonNull<Links>` of an element node can be cast to
/// `NonNull<Node<T>>`.
#[repr(C)]
pub(crate) struct Links {
    pub(crate) next: NonNull<Links>,
    pub(crate) prev: NonNull<Links>,
}

#[repr(C)]
pub(crate) struct Node<T> {
    pub(crate) links: Links,
    pub(crate) value: T,
}

impl Links {
    /// Link `node` immediately before `at`.
    ///
    /// # Safety
    ///
    /// `at` must be linked into a well-formed ring; `node` must be writable
    /// and not currently linked.
    pub(crate) unsafe fn link_before(at: NonNull<Links>, node: NonNull<Links>) {
        // SAFETY: caller guarantees both pointers are valid.
        unsafe {
            let prev = (*at.as_ptr()).prev;
            (*node.as_ptr()).prev = prev;
            (*node.as_ptr()).next = at;
            (*prev.as_ptr()).next = node;
            (*at.as_ptr()).prev = node;
        }
    }

    /// Detach `node` from its ring, joining its neighbours.
    ///
    /// # Safety
    ///
    /// `node` must be linked into a well-formed ring and must not be the
    /// only member (the sentinel is never unlinked).
    pub(crate) unsafe fn unlink(node: NonNull<Links>) {
        // SAFETY: caller guarantees `node` and its neighbours are valid.
        unsafe {
            let prev = (*node.as_ptr()).prev;
            let next = (*node.as_ptr()).next;
            (*prev.as_ptr()).next = next;
            (*next.as_ptr()).prev = prev;
        }
    }

    /// # Safety
    ///
    /// `link` must be a live node or sentinel.
    pub(crate) unsafe fn next_of(link: NonNull<Links>) -> NonNull<Links> {
        // SAFETY: caller guarantee.
        unsafe { (*link.as_ptr()).next }
    }

    /// # Safety
    ///
    /// `link` must be a live node or sentinel.
    pub(crate) unsafe fn prev_of(link: NonNull<Links>) -> NonNull<Links> {
        // SAFETY: caller guarantee.
        unsafe { (*link.as_ptr()).prev }
    }
}

impl<T> Node<T> {
    /// # Safety
    ///
    /// `link` must be a live element node (never the sentinel) holding a `T`,
    /// and the returned reference must not outlive it.
    pub(crate) unsafe fn value<'a>(link: NonNull<Links>) -> &'a T {
        // SAFETY: caller guarantee; `links` is the first field of `Node<T>`.
        unsafe { &(*link.cast::<Node<T>>().as_ptr()).value }
    }

    /// # Safety
    ///
    /// As [`Node::value`], plus no other reference to the value may exist.
    pub(crate) unsafe fn value_mut<'a>(link: NonNull<Links>) -> &'a mut T {
        // SAFETY: caller guarantee.
        unsafe { &mut (*link.cast::<Node<T>>().as_ptr()).value }
    }
}

/// Non-owning handle naming one node of a [`List`](crate::List), or its end.
///
/// A position is valid while the node it names is linked into some list.
/// It survives insertions and removals of other nodes and moves with its
/// node when the node is spliced. Erasing the node invalidates it.
pub struct Position<T> {
    pub(crate) link: NonNull<Links>,
    _marker: PhantomData<*const T>,
}

impl<T> Position<T> {
    pub(crate) fn new(link: NonNull<Links>) -> Self {
        Self {
            link,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for Position<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Position<T> {}

impl<T> PartialEq for Position<T> {
    fn eq(&self, other: &Self) -> bool {
        self.link == other.link
    }
}

impl<T> Eq for Position<T> {}

impl<T> Hash for Position<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.link.hash(state);
    }
}

impl<T> fmt::Debug for Position<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({:p})", self.link)
    }
}

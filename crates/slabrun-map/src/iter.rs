//! Map iterators: thin adapters over the entry list's iterators.

use std::iter::FusedIterator;

use slabrun_alloc::{Allocator, PoolAllocator};

use crate::map::Slot;

macro_rules! double_ended {
    (impl[$($gen:tt)*] $ty:ty) => {
        impl<$($gen)*> DoubleEndedIterator for $ty {
            fn next_back(&mut self) -> Option<Self::Item> {
                self.inner.next_back().map(Self::project)
            }
        }

        impl<$($gen)*> ExactSizeIterator for $ty {}

        impl<$($gen)*> FusedIterator for $ty {}
    };
}

/// Shared iterator over `(&K, &V)` in list order.
pub struct Iter<'a, K, V> {
    pub(crate) inner: slabrun_list::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn project(slot: &'a Slot<K, V>) -> (&'a K, &'a V) {
        (&slot.key, &slot.value)
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Self::project)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

double_ended!(impl['a, K, V] Iter<'a, K, V>);

/// Iterator over `(&K, &mut V)` in list order.
pub struct IterMut<'a, K, V> {
    pub(crate) inner: slabrun_list::IterMut<'a, Slot<K, V>>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    fn project(slot: &'a mut Slot<K, V>) -> (&'a K, &'a mut V) {
        let Slot { key, value, .. } = slot;
        (&*key, value)
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Self::project)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

double_ended!(impl['a, K, V] IterMut<'a, K, V>);

/// Iterator over keys.
pub struct Keys<'a, K, V> {
    pub(crate) inner: slabrun_list::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Keys<'a, K, V> {
    fn project(slot: &'a Slot<K, V>) -> &'a K {
        &slot.key
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Self::project)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

double_ended!(impl['a, K, V] Keys<'a, K, V>);

/// Iterator over values.
pub struct Values<'a, K, V> {
    pub(crate) inner: slabrun_list::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Values<'a, K, V> {
    fn project(slot: &'a Slot<K, V>) -> &'a V {
        &slot.value
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Self::project)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

double_ended!(impl['a, K, V] Values<'a, K, V>);

/// Iterator over mutable values.
pub struct ValuesMut<'a, K, V> {
    pub(crate) inner: slabrun_list::IterMut<'a, Slot<K, V>>,
}

impl<'a, K, V> ValuesMut<'a, K, V> {
    fn project(slot: &'a mut Slot<K, V>) -> &'a mut V {
        &mut slot.value
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Self::project)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

double_ended!(impl['a, K, V] ValuesMut<'a, K, V>);

/// Owning iterator over `(K, V)`.
pub struct IntoIter<K, V, A: Allocator = PoolAllocator> {
    pub(crate) inner: slabrun_list::IntoIter<Slot<K, V>, A>,
}

impl<K, V, A: Allocator> IntoIter<K, V, A> {
    fn project(slot: Slot<K, V>) -> (K, V) {
        (slot.key, slot.value)
    }
}

impl<K, V, A: Allocator> Iterator for IntoIter<K, V, A> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Self::project)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

double_ended!(impl[K, V, A: Allocator] IntoIter<K, V, A>);

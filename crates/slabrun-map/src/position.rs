//! Checked entry handles.

use std::fmt;

use slabrun_list::Position as NodePosition;

use crate::map::Slot;

/// Handle naming one entry of a [`ChainedMap`](crate::ChainedMap).
///
/// A position records the entry's node, the full hash of its key and the
/// stamp the entry got on insertion. It stays usable across inserts, erases
/// of other entries and rehashes; it is invalidated only when its own entry
/// is erased. Every operation that takes a position checks it against the
/// live bucket run first, so a stale or foreign position yields
/// [`MapError::InvalidPosition`](crate::MapError) rather than touching freed
/// memory, even once the same key has been inserted again.
pub struct Position<K, V> {
    pub(crate) node: NodePosition<Slot<K, V>>,
    pub(crate) hash: u64,
    pub(crate) stamp: u64,
}

impl<K, V> Clone for Position<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Position<K, V> {}

impl<K, V> PartialEq for Position<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && self.hash == other.hash && self.stamp == other.stamp
    }
}

impl<K, V> Eq for Position<K, V> {}

impl<K, V> fmt::Debug for Position<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("node", &self.node)
            .field("hash", &format_args!("{:#018x}", self.hash))
            .field("stamp", &self.stamp)
            .finish()
    }
}

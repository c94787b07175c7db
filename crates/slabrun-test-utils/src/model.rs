//! Reference model for map property tests.

use std::hash::Hash;

use indexmap::IndexMap;

/// Insertion-ordered map with the same insert/erase contract as
/// `ChainedMap`: inserting an existing key keeps the old value.
#[derive(Clone, Debug, Default)]
pub struct MapModel<K: Hash + Eq, V> {
    entries: IndexMap<K, V>,
}

impl<K: Hash + Eq + Clone + Ord, V: Clone> MapModel<K, V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Returns `true` if the key was absent and is now present.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, value);
        true
    }

    /// Number of entries removed (0 or 1).
    pub fn erase(&mut self, key: &K) -> usize {
        usize::from(self.entries.shift_remove(key).is_some())
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Any key present, chosen by `index` modulo the length.
    pub fn key_at(&self, index: usize) -> Option<&K> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries.get_index(index % self.entries.len()).map(|(k, _)| k)
    }

    /// Entries sorted by key, for order-insensitive comparison.
    pub fn sorted(&self) -> Vec<(K, V)> {
        let mut out: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}

//! The chained map: one entry list, one table of bucket starts.

use std::alloc::Layout;
use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::convert::Infallible;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::mem;

use slabrun_alloc::{handle_alloc_failure, AllocError, Allocator, PoolAllocator};
use slabrun_list::{ConstructError, List, Position as NodePosition};
use tracing::debug;

use crate::config::{validate_load_factor, MapConfig};
use crate::error::MapError;
use crate::iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use crate::position::Position;

/// One entry as stored in the list.
///
/// `hash` is the full hash of `key`. `stamp` is unique among the entries a
/// map has ever inserted, so a node address reused by a later insert never
/// passes for the entry that held it first.
#[derive(Clone)]
pub(crate) struct Slot<K, V> {
    pub(crate) hash: u64,
    pub(crate) stamp: u64,
    pub(crate) key: K,
    pub(crate) value: V,
}

type Node<K, V> = NodePosition<Slot<K, V>>;

/// Separate-chaining hash map whose buckets are contiguous runs of a single
/// entry list.
///
/// `buckets[i]` is the position of the first entry of bucket `i` in the
/// list, or the list's end when bucket `i` is empty. Every entry from a
/// bucket start up to the first entry hashing elsewhere belongs to that
/// bucket, and no entry of that bucket appears anywhere else. A bucket
/// start is valid until the entry it names is erased; erase moves it to the
/// successor first. Rehashing splices entries, so entries are never
/// reallocated and [`Position`]s survive it.
///
/// New entries go to the head of their bucket's run, or to the head of the
/// list when the bucket was empty.
pub struct ChainedMap<K, V, S = RandomState, A: Allocator = PoolAllocator> {
    entries: List<Slot<K, V>, A>,
    buckets: Vec<Node<K, V>>,
    hash_builder: S,
    max_load_factor: f32,
    next_stamp: u64,
}

// SAFETY: the bucket table only points into `entries`, which the map owns.
unsafe impl<K: Send, V: Send, S: Send, A: Allocator + Send> Send for ChainedMap<K, V, S, A> {}

// SAFETY: shared access only reads through `&self`.
unsafe impl<K: Sync, V: Sync, S: Sync, A: Allocator + Sync> Sync for ChainedMap<K, V, S, A> {}

fn table_error<P>(count: usize) -> AllocError {
    match Layout::array::<P>(count) {
        Ok(layout) => AllocError::OutOfMemory { layout },
        Err(_) => AllocError::CapacityOverflow,
    }
}

fn filled_table<P: Copy>(count: usize, fill: P) -> Result<Vec<P>, AllocError> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(count)
        .map_err(|_| table_error::<P>(count))?;
    table.resize(count, fill);
    Ok(table)
}

/// Whether `len` entries over `bucket_count` buckets meet `max_load_factor`.
/// Computed in `f64` so counts beyond `f32`'s exact range compare exactly.
fn load_reached(len: usize, bucket_count: usize, max_load_factor: f32) -> bool {
    len as f64 >= f64::from(max_load_factor) * bucket_count as f64
}

fn alloc_only(err: ConstructError<Infallible>) -> AllocError {
    match err {
        ConstructError::Alloc(err) => err,
        ConstructError::Value(never) => match never {},
    }
}

impl<K, V> ChainedMap<K, V, RandomState, PoolAllocator> {
    /// Empty map with 1024 buckets and a maximum load factor of 1.0.
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Empty map sized and tuned by `config`.
    pub fn with_config(config: MapConfig) -> Result<Self, MapError> {
        Self::with_config_and_hasher_in(config, RandomState::new(), PoolAllocator)
    }
}

impl<K, V, S> ChainedMap<K, V, S, PoolAllocator> {
    /// Empty map with default sizing, hashing through `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        let config = MapConfig::default();
        Self::build(config, hash_builder, PoolAllocator)
            .unwrap_or_else(|err| handle_alloc_failure(err))
    }
}

impl<K, V, S, A: Allocator> ChainedMap<K, V, S, A> {
    /// Empty map with explicit sizing, hasher and allocator.
    pub fn with_config_and_hasher_in(
        config: MapConfig,
        hash_builder: S,
        alloc: A,
    ) -> Result<Self, MapError> {
        config.validate()?;
        Ok(Self::build(config, hash_builder, alloc)?)
    }

    fn build(config: MapConfig, hash_builder: S, alloc: A) -> Result<Self, AllocError> {
        let entries = List::try_new_in(alloc)?;
        let buckets = filled_table(config.initial_buckets, entries.end())?;
        Ok(Self {
            entries,
            buckets,
            hash_builder,
            max_load_factor: config.max_load_factor,
            next_stamp: 0,
        })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current number of buckets; never zero.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// `len / bucket_count`.
    pub fn load_factor(&self) -> f32 {
        self.len() as f32 / self.bucket_count() as f32
    }

    /// Load factor at which the next insert doubles the bucket count.
    pub fn max_load_factor(&self) -> f32 {
        self.max_load_factor
    }

    /// The hasher used for bucket placement.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Allocator shared by every entry.
    pub fn allocator(&self) -> &A {
        self.entries.allocator()
    }

    /// Destroys every entry; the bucket count is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        let end = self.entries.end();
        self.buckets.fill(end);
    }

    /// Entries in list order; `.rev()` walks backwards.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Entries in list order with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.entries.iter_mut(),
        }
    }

    /// Keys in list order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.entries.iter(),
        }
    }

    /// Values in list order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.entries.iter(),
        }
    }

    /// Mutable values in list order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.entries.iter_mut(),
        }
    }

    /// Sets the maximum load factor. It is consulted at the next insert;
    /// no rehash happens here.
    pub fn set_max_load_factor(&mut self, max_load_factor: f32) -> Result<(), MapError> {
        validate_load_factor(max_load_factor)?;
        self.max_load_factor = max_load_factor;
        Ok(())
    }
}

impl<K, V, S, A> ChainedMap<K, V, S, A>
where
    K: Hash + Eq,
    S: BuildHasher,
    A: Allocator,
{
    fn hash_of<Q: Hash + ?Sized>(&self, key: &Q) -> u64 {
        self.hash_builder.hash_one(key)
    }

    fn index_of(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// Walks bucket `index`'s run, handing each entry to `visit` until it
    /// returns `Some`.
    fn scan_run<R>(
        &self,
        index: usize,
        mut visit: impl FnMut(Node<K, V>, &Slot<K, V>) -> Option<R>,
    ) -> Option<R> {
        let mut node = self.buckets[index];
        // SAFETY: bucket starts are live positions of `entries` (or its
        // end), and so is every successor reached from them.
        while let Some(slot) = unsafe { self.entries.get(node) } {
            if self.index_of(slot.hash) != index {
                break;
            }
            if let Some(found) = visit(node, slot) {
                return Some(found);
            }
            node = unsafe { self.entries.next(node) };
        }
        None
    }

    fn find_hashed<Q>(&self, hash: u64, key: &Q) -> Option<Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.scan_run(self.index_of(hash), |node, slot| {
            (slot.hash == hash && slot.key.borrow() == key).then_some(node)
        })
    }

    /// Confirms `pos` names a live entry of this map. The node is matched
    /// by address inside its bucket run, then by hash and stamp.
    fn resolve(&self, pos: Position<K, V>) -> Result<Node<K, V>, MapError> {
        self.scan_run(self.index_of(pos.hash), |node, slot| {
            (node == pos.node && slot.hash == pos.hash && slot.stamp == pos.stamp)
                .then_some(node)
        })
        .ok_or(MapError::InvalidPosition)
    }

    /// # Safety
    ///
    /// `node` must be a live position of `entries`.
    unsafe fn wrap(&self, node: Node<K, V>) -> Option<Position<K, V>> {
        // SAFETY: caller guarantee.
        unsafe { self.entries.get(node) }.map(|slot| Position {
            node,
            hash: slot.hash,
            stamp: slot.stamp,
        })
    }

    fn over_loaded(&self) -> bool {
        load_reached(self.len(), self.buckets.len(), self.max_load_factor)
    }

    /// Rebuilds the bucket table with `bucket_count` buckets by splicing
    /// every entry into a fresh list. Within each new bucket entries keep
    /// their previous relative order. Either completes or leaves the map
    /// untouched.
    fn rehash(&mut self, bucket_count: usize) -> Result<(), AllocError> {
        let fresh = List::try_new_in(self.entries.allocator().clone())?;
        let end = fresh.end();
        let mut starts = filled_table(bucket_count, end)?;
        let mut tails = filled_table(bucket_count, end)?;

        let mut old = mem::replace(&mut self.entries, fresh);
        loop {
            let node = old.begin();
            // SAFETY: `begin` is a live position of `old`.
            let Some(hash) = unsafe { old.get(node) }.map(|slot| slot.hash) else {
                break;
            };
            let index = (hash % bucket_count as u64) as usize;
            // SAFETY: `node` is an element of `old`; `starts` and `tails`
            // only hold positions of `self.entries`.
            unsafe {
                if starts[index] == end {
                    let front = self.entries.begin();
                    self.entries.splice(front, &mut old, node);
                    starts[index] = node;
                } else {
                    let after = self.entries.next(tails[index]);
                    self.entries.splice(after, &mut old, node);
                }
            }
            tails[index] = node;
        }

        debug!(
            from = self.buckets.len(),
            to = bucket_count,
            entries = self.entries.len(),
            "rehashed"
        );
        self.buckets = starts;
        Ok(())
    }

    /// Grows to exactly `bucket_count` buckets if that is more than now.
    /// Never shrinks and ignores the load factor.
    pub fn reserve(&mut self, bucket_count: usize) -> Result<(), MapError> {
        if bucket_count > self.buckets.len() {
            self.rehash(bucket_count)?;
        }
        Ok(())
    }

    // ── Lookup ──────────────────────────────────────────────────────

    /// Position of `key`'s entry.
    pub fn find<Q>(&self, key: &Q) -> Option<Position<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let node = self.find_hashed(self.hash_of(key), key)?;
        // SAFETY: found in a live bucket run.
        unsafe { self.wrap(node) }
    }

    /// Value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Key and value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let node = self.find_hashed(self.hash_of(key), key)?;
        // SAFETY: found in a live bucket run.
        unsafe { self.entries.get(node) }.map(|slot| (&slot.key, &slot.value))
    }

    /// Mutable value for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let node = self.find_hashed(self.hash_of(key), key)?;
        // SAFETY: found in a live bucket run.
        unsafe { self.entries.get_mut(node) }.map(|slot| &mut slot.value)
    }

    /// Whether `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Value for `key`, or [`MapError::KeyNotFound`]. Never inserts.
    pub fn at<Q>(&self, key: &Q) -> Result<&V, MapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).ok_or(MapError::KeyNotFound)
    }

    /// Mutable value for `key`, or [`MapError::KeyNotFound`].
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, MapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_mut(key).ok_or(MapError::KeyNotFound)
    }

    // ── Positions ───────────────────────────────────────────────────

    /// The first entry in list order.
    pub fn first(&self) -> Option<Position<K, V>> {
        // SAFETY: begin is a live position of `entries`.
        unsafe { self.wrap(self.entries.begin()) }
    }

    /// The entry after `pos` in list order, `None` past the last.
    pub fn next_position(&self, pos: Position<K, V>) -> Result<Option<Position<K, V>>, MapError> {
        let node = self.resolve(pos)?;
        // SAFETY: `node` is live; its successor is a live position.
        Ok(unsafe { self.wrap(self.entries.next(node)) })
    }

    /// Key and value at `pos`.
    pub fn entry_at(&self, pos: Position<K, V>) -> Result<(&K, &V), MapError> {
        let node = self.resolve(pos)?;
        // SAFETY: resolved to a live entry.
        unsafe { self.entries.get(node) }
            .map(|slot| (&slot.key, &slot.value))
            .ok_or(MapError::InvalidPosition)
    }

    /// Mutable value at `pos`.
    pub fn value_at_mut(&mut self, pos: Position<K, V>) -> Result<&mut V, MapError> {
        let node = self.resolve(pos)?;
        // SAFETY: resolved to a live entry.
        unsafe { self.entries.get_mut(node) }
            .map(|slot| &mut slot.value)
            .ok_or(MapError::InvalidPosition)
    }

    // ── Insertion ───────────────────────────────────────────────────

    fn emplace_hashed<E, F>(
        &mut self,
        key: K,
        make: F,
    ) -> Result<(Position<K, V>, bool), ConstructError<E>>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let hash = self.hash_of(&key);
        if let Some(node) = self.find_hashed(hash, &key) {
            // SAFETY: found in a live bucket run.
            if let Some(pos) = unsafe { self.wrap(node) } {
                return Ok((pos, false));
            }
        }
        if self.over_loaded() {
            let doubled = self
                .buckets
                .len()
                .checked_mul(2)
                .ok_or(AllocError::CapacityOverflow)?;
            self.rehash(doubled)?;
        }

        let index = self.index_of(hash);
        let start = self.buckets[index];
        let at = if start == self.entries.end() {
            self.entries.begin()
        } else {
            start
        };
        let stamp = self.next_stamp;
        // SAFETY: `at` is a live position of `entries`.
        let node = unsafe {
            self.entries.emplace(at, || {
                make().map(|value| Slot {
                    hash,
                    stamp,
                    key,
                    value,
                })
            })
        }?;
        self.next_stamp += 1;
        self.buckets[index] = node;
        Ok((Position { node, hash, stamp }, true))
    }

    fn insert_unique(&mut self, key: K, value: V) -> Result<(Position<K, V>, bool), AllocError> {
        self.emplace_hashed(key, || Ok::<V, Infallible>(value))
            .map_err(alloc_only)
    }

    /// Inserts `key` → `value` unless `key` is present.
    ///
    /// Returns the entry's position and whether it was inserted. A present
    /// key keeps its value and `value` is dropped.
    pub fn insert(&mut self, key: K, value: V) -> Result<(Position<K, V>, bool), MapError> {
        Ok(self.insert_unique(key, value)?)
    }

    /// Inserts every pair, in order, with [`insert`](Self::insert)
    /// semantics. Returns how many were new.
    pub fn insert_iter<I>(&mut self, pairs: I) -> Result<usize, MapError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut inserted = 0;
        for (key, value) in pairs {
            if self.insert_unique(key, value)?.1 {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Inserts `key` with a value built by `make`, which runs only once the
    /// key is known to be absent. On a duplicate `key` is dropped and
    /// `make` never runs; if `make` fails the map is unchanged apart from a
    /// possible rehash.
    pub fn emplace<E, F>(&mut self, key: K, make: F) -> Result<(Position<K, V>, bool), ConstructError<E>>
    where
        F: FnOnce() -> Result<V, E>,
    {
        self.emplace_hashed(key, make)
    }

    /// Value for `key`, inserting `V::default()` first if absent.
    pub fn get_or_insert_default(&mut self, key: K) -> Result<&mut V, MapError>
    where
        V: Default,
    {
        let (pos, _) = self
            .emplace_hashed(key, || Ok::<V, Infallible>(V::default()))
            .map_err(alloc_only)?;
        // SAFETY: `pos.node` was just found or inserted.
        unsafe { self.entries.get_mut(pos.node) }
            .map(|slot| &mut slot.value)
            .ok_or(MapError::InvalidPosition)
    }

    // ── Removal ─────────────────────────────────────────────────────

    /// Detaches a live entry, first moving its bucket start if the entry
    /// is one.
    fn unlink(&mut self, node: Node<K, V>, hash: u64) -> (Slot<K, V>, Option<Position<K, V>>) {
        let index = self.index_of(hash);
        // SAFETY: `node` is a live entry; its successor is a live position.
        let next = unsafe { self.entries.next(node) };
        let successor = unsafe { self.wrap(next) };
        if self.buckets[index] == node {
            self.buckets[index] = match successor {
                Some(succ) if self.index_of(succ.hash) == index => next,
                _ => self.entries.end(),
            };
        }
        // SAFETY: `node` is a live entry and no bucket start names it now.
        let (slot, _) = unsafe { self.entries.remove(node) };
        (slot, successor)
    }

    /// Erases the entry at `pos`, returning the position of its successor
    /// in list order.
    pub fn erase(&mut self, pos: Position<K, V>) -> Result<Option<Position<K, V>>, MapError> {
        let node = self.resolve(pos)?;
        let (slot, successor) = self.unlink(node, pos.hash);
        drop(slot);
        Ok(successor)
    }

    /// Erases entries from `first` up to (not including) `last`, where
    /// `None` means the end. Returns the position following the erased
    /// range.
    ///
    /// `last` must not precede `first` in list order; if it does, nothing
    /// is erased and [`MapError::InvalidPosition`] is returned.
    pub fn erase_range(
        &mut self,
        first: Position<K, V>,
        last: Option<Position<K, V>>,
    ) -> Result<Option<Position<K, V>>, MapError> {
        let mut node = self.resolve(first)?;
        if let Some(last) = last {
            let stop = self.resolve(last)?;
            let end = self.entries.end();
            while node != stop {
                if node == end {
                    return Err(MapError::InvalidPosition);
                }
                // SAFETY: walking live positions of `entries`.
                node = unsafe { self.entries.next(node) };
            }
        }
        let mut current = Some(first);
        while let Some(pos) = current {
            if Some(pos) == last {
                break;
            }
            current = self.erase(pos)?;
        }
        Ok(current)
    }

    /// Removes `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key`, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_of(key);
        let node = self.find_hashed(hash, key)?;
        let (slot, _) = self.unlink(node, hash);
        Some((slot.key, slot.value))
    }

    // ── Buckets ─────────────────────────────────────────────────────

    /// Bucket index `key` maps to at the current bucket count.
    pub fn bucket_of<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        self.index_of(self.hash_of(key))
    }

    /// Number of entries in bucket `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= bucket_count()`.
    pub fn bucket_len(&self, index: usize) -> usize {
        let mut count = 0;
        self.scan_run(index, |_, _| {
            count += 1;
            None::<()>
        });
        count
    }

    /// Deep copy. Bucket starts are rebuilt from the copied list, whose
    /// order matches this one, so every run stays contiguous.
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        K: Clone,
        V: Clone,
        S: Clone,
    {
        let entries = self.entries.try_clone()?;
        let end = entries.end();
        let mut buckets = filled_table(self.buckets.len(), end)?;
        let mut node = entries.begin();
        // SAFETY: walking live positions of `entries`.
        while let Some(slot) = unsafe { entries.get(node) } {
            let index = self.index_of(slot.hash);
            if buckets[index] == end {
                buckets[index] = node;
            }
            node = unsafe { entries.next(node) };
        }
        Ok(Self {
            entries,
            buckets,
            hash_builder: self.hash_builder.clone(),
            max_load_factor: self.max_load_factor,
            next_stamp: self.next_stamp,
        })
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut per_bucket = vec![0usize; self.buckets.len()];
        for slot in self.entries.iter() {
            assert_eq!(slot.hash, self.hash_of(&slot.key), "stale cached hash");
            assert!(slot.stamp < self.next_stamp);
            per_bucket[self.index_of(slot.hash)] += 1;
        }
        assert_eq!(per_bucket.iter().sum::<usize>(), self.len());
        for (index, &count) in per_bucket.iter().enumerate() {
            let start = self.buckets[index];
            if count == 0 {
                assert_eq!(start, self.entries.end(), "empty bucket {index} has a start");
                continue;
            }
            assert_eq!(self.bucket_len(index), count, "bucket {index} is not contiguous");
            let before = unsafe { self.entries.prev(start) };
            if let Some(slot) = unsafe { self.entries.get(before) } {
                assert_ne!(
                    self.index_of(slot.hash),
                    index,
                    "bucket {index} start is not the head of its run"
                );
            }
        }
    }
}

impl<K, V, S: Default> Default for ChainedMap<K, V, S, PoolAllocator> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S, A> Clone for ChainedMap<K, V, S, A>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
    A: Allocator,
{
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| handle_alloc_failure(err))
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S, A: Allocator> fmt::Debug for ChainedMap<K, V, S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S, A> PartialEq for ChainedMap<K, V, S, A>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
    A: Allocator,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S, A> Eq for ChainedMap<K, V, S, A>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
    A: Allocator,
{
}

impl<K, V, S, A> Extend<(K, V)> for ChainedMap<K, V, S, A>
where
    K: Hash + Eq,
    S: BuildHasher,
    A: Allocator,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, pairs: I) {
        for (key, value) in pairs {
            if let Err(err) = self.insert_unique(key, value) {
                handle_alloc_failure(err);
            }
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedMap<K, V, S, PoolAllocator>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(pairs);
        map
    }
}

impl<K, V, S, A: Allocator> IntoIterator for ChainedMap<K, V, S, A> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}

impl<'a, K, V, S, A: Allocator> IntoIterator for &'a ChainedMap<K, V, S, A> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S, A: Allocator> IntoIterator for &'a mut ChainedMap<K, V, S, A> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

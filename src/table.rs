use std::{borrow::Borrow, fmt, iter, mem};

use crate::{
    error::TableError,
    hash::{DefaultHash, HashFunction},
    iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut},
    probe::{Linear, ProbingPolicy},
    slot::Slot,
    utils::{
        DELETE_FACTOR, LOAD_FACTOR, MIN_CAPACITY, exceeds, is_valid_capacity, min_capacity_for,
        normalize_capacity,
    },
};

/// Collision counters kept by every table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeStats {
    /// Slots skipped while placing new keys
    pub insert_collisions: usize,
    /// Completed rehashes, whether growth, compaction or explicit
    pub rehash_count: usize,
    /// Slots skipped while re-placing entries during rehashes
    pub rehash_collisions: usize,
}

/// An open addressing hash table.
///
/// Entries live directly in one array of [`Slot`]s whose length is always a
/// power of two. `H` hashes keys and `P` turns a hash into the sequence of
/// slots to inspect; both are resolved at compile time.
///
/// - The table doubles before an insert would push the occupied share above
///   [`LOAD_FACTOR`](crate::LOAD_FACTOR).
/// - Removing an entry leaves a tombstone. Once tombstones exceed
///   [`DELETE_FACTOR`](crate::DELETE_FACTOR) of the slots, the table is
///   rehashed in place at the same capacity.
///
/// Keys only need `PartialEq`, so float keys work; a `NaN` key never equals
/// itself and can be inserted but never found again.
///
/// Note: This implementation is not thread-safe. Wrap it in a lock to share
/// it between threads.
#[derive(Clone)]
pub struct OpenTable<K, V, H = DefaultHash, P = Linear> {
    /// The backing array
    slots: Box<[Slot<K, V>]>,
    /// Number of occupied slots
    len: usize,
    /// Number of deleted slots
    tombstones: usize,
    /// Hash function applied to every key
    hasher: H,
    /// Probing policy applied to every hash
    probe: P,
    /// Collision counters
    stats: ProbeStats,
}

/// Allocates `capacity` empty slots
fn empty_slots<K, V>(capacity: usize) -> Box<[Slot<K, V>]> {
    iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

impl<K, V> OpenTable<K, V> {
    /// Creates an empty table with four slots
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Creates an empty table with at least `capacity` slots
    ///
    /// The capacity is rounded up to a power of two no smaller than four.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_hasher_and_probe(capacity, DefaultHash, Linear)
    }
}

impl<K, V, H, P> OpenTable<K, V, H, P> {
    /// Creates an empty table with at least `capacity` slots using the given
    /// hash function and probing policy
    pub fn with_hasher_and_probe(capacity: usize, hasher: H, probe: P) -> Self {
        Self {
            slots: empty_slots(normalize_capacity(capacity)),
            len: 0,
            tombstones: 0,
            hasher,
            probe,
            stats: ProbeStats::default(),
        }
    }

    /// Returns the number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the backing array
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of tombstones in the backing array
    #[must_use]
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Returns the share of slots holding live entries
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.slots.len() as f64
    }

    /// Returns the collision counters
    #[must_use]
    pub fn stats(&self) -> ProbeStats {
        self.stats
    }

    /// Returns the raw backing array, tombstones included
    #[must_use]
    pub fn slots(&self) -> &[Slot<K, V>] {
        &self.slots
    }

    /// Returns an iterator over the entries in slot order
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.slots, self.len)
    }

    /// Returns an iterator over the entries with mutable values
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.slots, self.len)
    }

    /// Returns an iterator over the keys
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over the values
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Returns an iterator over mutable values
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.iter_mut())
    }

    /// Removes every entry, keeping the capacity
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.len = 0;
        self.tombstones = 0;
    }

    /// Exchanges the contents, counters and policies of two tables
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Moves the contents out, leaving this table empty with four slots
    #[must_use]
    pub fn take(&mut self) -> Self
    where
        H: Clone,
        P: Clone,
    {
        let empty =
            Self::with_hasher_and_probe(MIN_CAPACITY, self.hasher.clone(), self.probe.clone());
        mem::replace(self, empty)
    }
}

impl<K, V, H, P> OpenTable<K, V, H, P>
where
    K: PartialEq,
    H: HashFunction<K>,
    P: ProbingPolicy,
{
    /// Hashes a key, or a borrowed form of one
    fn hash_of<Q: ?Sized>(&self, key: &Q) -> u64
    where
        H: HashFunction<Q>,
    {
        <H as HashFunction<Q>>::hash(&self.hasher, key)
    }

    /// Slot index for `attempt` on the probe sequence of `hash`
    ///
    /// Masked again so a misbehaving policy cannot index out of bounds.
    fn slot_index(&self, hash: u64, attempt: usize) -> usize {
        let mask = self.slots.len().wrapping_sub(1);
        self.probe.probe(hash, attempt, self.slots.len()) & mask
    }

    /// Index of the occupied slot holding `key`
    ///
    /// Walks through tombstones and mismatched keys and stops at the first
    /// empty slot.
    fn find_index<Q>(&self, hash: u64, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        for attempt in 0..self.slots.len() {
            let index = self.slot_index(hash, attempt);
            match self.slots.get(index) {
                None | Some(Slot::Empty) => return None,
                Some(Slot::Occupied { key: stored, .. }) if stored.borrow() == key => {
                    return Some(index);
                }
                Some(_) => {}
            }
        }
        None
    }

    /// First slot on the probe sequence of `hash` that is not occupied,
    /// together with the number of occupied slots skipped to reach it
    fn vacant_index(&self, hash: u64) -> Option<(usize, usize)> {
        (0..self.slots.len())
            .map(|attempt| (self.slot_index(hash, attempt), attempt))
            .find(|&(index, _)| !self.slots.get(index).is_some_and(Slot::is_occupied))
    }

    /// Finds the placement slot for a key known to be absent
    ///
    /// Returns the slot index and the occupied slots skipped on the way.
    /// Grows the table if the probe sequence runs out of slots.
    fn claim(&mut self, hash: u64) -> (usize, usize) {
        loop {
            if let Some(found) = self.vacant_index(hash) {
                return found;
            }
            self.grow();
        }
    }

    /// Stores an entry in the slot returned by `claim`
    #[allow(clippy::indexing_slicing)]
    fn fill_at(&mut self, index: usize, key: K, value: V) -> &mut V {
        let slot = &mut self.slots[index];
        if matches!(slot, Slot::Deleted) {
            self.tombstones = self.tombstones.saturating_sub(1);
        }
        self.len = self.len.saturating_add(1);
        slot.fill(key, value)
    }

    /// Inserts a key known to be absent, growing first if the load factor
    /// would be exceeded, and returns its value
    fn insert_new(&mut self, hash: u64, key: K, value: V) -> &mut V {
        if exceeds(self.len.saturating_add(1), self.slots.len(), LOAD_FACTOR) {
            self.grow();
        }
        let (index, collisions) = self.claim(hash);
        self.stats.insert_collisions = self.stats.insert_collisions.saturating_add(collisions);
        self.fill_at(index, key, value)
    }

    /// Doubles the capacity
    fn grow(&mut self) {
        self.resize(self.slots.len().saturating_mul(2));
    }

    /// Rehashes at the current capacity, dropping every tombstone
    fn compact(&mut self) {
        self.resize(self.slots.len());
    }

    /// Moves every live entry into a fresh array of `capacity` slots
    fn resize(&mut self, capacity: usize) {
        let old = mem::replace(&mut self.slots, empty_slots(capacity));
        self.len = 0;
        self.tombstones = 0;
        self.stats.rehash_count = self.stats.rehash_count.saturating_add(1);

        for slot in old.into_vec() {
            if let Some((key, value)) = slot.into_entry() {
                let hash = self.hash_of(&key);
                let (index, collisions) = self.claim(hash);
                self.stats.rehash_collisions =
                    self.stats.rehash_collisions.saturating_add(collisions);
                self.fill_at(index, key, value);
            }
        }
    }

    /// Inserts a key-value pair.
    ///
    /// If the key is already present its value is replaced and the old value
    /// returned; the table then keeps a single entry for the key.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_of(&key);
        if let Some(index) = self.find_index(hash, &key) {
            let stored = self.slots.get_mut(index).and_then(Slot::entry_mut);
            return stored.map(|(_, old)| mem::replace(old, value));
        }
        self.insert_new(hash, key, value);
        None
    }

    /// Returns the value for `key`, inserting `default()` first if the key is
    /// absent
    #[allow(clippy::indexing_slicing)]
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let hash = self.hash_of(&key);
        match self.find_index(hash, &key) {
            Some(index) => self.slots[index].occupied_value(),
            None => self.insert_new(hash, key, default()),
        }
    }

    /// Returns the value for `key`, inserting `V::default()` first if the key
    /// is absent
    ///
    /// This is the upsert behind an indexing-style `table[key] = value`.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Returns a reference to the value for `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: HashFunction<Q>,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the stored key and value for `key`
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: HashFunction<Q>,
    {
        let index = self.find_index(self.hash_of(key), key)?;
        self.slots.get(index).and_then(Slot::entry)
    }

    /// Returns a mutable reference to the value for `key`
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: HashFunction<Q>,
    {
        let index = self.find_index(self.hash_of(key), key)?;
        self.slots.get_mut(index).and_then(Slot::entry_mut).map(|(_, value)| value)
    }

    /// Returns true if the table holds `key`
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: HashFunction<Q>,
    {
        self.find_index(self.hash_of(key), key).is_some()
    }

    /// Returns the value for `key`
    ///
    /// # Errors
    ///
    /// Returns [`TableError::KeyNotFound`] if the key is absent.
    pub fn at<Q>(&self, key: &Q) -> Result<&V, TableError>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: HashFunction<Q>,
    {
        self.get(key).ok_or(TableError::KeyNotFound)
    }

    /// Returns a mutable reference to the value for `key`
    ///
    /// # Errors
    ///
    /// Returns [`TableError::KeyNotFound`] if the key is absent.
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, TableError>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: HashFunction<Q>,
    {
        self.get_mut(key).ok_or(TableError::KeyNotFound)
    }

    /// Removes `key`, returning the stored key and value
    ///
    /// The slot becomes a tombstone. If tombstones now exceed the delete
    /// factor the table is compacted at its current capacity.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: HashFunction<Q>,
    {
        let index = self.find_index(self.hash_of(key), key)?;
        let slot = self.slots.get_mut(index).map(|slot| mem::replace(slot, Slot::Deleted))?;
        self.len = self.len.saturating_sub(1);
        self.tombstones = self.tombstones.saturating_add(1);

        if exceeds(self.tombstones, self.slots.len(), DELETE_FACTOR) {
            self.compact();
        }
        slot.into_entry()
    }

    /// Removes `key`, returning its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: HashFunction<Q>,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` and returns the number of entries removed, 0 or 1
    pub fn erase<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        H: HashFunction<Q>,
    {
        usize::from(self.remove_entry(key).is_some())
    }

    /// Rebuilds the table with `capacity` slots, dropping all tombstones
    ///
    /// Passing the current capacity compacts the table in place.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidCapacity`] without touching the table if
    /// `capacity` is not a power of two, is below four, or cannot hold the
    /// current entries within the load factor.
    pub fn rehash(&mut self, capacity: usize) -> Result<(), TableError> {
        let minimum = min_capacity_for(self.len);
        if !is_valid_capacity(capacity) || capacity < minimum {
            return Err(TableError::InvalidCapacity { requested: capacity, minimum });
        }
        self.resize(capacity);
        Ok(())
    }
}

impl<K, V, H: Default, P: Default> Default for OpenTable<K, V, H, P> {
    fn default() -> Self {
        Self::with_hasher_and_probe(MIN_CAPACITY, H::default(), P::default())
    }
}

impl<K, V, H, P> PartialEq for OpenTable<K, V, H, P>
where
    K: PartialEq,
    V: PartialEq,
    H: HashFunction<K>,
    P: ProbingPolicy,
{
    /// Two tables are equal when they hold the same entries, whatever their
    /// capacity, slot layout or insertion order.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V, H, P> Eq for OpenTable<K, V, H, P>
where
    K: Eq,
    V: Eq,
    H: HashFunction<K>,
    P: ProbingPolicy,
{
}

impl<K: fmt::Debug, V: fmt::Debug, H, P> fmt::Debug for OpenTable<K, V, H, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, H, P> Extend<(K, V)> for OpenTable<K, V, H, P>
where
    K: PartialEq,
    H: HashFunction<K>,
    P: ProbingPolicy,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, H, P> FromIterator<(K, V)> for OpenTable<K, V, H, P>
where
    K: PartialEq,
    H: HashFunction<K> + Default,
    P: ProbingPolicy + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for OpenTable<K, V>
where
    K: PartialEq,
    DefaultHash: HashFunction<K>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V, H, P> IntoIterator for OpenTable<K, V, H, P> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.slots.into_vec(), self.len)
    }
}

impl<'a, K, V, H, P> IntoIterator for &'a OpenTable<K, V, H, P> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, H, P> IntoIterator for &'a mut OpenTable<K, V, H, P> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

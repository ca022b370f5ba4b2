use std::mem;

/// Number of buckets for tables built with [`ChainedHashMap::new`]
const DEFAULT_CAPACITY: usize = 8;
/// Accumulator seed of the DJB2 rolling hash
const DJB2_SEED: u64 = 5381;
/// Multiplier applied per code point by the DJB2 rolling hash
const DJB2_MULTIPLIER: u64 = 33;
/// Load factor above which a newly linked entry triggers a growth resize
const GROW_THRESHOLD: f64 = 0.7;
/// Load factor below which a successful removal triggers a shrink resize
const SHRINK_THRESHOLD: f64 = 0.2;
/// Capacity multiplier for growth resizes
const GROW_RATE: f64 = 2.0;
/// Capacity multiplier for shrink resizes
const SHRINK_RATE: f64 = 0.5;

/// Error returned when a table is constructed with zero buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("hash table capacity must be a positive number of buckets")]
pub struct CapacityError;

/// A link to the next entry of a chain, or the end of it
type Link<V> = Option<Box<Entry<V>>>;

/// A key-value pair chained within a single bucket
#[derive(Debug, Clone)]
struct Entry<V> {
    /// The key owning this entry, unique across the whole table
    key: String,
    /// The value stored under the key
    value: V,
    /// The next entry in this bucket's chain
    next: Link<V>,
}

/// Hashes a key with the DJB2 rolling hash over its code points.
///
/// Pure and deterministic: the result depends only on the key, never on call
/// order or table state. Wrapping arithmetic is intentional; overflow only
/// affects distribution, not correctness.
fn djb2(key: &str) -> u64 {
    key.chars().fold(DJB2_SEED, |acc, ch| {
        acc.wrapping_mul(DJB2_MULTIPLIER).wrapping_add(u64::from(u32::from(ch)))
    })
}

/// Reduces a hash to a bucket index within `capacity` buckets
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
fn bucket_for(hash: u64, capacity: usize) -> usize {
    // capacity is never zero: construction rejects it and resizes clamp to 1
    (hash % (capacity.max(1) as u64)) as usize
}

/// A hash table mapping string keys to values, resolving collisions with a
/// singly linked chain per bucket.
///
/// Buckets are assigned by a DJB2 hash of the key reduced modulo the current
/// bucket count. The bucket array doubles once the load factor passes 0.7 and
/// halves once removals push it under 0.2, never shrinking below the capacity
/// the table was constructed with. Every resize rehashes every entry under
/// the new bucket count.
///
/// Note: This implementation is not thread-safe. A caller that shares a table
/// across threads must wrap every operation in external mutual exclusion.
#[derive(Debug, Clone)]
pub struct ChainedHashMap<V> {
    /// The bucket slots, each holding the head of its chain
    storage: Vec<Link<V>>,
    /// Current number of entries stored across all chains
    size: usize,
    /// Bucket count at construction, the floor for shrink resizes
    initial_capacity: usize,
}

impl<V> Default for ChainedHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Extend<(String, V)> for ChainedHashMap<V> {
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<V> ChainedHashMap<V> {
    /// Creates a table with the default initial capacity
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Self::empty_storage(DEFAULT_CAPACITY),
            size: 0,
            initial_capacity: DEFAULT_CAPACITY,
        }
    }

    /// Creates a table with `capacity` buckets.
    ///
    /// The given capacity also becomes the floor below which shrink resizes
    /// will not take the table.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if `capacity` is zero; no table is produced.
    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        if capacity == 0 {
            return Err(CapacityError);
        }
        Ok(Self { storage: Self::empty_storage(capacity), size: 0, initial_capacity: capacity })
    }

    /// Allocates `capacity` empty bucket slots
    fn empty_storage(capacity: usize) -> Vec<Link<V>> {
        let mut storage = Vec::with_capacity(capacity);
        storage.resize_with(capacity, || None);
        storage
    }

    /// Maps a key to a bucket index under the current capacity.
    ///
    /// The mapping changes whenever the table resizes, so it is recomputed on
    /// every access and never cached.
    fn bucket_index(&self, key: &str) -> usize {
        bucket_for(djb2(key), self.storage.len())
    }

    /// Inserts a key-value pair into the table.
    ///
    /// An existing key has its value overwritten in place and the prior value
    /// returned; the entry count is unchanged and no resize runs. A new key
    /// is appended to the end of its bucket's chain, and the table grows 2x
    /// once the load factor passes 0.7.
    pub fn insert(&mut self, key: String, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let Some(slot) = self.storage.get_mut(index) else {
            return None; // bucket indices are always in range
        };

        let mut cursor = slot;
        loop {
            match cursor {
                Some(entry) if entry.key == key => {
                    return Some(mem::replace(&mut entry.value, value));
                }
                Some(entry) => cursor = &mut entry.next,
                None => break,
            }
        }

        // cursor now rests on the tail link of the chain
        *cursor = Some(Box::new(Entry { key, value, next: None }));
        self.size = self.size.saturating_add(1);

        if self.load_factor() > GROW_THRESHOLD {
            self.resize(GROW_RATE);
        }
        None
    }

    /// Retrieves the value stored under `key`.
    ///
    /// Absence is a normal outcome, reported as `None`. The table is not
    /// mutated. O(1) on average, O(chain length) in the worst case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.bucket_index(key);
        let mut node = self.storage.get(index)?.as_deref();
        while let Some(entry) = node {
            if entry.key == key {
                return Some(&entry.value);
            }
            node = entry.next.as_deref();
        }
        None
    }

    /// Retrieves a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.bucket_index(key);
        let mut node = self.storage.get_mut(index)?.as_deref_mut();
        while let Some(entry) = node {
            if entry.key == key {
                return Some(&mut entry.value);
            }
            node = entry.next.as_deref_mut();
        }
        None
    }

    /// Removes the entry stored under `key`, returning its value.
    ///
    /// `None` reports that no entry was found and the table is unchanged.
    /// After a successful removal the table shrinks 0.5x once the load factor
    /// drops under 0.2, but never below its initial capacity.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.bucket_index(key);
        let mut cursor = self.storage.get_mut(index)?;
        loop {
            match cursor {
                None => return None,
                Some(entry) if entry.key == key => break,
                Some(entry) => cursor = &mut entry.next,
            }
        }

        // cursor rests on the link holding the matching entry; unlink it
        let mut removed = cursor.take()?;
        *cursor = removed.next.take();
        self.size = self.size.saturating_sub(1);

        if self.load_factor() < SHRINK_THRESHOLD && self.capacity() > self.initial_capacity {
            self.shrink();
        }
        Some(removed.value)
    }

    /// Resizes the table to `round(rate x capacity)` buckets, minimum 1,
    /// rehashing every entry under the new bucket count.
    ///
    /// The entry set is preserved exactly and `size` is unchanged; the order
    /// of entries within a chain is not preserved. No intermediate state is
    /// observable by the caller.
    #[allow(
        clippy::arithmetic_side_effects,
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn resize(&mut self, rate: f64) {
        let target = ((rate * self.capacity() as f64).round() as usize).max(1);
        self.rehash_into(target);
    }

    /// Halves the bucket count, clamped to the table's initial capacity
    #[allow(
        clippy::arithmetic_side_effects,
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn shrink(&mut self) {
        let halved = (SHRINK_RATE * self.capacity() as f64).round() as usize;
        self.rehash_into(halved.max(self.initial_capacity).max(1));
    }

    /// Replaces the bucket array with `new_capacity` slots and rehomes every
    /// entry into the chain it hashes to under the new capacity
    fn rehash_into(&mut self, new_capacity: usize) {
        let old_storage = mem::replace(&mut self.storage, Self::empty_storage(new_capacity));
        for slot in old_storage {
            let mut node = slot;
            while let Some(mut entry) = node {
                node = entry.next.take();
                let index = bucket_for(djb2(&entry.key), new_capacity);
                if let Some(new_slot) = self.storage.get_mut(index) {
                    entry.next = new_slot.take();
                    *new_slot = Some(entry);
                }
            }
        }
    }

    /// Returns the number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the current number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Returns the bucket count the table was constructed with
    #[must_use]
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Returns the current load factor of the table
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity().max(1) as f64
    }

    /// Removes every entry, keeping the current bucket count
    pub fn clear(&mut self) {
        for slot in &mut self.storage {
            // unlink one node at a time; dropping a whole chain at once
            // would recurse through the nested boxes
            let mut node = slot.take();
            while let Some(mut entry) = node {
                node = entry.next.take();
            }
        }
        self.size = 0;
    }

    /// Returns an iterator over the table's entries, in no particular order
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: self.storage.iter(), chain: None }
    }
}

impl<V> Drop for ChainedHashMap<V> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Iterator over the entries of a [`ChainedHashMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Bucket slots not yet visited
    buckets: std::slice::Iter<'a, Link<V>>,
    /// Position within the chain currently being walked
    chain: Option<&'a Entry<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain {
                self.chain = entry.next.as_deref();
                return Some((entry.key.as_str(), &entry.value));
            }
            self.chain = self.buckets.next()?.as_deref();
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn round_trips_every_inserted_pair(
            pairs in proptest::collection::vec(("[a-z]{0,8}", any::<u32>()), 0..64),
        ) {
            let mut map = ChainedHashMap::new();
            let mut model = std::collections::HashMap::new();
            for (key, value) in pairs {
                map.insert(key.clone(), value);
                model.insert(key, value);
            }

            prop_assert_eq!(map.len(), model.len());
            for (key, value) in &model {
                prop_assert_eq!(map.get(key), Some(value));
            }
        }

        #[test]
        fn removals_mirror_the_model(
            pairs in proptest::collection::vec(("[a-c]{1,3}", any::<u16>()), 0..48),
            probes in proptest::collection::vec("[a-c]{1,3}", 0..48),
        ) {
            let mut map = ChainedHashMap::new();
            let mut model = std::collections::HashMap::new();
            for (key, value) in pairs {
                map.insert(key.clone(), value);
                model.insert(key, value);
            }

            for key in probes {
                prop_assert_eq!(map.remove(&key), model.remove(&key));
            }
            prop_assert_eq!(map.len(), model.len());
        }

        #[test]
        fn rehash_preserves_the_entry_set(
            pairs in proptest::collection::vec(("[a-z]{0,8}", any::<u32>()), 0..64),
            rate in 0.3f64..3.0,
        ) {
            let mut map = ChainedHashMap::new();
            let mut model = std::collections::HashMap::new();
            for (key, value) in pairs {
                map.insert(key.clone(), value);
                model.insert(key, value);
            }

            map.resize(rate);

            prop_assert_eq!(map.len(), model.len());
            for (key, value) in &model {
                prop_assert_eq!(map.get(key), Some(value));
            }
        }

        #[test]
        fn insert_only_sequences_keep_the_load_factor_bounded(
            keys in proptest::collection::vec("[a-z]{1,6}", 1..128),
        ) {
            let mut map = ChainedHashMap::new();
            for key in keys {
                map.insert(key, 0u8);
                prop_assert!(map.load_factor() <= GROW_THRESHOLD);
            }
        }
    }
}

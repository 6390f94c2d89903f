//! # Separate-Chaining Hash Table
//!
//! This module provides `HashTable`, a resizable key/value store with average
//! O(1) `set`, `get` and `delete`. Collisions are resolved by chaining: every
//! bucket owns an ordered list of the entries whose keys map to its slot, so
//! two distinct keys landing on the same index never overwrite each other.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                        HashTable<K, V, S>                                │
//!   │                                                                          │
//!   │   hash_builder: S            (HashFunction = seeded xxh3 by default)     │
//!   │   len: usize                 (live entries)                              │
//!   │   max_load_factor: f64       (0.7 by default)                            │
//!   │   growth_factor: usize       (2 by default)                              │
//!   │                                                                          │
//!   │   buckets: Vec<Bucket<K, V>>  (capacity == buckets.len())                │
//!   │                                                                          │
//!   │     [0] ──► ∅                                                            │
//!   │     [1] ──► Entry(h1, k1, v1) ─ Entry(h5, k5, v5)    ← collision chain   │
//!   │     [2] ──► Entry(h2, k2, v2)                                            │
//!   │     [3] ──► ∅                                                            │
//!   │                                                                          │
//!   │   index(key) = hash(key) mod capacity                                    │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Insert Flow
//!
//! ```text
//!   set(key, value)
//!        │
//!        ▼
//!   ┌────────────────────────────────────────────────────────────────────────┐
//!   │ Scan the chain at hash(key) mod capacity                               │
//!   │                                                                        │
//!   │   FOUND → replace value in place, return the old value (len unchanged) │
//!   │   MISS  → append Entry to the chain tail, len += 1                     │
//!   └────────────────────────────────────────────────────────────────────────┘
//!        │ (append only)
//!        ▼
//!   ┌────────────────────────────────────────────────────────────────────────┐
//!   │ len / capacity > max_load_factor?                                      │
//!   │                                                                        │
//!   │   NO  → done                                                           │
//!   │   YES → capacity *= growth_factor (until within the load factor),      │
//!   │         move every entry to its new slot using its stored hash         │
//!   └────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deletes never shrink the bucket array.
//!
//! ## Core Operations
//!
//! | Method                 | Complexity | Description                             |
//! |------------------------|------------|-----------------------------------------|
//! | `new(capacity)`        | O(c)       | Empty table with `capacity` buckets     |
//! | `set(k, v)`            | O(1)*      | Insert or overwrite, may resize         |
//! | `get(&k)`              | O(1)       | Value or `KeyNotFound`                  |
//! | `get_or_default(&k,d)` | O(1)       | Value or the supplied default           |
//! | `contains(&k)`         | O(1)       | Membership test                         |
//! | `delete(&k)`           | O(1)       | Remove and return value or `KeyNotFound`|
//! | `len()`                | O(1)       | Live entries                            |
//! | `capacity()`           | O(1)       | Bucket-array size                       |
//! | `keys/values/pairs()`  | O(n + c)   | Owned snapshots, no aliasing            |
//! | `iter()`               | O(n + c)   | Lazy, restartable pass over entries     |
//!
//! \* Amortized over geometric growth
//!
//! ## Thread Safety
//!
//! - `HashTable` performs no internal locking
//! - Serialize mutations against reads externally, e.g. with `SharedHashTable`
//!
//! ## Example Usage
//!
//! ```rust
//! use bucketmap::container::HashTable;
//!
//! let mut table = HashTable::new(4).unwrap();
//! table.set("x", 1);
//! table.set("y", 2);
//! table.set("x", 3);
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.get("x"), Ok(&3));
//! assert!(table.get("z").is_err());
//! assert_eq!(table.get_or_default("z", 0), 0);
//! ```

use std::borrow::Borrow;
use std::fmt::{self, Debug, Display};
use std::hash::{BuildHasher, Hash};
use std::mem;
use std::ops::Index;

use log::{debug, trace};

use crate::common::config::{HashTableConfig, FROM_PAIRS_CAPACITY_MULTIPLIER};
use crate::common::exception::HashTableError;
use crate::container::bucket::{Bucket, Entry};
use crate::container::hash_function::HashFunction;
use crate::container::iter::{IntoIter, Iter, IterMut};

/// Point-in-time diagnostics for a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashTableStats {
    pub len: usize,
    pub capacity: usize,
    pub load_factor: f64,
    pub occupied_buckets: usize,
    pub longest_chain: usize,
    pub resizes: usize,
}

/// A resizable hash table resolving collisions by chaining.
///
/// See module-level documentation for details.
#[derive(Clone)]
pub struct HashTable<K, V, S = HashFunction> {
    buckets: Vec<Bucket<K, V>>,
    len: usize,
    max_load_factor: f64,
    growth_factor: usize,
    resizes: usize,
    hash_builder: S,
}

fn not_found<Q: Debug + ?Sized>(key: &Q) -> HashTableError {
    HashTableError::KeyNotFound(format!("{:?}", key))
}

fn default_pairs_capacity(pair_count: usize) -> usize {
    pair_count
        .saturating_mul(FROM_PAIRS_CAPACITY_MULTIPLIER)
        .max(1)
}

impl<K, V> HashTable<K, V, HashFunction> {
    /// Creates an empty table with `capacity` buckets and default settings.
    ///
    /// Any integer type is accepted so that zero and negative requests are
    /// reported as `InvalidCapacity` instead of wrapping.
    pub fn new<C>(capacity: C) -> Result<Self, HashTableError>
    where
        C: TryInto<usize> + Display + Copy,
    {
        let buckets: usize = capacity
            .try_into()
            .map_err(|_| HashTableError::InvalidCapacity(capacity.to_string()))?;
        Self::with_config(HashTableConfig::default().with_initial_capacity(buckets))
    }

    pub fn with_config(config: HashTableConfig) -> Result<Self, HashTableError> {
        Self::with_config_and_hasher(config, HashFunction::new())
    }
}

impl<K, V, S> HashTable<K, V, S> {
    /// Creates an empty table with `capacity` buckets hashed by `hash_builder`.
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Result<Self, HashTableError> {
        Self::with_config_and_hasher(
            HashTableConfig::default().with_initial_capacity(capacity),
            hash_builder,
        )
    }

    pub fn with_config_and_hasher(
        config: HashTableConfig,
        hash_builder: S,
    ) -> Result<Self, HashTableError> {
        config.validate()?;
        Ok(Self::assemble(config, hash_builder))
    }

    /// Builds the table from an already validated configuration.
    fn assemble(config: HashTableConfig, hash_builder: S) -> Self {
        let mut buckets = Vec::with_capacity(config.initial_capacity);
        buckets.resize_with(config.initial_capacity, Bucket::new);
        trace!(
            "Created hash table with {} buckets (max load factor {})",
            config.initial_capacity,
            config.max_load_factor
        );

        Self {
            buckets,
            len: 0,
            max_load_factor: config.max_load_factor,
            growth_factor: config.growth_factor,
            resizes: 0,
            hash_builder,
        }
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets in the bucket array, distinct from `len`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Lazily visits every live entry once. Calling it again restarts the
    /// pass; the order is unspecified.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.buckets, self.len)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.buckets, self.len)
    }

    /// Snapshot of every key. Keys are distinct; order is unspecified.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Snapshot of every value, one per live entry.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Snapshot of every `(key, value)` pair.
    pub fn pairs(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Removes every entry, keeping the current bucket array size.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    pub fn stats(&self) -> HashTableStats {
        HashTableStats {
            len: self.len,
            capacity: self.buckets.len(),
            load_factor: self.load_factor(),
            occupied_buckets: self.buckets.iter().filter(|b| !b.is_empty()).count(),
            longest_chain: self.buckets.iter().map(Bucket::len).max().unwrap_or(0),
            resizes: self.resizes,
        }
    }

    #[inline]
    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// Smallest geometric step from the current capacity that holds
    /// `entries` within the load factor.
    fn required_capacity(&self, entries: usize) -> usize {
        let mut capacity = self.buckets.len();
        while entries as f64 / capacity as f64 > self.max_load_factor && capacity < usize::MAX {
            capacity = capacity.saturating_mul(self.growth_factor);
        }
        capacity
    }

    /// Moves every entry into a fresh bucket array of `new_capacity` slots.
    fn rehash(&mut self, new_capacity: usize) {
        let old_capacity = self.buckets.len();
        let mut new_buckets = Vec::with_capacity(new_capacity);
        new_buckets.resize_with(new_capacity, Bucket::new);

        let old_buckets = mem::replace(&mut self.buckets, new_buckets);
        for bucket in old_buckets {
            for entry in bucket.into_entries() {
                let index = self.bucket_index(entry.hash);
                self.buckets[index].push(entry);
            }
        }

        self.resizes += 1;
        debug!(
            "Resized hash table from {} to {} buckets ({} entries)",
            old_capacity, new_capacity, self.len
        );
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    fn make_hash<Q>(&self, key: &Q) -> u64
    where
        Q: Hash + ?Sized,
    {
        self.hash_builder.hash_one(key)
    }

    fn find<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.make_hash(key);
        self.buckets[self.bucket_index(hash)].find(hash, key)
    }

    fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.make_hash(key);
        let index = self.bucket_index(hash);
        self.buckets[index].find_mut(hash, key)
    }

    /// Inserts `value` under `key`.
    ///
    /// An existing entry keeps its slot and has its value replaced; the old
    /// value is returned and `len` is unchanged. Otherwise the entry is
    /// appended to its bucket, and the table grows if the load factor is now
    /// exceeded.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.make_hash(&key);
        let index = self.bucket_index(hash);

        if let Some(entry) = self.buckets[index].find_mut(hash, &key) {
            return Some(mem::replace(&mut entry.value, value));
        }

        self.buckets[index].push(Entry::new(hash, key, value));
        self.len += 1;

        let required = self.required_capacity(self.len);
        if required > self.buckets.len() {
            self.rehash(required);
        }
        None
    }

    /// Returns the value stored under `key`, or `KeyNotFound` carrying the key.
    pub fn get<Q>(&self, key: &Q) -> Result<&V, HashTableError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        self.find(key)
            .map(|entry| &entry.value)
            .ok_or_else(|| not_found(key))
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, HashTableError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        match self.find_mut(key) {
            Some(entry) => Ok(&mut entry.value),
            None => Err(not_found(key)),
        }
    }

    /// Like `get`, but a miss yields `default` instead of an error.
    pub fn get_or_default<Q>(&self, key: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        match self.find(key) {
            Some(entry) => entry.value.clone(),
            None => default,
        }
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Removes `key` and returns its value. The bucket array never shrinks.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V, HashTableError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let hash = self.make_hash(key);
        let index = self.bucket_index(hash);
        let bucket = &mut self.buckets[index];

        match bucket.position(hash, key) {
            Some(position) => {
                let entry = bucket.remove(position);
                self.len -= 1;
                Ok(entry.value)
            }
            None => Err(not_found(key)),
        }
    }

    /// Grows the bucket array ahead of time so that `additional` more
    /// entries fit without crossing the load factor.
    pub fn reserve(&mut self, additional: usize) {
        let required = self.required_capacity(self.len.saturating_add(additional));
        if required > self.buckets.len() {
            self.rehash(required);
        }
    }
}

impl<K, V> HashTable<K, V, HashFunction>
where
    K: Hash + Eq,
{
    /// Bulk constructor. Without an explicit capacity the table is sized to
    /// ten buckets per pair. Later duplicates overwrite earlier ones.
    pub fn from_pairs<I>(pairs: I, capacity: Option<usize>) -> Result<Self, HashTableError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs: Vec<(K, V)> = pairs.into_iter().collect();
        let capacity = capacity.unwrap_or_else(|| default_pairs_capacity(pairs.len()));

        let mut table = Self::new(capacity)?;
        table.extend(pairs);
        Ok(table)
    }
}

impl<K, V> Default for HashTable<K, V, HashFunction> {
    fn default() -> Self {
        Self::assemble(HashTableConfig::default(), HashFunction::new())
    }
}

impl<K, V> FromIterator<(K, V)> for HashTable<K, V, HashFunction>
where
    K: Hash + Eq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let pairs: Vec<(K, V)> = iter.into_iter().collect();
        let config =
            HashTableConfig::default().with_initial_capacity(default_pairs_capacity(pairs.len()));

        let mut table = Self::assemble(config, HashFunction::new());
        table.extend(pairs);
        table
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Inserts pair by pair. Growth only happens when a new key pushes the
    /// load factor over the threshold, so duplicates never grow the table.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V, S> PartialEq for HashTable<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    /// Tables are equal when they hold the same mapping, regardless of
    /// capacity or iteration order.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .iter()
                .all(|(key, value)| other.find(key).is_some_and(|e| e.value == *value))
    }
}

impl<K, V, S> Eq for HashTable<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, Q, V, S> Index<&Q> for HashTable<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + Debug + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    /// # Panics
    /// Panics if the key is absent. Use `get` for a recoverable miss.
    fn index(&self, key: &Q) -> &V {
        match self.find(key) {
            Some(entry) => &entry.value,
            None => panic!("key not found in HashTable: {:?}", key),
        }
    }
}

/// Renders as `{k1: v1, k2: v2}`. Entry order is unspecified.
impl<K, V, S> Display for HashTable<K, V, S>
where
    K: Display,
    V: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

impl<K, V, S> Debug for HashTable<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashTable<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for HashTable<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.buckets, self.len)
    }
}

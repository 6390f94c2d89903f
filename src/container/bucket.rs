//! # Buckets and Entries
//!
//! A bucket is the storage slot addressed by `hash(key) mod capacity`. Each
//! bucket owns an ordered chain of entries whose keys landed on that slot.
//!
//! ```text
//!   Bucket
//!   └── entries: Vec<Entry>
//!         [0] Entry { hash, key, value }   ← oldest insertion
//!         [1] Entry { hash, key, value }
//!         [n] Entry { hash, key, value }   ← newest insertion
//! ```
//!
//! The full 64-bit hash is stored next to each key. Lookups compare the
//! stored hash first and only fall back to `Eq` on a hash match, and a
//! rehash redistributes entries without calling the hasher again.

use std::borrow::Borrow;

/// An owned key/value pair together with the hash of its key.
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    pub(crate) hash: u64,
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> Entry<K, V> {
    #[inline]
    pub(crate) fn new(hash: u64, key: K, value: V) -> Self {
        Self { hash, key, value }
    }

    #[inline]
    fn matches<Q>(&self, hash: u64, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.hash == hash && self.key.borrow() == key
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Ordered chain of entries sharing one slot index.
#[derive(Debug, Clone)]
pub struct Bucket<K, V> {
    entries: Vec<Entry<K, V>>,
}

impl<K, V> Default for Bucket<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K, V> Bucket<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the entry holding `key`, if present.
    pub fn position<Q>(&self, hash: u64, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.entries.iter().position(|e| e.matches(hash, key))
    }

    pub fn find<Q>(&self, hash: u64, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.entries.iter().find(|e| e.matches(hash, key))
    }

    pub fn find_mut<Q>(&mut self, hash: u64, key: &Q) -> Option<&mut Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.entries.iter_mut().find(|e| e.matches(hash, key))
    }

    /// Appends to the tail of the chain. The caller guarantees the key is
    /// not already present.
    pub fn push(&mut self, entry: Entry<K, V>) {
        self.entries.push(entry);
    }

    /// Removes the entry at `index`, keeping the remaining chain order.
    pub fn remove(&mut self, index: usize) -> Entry<K, V> {
        self.entries.remove(index)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[Entry<K, V>] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [Entry<K, V>] {
        &mut self.entries
    }

    pub(crate) fn into_entries(self) -> Vec<Entry<K, V>> {
        self.entries
    }
}

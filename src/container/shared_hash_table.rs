//! Shared handle around a `HashTable`.
//!
//! The table itself does no locking. `SharedHashTable` puts it behind a
//! `parking_lot::RwLock` so that mutations are serialized against each other
//! and against reads, and snapshots are taken under the same lock.

use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::common::exception::HashTableError;
use crate::container::hash_function::HashFunction;
use crate::container::hash_table::HashTable;

pub struct SharedHashTable<K, V, S = HashFunction> {
    inner: Arc<RwLock<HashTable<K, V, S>>>,
}

impl<K, V, S> Clone for SharedHashTable<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedHashTable<K, V, HashFunction> {
    pub fn new(capacity: usize) -> Result<Self, HashTableError> {
        Ok(Self::from_table(HashTable::new(capacity)?))
    }
}

impl<K, V, S> SharedHashTable<K, V, S> {
    pub fn from_table(table: HashTable<K, V, S>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(table)),
        }
    }

    /// Runs `f` with shared access to the table.
    pub fn read<R>(&self, f: impl FnOnce(&HashTable<K, V, S>) -> R) -> R {
        f(&*self.inner.read())
    }

    /// Runs `f` with exclusive access to the table.
    pub fn write<R>(&self, f: impl FnOnce(&mut HashTable<K, V, S>) -> R) -> R {
        f(&mut *self.inner.write())
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn pairs(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.inner.read().pairs()
    }
}

impl<K, V, S> SharedHashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    pub fn set(&self, key: K, value: V) -> Option<V> {
        self.inner.write().set(key, value)
    }

    /// Values cannot be borrowed past the lock, so hits are cloned out.
    pub fn get_cloned<Q>(&self, key: &Q) -> Result<V, HashTableError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
        V: Clone,
    {
        self.inner.read().get(key).cloned()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().contains(key)
    }

    pub fn delete<Q>(&self, key: &Q) -> Result<V, HashTableError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        self.inner.write().delete(key)
    }
}

impl<K, V, S> Debug for SharedHashTable<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedHashTable")
            .field("table", &*self.inner.read())
            .finish()
    }
}

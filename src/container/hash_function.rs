use std::hash::{BuildHasher, Hash, Hasher};

use xxhash_rust::xxh3::Xxh3;

use crate::common::config::DEFAULT_HASH_SEED;

/// Default hash function for tables: seeded xxh3.
///
/// Hashing is deterministic for a given seed, so equal keys produce equal
/// hashes across calls, tables and processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashFunction {
    seed: u64,
}

impl HashFunction {
    /// Creates a new `HashFunction` using the default seed.
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_HASH_SEED)
    }

    /// Creates a new `HashFunction` with an explicit seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the hash value of the given key.
    ///
    /// # Parameters
    /// - `key`: The key to be hashed.
    ///
    /// # Returns
    /// The hashed value.
    pub fn get_hash<Q>(&self, key: &Q) -> u64
    where
        Q: Hash + ?Sized,
    {
        let mut hasher = self.build_hasher();
        key.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for HashFunction {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildHasher for HashFunction {
    type Hasher = Xxh3;

    fn build_hasher(&self) -> Xxh3 {
        Xxh3::with_seed(self.seed)
    }
}

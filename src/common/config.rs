use crate::common::exception::HashTableError;

/// Load factor (`len / capacity`) above which an insert triggers a resize.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.7;

/// Bucket-array multiplier applied on every resize.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// Bucket count used by `HashTableConfig::default()` and `FromIterator`.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// `from_pairs` sizes the table to this many buckets per input pair so the
/// initial load factor stays low.
pub const FROM_PAIRS_CAPACITY_MULTIPLIER: usize = 10;

/// Seed for the default xxh3 hash function.
pub const DEFAULT_HASH_SEED: u64 = 0;

/// Construction parameters for a `HashTable`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashTableConfig {
    pub initial_capacity: usize,
    pub max_load_factor: f64,
    pub growth_factor: usize,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl HashTableConfig {
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_max_load_factor(mut self, load_factor: f64) -> Self {
        self.max_load_factor = load_factor;
        self
    }

    pub fn with_growth_factor(mut self, growth_factor: usize) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// Checks every field, reporting the first violation found.
    pub fn validate(&self) -> Result<(), HashTableError> {
        if self.initial_capacity < 1 {
            return Err(HashTableError::InvalidCapacity(
                self.initial_capacity.to_string(),
            ));
        }
        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(HashTableError::InvalidLoadFactor(self.max_load_factor));
        }
        if self.growth_factor < 2 {
            return Err(HashTableError::InvalidGrowthFactor(self.growth_factor));
        }
        Ok(())
    }
}

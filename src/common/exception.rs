use thiserror::Error;

/// Errors surfaced by the hash table.
///
/// `KeyNotFound` is the expected, recoverable miss signal from strict
/// accessors. The remaining variants are construction-time precondition
/// violations: no table is produced when they occur.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HashTableError {
    #[error("Invalid capacity {0}: a table needs at least one bucket")]
    InvalidCapacity(String),
    #[error("Invalid load factor {0}: must be a finite value greater than zero")]
    InvalidLoadFactor(f64),
    #[error("Invalid growth factor {0}: must be at least 2")]
    InvalidGrowthFactor(usize),
    #[error("Key not found: {0}")]
    KeyNotFound(String),
}

impl HashTableError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, HashTableError::KeyNotFound(_))
    }
}

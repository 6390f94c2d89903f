//! Resizable separate-chaining hash table.
//!
//! - `container`: the table, its buckets, iterators, hash function and a
//!   lock-guarded shared handle
//! - `common`: configuration, errors and logging setup

pub mod common;
pub mod container;

pub use common::config::HashTableConfig;
pub use common::exception::HashTableError;
pub use container::{HashFunction, HashTable, HashTableStats, SharedHashTable};

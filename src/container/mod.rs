pub mod bucket;
pub mod hash_function;
pub mod hash_table;
pub mod iter;
pub mod shared_hash_table;

pub use hash_function::HashFunction;
pub use hash_table::{HashTable, HashTableStats};
pub use shared_hash_table::SharedHashTable;

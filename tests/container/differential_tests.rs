use std::collections::HashMap;

use bucketmap::container::HashTable;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::logger::init_test_logger;

#[derive(Debug, Clone, Copy)]
enum Op {
    Set(u16, u32),
    Delete(u16),
    Get(u16),
}

fn random_ops(seed: u64, count: usize, key_space: u16) -> Vec<Op> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let key = rng.gen_range(0..key_space);
            match rng.gen_range(0..10) {
                0..=5 => Op::Set(key, rng.gen()),
                6..=7 => Op::Delete(key),
                _ => Op::Get(key),
            }
        })
        .collect()
}

/// Replays `ops` against both the table and std's map, checking every result.
fn replay(ops: &[Op], initial_capacity: usize) {
    let mut table = HashTable::new(initial_capacity).unwrap();
    let mut oracle: HashMap<u16, u32> = HashMap::new();

    for (step, op) in ops.iter().enumerate() {
        match *op {
            Op::Set(key, value) => {
                assert_eq!(table.set(key, value), oracle.insert(key, value), "step {}", step);
            }
            Op::Delete(key) => {
                assert_eq!(table.delete(&key).ok(), oracle.remove(&key), "step {}", step);
            }
            Op::Get(key) => {
                assert_eq!(table.get(&key).ok(), oracle.get(&key), "step {}", step);
                assert_eq!(table.contains(&key), oracle.contains_key(&key));
            }
        }
        assert_eq!(table.len(), oracle.len(), "step {}", step);
        assert!(table.load_factor() <= table.max_load_factor());
    }

    let mut pairs = table.pairs();
    pairs.sort_unstable();
    let mut expected: Vec<(u16, u32)> = oracle.into_iter().collect();
    expected.sort_unstable();
    assert_eq!(pairs, expected);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_std_hashmap_dense_keys() {
        init_test_logger();
        replay(&random_ops(7, 20_000, 64), 1);
    }

    #[test]
    fn test_matches_std_hashmap_sparse_keys() {
        init_test_logger();
        replay(&random_ops(42, 20_000, u16::MAX), 4);
    }

    #[test]
    fn test_matches_std_hashmap_across_seeds() {
        init_test_logger();
        for seed in 0..8 {
            replay(&random_ops(seed, 2_000, 512), 2);
        }
    }
}

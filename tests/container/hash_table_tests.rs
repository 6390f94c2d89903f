use std::collections::HashSet;

use bucketmap::common::config::HashTableConfig;
use bucketmap::common::exception::HashTableError;
use bucketmap::container::HashTable;

use crate::common::logger::init_test_logger;
use crate::{assert_not_found, assert_ok};

fn as_set<T: std::hash::Hash + Eq>(items: Vec<T>) -> HashSet<T> {
    items.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reports_len_and_capacity() {
        init_test_logger();

        for capacity in 1..=32_usize {
            let table: HashTable<String, i32> = assert_ok!(HashTable::new(capacity));
            assert_eq!(table.len(), 0);
            assert_eq!(table.capacity(), capacity);
        }
    }

    #[test]
    fn test_invalid_capacities() {
        init_test_logger();

        assert!(matches!(
            HashTable::<String, i32>::new(0),
            Err(HashTableError::InvalidCapacity(_))
        ));
        assert!(matches!(
            HashTable::<String, i32>::new(-1_i64),
            Err(HashTableError::InvalidCapacity(_))
        ));
    }

    #[test]
    fn test_overwrite_scenario() {
        init_test_logger();
        let mut t = assert_ok!(HashTable::new(4));

        t.set("x", 1);
        t.set("y", 2);
        t.set("x", 3);

        assert_eq!(t.len(), 2);
        assert_eq!(assert_ok!(t.get("x")), &3);
        assert_eq!(assert_ok!(t.get("y")), &2);
    }

    #[test]
    fn test_small_table_scenario() {
        init_test_logger();
        let mut t = assert_ok!(HashTable::new(2));

        t.set("a", 1);
        t.set("b", 2);
        t.set("c", 3);

        assert!(t.contains("a") && t.contains("b") && t.contains("c"));
        assert_eq!(assert_ok!(t.get("a")), &1);
        assert_eq!(assert_ok!(t.get("b")), &2);
        assert_eq!(assert_ok!(t.get("c")), &3);
    }

    #[test]
    fn test_from_pairs_duplicates_keep_explicit_capacity() {
        init_test_logger();
        let t = assert_ok!(HashTable::from_pairs((0..10).map(|i| ("a", i)), Some(2)));

        assert_eq!(t.len(), 1);
        assert_eq!(t.capacity(), 2);
        assert_eq!(assert_ok!(t.get("a")), &9);

        let mut t = assert_ok!(HashTable::new(4));
        t.set("a", 0);
        t.extend((0..100).map(|i| ("a", i)));
        assert_eq!(t.len(), 1);
        assert_eq!(t.capacity(), 4);
    }

    #[test]
    fn test_from_pairs_scenario() {
        init_test_logger();
        let t = assert_ok!(HashTable::from_pairs(
            vec![("a".to_string(), 1), ("b".to_string(), 2)],
            None
        ));

        assert_eq!(t.len(), 2);
        assert_eq!(
            as_set(t.keys()),
            HashSet::from(["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            as_set(t.pairs()),
            HashSet::from([("a".to_string(), 1), ("b".to_string(), 2)])
        );
    }

    #[test]
    fn test_missing_keys() {
        init_test_logger();
        let mut t = assert_ok!(HashTable::new(8));
        t.set(1_u64, "one");

        assert_not_found!(t.get(&2));
        assert_not_found!(t.delete(&2));
        assert_eq!(t.len(), 1);
        assert_eq!(t.get_or_default(&2, "default"), "default");
    }

    #[test]
    fn test_not_found_carries_key() {
        init_test_logger();
        let t: HashTable<String, i32> = assert_ok!(HashTable::new(8));

        let err = t.get("ghost").unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_resize_preserves_every_entry() {
        init_test_logger();
        let mut t = assert_ok!(HashTable::new(3));
        let n = 5_000;

        for i in 0..n {
            t.set(format!("key_{}", i), i);
        }

        assert_eq!(t.len(), n);
        assert!(t.capacity() > 3);
        assert!(t.stats().resizes > 0);
        assert_eq!(as_set(t.keys()).len(), n);
        for i in 0..n {
            assert_eq!(assert_ok!(t.get(format!("key_{}", i).as_str())), &i);
        }
    }

    #[test]
    fn test_delete_half_then_verify() {
        init_test_logger();
        let mut t = assert_ok!(HashTable::new(16));
        for i in 0..200 {
            t.set(i, i * 3);
        }

        for i in (0..200).step_by(2) {
            let before = t.len();
            assert_eq!(assert_ok!(t.delete(&i)), i * 3);
            assert_eq!(t.len(), before - 1);
            assert!(!t.contains(&i));
        }

        assert_eq!(t.len(), 100);
        for i in (1..200).step_by(2) {
            assert_eq!(assert_ok!(t.get(&i)), &(i * 3));
        }
    }

    #[test]
    fn test_snapshot_unaffected_by_later_mutation() {
        init_test_logger();
        let mut t = assert_ok!(HashTable::new(8));
        t.set("a", 1);
        t.set("b", 2);

        let keys = t.keys();
        let values = t.values();
        let pairs = t.pairs();

        t.set("c", 3);
        t.set("a", 100);
        assert_ok!(t.delete("b"));

        assert_eq!(as_set(keys), HashSet::from(["a", "b"]));
        assert_eq!(as_set(values), HashSet::from([1, 2]));
        assert_eq!(as_set(pairs), HashSet::from([("a", 1), ("b", 2)]));
    }

    #[test]
    fn test_configured_table() {
        init_test_logger();
        let config = HashTableConfig::default()
            .with_initial_capacity(5)
            .with_max_load_factor(2.0);
        let mut t = assert_ok!(HashTable::with_config(config));

        for i in 0..10 {
            t.set(i, i);
        }
        assert_eq!(t.capacity(), 5);

        t.set(10, 10);
        assert_eq!(t.capacity(), 10);
        assert!(t.load_factor() <= 2.0);
    }

    #[test]
    fn test_rendering_is_set_equal() {
        init_test_logger();
        let t = assert_ok!(HashTable::from_pairs(vec![("x", 1), ("y", 2)], None));

        let rendered = t.to_string();
        assert!(rendered.starts_with('{') && rendered.ends_with('}'));
        let listed: HashSet<&str> = rendered[1..rendered.len() - 1].split(", ").collect();
        assert_eq!(listed, HashSet::from(["x: 1", "y: 2"]));
    }
}

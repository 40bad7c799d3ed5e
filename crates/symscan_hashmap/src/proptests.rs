use super::*;

use proptest::prelude::*;
use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

#[derive(Debug, Clone)]
enum Op {
    Insert(String, u32),
    Find(String),
}

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,7}"
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    // A narrow key space so duplicates and misses are both common.
    let key = "[a-e]{1,3}";
    let op = prop_oneof![
        3 => (key, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        1 => key.prop_map(Op::Find),
    ];
    prop::collection::vec(op, 0..400)
}

struct Counted {
    name: String,
    drops: Rc<Cell<usize>>,
}

impl Keyed for Counted {
    type Key = str;

    fn key(&self) -> &str {
        &self.name
    }
}

impl Drop for Counted {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_distinct_keys_round_trip(
        keys in prop::collection::hash_set(key_strategy(), 0..150),
        limit in 2usize..6,
    ) {
        let mut map: ExtendibleMap<(String, usize)> = ExtendibleMap::new(limit).unwrap();

        for (position, key) in keys.iter().enumerate() {
            prop_assert!(map.insert((key.clone(), position)).is_ok());
            prop_assert_eq!(map.check_invariants(), Ok(()));
            prop_assert_eq!(map.directory().len(), 1usize << map.global_depth());
        }

        prop_assert_eq!(map.len(), keys.len());
        for (position, key) in keys.iter().enumerate() {
            prop_assert_eq!(map.find(key), Some(&(key.clone(), position)));
        }
        prop_assert!(map.find("not-an-identifier").is_none());

        let listed: HashSet<&str> = map.iter().map(|(key, _)| key.as_str()).collect();
        let expected: HashSet<&str> = keys.iter().map(String::as_str).collect();
        prop_assert_eq!(listed, expected);
    }

    #[test]
    fn prop_matches_first_wins_model(ops in ops_strategy(), limit in 1usize..4) {
        let mut map: ExtendibleMap<(String, u32)> = ExtendibleMap::new(limit).unwrap();
        let mut model: HashMap<String, u32> = HashMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let result = map.insert((key.clone(), value));
                    if model.contains_key(&key) {
                        let error = result.unwrap_err();
                        prop_assert_eq!(error.kind(), MapError::DuplicateKey);
                        prop_assert_eq!(error.into_inner(), (key, value));
                    } else {
                        prop_assert!(result.is_ok());
                        model.insert(key, value);
                    }
                }
                Op::Find(key) => {
                    let found = map.find(&key).map(|(_, value)| *value);
                    prop_assert_eq!(found, model.get(&key).copied());
                }
            }

            prop_assert_eq!(map.len(), model.len());
        }

        prop_assert_eq!(map.check_invariants(), Ok(()));
    }

    #[test]
    fn prop_teardown_releases_every_value_once(
        keys in prop::collection::hash_set(key_strategy(), 0..120),
        limit in 2usize..5,
    ) {
        let drops = Rc::new(Cell::new(0));
        let mut map = ExtendibleMap::new(limit).unwrap();

        for key in &keys {
            let value = Counted { name: key.clone(), drops: Rc::clone(&drops) };
            prop_assert!(map.insert(value).is_ok());
        }
        prop_assert_eq!(drops.get(), 0);

        let distinct = map.buckets().count();
        prop_assert_eq!(distinct, map.bucket_count());
        prop_assert_eq!(map.destroy(), distinct);
        prop_assert_eq!(drops.get(), keys.len());
    }
}

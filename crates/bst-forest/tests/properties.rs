use std::collections::{BTreeMap, BTreeSet};

use bst_forest::{AvlMap, BstMap};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

#[derive(Clone, Debug)]
enum Op {
    Insert(u16, u32),
    Remove(u16),
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            3 => (0u16..256, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
            2 => (0u16..256).prop_map(Op::Remove),
        ],
        0..400,
    )
}

fn small_keys() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(0u16..1024, 0..256)
}

/// Upper bound on AVL height for `n` nodes.
fn avl_height_bound(n: usize) -> f64 {
    1.4405 * ((n + 2) as f64).log2() - 0.3277
}

proptest! {
    #[test]
    fn avl_matches_btree_and_stays_balanced(ops in ops()) {
        let mut avl = AvlMap::new();
        let mut model = BTreeMap::new();
        for op in ops {
            match op {
                Op::Insert(k, v) => prop_assert_eq!(avl.insert(k, v), model.insert(k, v)),
                Op::Remove(k) => prop_assert_eq!(avl.remove(&k), model.remove(&k)),
            }
            prop_assert_eq!(avl.validate(), Ok(()));
            prop_assert!(avl.is_balanced());
            prop_assert_eq!(avl.len(), model.len());
            prop_assert!(avl.height() as f64 <= avl_height_bound(avl.len()));
        }
        prop_assert!(avl.iter().eq(model.iter()));
    }

    #[test]
    fn bst_matches_btree(ops in ops()) {
        let mut bst = BstMap::new();
        let mut model = BTreeMap::new();
        for op in ops {
            match op {
                Op::Insert(k, v) => prop_assert_eq!(bst.insert(k, v), model.insert(k, v)),
                Op::Remove(k) => prop_assert_eq!(bst.remove(&k), model.remove(&k)),
            }
            prop_assert_eq!(bst.validate(), Ok(()));
        }
        prop_assert!(bst.iter().eq(model.iter()));
    }

    #[test]
    fn in_order_keys_strictly_ascend(keys in small_keys()) {
        let avl: AvlMap<u16, ()> = keys.iter().map(|&k| (k, ())).collect();
        let bst: BstMap<u16, ()> = keys.iter().map(|&k| (k, ())).collect();
        let avl_keys: Vec<u16> = avl.keys().copied().collect();
        let bst_keys: Vec<u16> = bst.keys().copied().collect();
        prop_assert!(avl_keys.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(&avl_keys, &bst_keys);
        let expected: Vec<u16> = keys.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(avl_keys, expected);
    }

    #[test]
    fn insert_then_remove_restores_key_set(keys in small_keys(), extra in 1024u16..2048) {
        let mut avl: AvlMap<u16, u16> = keys.iter().map(|&k| (k, k)).collect();
        let before: Vec<u16> = avl.keys().copied().collect();
        avl.insert(extra, 0);
        prop_assert_eq!(avl.remove(&extra), Some(0));
        let after: Vec<u16> = avl.keys().copied().collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(avl.validate(), Ok(()));
    }

    #[test]
    fn overwrite_keeps_one_node(keys in small_keys(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!keys.is_empty());
        let mut avl: AvlMap<u16, u32> = keys.iter().map(|&k| (k, 0)).collect();
        let len = avl.len();
        let key = keys[pick.index(keys.len())];
        avl.insert(key, 1);
        avl.insert(key, 2);
        prop_assert_eq!(avl.len(), len);
        prop_assert_eq!(avl.get(&key), Some(&2));
        prop_assert_eq!(avl.keys().filter(|&&k| k == key).count(), 1);
    }
}

#[test]
fn seeded_random_ladder() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(0x5eed_f0e5);
    let mut avl = AvlMap::new();
    let mut bst = BstMap::new();
    let mut model = BTreeMap::new();

    for _ in 0..5000 {
        let key: u32 = rng.gen_range(0..500);
        if rng.gen_bool(0.6) {
            let value: u64 = rng.gen();
            let expected = model.insert(key, value);
            assert_eq!(avl.insert(key, value), expected);
            assert_eq!(bst.insert(key, value), expected);
        } else {
            let expected = model.remove(&key);
            assert_eq!(avl.remove(&key), expected);
            assert_eq!(bst.remove(&key), expected);
        }
        avl.validate().unwrap();
        bst.validate().unwrap();
    }

    assert!(avl.iter().eq(model.iter()));
    assert!(bst.iter().eq(model.iter()));
    assert!(avl.height() as f64 <= avl_height_bound(avl.len()));
}

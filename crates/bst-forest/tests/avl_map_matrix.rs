use bst_forest::avl::{assert_balance, rotate_left, rotate_right, AvlMap, AvlNode};
use bst_forest::util::attach;
use bst_forest::{KvNode, Node, Side, TreeError, TreeNode};

fn keys(map: &AvlMap<i32, i32>) -> Vec<i32> {
    map.keys().copied().collect()
}

fn build(keys: &[i32]) -> AvlMap<i32, i32> {
    let mut map = AvlMap::new();
    for &k in keys {
        map.insert(k, k * 10);
        map.validate().unwrap();
    }
    map
}

#[test]
fn avl_map_smoke_matrix() {
    let mut map = AvlMap::new();
    map.insert(1, 1);
    map.insert(3, 5);
    map.insert(4, 5);
    assert_eq!(map.insert(3, 15), Some(5));
    map.insert(41, 0);
    map.insert(44, 123);

    assert_eq!(map.get(&44), Some(&123));
    assert_eq!(keys(&map), vec![1, 3, 4, 41, 44]);
    map.validate().unwrap();
}

#[test]
fn avl_map_sorted_insert_stays_logarithmic_matrix() {
    let map = build(&[1, 2, 3, 4, 5, 6, 7]);
    // ceil(log2(8)) levels.
    assert!(map.height() <= 3);
    assert_eq!(map.root_key(), Some(&4));
    assert!(map.is_balanced());
    for k in 1..=7 {
        assert_eq!(map.balance_of(&k), Some(0));
    }
}

#[test]
fn avl_map_single_rotation_insert_matrix() {
    // Right-right and left-left.
    for order in [[1, 2, 3], [3, 2, 1]] {
        let map = build(&order);
        assert_eq!(map.root_key(), Some(&2));
        assert_eq!(map.height(), 2);
        assert_eq!(keys(&map), vec![1, 2, 3]);
    }
}

#[test]
fn avl_map_double_rotation_insert_matrix() {
    // Left-right and right-left.
    for order in [[3, 1, 2], [1, 3, 2]] {
        let map = build(&order);
        assert_eq!(map.root_key(), Some(&2));
        assert_eq!(map.height(), 2);
        for k in 1..=3 {
            assert_eq!(map.balance_of(&k), Some(0));
        }
    }
}

#[test]
fn avl_map_double_rotation_with_leaning_pivot_matrix() {
    //        50                30
    //      /    \            /    \
    //    20      80   =>   20      50
    //   /  \              /  \       \
    //  10   30           10  25      80
    //      /
    //     25
    let map = build(&[50, 20, 80, 10, 30, 25]);
    assert_eq!(map.root_key(), Some(&30));
    assert_eq!(map.balance_of(&30), Some(0));
    assert_eq!(map.balance_of(&20), Some(0));
    assert_eq!(map.balance_of(&50), Some(1));
    assert_eq!(keys(&map), vec![10, 20, 25, 30, 50, 80]);

    let mirrored = build(&[50, 20, 80, 60, 90, 65]);
    assert_eq!(mirrored.root_key(), Some(&60));
    assert_eq!(mirrored.balance_of(&50), Some(-1));
    assert_eq!(mirrored.balance_of(&80), Some(0));
}

#[test]
fn avl_map_remove_root_of_full_tree_matrix() {
    let mut map = build(&[4, 2, 6, 1, 3, 5, 7]);
    assert_eq!(map.root_key(), Some(&4));

    assert_eq!(map.remove(&4), Some(40));
    assert_eq!(map.len(), 6);
    assert_eq!(keys(&map), vec![1, 2, 3, 5, 6, 7]);
    assert_eq!(map.root_key(), Some(&3));
    assert_eq!(map.balance_of(&2), Some(-1));
    assert!(map.is_balanced());
    map.validate().unwrap();
}

#[test]
fn avl_map_remove_outer_rotation_propagates_matrix() {
    let mut map = build(&[2, 1, 3, 4]);
    assert_eq!(map.balance_of(&2), Some(1));

    map.remove(&1);
    assert_eq!(map.root_key(), Some(&3));
    assert_eq!(map.height(), 2);
    for k in 2..=4 {
        assert_eq!(map.balance_of(&k), Some(0));
    }
    map.validate().unwrap();
}

#[test]
fn avl_map_remove_rotation_with_even_child_stops_matrix() {
    let mut map = build(&[2, 1, 4, 3, 5]);
    assert_eq!(map.balance_of(&4), Some(0));

    map.remove(&1);
    //      4
    //     / \
    //    2   5
    //     \
    //      3
    assert_eq!(map.root_key(), Some(&4));
    assert_eq!(map.balance_of(&4), Some(-1));
    assert_eq!(map.balance_of(&2), Some(1));
    assert_eq!(map.height(), 3);
    map.validate().unwrap();
}

#[test]
fn avl_map_remove_double_rotation_matrix() {
    let mut map = build(&[3, 1, 5, 4]);
    assert_eq!(map.balance_of(&5), Some(-1));

    map.remove(&1);
    assert_eq!(map.root_key(), Some(&4));
    assert_eq!(keys(&map), vec![3, 4, 5]);
    for k in 3..=5 {
        assert_eq!(map.balance_of(&k), Some(0));
    }
    map.validate().unwrap();
}

#[test]
fn avl_map_remove_propagates_to_root_matrix() {
    // Removing 12 shrinks the right side of 11, which shrinks the right side
    // of 8 and forces a rotation at the root.
    let mut map = build(&[8, 4, 11, 2, 6, 10, 12, 1, 3, 5, 7, 9, 0]);
    map.remove(&9);
    map.remove(&12);
    map.validate().unwrap();
    assert!(map.is_balanced());
    assert_eq!(keys(&map), vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 10, 11]);
    assert_eq!(map.root_key(), Some(&4));
}

#[test]
fn avl_map_ladder_insert_delete_matrix() {
    let mut map = AvlMap::<i32, i32>::new();

    for i in 0..300 {
        map.insert(i, i);
        map.validate().unwrap();
    }
    assert_eq!(map.len(), 300);
    assert!(map.height() <= 9 + 1);

    for i in (0..300).step_by(3) {
        assert_eq!(map.remove(&i), Some(i));
        map.validate().unwrap();
    }

    for i in 0..300 {
        if i % 3 == 0 {
            assert_eq!(map.get(&i), None);
        } else {
            assert_eq!(map.get(&i), Some(&i));
        }
    }

    for i in (0..300).rev() {
        map.remove(&i);
        map.validate().unwrap();
    }
    assert!(map.is_empty());
}

#[test]
fn avl_map_empty_tree_matrix() {
    let mut map = AvlMap::<i32, i32>::new();
    assert!(map.find(&1).is_end());
    assert_eq!(map.remove(&1), None);
    assert!(map.is_balanced());
    assert!(map.begin().is_end());
    assert_eq!(map.balance_of(&1), None);
    map.validate().unwrap();
}

#[test]
fn avl_map_misc_api_matrix() {
    let mut map: AvlMap<i32, i32> = [(10, 100), (5, 50), (20, 200)].into_iter().collect();
    assert_eq!(map.len(), 3);
    assert_eq!(map.find(&5).value(), Some(&50));
    assert_eq!(map.first_key_value(), Some((&5, &50)));
    assert_eq!(map.last_key_value(), Some((&20, &200)));
    assert_eq!(map[&10], 100);

    *map.get_mut(&10).unwrap() = 101;
    assert_eq!(map.at(&10), Ok(&101));
    assert!(map.at(&11).is_err());

    map.extend([(1, 10), (30, 300)]);
    assert_eq!(keys(&map), vec![1, 5, 10, 20, 30]);
    assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![10, 50, 101, 200, 300]);

    map.clear();
    assert!(map.is_empty());
    map.insert(7, 70);
    assert_eq!(map.root_key(), Some(&7));
    map.validate().unwrap();
}

#[test]
fn avl_map_print_matrix() {
    let map = build(&[2, 1]);
    let out = map.print();
    assert!(out.starts_with("Node[0] [bf=-1] { 2 = 20 }"));
    assert!(out.contains("[bf=0] { 1 = 10 }"));
}

#[test]
fn rotate_left_and_right_matrix() {
    //  10                20
    //    \              /  \
    //     20     =>    10   30
    //    /  \           \
    //   15   30          15
    let mut arena: Vec<TreeNode<i32, ()>> = [10, 20, 30, 15]
        .iter()
        .map(|&k| TreeNode::from_entry(k, ()))
        .collect();
    attach(&mut arena, 1, 0, Side::Right);
    attach(&mut arena, 2, 1, Side::Right);
    attach(&mut arena, 3, 1, Side::Left);

    let root = rotate_left(&mut arena, 0, 0);
    assert_eq!(root, 1);
    assert_eq!(arena[1].p(), None);
    assert_eq!(arena[1].l(), Some(0));
    assert_eq!(arena[0].p(), Some(1));
    assert_eq!(arena[0].r(), Some(3));
    assert_eq!(arena[3].p(), Some(0));

    let root = rotate_right(&mut arena, root, 1);
    assert_eq!(root, 0);
    assert_eq!(arena[0].p(), None);
    assert_eq!(arena[0].r(), Some(1));
    assert_eq!(arena[1].l(), Some(3));
    assert_eq!(arena[3].p(), Some(1));
}

#[test]
fn assert_balance_reports_stale_factor_matrix() {
    let mut arena = vec![AvlNode::new(1, ()), AvlNode::new(2, ())];
    attach(&mut arena, 1, 0, Side::Right);
    assert_eq!(
        assert_balance::<i32, (), _>(&arena, Some(0)),
        Err(TreeError::BalanceMismatch {
            node: 0,
            expected: 1,
            actual: 0
        })
    );

    arena[0].bf = 1;
    assert_eq!(assert_balance::<i32, (), _>(&arena, Some(0)), Ok(()));
}

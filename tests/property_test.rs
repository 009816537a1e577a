//! Properties over generated insert and delete sequences

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use termtree::Tree;

use ordtree::domain::{OrderedTree, TraversalOrder, TreeRender};

const MAX_LEN: usize = 200;
const PROPTEST_CASES: u32 = 256;

fn tree_of(values: &[i32]) -> OrderedTree<i32> {
    let mut tree = OrderedTree::default();
    for &v in values {
        tree.insert(v).unwrap();
    }
    tree
}

fn in_order(tree: &OrderedTree<i32>) -> Vec<i32> {
    tree.iter(TraversalOrder::InOrder).copied().collect()
}

/// Keys of every node with both children, read off the rendered tree.
fn two_child_keys(rendered: &Tree<String>) -> Vec<i32> {
    let mut keys = Vec::new();
    let mut stack = vec![rendered];
    while let Some(node) = stack.pop() {
        if node.leaves.len() == 2 {
            if let Some(key) = node.root.rsplit(' ').next().and_then(|k| k.parse().ok()) {
                keys.push(key);
            }
        }
        stack.extend(node.leaves.iter());
    }
    keys
}

proptest!(
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn in_order_is_sorted_insertion_multiset(
        inserts in proptest::collection::vec(-500..500i32, 0..MAX_LEN),
    ) {
        let tree = tree_of(&inserts);

        let mut expected = inserts.clone();
        expected.sort();
        prop_assert_eq!(in_order(&tree), expected);
        prop_assert_eq!(tree.len(), inserts.len());
    }

    #[test]
    fn inserted_values_are_found(
        mut inserts in proptest::collection::vec(-500..500i32, 0..MAX_LEN),
        access in proptest::collection::vec(-600..600i32, 0..20),
        seed in any::<u64>(),
    ) {
        let tree = tree_of(&inserts);
        let present: BTreeSet<i32> = inserts.iter().copied().collect();

        inserts.shuffle(&mut StdRng::seed_from_u64(seed));
        for key in inserts.iter().chain(access.iter()) {
            let found = tree.find_value(key);
            prop_assert_eq!(found.is_some(), present.contains(key));
            if let Some(found) = found {
                prop_assert_eq!(found, key);
                let slot = tree.find_slot(key).unwrap();
                prop_assert_eq!(tree.element_at(slot), Some(key));
            }
        }
    }

    #[test]
    fn deleted_values_are_gone_and_survivors_remain(
        keys in proptest::collection::btree_set(-1000..1000i32, 1..MAX_LEN),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut inserts: Vec<i32> = keys.into_iter().collect();
        inserts.shuffle(&mut rng);
        let mut tree = tree_of(&inserts);
        let mut deletions = inserts.clone();
        deletions.shuffle(&mut rng);

        for (i, key) in deletions.iter().enumerate() {
            tree.delete(key).unwrap();

            prop_assert_eq!(tree.find_value(key), None);
            prop_assert_eq!(tree.len(), deletions.len() - i - 1);
            let remaining = in_order(&tree);
            prop_assert!(remaining.windows(2).all(|w| w[0] < w[1]));
            for survivor in &deletions[i + 1..] {
                prop_assert_eq!(tree.find_value(survivor), Some(survivor));
            }
        }
        prop_assert!(tree.is_empty());
    }

    #[test]
    fn deleting_two_child_node_drops_count_by_one(
        keys in proptest::collection::btree_set(-1000..1000i32, 3..MAX_LEN),
        seed in any::<u64>(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut inserts: Vec<i32> = keys.into_iter().collect();
        inserts.shuffle(&mut StdRng::seed_from_u64(seed));
        let mut tree = tree_of(&inserts);
        let candidates = two_child_keys(&tree.to_tree_string());
        prop_assume!(!candidates.is_empty());
        let key = *pick.get(&candidates);
        let before = in_order(&tree);

        tree.delete(&key).unwrap();

        let expected: Vec<i32> = before.into_iter().filter(|k| *k != key).collect();
        prop_assert_eq!(in_order(&tree), expected);
        prop_assert_eq!(tree.len(), inserts.len() - 1);
    }

    #[test]
    fn every_element_reaches_destructor_exactly_once(
        inserts in proptest::collection::vec(-100..100i32, 0..MAX_LEN),
        deletes in proptest::collection::vec(-120..120i32, 0..MAX_LEN),
    ) {
        let log: Rc<RefCell<Vec<i32>>> = Rc::default();
        let sink = Rc::clone(&log);
        let mut tree = OrderedTree::with_destructor(|a: &i32, b: &i32| a.cmp(b), move |v: i32| {
            sink.borrow_mut().push(v)
        });
        for &v in &inserts {
            tree.insert(v).unwrap();
        }

        let mut deleted = Vec::new();
        for key in &deletes {
            if tree.delete(key).is_ok() {
                deleted.push(*key);
            }
        }
        prop_assert_eq!(&*log.borrow(), &deleted);

        drop(tree);

        let mut disposed = log.borrow().clone();
        disposed.sort();
        let mut expected = inserts.clone();
        expected.sort();
        prop_assert_eq!(disposed, expected);
    }
);

//! Element disposal on delete, clear and teardown

use std::cell::RefCell;
use std::rc::Rc;

use ordtree::domain::{OrderedTree, TraversalOrder};
use ordtree::util::testing::init_test_setup;

type Log = Rc<RefCell<Vec<i64>>>;

fn logged_tree(values: &[i64]) -> (OrderedTree<i64>, Log) {
    init_test_setup();
    let log: Log = Rc::default();
    let sink = Rc::clone(&log);
    let mut tree = OrderedTree::with_destructor(|a: &i64, b: &i64| a.cmp(b), move |v: i64| {
        sink.borrow_mut().push(v)
    });
    for &v in values {
        tree.insert(v).unwrap();
    }
    (tree, log)
}

const SAMPLE: [i64; 7] = [50, 30, 70, 20, 40, 60, 80];

#[test]
fn given_destructor_when_deleting_then_called_once_with_removed_element() {
    let (mut tree, log) = logged_tree(&SAMPLE);

    tree.delete(&50).unwrap();

    assert_eq!(*log.borrow(), vec![50]);
    assert_eq!(tree.root(), Some(&60));
}

#[test]
fn given_destructor_when_dropping_then_remaining_disposed_post_order() {
    let (mut tree, log) = logged_tree(&SAMPLE);
    tree.delete(&50).unwrap();
    log.borrow_mut().clear();

    drop(tree);

    assert_eq!(*log.borrow(), vec![20, 40, 30, 80, 70, 60]);
}

#[test]
fn given_destructor_when_destroying_then_every_element_disposed() {
    let (tree, log) = logged_tree(&SAMPLE);

    tree.destroy();

    assert_eq!(*log.borrow(), vec![20, 40, 30, 60, 80, 70, 50]);
}

#[test]
fn given_destructor_when_clearing_then_tree_reusable() {
    let (mut tree, log) = logged_tree(&[2, 1, 3]);

    tree.clear();
    assert_eq!(*log.borrow(), vec![1, 3, 2]);
    assert!(tree.is_empty());

    tree.insert(9).unwrap();
    assert_eq!(tree.to_vec(TraversalOrder::InOrder), vec![&9]);
    drop(tree);
    assert_eq!(*log.borrow(), vec![1, 3, 2, 9]);
}

#[test]
fn given_destructor_when_taking_then_not_called() {
    let (mut tree, log) = logged_tree(&SAMPLE);

    assert_eq!(tree.take(&30), Some(30));

    assert!(log.borrow().is_empty());
}

#[test]
fn given_destructor_when_delete_misses_then_not_called() {
    let (mut tree, log) = logged_tree(&SAMPLE);

    assert!(tree.delete(&45).is_err());

    assert!(log.borrow().is_empty());
    assert_eq!(tree.len(), 7);
}

#[test]
fn given_empty_tree_when_destroying_then_destructor_idle() {
    let (tree, log) = logged_tree(&[]);

    tree.destroy();

    assert!(log.borrow().is_empty());
}

#[test]
fn given_no_destructor_when_dropping_then_elements_released() {
    init_test_setup();
    let shared = Rc::new(());
    let mut tree = OrderedTree::new(|a: &(usize, Rc<()>), b: &(usize, Rc<()>)| a.0.cmp(&b.0));
    for i in 0..5 {
        tree.insert((i, Rc::clone(&shared))).unwrap();
    }
    assert_eq!(Rc::strong_count(&shared), 6);

    tree.delete(&(2, Rc::clone(&shared))).unwrap();
    assert_eq!(Rc::strong_count(&shared), 5);

    drop(tree);
    assert_eq!(Rc::strong_count(&shared), 1);
}

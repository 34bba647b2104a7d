use std::{panic, sync::Arc, thread};

use rand::prelude::random;

use crate::bounded::BoundedTree;
use crate::rbtree::RbTree;
use crate::rbtree_test::Touchy;
use crate::sync::ConcurrencySafeTree;
use crate::tree::Tree;

const N_THREADS: usize = 8;

#[test]
fn test_concurrent_insert() {
    let n_keys = 1000;
    let tree: Arc<ConcurrencySafeTree<RbTree<u64>>> = Arc::new(Default::default());

    let handles: Vec<_> = (0..N_THREADS)
        .map(|t| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                for i in 0..n_keys {
                    tree.insert((i * N_THREADS + t) as u64);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let total = (n_keys * N_THREADS) as u64;
    assert_eq!(tree.len(), total as usize);
    assert_eq!(tree.minimum(), Some(0));
    assert_eq!(tree.maximum(), Some(total - 1));
    for rank in 1..=total {
        assert_eq!(tree.order_statistic_select(rank as usize), Some(rank - 1));
    }

    let guard = tree.read();
    assert!(guard.validate().is_ok());
    let keys: Vec<u64> = guard.ascend().map(|n| *n.key()).collect();
    assert_eq!(keys, (0..total).collect::<Vec<u64>>());
}

#[test]
fn test_concurrent_readers() {
    let tree: Arc<ConcurrencySafeTree<RbTree<u64>>> = Arc::new(Default::default());
    // even keys up front, odd keys inserted while readers run.
    (0..1000).for_each(|i| tree.insert(i * 2));

    let writer = {
        let tree = Arc::clone(&tree);
        thread::spawn(move || (0..1000).for_each(|i| tree.insert(i * 2 + 1)))
    };
    let readers: Vec<_> = (0..N_THREADS)
        .map(|_| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                for _ in 0..1000 {
                    let key = (random::<u64>() % 1000) * 2;
                    assert_eq!(tree.search(&key), Some(key));
                    assert_eq!(tree.floor(&key), Some(key));
                    assert_eq!(tree.ceiling(&key), Some(key));
                    assert_eq!(tree.minimum(), Some(0));
                    assert!(tree.maximum() >= Some(1998));
                    assert!(tree.order_statistic_select(1).is_some());
                    assert!(tree.root().is_some());

                    let guard = tree.read();
                    let n = guard.ascend().count();
                    assert_eq!(n, guard.len());
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(tree.len(), 2000);
    assert_eq!(tree.maximum(), Some(1999));
}

#[test]
fn test_concurrent_delete() {
    let tree: Arc<ConcurrencySafeTree<RbTree<u64>>> = Arc::new(Default::default());
    for key in 0..100 {
        tree.insert(key);
        tree.insert(key);
    }
    assert_eq!(tree.len(), 200);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                for key in (t * 25)..((t + 1) * 25) {
                    assert!(tree.delete_one(&key));
                    if key % 2 == 0 {
                        assert!(tree.delete_all(&key));
                        assert!(!tree.delete_one(&key));
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(tree.len(), 50);
    assert_eq!(tree.search_all(&1), vec![1]);
    assert!(tree.search_all(&2).is_empty());
    assert!(tree.read().validate().is_ok());
}

#[test]
fn test_replace_or_insert() {
    let tree: ConcurrencySafeTree<RbTree<(u64, u64)>> = Default::default();
    assert!(tree.is_empty());
    assert_eq!(tree.replace_or_insert((1, 10)), None);
    assert_eq!(tree.replace_or_insert((1, 10)), Some((1, 10)));
    assert_eq!(tree.len(), 1);
    tree.insert((1, 10));
    assert_eq!(tree.replace_or_insert((1, 10)), Some((1, 10)));
    assert_eq!(tree.len(), 2);
}

#[test]
fn test_bounded() {
    let tree = Arc::new(ConcurrencySafeTree::new(BoundedTree::new_max(10)));

    let handles: Vec<_> = (0..N_THREADS)
        .map(|t| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                for i in 0..100 {
                    tree.insert(i * N_THREADS + t);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let total = 100 * N_THREADS;
    assert_eq!(tree.len(), 10);
    assert_eq!(tree.minimum(), Some(total - 10));
    let keys: Vec<usize> = tree
        .read()
        .as_inner()
        .descend()
        .map(|n| *n.key())
        .collect();
    assert_eq!(keys, ((total - 10)..total).rev().collect::<Vec<usize>>());
}

#[test]
fn test_exclusive_access() {
    let mut tree: ConcurrencySafeTree<RbTree<i64>> = RbTree::new("test-sync").into();
    {
        let tree: &mut dyn Tree<Key = i64> = &mut tree;
        for key in vec![6, 18, 3, 15, 7, 2, 4, 13, 9, 17, 20] {
            tree.insert(key);
        }
        assert_eq!(tree.len(), 11);
        assert_eq!(tree.replace_or_insert(6), Some(6));
        assert!(tree.delete_one(&3));
        assert!(tree.delete_all(&4));
        assert_eq!(tree.search(&7), Some(7));
        assert_eq!(tree.search_all(&9), vec![9]);
        assert_eq!(tree.floor(&5), Some(2));
        assert_eq!(tree.ceiling(&5), Some(6));
        assert_eq!(tree.minimum(), Some(2));
        assert_eq!(tree.maximum(), Some(20));
        assert_eq!(tree.order_statistic_select(3), Some(7));
        assert!(tree.root().is_some());
    }

    let inner = tree.into_inner();
    assert_eq!(inner.id(), "test-sync".to_string());
    assert_eq!(inner.len(), 9);
    assert!(inner.validate().is_ok());
}

#[test]
fn test_poisoned_lock() {
    let tree: Arc<ConcurrencySafeTree<RbTree<Touchy>>> = Arc::new(Default::default());
    (0..10).for_each(|i| tree.insert(Touchy(i)));
    assert!(!tree.is_poisoned());

    let writer = {
        let tree = Arc::clone(&tree);
        thread::spawn(move || tree.insert(Touchy(999)))
    };
    assert!(writer.join().is_err());
    assert!(tree.is_poisoned());

    // every later access refuses the tree.
    let t = &tree;
    assert!(panic::catch_unwind(panic::AssertUnwindSafe(|| t.len())).is_err());
    assert!(panic::catch_unwind(panic::AssertUnwindSafe(|| t.search(&Touchy(1)))).is_err());
    assert!(panic::catch_unwind(panic::AssertUnwindSafe(|| t.insert(Touchy(11)))).is_err());
    assert!(panic::catch_unwind(panic::AssertUnwindSafe(|| t.read().ascend().count())).is_err());

    let tree = Arc::try_unwrap(tree).ok().unwrap();
    assert!(panic::catch_unwind(panic::AssertUnwindSafe(move || tree.into_inner())).is_err());
}

#[test]
fn test_panicking_writer_leaves_tree_intact() {
    let mut tree: ConcurrencySafeTree<RbTree<Touchy>> = Default::default();
    (0..10).for_each(|i| tree.insert(Touchy(i)));

    // exclusive access does not go through the lock.
    let res = panic::catch_unwind(panic::AssertUnwindSafe(|| {
        Tree::insert(&mut tree, Touchy(999))
    }));
    assert!(res.is_err());
    assert!(!tree.is_poisoned());

    let inner = tree.into_inner();
    assert_eq!(inner.len(), 10);
    assert_eq!(inner.walk_inorder().count(), 10);
    assert!(inner.validate().is_ok());
}

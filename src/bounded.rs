use log::{debug, trace};

use crate::rbtree::RbTree;
use crate::tree::Tree;

/// Which end of the key space a [`BoundedTree`] keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Retain {
    /// Keep the `capacity` largest keys.
    Max,
    /// Keep the `capacity` smallest keys.
    Min,
}

/// BoundedTree retains only a fixed number of the largest, or smallest,
/// keys inserted into it. Useful for top-K and bottom-K tracking.
///
/// ```
/// use rbtree_index::{BoundedTree, Tree};
///
/// let mut tree = BoundedTree::new_max(3);
/// for key in 1..=10 {
///     tree.insert(key);
/// }
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.minimum(), Some(8));
/// ```
#[derive(Clone)]
pub struct BoundedTree<T>
where
    T: Tree,
{
    tree: T,
    capacity: usize,
    retain: Retain,
}

impl<K> BoundedTree<RbTree<K>>
where
    K: Clone + Ord,
{
    /// Create a tree that keeps the `capacity` largest keys.
    pub fn new_max(capacity: usize) -> BoundedTree<RbTree<K>> {
        BoundedTree::with_tree(RbTree::new("max-tree"), capacity, Retain::Max)
    }

    /// Create a tree that keeps the `capacity` smallest keys.
    pub fn new_min(capacity: usize) -> BoundedTree<RbTree<K>> {
        BoundedTree::with_tree(RbTree::new("min-tree"), capacity, Retain::Min)
    }
}

impl<T> BoundedTree<T>
where
    T: Tree,
{
    /// Wrap `tree` and bound it to `capacity` entries. If `tree` already
    /// holds more than `capacity` entries, extra entries at the other
    /// end are evicted right away.
    pub fn with_tree(tree: T, capacity: usize, retain: Retain) -> BoundedTree<T> {
        let mut bounded = BoundedTree {
            tree,
            capacity,
            retain,
        };
        let mut evicted = 0;
        while bounded.tree.len() > capacity && bounded.evict() {
            evicted += 1;
        }
        debug!(
            target: "bounded",
            "{:?} tree with capacity:{}, evicted {} entries", retain, capacity, evicted
        );
        bounded
    }

    /// Return the maximum number of entries retained.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Return which end of the key space is retained.
    #[inline]
    pub fn retain(&self) -> Retain {
        self.retain
    }

    /// Return a reference to the underlying tree, say, to iterate.
    #[inline]
    pub fn as_inner(&self) -> &T {
        &self.tree
    }

    /// Unwrap and return the underlying tree.
    pub fn into_inner(self) -> T {
        self.tree
    }

    // whether `key` beats the current weakest entry.
    fn admits(&self, key: &T::Key) -> bool {
        match self.retain {
            Retain::Max => self.tree.minimum().map_or(false, |min| *key > min),
            Retain::Min => self.tree.maximum().map_or(false, |max| *key < max),
        }
    }

    // drop the weakest entry.
    fn evict(&mut self) -> bool {
        let weakest = match self.retain {
            Retain::Max => self.tree.minimum(),
            Retain::Min => self.tree.maximum(),
        };
        match weakest {
            Some(key) => self.tree.delete_one(&key),
            None => false,
        }
    }

    // make room for `key`, return false if `key` must be discarded.
    fn make_room(&mut self, key: &T::Key) -> bool {
        if self.tree.len() < self.capacity {
            true
        } else if self.capacity > 0 && self.admits(key) {
            trace!(target: "bounded", "{:?} tree at capacity, evicting", self.retain);
            self.evict()
        } else {
            trace!(target: "bounded", "{:?} tree at capacity, discarding", self.retain);
            false
        }
    }
}

impl<T> Tree for BoundedTree<T>
where
    T: Tree,
{
    type Key = T::Key;

    fn len(&self) -> usize {
        self.tree.len()
    }

    fn insert(&mut self, key: T::Key) {
        if self.make_room(&key) {
            self.tree.insert(key)
        }
    }

    fn replace_or_insert(&mut self, key: T::Key) -> Option<T::Key> {
        if self.tree.search(&key).is_some() {
            self.tree.replace_or_insert(key)
        } else {
            if self.make_room(&key) {
                self.tree.insert(key)
            }
            None
        }
    }

    fn delete_one(&mut self, key: &T::Key) -> bool {
        self.tree.delete_one(key)
    }

    fn delete_all(&mut self, key: &T::Key) -> bool {
        self.tree.delete_all(key)
    }

    fn search(&self, key: &T::Key) -> Option<T::Key> {
        self.tree.search(key)
    }

    fn search_all(&self, key: &T::Key) -> Vec<T::Key> {
        self.tree.search_all(key)
    }

    fn floor(&self, key: &T::Key) -> Option<T::Key> {
        self.tree.floor(key)
    }

    fn ceiling(&self, key: &T::Key) -> Option<T::Key> {
        self.tree.ceiling(key)
    }

    fn minimum(&self) -> Option<T::Key> {
        self.tree.minimum()
    }

    fn maximum(&self) -> Option<T::Key> {
        self.tree.maximum()
    }

    fn order_statistic_select(&self, rank: usize) -> Option<T::Key> {
        self.tree.order_statistic_select(rank)
    }

    fn root(&self) -> Option<T::Key> {
        self.tree.root()
    }
}

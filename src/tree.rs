use crate::rbtree::RbTree;

/// Tree is the contract shared by [`RbTree`] and its decorators,
/// [`BoundedTree`] and [`ConcurrencySafeTree`]. Decorators hold any
/// value implementing Tree and delegate to it.
///
/// Read operations return owned keys so that implementations guarding
/// the tree behind a lock can honour the contract. [`RbTree`] also
/// offers node handles through its inherent methods.
///
/// [`BoundedTree`]: crate::BoundedTree
/// [`ConcurrencySafeTree`]: crate::ConcurrencySafeTree
pub trait Tree {
    type Key: Clone + Ord;

    /// Return number of entries.
    fn len(&self) -> usize;

    /// Check whether there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert key, duplicates are retained.
    fn insert(&mut self, key: Self::Key);

    /// Replace one entry equal to `key` and return it, else insert.
    fn replace_or_insert(&mut self, key: Self::Key) -> Option<Self::Key>;

    /// Delete one entry equal to `key`, return false if not found.
    fn delete_one(&mut self, key: &Self::Key) -> bool;

    /// Delete all entries equal to `key`, return false if not found.
    fn delete_all(&mut self, key: &Self::Key) -> bool;

    /// Return an entry equal to `key`.
    fn search(&self, key: &Self::Key) -> Option<Self::Key>;

    /// Return all entries equal to `key`.
    fn search_all(&self, key: &Self::Key) -> Vec<Self::Key>;

    /// Return the largest entry `<= key`.
    fn floor(&self, key: &Self::Key) -> Option<Self::Key>;

    /// Return the smallest entry `>= key`.
    fn ceiling(&self, key: &Self::Key) -> Option<Self::Key>;

    /// Return the smallest entry.
    fn minimum(&self) -> Option<Self::Key>;

    /// Return the largest entry.
    fn maximum(&self) -> Option<Self::Key>;

    /// Return the rank-th smallest entry, rank starts from 1.
    fn order_statistic_select(&self, rank: usize) -> Option<Self::Key>;

    /// Return the entry at the root of the tree.
    fn root(&self) -> Option<Self::Key>;
}

impl<K> Tree for RbTree<K>
where
    K: Clone + Ord,
{
    type Key = K;

    fn len(&self) -> usize {
        RbTree::len(self)
    }

    fn insert(&mut self, key: K) {
        RbTree::insert(self, key)
    }

    fn replace_or_insert(&mut self, key: K) -> Option<K> {
        RbTree::replace_or_insert(self, key)
    }

    fn delete_one(&mut self, key: &K) -> bool {
        RbTree::delete_one(self, key)
    }

    fn delete_all(&mut self, key: &K) -> bool {
        RbTree::delete_all(self, key)
    }

    fn search(&self, key: &K) -> Option<K> {
        RbTree::search(self, key).map(|n| n.key().clone())
    }

    fn search_all(&self, key: &K) -> Vec<K> {
        RbTree::search_all(self, key)
    }

    fn floor(&self, key: &K) -> Option<K> {
        RbTree::floor(self, key).map(|n| n.key().clone())
    }

    fn ceiling(&self, key: &K) -> Option<K> {
        RbTree::ceiling(self, key).map(|n| n.key().clone())
    }

    fn minimum(&self) -> Option<K> {
        RbTree::minimum(self).map(|n| n.key().clone())
    }

    fn maximum(&self) -> Option<K> {
        RbTree::maximum(self).map(|n| n.key().clone())
    }

    fn order_statistic_select(&self, rank: usize) -> Option<K> {
        RbTree::order_statistic_select(self, rank).map(|n| n.key().clone())
    }

    fn root(&self) -> Option<K> {
        RbTree::root(self).map(|n| n.key().clone())
    }
}

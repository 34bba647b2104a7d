use log::{debug, error};

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::rbtree::RbTree;
use crate::tree::Tree;

/// ConcurrencySafeTree wraps any [`Tree`] behind a single reader/writer
/// lock. Write operations are serialized, read operations can proceed
/// concurrently with each other.
///
/// A writer that panics while holding the lock, say from a panicking
/// `Ord`, poisons it. Every later access then panics instead of
/// handing out a tree that might be half modified, use
/// [`ConcurrencySafeTree::is_poisoned`] to check beforehand.
///
/// Iteration is not covered by the lock. To iterate while other threads
/// may write, hold the guard returned by [`ConcurrencySafeTree::read`]
/// for the life of the iterator.
///
/// ```
/// use std::{sync::Arc, thread};
///
/// use rbtree_index::{ConcurrencySafeTree, RbTree};
///
/// let tree: Arc<ConcurrencySafeTree<RbTree<u64>>> = Arc::new(Default::default());
/// let handles: Vec<_> = (0..4)
///     .map(|i| {
///         let tree = Arc::clone(&tree);
///         thread::spawn(move || tree.insert(i))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(tree.len(), 4);
/// let keys: Vec<u64> = tree.read().ascend().map(|n| *n.key()).collect();
/// assert_eq!(keys, vec![0, 1, 2, 3]);
/// ```
pub struct ConcurrencySafeTree<T>
where
    T: Tree,
{
    tree: RwLock<T>,
}

impl<T> ConcurrencySafeTree<T>
where
    T: Tree,
{
    /// Wrap `tree` for concurrent access.
    pub fn new(tree: T) -> ConcurrencySafeTree<T> {
        debug!(target: "rbsync", "wrapping tree with {} entries", tree.len());
        ConcurrencySafeTree {
            tree: RwLock::new(tree),
        }
    }

    /// Unwrap and return the underlying tree. Panics if the lock is
    /// poisoned.
    pub fn into_inner(self) -> T {
        match self.tree.into_inner() {
            Ok(tree) => tree,
            Err(_) => poisoned("into_inner"),
        }
    }

    /// Return whether a writer panicked while holding the lock.
    pub fn is_poisoned(&self) -> bool {
        self.tree.is_poisoned()
    }

    /// Acquire the shared lock and return its guard, the underlying
    /// tree can be read, and iterated, until the guard is dropped.
    /// Panics if the lock is poisoned.
    pub fn read(&self) -> RwLockReadGuard<T> {
        match self.tree.read() {
            Ok(guard) => guard,
            Err(_) => poisoned("read"),
        }
    }

    fn write(&self) -> RwLockWriteGuard<T> {
        match self.tree.write() {
            Ok(guard) => guard,
            Err(_) => poisoned("write"),
        }
    }

    /// Return number of entries.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Insert key under the exclusive lock.
    pub fn insert(&self, key: T::Key) {
        self.write().insert(key)
    }

    /// Replace-or-insert key under the exclusive lock.
    pub fn replace_or_insert(&self, key: T::Key) -> Option<T::Key> {
        self.write().replace_or_insert(key)
    }

    /// Delete one entry equal to `key` under the exclusive lock.
    pub fn delete_one(&self, key: &T::Key) -> bool {
        self.write().delete_one(key)
    }

    /// Delete all entries equal to `key` under the exclusive lock.
    pub fn delete_all(&self, key: &T::Key) -> bool {
        self.write().delete_all(key)
    }

    /// Return an entry equal to `key`, under the shared lock.
    pub fn search(&self, key: &T::Key) -> Option<T::Key> {
        self.read().search(key)
    }

    /// Return all entries equal to `key`, under the shared lock.
    pub fn search_all(&self, key: &T::Key) -> Vec<T::Key> {
        self.read().search_all(key)
    }

    /// Return the largest entry `<= key`, under the shared lock.
    pub fn floor(&self, key: &T::Key) -> Option<T::Key> {
        self.read().floor(key)
    }

    /// Return the smallest entry `>= key`, under the shared lock.
    pub fn ceiling(&self, key: &T::Key) -> Option<T::Key> {
        self.read().ceiling(key)
    }

    /// Return the smallest entry, under the shared lock.
    pub fn minimum(&self) -> Option<T::Key> {
        self.read().minimum()
    }

    /// Return the largest entry, under the shared lock.
    pub fn maximum(&self) -> Option<T::Key> {
        self.read().maximum()
    }

    /// Return the rank-th smallest entry, under the shared lock.
    pub fn order_statistic_select(&self, rank: usize) -> Option<T::Key> {
        self.read().order_statistic_select(rank)
    }

    /// Return the entry at the root, under the shared lock.
    pub fn root(&self) -> Option<T::Key> {
        self.read().root()
    }
}

impl<K> Default for ConcurrencySafeTree<RbTree<K>>
where
    K: Clone + Ord,
{
    fn default() -> ConcurrencySafeTree<RbTree<K>> {
        ConcurrencySafeTree::new(RbTree::default())
    }
}

impl<T> From<T> for ConcurrencySafeTree<T>
where
    T: Tree,
{
    fn from(tree: T) -> ConcurrencySafeTree<T> {
        ConcurrencySafeTree::new(tree)
    }
}

/// Exclusive access through `&mut self` needs no locking.
impl<T> Tree for ConcurrencySafeTree<T>
where
    T: Tree,
{
    type Key = T::Key;

    fn len(&self) -> usize {
        ConcurrencySafeTree::len(self)
    }

    fn insert(&mut self, key: T::Key) {
        self.inner_mut().insert(key)
    }

    fn replace_or_insert(&mut self, key: T::Key) -> Option<T::Key> {
        self.inner_mut().replace_or_insert(key)
    }

    fn delete_one(&mut self, key: &T::Key) -> bool {
        self.inner_mut().delete_one(key)
    }

    fn delete_all(&mut self, key: &T::Key) -> bool {
        self.inner_mut().delete_all(key)
    }

    fn search(&self, key: &T::Key) -> Option<T::Key> {
        ConcurrencySafeTree::search(self, key)
    }

    fn search_all(&self, key: &T::Key) -> Vec<T::Key> {
        ConcurrencySafeTree::search_all(self, key)
    }

    fn floor(&self, key: &T::Key) -> Option<T::Key> {
        ConcurrencySafeTree::floor(self, key)
    }

    fn ceiling(&self, key: &T::Key) -> Option<T::Key> {
        ConcurrencySafeTree::ceiling(self, key)
    }

    fn minimum(&self) -> Option<T::Key> {
        ConcurrencySafeTree::minimum(self)
    }

    fn maximum(&self) -> Option<T::Key> {
        ConcurrencySafeTree::maximum(self)
    }

    fn order_statistic_select(&self, rank: usize) -> Option<T::Key> {
        ConcurrencySafeTree::order_statistic_select(self, rank)
    }

    fn root(&self) -> Option<T::Key> {
        ConcurrencySafeTree::root(self)
    }
}

impl<T> ConcurrencySafeTree<T>
where
    T: Tree,
{
    fn inner_mut(&mut self) -> &mut T {
        match self.tree.get_mut() {
            Ok(tree) => tree,
            Err(_) => poisoned("inner_mut"),
        }
    }
}

fn poisoned(op: &str) -> ! {
    error!(target: "rbsync", "{}: lock poisoned by a panicking writer", op);
    panic!("{}(): lock poisoned by a panicking writer", op)
}

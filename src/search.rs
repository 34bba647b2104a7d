use rand::Rng;

use std::{borrow::Borrow, cmp::Ordering};

use crate::rbtree::{NodeRef, RbTree, NIL};

/// Read operations on RbTree instance.
impl<K> RbTree<K>
where
    K: Clone + Ord,
{
    /// Return the first node, met while walking down from the root, that
    /// compare equal to `key`. With duplicates this need not be the
    /// first one in sort order.
    pub fn search<Q>(&self, key: &Q) -> Option<NodeRef<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut x = self.root;
        while x != NIL {
            x = match key.cmp(self.key(x).borrow()) {
                Ordering::Equal => break,
                Ordering::Less => self.left(x),
                Ordering::Greater => self.right(x),
            };
        }
        NodeRef::new(self, x)
    }

    /// Return all keys that compare equal to `key`, in sort order.
    pub fn search_all<Q>(&self, key: &Q) -> Vec<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut keys = vec![];
        let mut node = NodeRef::new(self, self.lower_bound(key));
        while let Some(nref) = node {
            if nref.key().borrow() != key {
                break;
            }
            keys.push(nref.key().clone());
            node = nref.successor();
        }
        keys
    }

    /// Return the largest entry less than or equal to `key`.
    pub fn floor<Q>(&self, key: &Q) -> Option<NodeRef<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (mut x, mut candidate) = (self.root, NIL);
        while x != NIL {
            x = match key.cmp(self.key(x).borrow()) {
                Ordering::Equal => return NodeRef::new(self, x),
                Ordering::Less => self.left(x),
                Ordering::Greater => {
                    candidate = x;
                    self.right(x)
                }
            };
        }
        NodeRef::new(self, candidate)
    }

    /// Return the smallest entry greater than or equal to `key`.
    pub fn ceiling<Q>(&self, key: &Q) -> Option<NodeRef<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (mut x, mut candidate) = (self.root, NIL);
        while x != NIL {
            x = match key.cmp(self.key(x).borrow()) {
                Ordering::Equal => return NodeRef::new(self, x),
                Ordering::Less => {
                    candidate = x;
                    self.left(x)
                }
                Ordering::Greater => self.right(x),
            };
        }
        NodeRef::new(self, candidate)
    }

    /// Return the entry with smallest key.
    pub fn minimum(&self) -> Option<NodeRef<K>> {
        NodeRef::new(self, self.subtree_minimum(self.root))
    }

    /// Return the entry with largest key.
    pub fn maximum(&self) -> Option<NodeRef<K>> {
        NodeRef::new(self, self.subtree_maximum(self.root))
    }

    /// Return the i-th smallest entry, `rank` starts from 1 not from 0.
    /// Return None if `rank` is outside `1..=len()`.
    pub fn order_statistic_select(&self, rank: usize) -> Option<NodeRef<K>> {
        if rank == 0 || rank > self.len() {
            return None;
        }

        let (mut x, mut i) = (self.root, rank);
        while x != NIL {
            let r = self.size(self.left(x)) + 1;
            x = match i.cmp(&r) {
                Ordering::Equal => break,
                Ordering::Less => self.left(x),
                Ordering::Greater => {
                    i -= r;
                    self.right(x)
                }
            };
        }
        NodeRef::new(self, x)
    }

    /// Return the 1-based position, in sort order, of the first entry
    /// that compare equal to `key`.
    pub fn rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (mut x, mut rank, mut found) = (self.root, 0, None);
        while x != NIL {
            x = match self.key(x).borrow().cmp(key) {
                Ordering::Less => {
                    rank += self.size(self.left(x)) + 1;
                    self.right(x)
                }
                Ordering::Equal => {
                    found = Some(rank + self.size(self.left(x)) + 1);
                    self.left(x)
                }
                Ordering::Greater => self.left(x),
            };
        }
        found
    }

    /// Return a random entry from this index, every entry is equally
    /// likely to be picked.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<NodeRef<K>> {
        match self.len() {
            0 => None,
            n => self.order_statistic_select(rng.gen_range(1, n + 1)),
        }
    }

    // first node, in sort order, whose key is >= `key`.
    pub(crate) fn lower_bound<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (mut x, mut candidate) = (self.root, NIL);
        while x != NIL {
            x = if self.key(x).borrow() < key {
                self.right(x)
            } else {
                candidate = x;
                self.left(x)
            };
        }
        candidate
    }

    // last node, in sort order, whose key is <= `key`.
    pub(crate) fn upper_floor<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (mut x, mut candidate) = (self.root, NIL);
        while x != NIL {
            x = if self.key(x).borrow() > key {
                self.left(x)
            } else {
                candidate = x;
                self.right(x)
            };
        }
        candidate
    }
}

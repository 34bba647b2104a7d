//! Iterators are single pass. Depth-first walks use an explicit stack
//! instead of recursion, ascend and descend step through
//! successor/predecessor links.
//!
//! All of them borrow the tree, so for a plain [`RbTree`] the tree
//! cannot change underneath an iterator. When the tree is shared via
//! [`ConcurrencySafeTree`], hold its read guard for as long as the
//! iterator lives.
//!
//! [`ConcurrencySafeTree`]: crate::ConcurrencySafeTree

use std::borrow::Borrow;

use crate::rbtree::{NodeRef, RbTree, NIL};

/// Visitor style iteration for every iterator over [`NodeRef`].
pub trait Enumerable<'a, K>: Iterator<Item = NodeRef<'a, K>> + Sized
where
    K: 'a + Clone + Ord,
{
    /// Call `visitor` for every key until `visitor` returns false or
    /// the iterator is exhausted.
    fn foreach<F>(self, mut visitor: F)
    where
        F: FnMut(&'a K) -> bool,
    {
        for node in self {
            if !visitor(node.key()) {
                break;
            }
        }
    }
}

impl<'a, K, I> Enumerable<'a, K> for I
where
    K: 'a + Clone + Ord,
    I: Iterator<Item = NodeRef<'a, K>>,
{
}

/// Iteration API.
impl<K> RbTree<K>
where
    K: Clone + Ord,
{
    /// Walk the tree in sort order, (left, node, right).
    pub fn walk_inorder(&self) -> WalkInorder<K> {
        WalkInorder {
            tree: self,
            stack: vec![],
            cursor: self.root,
        }
    }

    /// Walk the tree parent first, (node, left, right).
    pub fn walk_preorder(&self) -> WalkPreorder<K> {
        let stack = if self.root == NIL { vec![] } else { vec![self.root] };
        WalkPreorder { tree: self, stack }
    }

    /// Walk the tree children first, (left, right, node).
    pub fn walk_postorder(&self) -> WalkPostorder<K> {
        let stack = if self.root == NIL {
            vec![]
        } else {
            vec![(self.root, false)]
        };
        WalkPostorder { tree: self, stack }
    }

    /// Iterate over all entries from smallest to largest.
    pub fn ascend(&self) -> Ascend<K> {
        let first = self.subtree_minimum(self.root);
        let last = self.subtree_maximum(self.root);
        Ascend::new(self, first, last)
    }

    /// Iterate over all entries from largest to smallest.
    pub fn descend(&self) -> Descend<K> {
        let first = self.subtree_maximum(self.root);
        let last = self.subtree_minimum(self.root);
        Descend::new(self, first, last)
    }

    /// Iterate in sort order over `[from, to]`. `from` must be present
    /// in the tree, otherwise iteration is empty. Iteration is also
    /// empty if `from > to`.
    pub fn ascend_range<Q>(&self, from: &Q, to: &Q) -> Ascend<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let first = self.lower_bound(from);
        let first = if first != NIL && self.key(first).borrow() == from {
            first
        } else {
            NIL
        };
        self.ascend_from(first, from, to)
    }

    /// Iterate in reverse sort order over `[to, from]`. `from` must be
    /// present in the tree, otherwise iteration is empty. Iteration is
    /// also empty if `from < to`.
    pub fn descend_range<Q>(&self, from: &Q, to: &Q) -> Descend<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let first = self.upper_floor(from);
        let first = if first != NIL && self.key(first).borrow() == from {
            first
        } else {
            NIL
        };
        self.descend_from(first, from, to)
    }

    /// Same as [`RbTree::ascend_range`], except that `from` need not be
    /// present, iteration starts from the smallest entry `>= from`.
    pub fn open_ascend_range<Q>(&self, from: &Q, to: &Q) -> Ascend<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let first = self.lower_bound(from);
        self.ascend_from(first, from, to)
    }

    /// Same as [`RbTree::descend_range`], except that `from` need not
    /// be present, iteration starts from the largest entry `<= from`.
    pub fn open_descend_range<Q>(&self, from: &Q, to: &Q) -> Descend<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let first = self.upper_floor(from);
        self.descend_from(first, from, to)
    }

    fn ascend_from<Q>(&self, first: usize, from: &Q, to: &Q) -> Ascend<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if first == NIL || from > to || self.key(first).borrow() > to {
            return Ascend::new(self, NIL, NIL);
        }
        Ascend::new(self, first, self.upper_floor(to))
    }

    fn descend_from<Q>(&self, first: usize, from: &Q, to: &Q) -> Descend<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if first == NIL || from < to || self.key(first).borrow() < to {
            return Descend::new(self, NIL, NIL);
        }
        Descend::new(self, first, self.lower_bound(to))
    }
}

/// Iterator returned by [`RbTree::walk_inorder`].
pub struct WalkInorder<'a, K>
where
    K: Clone + Ord,
{
    tree: &'a RbTree<K>,
    stack: Vec<usize>,
    cursor: usize,
}

impl<'a, K> Iterator for WalkInorder<'a, K>
where
    K: Clone + Ord,
{
    type Item = NodeRef<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor != NIL {
            self.stack.push(self.cursor);
            self.cursor = self.tree.left(self.cursor);
        }
        let x = self.stack.pop()?;
        self.cursor = self.tree.right(x);
        NodeRef::new(self.tree, x)
    }
}

/// Iterator returned by [`RbTree::walk_preorder`].
pub struct WalkPreorder<'a, K>
where
    K: Clone + Ord,
{
    tree: &'a RbTree<K>,
    stack: Vec<usize>,
}

impl<'a, K> Iterator for WalkPreorder<'a, K>
where
    K: Clone + Ord,
{
    type Item = NodeRef<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        let (left, right) = (self.tree.left(x), self.tree.right(x));
        if right != NIL {
            self.stack.push(right);
        }
        if left != NIL {
            self.stack.push(left);
        }
        NodeRef::new(self.tree, x)
    }
}

/// Iterator returned by [`RbTree::walk_postorder`].
pub struct WalkPostorder<'a, K>
where
    K: Clone + Ord,
{
    tree: &'a RbTree<K>,
    stack: Vec<(usize, bool)>, // (node, children-already-pushed)
}

impl<'a, K> Iterator for WalkPostorder<'a, K>
where
    K: Clone + Ord,
{
    type Item = NodeRef<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (x, expanded) = self.stack.pop()?;
            if expanded {
                break NodeRef::new(self.tree, x);
            }
            self.stack.push((x, true));
            let (left, right) = (self.tree.left(x), self.tree.right(x));
            if right != NIL {
                self.stack.push((right, false));
            }
            if left != NIL {
                self.stack.push((left, false));
            }
        }
    }
}

/// Iterator returned by [`RbTree::ascend`] and its range variants.
pub struct Ascend<'a, K>
where
    K: Clone + Ord,
{
    tree: &'a RbTree<K>,
    next: usize,
    last: usize,
}

impl<'a, K> Ascend<'a, K>
where
    K: Clone + Ord,
{
    fn new(tree: &'a RbTree<K>, next: usize, last: usize) -> Ascend<'a, K> {
        Ascend { tree, next, last }
    }
}

impl<'a, K> Iterator for Ascend<'a, K>
where
    K: Clone + Ord,
{
    type Item = NodeRef<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let x = self.next;
        self.next = match x {
            NIL => NIL,
            x if x == self.last => NIL,
            x => self.tree.successor_of(x),
        };
        NodeRef::new(self.tree, x)
    }
}

/// Iterator returned by [`RbTree::descend`] and its range variants.
pub struct Descend<'a, K>
where
    K: Clone + Ord,
{
    tree: &'a RbTree<K>,
    next: usize,
    last: usize,
}

impl<'a, K> Descend<'a, K>
where
    K: Clone + Ord,
{
    fn new(tree: &'a RbTree<K>, next: usize, last: usize) -> Descend<'a, K> {
        Descend { tree, next, last }
    }
}

impl<'a, K> Iterator for Descend<'a, K>
where
    K: Clone + Ord,
{
    type Item = NodeRef<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let x = self.next;
        self.next = match x {
            NIL => NIL,
            x if x == self.last => NIL,
            x => self.tree.predecessor_of(x),
        };
        NodeRef::new(self.tree, x)
    }
}

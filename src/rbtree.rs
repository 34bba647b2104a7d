use log::{debug, warn};

use std::{fmt, iter::FromIterator, mem, ptr};

use crate::depth::Depth;
use crate::error::Error;

/// Arena index of the shared sentinel leaf. It is always black, has no
/// key and its size is always zero.
pub(crate) const NIL: usize = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

#[derive(Clone)]
pub(crate) struct Node<K> {
    pub(crate) key: Option<K>, // None for sentinel and for freed slots.
    pub(crate) size: usize,    // number of nodes in this subtree.
    pub(crate) color: Color,
    pub(crate) parent: usize,
    pub(crate) left: usize,
    pub(crate) right: usize,
}

impl<K> Node<K> {
    fn sentinel() -> Node<K> {
        Node {
            key: None,
            size: 0,
            color: Color::Black,
            parent: NIL,
            left: NIL,
            right: NIL,
        }
    }

    fn new(key: K) -> Node<K> {
        Node {
            key: Some(key),
            size: 1,
            color: Color::Red,
            parent: NIL,
            left: NIL,
            right: NIL,
        }
    }
}

/// RbTree manage a single instance of in-memory ordered index using
/// [red-black][rbtree] tree, augmented with subtree sizes so that
/// rank queries are answered in O(log n).
///
/// Keys are not unique, RbTree behaves like an ordered multi-set.
/// Nodes are kept in an arena and linked by index, index 0 being the
/// shared black sentinel.
///
/// ```
/// use rbtree_index::RbTree;
///
/// let mut tree: RbTree<i64> = RbTree::new("myindex");
/// for key in vec![6, 18, 3, 15, 7, 2, 4, 13, 9, 17, 20] {
///     tree.insert(key);
/// }
/// assert_eq!(tree.len(), 11);
/// assert_eq!(tree.order_statistic_select(1).map(|n| *n.key()), Some(2));
/// assert_eq!(tree.floor(&16).map(|n| *n.key()), Some(15));
/// ```
///
/// [rbtree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
#[derive(Clone)]
pub struct RbTree<K>
where
    K: Clone + Ord,
{
    name: String,
    pub(crate) nodes: Vec<Node<K>>,
    free: Vec<usize>, // recycled arena slots.
    pub(crate) root: usize,
}

/// Different ways to construct a new RbTree instance.
impl<K> RbTree<K>
where
    K: Clone + Ord,
{
    /// Create an empty instance of RbTree, identified by `name`.
    /// Applications can choose unique names.
    pub fn new<S>(name: S) -> RbTree<K>
    where
        S: AsRef<str>,
    {
        RbTree::with_capacity(name, 0)
    }

    /// Create an empty instance of RbTree with room for `capacity`
    /// entries before the arena has to grow.
    pub fn with_capacity<S>(name: S, capacity: usize) -> RbTree<K>
    where
        S: AsRef<str>,
    {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(Node::sentinel());
        let tree = RbTree {
            name: name.as_ref().to_string(),
            nodes,
            free: vec![],
            root: NIL,
        };
        debug!(target: "rbtree", "{:?}, new instance capacity:{}", tree.name, capacity);
        tree
    }

    /// Create a new instance of RbTree and load it with keys from
    /// `iter`. Duplicate keys are retained.
    pub fn load_from<S, I>(name: S, iter: I) -> RbTree<K>
    where
        S: AsRef<str>,
        I: Iterator<Item = K>,
    {
        let mut tree = RbTree::with_capacity(name, iter.size_hint().0);
        for key in iter {
            tree.insert(key);
        }
        debug!(target: "rbtree", "{:?}, loaded {} entries", tree.name, tree.len());
        tree
    }
}

impl<K> Default for RbTree<K>
where
    K: Clone + Ord,
{
    fn default() -> RbTree<K> {
        RbTree::new("rbtree")
    }
}

impl<K> FromIterator<K> for RbTree<K>
where
    K: Clone + Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> RbTree<K> {
        RbTree::load_from("rbtree", iter.into_iter())
    }
}

impl<K> Extend<K> for RbTree<K>
where
    K: Clone + Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

/// Maintenance API.
impl<K> RbTree<K>
where
    K: Clone + Ord,
{
    /// Identify this instance. Applications can choose unique names while
    /// creating RbTree instances.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance, same as the size of
    /// the root node.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes[self.root].size
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// Return the root node, None if tree is empty.
    pub fn root(&self) -> Option<NodeRef<K>> {
        NodeRef::new(self, self.root)
    }

    /// Drop all entries, arena memory is retained for reuse.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[NIL] = Node::sentinel();
        self.free.clear();
        self.root = NIL;
        debug!(target: "rbtree", "{:?}, cleared", self.name);
    }

    /// Return quickly with basic statisics, only entries(), node_size()
    /// and free_slots() are valid with this statisics.
    pub fn stats(&self) -> Stats {
        let mut stats = Stats::new(self.len(), mem::size_of::<Node<K>>());
        stats.free_slots = self.free.len();
        stats
    }

    /// Validate red-black tree with following rules:
    ///
    /// * Root node is always black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Size of every node is size of its two subtrees plus one.
    /// * Parent link of every child points back to its parent.
    /// * Keys are in non-decreasing order.
    ///
    /// Additionally return full statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats, Error<K>> {
        let res = self.do_validate();
        if res.is_err() {
            warn!(target: "rbtree", "{:?}, red-black rules violated", self.name);
        }
        res
    }

    fn do_validate(&self) -> Result<Stats, Error<K>> {
        if self.is_red(self.root) {
            return Err(Error::RedRoot);
        }
        if self.root != NIL && self.parent(self.root) != NIL {
            let msg = format!("root {} has parent {}", self.root, self.parent(self.root));
            return Err(Error::BrokenLink(msg));
        }

        let mut depths = Depth::new();
        let (blacks, count) = self.validate_tree(self.root, false, 0, &mut depths)?;
        let allocated = self.nodes.len() - 1 - self.free.len();
        if count != allocated {
            return Err(Error::CountMismatch(count, allocated));
        }

        let mut node = self.minimum();
        while let Some(nref) = node {
            let next = nref.successor();
            if let Some(next) = &next {
                if next.key() < nref.key() {
                    return Err(Error::SortError(next.key().clone(), nref.key().clone()));
                }
            }
            node = next;
        }

        let mut stats = self.stats();
        stats.set_blacks(blacks);
        stats.set_depths(depths);
        Ok(stats)
    }

    // return (black-height, number of nodes) for subtree under `x`.
    fn validate_tree(
        &self,
        x: usize,
        fromred: bool,
        depth: usize,
        depths: &mut Depth,
    ) -> Result<(usize, usize), Error<K>> {
        if x == NIL {
            depths.sample(depth);
            return Ok((0, 0));
        }

        let red = self.is_red(x);
        if fromred && red {
            return Err(Error::ConsecutiveReds);
        }

        let (left, right) = (self.left(x), self.right(x));
        for &child in &[left, right] {
            if child != NIL && self.parent(child) != x {
                let msg = format!("child {} of {} points to {}", child, x, self.parent(child));
                return Err(Error::BrokenLink(msg));
            }
        }

        let (lblacks, lcount) = self.validate_tree(left, red, depth + 1, depths)?;
        let (rblacks, rcount) = self.validate_tree(right, red, depth + 1, depths)?;
        if lblacks != rblacks {
            let err = format!("left: {} right: {}", lblacks, rblacks);
            return Err(Error::UnbalancedBlacks(err));
        }

        let count = lcount + rcount + 1;
        if self.size(x) != count {
            let msg = format!("node {} size {} counted {}", x, self.size(x), count);
            return Err(Error::SizeMismatch(msg));
        }

        Ok((if red { lblacks } else { lblacks + 1 }, count))
    }
}

/// Structural primitives, callers guarantee that nodes passed in are
/// real nodes with correctly linked subtrees.
impl<K> RbTree<K>
where
    K: Clone + Ord,
{
    #[inline]
    pub(crate) fn key(&self, x: usize) -> &K {
        match &self.nodes[x].key {
            Some(key) => key,
            None => panic!("key(): {} is a sentinel, call the programmer", x),
        }
    }

    #[inline]
    pub(crate) fn size(&self, x: usize) -> usize {
        self.nodes[x].size
    }

    #[inline]
    pub(crate) fn parent(&self, x: usize) -> usize {
        self.nodes[x].parent
    }

    #[inline]
    pub(crate) fn left(&self, x: usize) -> usize {
        self.nodes[x].left
    }

    #[inline]
    pub(crate) fn right(&self, x: usize) -> usize {
        self.nodes[x].right
    }

    #[inline]
    pub(crate) fn is_red(&self, x: usize) -> bool {
        self.nodes[x].color == Color::Red
    }

    #[inline]
    pub(crate) fn is_detached(&self, x: usize) -> bool {
        x == NIL || x >= self.nodes.len() || self.nodes[x].key.is_none()
    }

    #[inline]
    pub(crate) fn set_color(&mut self, x: usize, color: Color) {
        self.nodes[x].color = color
    }

    pub(crate) fn alloc(&mut self, key: K) -> usize {
        match self.free.pop() {
            Some(x) => {
                self.nodes[x] = Node::new(key);
                x
            }
            None => {
                self.nodes.push(Node::new(key));
                self.nodes.len() - 1
            }
        }
    }

    pub(crate) fn release(&mut self, x: usize) -> Option<K> {
        let node = mem::replace(&mut self.nodes[x], Node::sentinel());
        self.free.push(x);
        node.key
    }

    //              (p)                       (p)
    //               |                         |
    //               x                         y
    //              / \                       / \
    //             /   y         ==>         x   \
    //            /   / \                   / \   \
    //          xl  yl   yr               xl  yl   yr
    //
    pub(crate) fn rotate_left(&mut self, x: usize) {
        let y = self.right(x);
        let yl = self.left(y);
        self.nodes[x].right = yl;
        if yl != NIL {
            self.nodes[yl].parent = x;
        }
        let p = self.parent(x);
        self.nodes[y].parent = p;
        if p == NIL {
            self.root = y;
        } else if x == self.left(p) {
            self.nodes[p].left = y;
        } else {
            self.nodes[p].right = y;
        }
        self.nodes[y].left = x;
        self.nodes[x].parent = y;

        self.nodes[y].size = self.size(x);
        self.nodes[x].size = self.size(self.left(x)) + self.size(yl) + 1;
    }

    //              (p)                       (p)
    //               |                         |
    //               x                         y
    //              / \                       / \
    //             y   \         ==>         /   x
    //            / \   \                   /   / \
    //          yl  yr   xr               yl  yr   xr
    //
    pub(crate) fn rotate_right(&mut self, x: usize) {
        let y = self.left(x);
        let yr = self.right(y);
        self.nodes[x].left = yr;
        if yr != NIL {
            self.nodes[yr].parent = x;
        }
        let p = self.parent(x);
        self.nodes[y].parent = p;
        if p == NIL {
            self.root = y;
        } else if x == self.right(p) {
            self.nodes[p].right = y;
        } else {
            self.nodes[p].left = y;
        }
        self.nodes[y].right = x;
        self.nodes[x].parent = y;

        self.nodes[y].size = self.size(x);
        self.nodes[x].size = self.size(yr) + self.size(self.right(x)) + 1;
    }

    // replace subtree under `u` with subtree under `v`. `v` may be the
    // sentinel, in which case its parent link is still updated, delete
    // fix-up depends on it.
    pub(crate) fn transplant(&mut self, u: usize, v: usize) {
        let p = self.parent(u);
        if p == NIL {
            self.root = v;
        } else if u == self.left(p) {
            self.nodes[p].left = v;
        } else {
            self.nodes[p].right = v;
        }
        self.nodes[v].parent = p;
    }

    pub(crate) fn subtree_minimum(&self, mut x: usize) -> usize {
        while x != NIL && self.left(x) != NIL {
            x = self.left(x);
        }
        x
    }

    pub(crate) fn subtree_maximum(&self, mut x: usize) -> usize {
        while x != NIL && self.right(x) != NIL {
            x = self.right(x);
        }
        x
    }

    pub(crate) fn successor_of(&self, mut x: usize) -> usize {
        if self.right(x) != NIL {
            return self.subtree_minimum(self.right(x));
        }
        let mut y = self.parent(x);
        while y != NIL && x == self.right(y) {
            x = y;
            y = self.parent(y);
        }
        y
    }

    pub(crate) fn predecessor_of(&self, mut x: usize) -> usize {
        if self.left(x) != NIL {
            return self.subtree_maximum(self.left(x));
        }
        let mut y = self.parent(x);
        while y != NIL && x == self.left(y) {
            x = y;
            y = self.parent(y);
        }
        y
    }
}

/// NodeRef is a read-only handle to a single entry in RbTree. It
/// borrows the tree, hence the tree cannot be mutated while a NodeRef
/// is alive.
pub struct NodeRef<'a, K>
where
    K: Clone + Ord,
{
    tree: &'a RbTree<K>,
    id: usize,
}

impl<'a, K> NodeRef<'a, K>
where
    K: Clone + Ord,
{
    #[inline]
    pub(crate) fn new(tree: &'a RbTree<K>, id: usize) -> Option<NodeRef<'a, K>> {
        if id == NIL {
            None
        } else {
            Some(NodeRef { tree, id })
        }
    }

    #[inline]
    pub(crate) fn id(&self) -> usize {
        self.id
    }

    /// Return the key for this entry.
    #[inline]
    pub fn key(&self) -> &'a K {
        self.tree.key(self.id)
    }

    /// Return number of entries in the subtree rooted at this node,
    /// including itself.
    #[inline]
    pub fn size(&self) -> usize {
        self.tree.size(self.id)
    }

    /// Return whether this node is colored red.
    #[inline]
    pub fn is_red(&self) -> bool {
        self.tree.is_red(self.id)
    }

    /// Return the next entry in sort order, None if this is the maximum.
    pub fn successor(&self) -> Option<NodeRef<'a, K>> {
        NodeRef::new(self.tree, self.tree.successor_of(self.id))
    }

    /// Return the previous entry in sort order, None if this is the
    /// minimum.
    pub fn predecessor(&self) -> Option<NodeRef<'a, K>> {
        NodeRef::new(self.tree, self.tree.predecessor_of(self.id))
    }
}

impl<'a, K> Clone for NodeRef<'a, K>
where
    K: Clone + Ord,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K> Copy for NodeRef<'a, K> where K: Clone + Ord {}

impl<'a, K> PartialEq for NodeRef<'a, K>
where
    K: Clone + Ord,
{
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<'a, K> fmt::Debug for NodeRef<'a, K>
where
    K: Clone + Ord + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("size", &self.size())
            .field("red", &self.is_red())
            .finish()
    }
}

/// Statistics on [`RbTree`]. Serves two purpose:
///
/// * To get partial but quick statistics via [`RbTree::stats`] method.
/// * To get full statisics via [`RbTree::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    free_slots: usize,
    blacks: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            free_slots: Default::default(),
            blacks: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number entries in [`RbTree`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, including over-head for `RbTree<K>`. Although
    /// the node overhead is constant, the node size varies based on
    /// key type.
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of arena slots released by delete and waiting
    /// to be reused.
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.free_slots
    }

    /// Return number of black nodes from root to leaf, on both left
    /// and right child.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return [`Depth`] statistics.
    pub fn depths(&self) -> Option<Depth> {
        match &self.depths {
            Some(depths) if depths.samples() > 0 => Some(depths.clone()),
            _ => None,
        }
    }
}

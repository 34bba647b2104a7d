use std::borrow::Borrow;

use crate::rbtree::{Color, RbTree, NIL};

/// Write operations on RbTree instance.
impl<K> RbTree<K>
where
    K: Clone + Ord,
{
    /// Insert `key` into the index. Duplicate keys are retained, a new
    /// key is placed after all entries that compare equal to it.
    pub fn insert(&mut self, key: K) {
        self.insert_node(key);
    }

    /// Replace one entry that compare equal to `key`, and return the
    /// replaced key. If there is no such entry, insert `key` and
    /// return None. Other duplicates are left untouched.
    pub fn replace_or_insert(&mut self, key: K) -> Option<K> {
        let old_key = match self.search(&key).map(|n| n.id()) {
            Some(z) => self.delete(z),
            None => None,
        };
        self.insert_node(key);
        old_key
    }

    /// Delete one entry that compare equal to `key`. Return false if
    /// `key` is not present, delete is effectively a no-op.
    pub fn delete_one<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key).map(|n| n.id()) {
            Some(z) => self.delete(z).is_some(),
            None => false,
        }
    }

    /// Delete all entries that compare equal to `key`. Return true if
    /// atleast one entry was deleted.
    pub fn delete_all<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut deleted = false;
        while self.delete_one(key) {
            deleted = true;
        }
        deleted
    }

    pub(crate) fn insert_node(&mut self, key: K) -> usize {
        // all comparisons happen before the tree is touched, a panicking
        // Ord leaves the tree as it was.
        let (mut y, mut x, mut leftward) = (NIL, self.root, false);
        while x != NIL {
            y = x;
            leftward = key < *self.key(x);
            x = if leftward { self.left(x) } else { self.right(x) };
        }

        let z = self.alloc(key);
        self.nodes[z].parent = y;
        if y == NIL {
            self.root = z;
        } else if leftward {
            self.nodes[y].left = z;
        } else {
            self.nodes[y].right = z;
        }
        self.grow_upto_root(y);
        self.insert_fixup(z);
        z
    }

    // increment size of every node from `x` upto root.
    fn grow_upto_root(&mut self, mut x: usize) {
        while x != NIL {
            self.nodes[x].size += 1;
            x = self.parent(x);
        }
    }

    fn insert_fixup(&mut self, mut z: usize) {
        while self.is_red(self.parent(z)) {
            let p = self.parent(z);
            let g = self.parent(p);
            if p == self.left(g) {
                let uncle = self.right(g);
                if self.is_red(uncle) {
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                } else {
                    if z == self.right(p) {
                        z = p;
                        self.rotate_left(z);
                    }
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_right(g);
                }
            } else {
                let uncle = self.left(g);
                if self.is_red(uncle) {
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                } else {
                    if z == self.left(p) {
                        z = p;
                        self.rotate_right(z);
                    }
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_left(g);
                }
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Unlink node `z` from the tree and return its key. Deleting a
    /// sentinel or an already detached slot is a no-op.
    pub(crate) fn delete(&mut self, z: usize) -> Option<K> {
        if self.is_detached(z) {
            return None;
        }

        let (zl, zr) = (self.left(z), self.right(z));
        let mut removed_color = self.nodes[z].color;
        let x;
        if zl == NIL {
            self.shrink_upto_root(self.parent(z));
            x = zr;
            self.transplant(z, zr);
        } else if zr == NIL {
            self.shrink_upto_root(self.parent(z));
            x = zl;
            self.transplant(z, zl);
        } else {
            // splice out the successor and move it into z's place.
            let y = self.subtree_minimum(zr);
            self.shrink_upto_root(self.parent(y));
            removed_color = self.nodes[y].color;
            x = self.right(y);
            if self.parent(y) == z {
                self.nodes[x].parent = y;
            } else {
                self.transplant(y, x);
                self.nodes[y].right = zr;
                self.nodes[zr].parent = y;
            }
            self.transplant(z, y);
            self.nodes[y].left = zl;
            self.nodes[zl].parent = y;
            self.nodes[y].color = self.nodes[z].color;
            self.nodes[y].size = self.nodes[z].size;
        }

        if removed_color == Color::Black {
            self.delete_fixup(x);
        }
        self.release(z)
    }

    // decrement size of every node from `x` upto root.
    fn shrink_upto_root(&mut self, mut x: usize) {
        while x != NIL {
            self.nodes[x].size -= 1;
            x = self.parent(x);
        }
    }

    // `x` carries an extra black, push it up till it can be absorbed
    // by a red node or by the root.
    fn delete_fixup(&mut self, mut x: usize) {
        while x != self.root && !self.is_red(x) {
            let p = self.parent(x);
            if x == self.left(p) {
                let mut w = self.right(p);
                if self.is_red(w) {
                    self.set_color(w, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_left(p);
                    w = self.right(self.parent(x));
                }
                if !self.is_red(self.left(w)) && !self.is_red(self.right(w)) {
                    self.set_color(w, Color::Red);
                    x = self.parent(x);
                } else {
                    if !self.is_red(self.right(w)) {
                        let wl = self.left(w);
                        self.set_color(wl, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_right(w);
                        w = self.right(self.parent(x));
                    }
                    let p = self.parent(x);
                    let wr = self.right(w);
                    self.nodes[w].color = self.nodes[p].color;
                    self.set_color(p, Color::Black);
                    self.set_color(wr, Color::Black);
                    self.rotate_left(p);
                    x = self.root;
                }
            } else {
                let mut w = self.left(p);
                if self.is_red(w) {
                    self.set_color(w, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_right(p);
                    w = self.left(self.parent(x));
                }
                if !self.is_red(self.right(w)) && !self.is_red(self.left(w)) {
                    self.set_color(w, Color::Red);
                    x = self.parent(x);
                } else {
                    if !self.is_red(self.left(w)) {
                        let wr = self.right(w);
                        self.set_color(wr, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_left(w);
                        w = self.left(self.parent(x));
                    }
                    let p = self.parent(x);
                    let wl = self.left(w);
                    self.nodes[w].color = self.nodes[p].color;
                    self.set_color(p, Color::Black);
                    self.set_color(wl, Color::Black);
                    self.rotate_right(p);
                    x = self.root;
                }
            }
        }
        self.set_color(x, Color::Black);
    }
}

//! Arena-backed treap: an ordered map with stable node handles.
//!
//! Purpose
//! - Back `DynamicPolygon` with an ordered container that supports
//!   lower-bound search and in-order neighbour steps from a handle, which
//!   `std::collections::BTreeMap` only offers through repeated range queries.
//!
//! Model
//! - Nodes live in a `Vec` slot arena and link to each other by `NodeId`
//!   (left, right, parent). Each node carries a random priority and the
//!   tree is a min-heap on priorities, a BST on keys.
//! - Removing a node rotates it down to a leaf and unlinks it; no other node
//!   changes slot, so handles held across a removal stay valid. Freed slots
//!   are recycled by later inserts only.
//! - Neighbour steps (`next`/`prev`) do not wrap; cyclic order is the
//!   caller's business.
//!
//! Code cross-refs: `geom2::DynamicPolygon`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;

/// Seed used by `Treap::new`; priorities are reproducible run to run.
const DEFAULT_SEED: u64 = 0x5eed_7ea9;

/// Opaque handle to a live node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
struct Node<K, V> {
    key: K,
    val: V,
    prio: u64,
    size: usize,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
}

#[derive(Clone, Debug)]
pub struct Treap<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    root: Option<NodeId>,
    rng: StdRng,
}

impl<K: Ord, V> Default for Treap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> Treap<K, V> {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Empty treap whose priorities are drawn from `StdRng::seed_from_u64(seed)`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size_of(self.root)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drop every node. Outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.root = None;
    }

    /// Insert `key → val`. An equal key keeps its node and has its value
    /// overwritten; the previous value is returned.
    pub fn insert(&mut self, key: K, val: V) -> Option<V> {
        if let Some(id) = self.find(&key) {
            return Some(std::mem::replace(&mut self.node_mut(id).val, val));
        }
        let prio = self.rng.gen::<u64>();
        let id = self.alloc(Node {
            key,
            val,
            prio,
            size: 1,
            left: None,
            right: None,
            parent: None,
        });
        // Descend to the leaf position, growing subtree sizes on the way.
        let mut cur = match self.root {
            None => {
                self.root = Some(id);
                return None;
            }
            Some(r) => r,
        };
        loop {
            self.node_mut(cur).size += 1;
            let go_left = self.node(id).key < self.node(cur).key;
            let child = if go_left {
                self.node(cur).left
            } else {
                self.node(cur).right
            };
            match child {
                Some(c) => cur = c,
                None => {
                    if go_left {
                        self.node_mut(cur).left = Some(id);
                    } else {
                        self.node_mut(cur).right = Some(id);
                    }
                    self.node_mut(id).parent = Some(cur);
                    break;
                }
            }
        }
        while let Some(p) = self.node(id).parent {
            if self.node(id).prio >= self.node(p).prio {
                break;
            }
            self.rotate_up(id);
        }
        None
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.find(key)?;
        Some(self.remove_node(id).1)
    }

    /// Remove `key`; true if something was removed.
    #[inline]
    pub fn erase(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    /// Remove the node behind `id`, returning its entry.
    ///
    /// # Panics
    /// If `id` refers to a node that was already removed.
    pub fn remove_node(&mut self, id: NodeId) -> (K, V) {
        // Rotate down until `id` is a leaf, lifting the higher-priority child.
        loop {
            let n = self.node(id);
            let child = match (n.left, n.right) {
                (None, None) => break,
                (Some(l), None) => l,
                (None, Some(r)) => r,
                (Some(l), Some(r)) => {
                    if self.node(l).prio < self.node(r).prio {
                        l
                    } else {
                        r
                    }
                }
            };
            self.rotate_up(child);
        }
        let parent = self.node(id).parent;
        match parent {
            None => self.root = None,
            Some(p) => {
                let pn = self.node_mut(p);
                if pn.left == Some(id) {
                    pn.left = None;
                } else {
                    pn.right = None;
                }
                let mut up = Some(p);
                while let Some(z) = up {
                    let zn = self.node_mut(z);
                    zn.size -= 1;
                    up = zn.parent;
                }
            }
        }
        self.release(id)
    }

    /// Handle of the node whose key equals `key`.
    pub fn find(&self, key: &K) -> Option<NodeId> {
        let mut cur = self.root;
        while let Some(id) = cur {
            let n = self.node(id);
            cur = match key.cmp(&n.key) {
                Ordering::Less => n.left,
                Ordering::Greater => n.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Smallest node with key `>= key`.
    pub fn lower_bound(&self, key: &K) -> Option<NodeId> {
        self.search(|k| k >= key)
    }

    /// Smallest node with key `> key`.
    pub fn upper_bound(&self, key: &K) -> Option<NodeId> {
        self.search(|k| k > key)
    }

    /// Leftmost node satisfying a predicate that is monotone in key order.
    fn search(&self, accept: impl Fn(&K) -> bool) -> Option<NodeId> {
        let mut best = None;
        let mut cur = self.root;
        while let Some(id) = cur {
            let n = self.node(id);
            if accept(&n.key) {
                best = Some(id);
                cur = n.left;
            } else {
                cur = n.right;
            }
        }
        best
    }

    /// Node with the smallest key.
    pub fn first(&self) -> Option<NodeId> {
        let mut id = self.root?;
        while let Some(l) = self.node(id).left {
            id = l;
        }
        Some(id)
    }

    /// Node with the largest key.
    pub fn last(&self) -> Option<NodeId> {
        let mut id = self.root?;
        while let Some(r) = self.node(id).right {
            id = r;
        }
        Some(id)
    }

    /// In-order successor (no wrap-around).
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        if let Some(mut x) = self.node(id).right {
            while let Some(l) = self.node(x).left {
                x = l;
            }
            return Some(x);
        }
        let mut x = id;
        while let Some(p) = self.node(x).parent {
            if self.node(p).left == Some(x) {
                return Some(p);
            }
            x = p;
        }
        None
    }

    /// In-order predecessor (no wrap-around).
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        if let Some(mut x) = self.node(id).left {
            while let Some(r) = self.node(x).right {
                x = r;
            }
            return Some(x);
        }
        let mut x = id;
        while let Some(p) = self.node(x).parent {
            if self.node(p).right == Some(x) {
                return Some(p);
            }
            x = p;
        }
        None
    }

    /// Key stored at `id`.
    ///
    /// # Panics
    /// If `id` refers to a node that was already removed.
    #[inline]
    pub fn key(&self, id: NodeId) -> &K {
        &self.node(id).key
    }

    /// Value stored at `id`.
    ///
    /// # Panics
    /// If `id` refers to a node that was already removed.
    #[inline]
    pub fn value(&self, id: NodeId) -> &V {
        &self.node(id).val
    }

    /// Mutable access to a value. Keys are not reachable this way, so
    /// ordering cannot be disturbed.
    ///
    /// # Panics
    /// If `id` refers to a node that was already removed.
    #[inline]
    pub fn value_mut(&mut self, id: NodeId) -> &mut V {
        &mut self.node_mut(id).val
    }

    /// Replace the value stored at `id`, returning the old one.
    ///
    /// # Panics
    /// If `id` refers to a node that was already removed.
    #[inline]
    pub fn set_value(&mut self, id: NodeId, val: V) -> V {
        std::mem::replace(&mut self.node_mut(id).val, val)
    }

    /// Number of keys strictly less than `key`.
    pub fn rank(&self, key: &K) -> usize {
        let mut c = 0;
        let mut cur = self.root;
        while let Some(id) = cur {
            let n = self.node(id);
            if n.key < *key {
                c += self.size_of(n.left) + 1;
                cur = n.right;
            } else {
                cur = n.left;
            }
        }
        c
    }

    /// The `k`-th smallest node (0-based).
    pub fn kth(&self, mut k: usize) -> Option<NodeId> {
        let mut cur = self.root;
        while let Some(id) = cur {
            let n = self.node(id);
            let ls = self.size_of(n.left);
            match k.cmp(&ls) {
                Ordering::Equal => return Some(id),
                Ordering::Less => cur = n.left,
                Ordering::Greater => {
                    k -= ls + 1;
                    cur = n.right;
                }
            }
        }
        None
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: self,
            cur: self.first(),
        }
    }

    // --- internals ---

    #[inline]
    fn node(&self, id: NodeId) -> &Node<K, V> {
        self.slots[id.0].as_ref().expect("stale treap handle")
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        self.slots[id.0].as_mut().expect("stale treap handle")
    }

    #[inline]
    fn size_of(&self, id: Option<NodeId>) -> usize {
        id.map_or(0, |i| self.node(i).size)
    }

    fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        match self.free.pop() {
            Some(i) => {
                self.slots[i] = Some(node);
                NodeId(i)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) -> (K, V) {
        let n = self.slots[id.0].take().expect("stale treap handle");
        self.free.push(id.0);
        (n.key, n.val)
    }

    fn resize(&mut self, id: NodeId) {
        let n = self.node(id);
        let s = 1 + self.size_of(n.left) + self.size_of(n.right);
        self.node_mut(id).size = s;
    }

    /// Rotate `x` above its parent, keeping in-order sequence and sizes.
    fn rotate_up(&mut self, x: NodeId) {
        let Some(y) = self.node(x).parent else {
            return;
        };
        let g = self.node(y).parent;
        self.node_mut(x).parent = g;
        match g {
            Some(g) => {
                let gn = self.node_mut(g);
                if gn.left == Some(y) {
                    gn.left = Some(x);
                } else {
                    gn.right = Some(x);
                }
            }
            None => self.root = Some(x),
        }
        self.node_mut(y).parent = Some(x);
        if self.node(y).left == Some(x) {
            let b = self.node(x).right;
            self.node_mut(y).left = b;
            if let Some(b) = b {
                self.node_mut(b).parent = Some(y);
            }
            self.node_mut(x).right = Some(y);
        } else {
            let b = self.node(x).left;
            self.node_mut(y).right = b;
            if let Some(b) = b {
                self.node_mut(b).parent = Some(y);
            }
            self.node_mut(x).left = Some(y);
        }
        self.resize(y);
        self.resize(x);
    }
}

/// In-order iterator over a `Treap`.
pub struct Iter<'a, K, V> {
    tree: &'a Treap<K, V>,
    cur: Option<NodeId>,
}

impl<'a, K: Ord, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cur?;
        self.cur = self.tree.next(id);
        let n = self.tree.node(id);
        Some((&n.key, &n.val))
    }
}

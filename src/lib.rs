//! An ordered map on a red-black tree, with stable node handles.
//!
//! Entries live in a slot arena and are addressed by [`NodeId`] handles,
//! which support O(1) access, O(log n) in-order navigation, and removal
//! without a key lookup.

use std::{
    cmp::Ordering,
    fmt,
    ops::{Bound, RangeBounds},
};

use compare::{natural, Compare, Natural};

pub mod debug;
mod node;

use node::{Arena, Color, Dir, Node};
pub use node::{NodeId, StaleHandle};

pub struct Tree<K, V, C = Natural<K>>
where
    C: Compare<K>,
{
    arena: Arena<K, V>,
    root: Option<u32>,
    len: usize,
    cmp: C,
}

impl<K: Ord, V> Tree<K, V> {
    pub fn new() -> Self { Self::with_comparator(natural()) }
}

impl<K, V, C: Compare<K>> Tree<K, V, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self { arena: Arena::new(), root: None, len: 0, cmp }
    }

    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.locate(key).map(|i| &self.arena.node(i).value)
    }
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let i = self.locate(key)?;
        Some(&mut self.arena.node_mut(i).value)
    }
    pub fn find(&self, key: &K) -> Option<NodeId> {
        self.locate(key).map(|i| self.arena.id(i))
    }

    /// Inserts `key` with `value` and returns the handle of its entry. An
    /// equal key has its value overwritten in place; the entry keeps its
    /// handle and the tree is not restructured.
    pub fn insert(&mut self, key: K, value: V) -> NodeId {
        let mut parent = None;
        let mut dir = Dir::Left;
        let mut cur = self.root;
        while let Some(i) = cur {
            let node = self.arena.node(i);
            match self.cmp.compare(&key, &node.key) {
                Ordering::Less => {
                    parent = Some(i);
                    dir = Dir::Left;
                    cur = node.left;
                }
                Ordering::Greater => {
                    parent = Some(i);
                    dir = Dir::Right;
                    cur = node.right;
                }
                Ordering::Equal => {
                    self.arena.node_mut(i).value = value;
                    return self.arena.id(i);
                }
            }
        }

        let new = self.arena.alloc(Node {
            key,
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        });
        match parent {
            None => self.root = Some(new),
            Some(p) => *self.arena.node_mut(p).child_mut(dir) = Some(new),
        }
        self.len += 1;
        self.insert_fixup(new);
        self.arena.id(new)
    }

    /// Removes `key`, returning its entry, or `None` if absent.
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let i = self.locate(key)?;
        Some(self.remove_at(i))
    }

    /// Removes the entry behind `id`.
    ///
    /// Removal structurally moves the in-order successor into the vacated
    /// position instead of copying its key and value, so `id` is the only
    /// handle invalidated; handles to every other entry survive.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(K, V), StaleHandle> {
        let i = self.arena.resolve(id).ok_or(StaleHandle)?;
        Ok(self.remove_at(i))
    }

    /// In-order iterator over the sub-map within `range`.
    ///
    /// The first entry is found by a bound-pruned descent, so the cost is
    /// O(log n + k) for k yielded entries rather than a full scan.
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> Range<'_, K, V, C, R> {
        let cur = self.lower_bound(range.start_bound());
        Range { tree: self, cur, range }
    }

    pub fn for_each(&self, mut f: impl FnMut(&K, &V)) {
        for (k, v) in self.iter() {
            f(k, v);
        }
    }
    pub fn map<R>(&self, mut f: impl FnMut(&K, &V) -> R) -> Vec<R> {
        self.iter().map(|(k, v)| f(k, v)).collect()
    }

    fn locate(&self, key: &K) -> Option<u32> {
        let mut cur = self.root;
        while let Some(i) = cur {
            let node = self.arena.node(i);
            cur = match self.cmp.compare(key, &node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(i),
            };
        }
        None
    }

    // leftmost node whose key satisfies the start bound, by pruned descent
    fn lower_bound(&self, bound: Bound<&K>) -> Option<u32> {
        let mut cur = self.root;
        let mut found = None;
        while let Some(i) = cur {
            let node = self.arena.node(i);
            let in_bound = match bound {
                Bound::Unbounded => true,
                Bound::Included(start) => {
                    self.cmp.compare(&node.key, start) != Ordering::Less
                }
                Bound::Excluded(start) => {
                    self.cmp.compare(&node.key, start) == Ordering::Greater
                }
            };
            if in_bound {
                found = Some(i);
                cur = node.left;
            } else {
                cur = node.right;
            }
        }
        found
    }

    fn insert_fixup(&mut self, mut x: u32) {
        while let Some(p) = self.arena.node(x).parent {
            if self.arena.node(p).color == Color::Black {
                break;
            }
            // a red parent is never the root, so the grandparent exists
            let g = self.arena.node(p).parent.unwrap();
            let side = if self.arena.node(g).left == Some(p) {
                Dir::Left
            } else {
                Dir::Right
            };
            let uncle = self.arena.node(g).child(side.flip());
            if self.is_red(uncle) {
                self.set_color(p, Color::Black);
                self.set_color(uncle.unwrap(), Color::Black);
                self.set_color(g, Color::Red);
                x = g;
            } else {
                if self.arena.node(p).child(side.flip()) == Some(x) {
                    // zig-zag: straighten through the parent first
                    self.rotate(p, side);
                    x = p;
                }
                let p = self.arena.node(x).parent.unwrap();
                let g = self.arena.node(p).parent.unwrap();
                self.set_color(p, Color::Black);
                self.set_color(g, Color::Red);
                self.rotate(g, side.flip());
                break;
            }
        }
        let root = self.root.unwrap();
        self.set_color(root, Color::Black);
    }

    fn remove_at(&mut self, z: u32) -> (K, V) {
        let (left, right) = {
            let node = self.arena.node(z);
            (node.left, node.right)
        };
        let mut removed_color = self.arena.node(z).color;
        let fix_node;
        let fix_parent;

        match (left, right) {
            (None, _) => {
                fix_node = right;
                fix_parent = self.arena.node(z).parent;
                self.transplant(z, right);
            }
            (_, None) => {
                fix_node = left;
                fix_parent = self.arena.node(z).parent;
                self.transplant(z, left);
            }
            (Some(l), Some(r)) => {
                // the successor takes z's place structurally; z's handle is
                // the only one that dies
                let s = self.subtree_extreme(r, Dir::Left);
                removed_color = self.arena.node(s).color;
                fix_node = self.arena.node(s).right;
                if self.arena.node(s).parent == Some(z) {
                    fix_parent = Some(s);
                } else {
                    fix_parent = self.arena.node(s).parent;
                    let s_right = self.arena.node(s).right;
                    self.transplant(s, s_right);
                    self.arena.node_mut(s).right = Some(r);
                    self.arena.node_mut(r).parent = Some(s);
                }
                self.transplant(z, Some(s));
                self.arena.node_mut(s).left = Some(l);
                self.arena.node_mut(l).parent = Some(s);
                let z_color = self.arena.node(z).color;
                self.arena.node_mut(s).color = z_color;
            }
        }

        if removed_color == Color::Black {
            self.remove_fixup(fix_node, fix_parent);
        }
        self.len -= 1;
        let node = self.arena.free(z);
        (node.key, node.value)
    }

    fn remove_fixup(&mut self, mut x: Option<u32>, mut p: Option<u32>) {
        while x != self.root && !self.is_red(x) {
            let parent = p.unwrap();
            let side = if self.arena.node(parent).left == x {
                Dir::Left
            } else {
                Dir::Right
            };
            let mut sib = self.arena.node(parent).child(side.flip());
            if self.is_red(sib) {
                // red sibling: bring a black sibling into place
                self.set_color(sib.unwrap(), Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, side);
                sib = self.arena.node(parent).child(side.flip());
            }
            // the deficient side is one black short, so the sibling subtree
            // is nonempty
            let s = sib.unwrap();
            let near = self.arena.node(s).child(side);
            let far = self.arena.node(s).child(side.flip());
            if !self.is_red(near) && !self.is_red(far) {
                self.set_color(s, Color::Red);
                x = Some(parent);
                p = self.arena.node(parent).parent;
            } else {
                let s = if !self.is_red(far) {
                    // red near nephew becomes the sibling
                    self.set_color(near.unwrap(), Color::Black);
                    self.set_color(s, Color::Red);
                    self.rotate(s, side.flip());
                    self.arena.node(parent).child(side.flip()).unwrap()
                } else {
                    s
                };
                let parent_color = self.arena.node(parent).color;
                self.set_color(s, parent_color);
                self.set_color(parent, Color::Black);
                let far = self.arena.node(s).child(side.flip()).unwrap();
                self.set_color(far, Color::Black);
                self.rotate(parent, side);
                x = self.root;
                break;
            }
        }
        if let Some(x) = x {
            self.set_color(x, Color::Black);
        }
    }

    // replaces the subtree at `old` with the one at `new` under old's parent
    fn transplant(&mut self, old: u32, new: Option<u32>) {
        let p = self.arena.node(old).parent;
        match p {
            None => self.root = new,
            Some(p) => {
                let slot = if self.arena.node(p).left == Some(old) {
                    Dir::Left
                } else {
                    Dir::Right
                };
                *self.arena.node_mut(p).child_mut(slot) = new;
            }
        }
        if let Some(new) = new {
            self.arena.node_mut(new).parent = p;
        }
    }

    // `x` descends in direction `dir`; its child on the other side comes up
    fn rotate(&mut self, x: u32, dir: Dir) {
        let up = dir.flip();
        let y = self.arena.node(x).child(up).unwrap();
        let mid = self.arena.node(y).child(dir);
        *self.arena.node_mut(x).child_mut(up) = mid;
        if let Some(mid) = mid {
            self.arena.node_mut(mid).parent = Some(x);
        }
        let p = self.arena.node(x).parent;
        self.arena.node_mut(y).parent = p;
        match p {
            None => self.root = Some(y),
            Some(p) => {
                let slot = if self.arena.node(p).left == Some(x) {
                    Dir::Left
                } else {
                    Dir::Right
                };
                *self.arena.node_mut(p).child_mut(slot) = Some(y);
            }
        }
        *self.arena.node_mut(y).child_mut(dir) = Some(x);
        self.arena.node_mut(x).parent = Some(y);
    }

    fn is_red(&self, i: Option<u32>) -> bool {
        matches!(i, Some(i) if self.arena.node(i).color == Color::Red)
    }
    fn set_color(&mut self, i: u32, color: Color) {
        self.arena.node_mut(i).color = color;
    }
}

impl<K, V, C: Compare<K>> Tree<K, V, C> {
    pub fn first(&self) -> Option<NodeId> {
        let root = self.root?;
        Some(self.arena.id(self.subtree_extreme(root, Dir::Left)))
    }
    pub fn last(&self) -> Option<NodeId> {
        let root = self.root?;
        Some(self.arena.id(self.subtree_extreme(root, Dir::Right)))
    }

    /// In-order successor of the entry behind `id`, or `None` at the last
    /// entry or for a stale handle.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        let i = self.arena.resolve(id)?;
        self.neighbor(i, Dir::Right).map(|s| self.arena.id(s))
    }
    /// In-order predecessor; the mirror of [`Tree::next`].
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        let i = self.arena.resolve(id)?;
        self.neighbor(i, Dir::Left).map(|s| self.arena.id(s))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.resolve(id).is_some()
    }
    pub fn key(&self, id: NodeId) -> Option<&K> {
        let i = self.arena.resolve(id)?;
        Some(&self.arena.node(i).key)
    }
    pub fn value(&self, id: NodeId) -> Option<&V> {
        let i = self.arena.resolve(id)?;
        Some(&self.arena.node(i).value)
    }
    pub fn value_mut(&mut self, id: NodeId) -> Option<&mut V> {
        let i = self.arena.resolve(id)?;
        Some(&mut self.arena.node_mut(i).value)
    }
    pub fn entry(&self, id: NodeId) -> Option<(&K, &V)> {
        let i = self.arena.resolve(id)?;
        let node = self.arena.node(i);
        Some((&node.key, &node.value))
    }

    pub fn iter(&self) -> Iter<'_, K, V, C> {
        let cur = self.root.map(|r| self.subtree_extreme(r, Dir::Left));
        Iter { tree: self, cur }
    }

    fn subtree_extreme(&self, mut i: u32, dir: Dir) -> u32 {
        while let Some(next) = self.arena.node(i).child(dir) {
            i = next;
        }
        i
    }

    // subtree descent, else ascent until we arrive from the `dir` side
    fn neighbor(&self, i: u32, dir: Dir) -> Option<u32> {
        if let Some(sub) = self.arena.node(i).child(dir) {
            return Some(self.subtree_extreme(sub, dir.flip()));
        }
        let mut cur = i;
        let mut parent = self.arena.node(i).parent;
        while let Some(p) = parent {
            if self.arena.node(p).child(dir.flip()) == Some(cur) {
                return Some(p);
            }
            cur = p;
            parent = self.arena.node(p).parent;
        }
        None
    }
}

pub struct Iter<'a, K, V, C: Compare<K>> {
    tree: &'a Tree<K, V, C>,
    cur: Option<u32>,
}

impl<'a, K, V, C: Compare<K>> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let i = self.cur?;
        self.cur = tree.neighbor(i, Dir::Right);
        let node = tree.arena.node(i);
        Some((&node.key, &node.value))
    }
}

pub struct Range<'a, K, V, C: Compare<K>, R> {
    tree: &'a Tree<K, V, C>,
    cur: Option<u32>,
    range: R,
}

impl<'a, K, V, C: Compare<K>, R: RangeBounds<K>> Iterator
    for Range<'a, K, V, C, R>
{
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let i = self.cur?;
        let node = tree.arena.node(i);
        let within = match self.range.end_bound() {
            Bound::Unbounded => true,
            Bound::Included(end) => {
                tree.cmp.compare(&node.key, end) != Ordering::Greater
            }
            Bound::Excluded(end) => {
                tree.cmp.compare(&node.key, end) == Ordering::Less
            }
        };
        if !within {
            self.cur = None;
            return None;
        }
        self.cur = tree.neighbor(i, Dir::Right);
        Some((&node.key, &node.value))
    }
}

impl<'a, K, V, C: Compare<K>> IntoIterator for &'a Tree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<K: Ord, V> Default for Tree<K, V> {
    fn default() -> Self { Self::new() }
}

impl<K: Ord, V> FromIterator<(K, V)> for Tree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for Tree<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, C> Clone for Tree<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Compare<K> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            root: self.root,
            len: self.len,
            cmp: self.cmp.clone(),
        }
    }
}

impl<K, V, C> fmt::Debug for Tree<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Compare<K>,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_map().entries(self.iter()).finish()
    }
}

#[test]
fn sanity_check() {
    let mut tree = Tree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.get(&5), None);
    assert_eq!(tree.first(), None);

    let id = tree.insert(5, "v");
    assert_eq!(tree.get(&5), Some(&"v"));
    assert_eq!(tree.entry(id), Some((&5, &"v")));
    assert_eq!(tree.first(), Some(id));
    assert_eq!(tree.last(), Some(id));

    *tree.get_mut(&5).unwrap() = "w";
    assert_eq!(tree.value(id), Some(&"w"));
    *tree.value_mut(id).unwrap() = "x";
    assert_eq!(tree.get(&5), Some(&"x"));

    assert_eq!(tree.remove(&5), Some((5, "x")));
    assert_eq!(tree.get(&5), None);
    assert_eq!(tree.first(), None);
    assert!(tree.is_empty());
    assert_eq!(tree.remove(&5), None);
}

#[test]
fn maps_key_value_pairs() {
    let n = 10000;
    let tree: Tree<_, _> = (0..n).map(|i| (i, i)).collect();
    assert_eq!(tree.len(), n as usize);
    for i in 0..n {
        assert_eq!(tree.get(&i), Some(&i));
    }
    assert_eq!(tree.get(&n), None);
}

#[test]
fn overwrites_on_equal_key() {
    let mut tree = Tree::new();
    let a = tree.insert(1, 10);
    let b = tree.insert(1, 20);
    assert_eq!(a, b);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.get(&1), Some(&20));
}

#[test]
fn deletes_key_value_pairs() {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    let n = 10000;
    let mut tree: Tree<_, _> = (0..n).map(|i| (i, i)).collect();

    let mut rng = ChaCha20Rng::from_seed([0; 32]);
    let deleted: Vec<bool> = (0..n).map(|_| rng.gen()).collect();
    for i in 0..n {
        if deleted[i] {
            assert_eq!(tree.remove(&i), Some((i, i)));
        }
    }

    for i in 0..n {
        let expected = if deleted[i] { None } else { Some(&i) };
        assert_eq!(tree.get(&i), expected);
    }
}

#[test]
fn remains_balanced() {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    let n = 10000;
    let mut tree: Tree<_, _> = (0..n).map(|i| (i, i)).collect();
    debug::assert_invariants(&tree);

    let mut rng = ChaCha20Rng::from_seed([0; 32]);
    for i in 0..n {
        if rng.gen() {
            tree.remove(&i);
        }
    }
    debug::assert_invariants(&tree);
}

#[test]
fn traverses_in_order() {
    let n = 10000;
    let tree: Tree<_, _> = (0..n).map(|i| (i, 2 * i)).collect();

    let mut expected = 0;
    for (&k, &v) in &tree {
        assert_eq!(k, expected);
        assert_eq!(v, 2 * k);
        expected += 1;
    }
    assert_eq!(expected, n);
}

#[test]
fn maps_in_order() {
    let n = 10000;
    let tree: Tree<_, _> = (0..n).map(|i| (i, i)).collect();

    let mapped = tree.map(|&k, _| k);
    assert_eq!(mapped.len() as i32, n);

    let mut accumulated = vec![];
    tree.for_each(|&k, _| accumulated.push(k));
    assert_eq!(mapped, accumulated);
}

#[test]
fn walks_ranges_in_order() {
    let n = 10000;
    let tree: Tree<_, _> = (0..n).map(|i| (i, i)).collect();

    let mut i = 123;
    for (&k, _) in tree.range(123..=4567) {
        assert_eq!(k, i);
        i += 1;
    }
    assert_eq!(i, 4568);

    let mut i = 123;
    for (&k, _) in tree.range(123..) {
        assert_eq!(k, i);
        i += 1;
    }
    assert_eq!(i, n);

    let mut i = 0;
    for (&k, _) in tree.range(..=4567) {
        assert_eq!(k, i);
        i += 1;
    }
    assert_eq!(i, 4568);

    let half_open: Vec<i32> = tree.range(10..13).map(|(&k, _)| k).collect();
    assert_eq!(half_open, [10, 11, 12]);
    assert_eq!(tree.range(7000..200).count(), 0);
}

#[test]
fn cursor_traversal() {
    let n = 10000;
    let tree: Tree<_, _> = (0..n).map(|i| (i, i)).collect();

    let mut i = 0;
    let mut cursor = tree.first();
    while let Some(id) = cursor {
        assert_eq!(tree.key(id), Some(&i));
        i += 1;
        cursor = tree.next(id);
    }
    assert_eq!(i, n);

    let mut i = n;
    let mut cursor = tree.last();
    while let Some(id) = cursor {
        i -= 1;
        assert_eq!(tree.key(id), Some(&i));
        cursor = tree.prev(id);
    }
    assert_eq!(i, 0);
}

#[test]
fn delete_by_node() {
    let mut tree = Tree::new();
    let mut doomed = vec![];
    for i in 0..100 {
        let id = tree.insert(i, i);
        if [44, 49, 88].contains(&i) {
            doomed.push(id);
        }
    }
    for id in doomed {
        let (k, _) = tree.remove_node(id).unwrap();
        assert!([44, 49, 88].contains(&k));
        assert_eq!(tree.remove_node(id), Err(StaleHandle));
        assert!(!tree.contains(id));
    }
    debug::assert_invariants(&tree);

    let mut visited = vec![];
    let mut cursor = tree.first();
    while let Some(id) = cursor {
        visited.push(*tree.key(id).unwrap());
        cursor = tree.next(id);
    }
    let expected: Vec<i32> =
        (0..100).filter(|k| ![44, 49, 88].contains(k)).collect();
    assert_eq!(visited, expected);
    assert_eq!(visited.len(), 97);
}

#[test]
fn handles_survive_unrelated_removals() {
    let mut tree = Tree::new();
    let ids: Vec<_> = (0..64).map(|i| tree.insert(i, ())).collect();

    // removing interior (two-child) nodes reshapes the tree but leaves
    // every other handle attached to its original key
    for &doomed in &[32, 8, 48, 0] {
        tree.remove_node(ids[doomed]).unwrap();
        debug::assert_invariants(&tree);
        for i in 0..64 {
            if [32, 8, 48, 0].contains(&i) && tree.key(ids[i]).is_none() {
                continue;
            }
            assert_eq!(tree.key(ids[i]), Some(&(i as i32)));
        }
    }
}

#[test]
fn stale_handles_do_not_resolve() {
    let mut tree = Tree::new();
    let id = tree.insert(7, ());
    tree.insert(8, ());
    tree.remove(&7);

    assert!(!tree.contains(id));
    assert_eq!(tree.key(id), None);
    assert_eq!(tree.value(id), None);
    assert_eq!(tree.next(id), None);
    assert_eq!(tree.prev(id), None);
    assert_eq!(tree.remove_node(id), Err(StaleHandle));

    // a slot reused for a different entry still rejects the old handle
    tree.insert(9, ());
    assert!(!tree.contains(id));
}

#[test]
fn custom_comparator_orders_iteration() {
    let mut tree = Tree::with_comparator(|a: &u32, b: &u32| b.cmp(a));
    for i in [3, 1, 4, 1, 5, 9, 2, 6] {
        tree.insert(i, ());
    }
    let keys: Vec<u32> = tree.iter().map(|(&k, _)| k).collect();
    assert_eq!(keys, [9, 6, 5, 4, 3, 2, 1]);
    debug::assert_invariants(&tree);
}

#[test]
fn clear_resets_and_invalidates() {
    let mut tree = Tree::new();
    let id = tree.insert(1, 1);
    tree.insert(2, 2);
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.first(), None);
    assert!(!tree.contains(id));

    let id = tree.insert(3, 3);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.entry(id), Some((&3, &3)));
}

#[test]
fn behaves_like_btreemap() {
    use std::collections::BTreeMap;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_seed([0; 32]);
    let mut tree = Tree::new();
    let mut model = BTreeMap::new();

    for step in 0..4096_u32 {
        let key: u8 = rng.gen();
        match rng.gen_range(0..4) {
            0 | 1 => {
                tree.insert(key, step);
                model.insert(key, step);
            }
            2 => {
                assert_eq!(
                    tree.remove(&key),
                    model.remove(&key).map(|v| (key, v))
                );
            }
            _ => {
                if let Some(id) = tree.find(&key) {
                    tree.remove_node(id).unwrap();
                }
                model.remove(&key);
            }
        }

        if step % 64 == 0 {
            debug::assert_invariants(&tree);
            assert!(tree.iter().eq(model.iter()));
        }
    }
    debug::assert_invariants(&tree);
    assert_eq!(tree.len(), model.len());
    assert!(tree.iter().eq(model.iter()));

    let lo = rng.gen::<u8>().min(200);
    assert!(tree.range(lo..=250).eq(model.range(lo..=250)));
}

#[test]
fn debug_fmt() {
    let tree: Tree<_, _> = [(2, "b"), (1, "a"), (3, "c")].into_iter().collect();
    assert_eq!(format!("{tree:?}"), r#"{1: "a", 2: "b", 3: "c"}"#);
}

//! Structural diagnostics, for tests. Nothing here runs on the operation
//! paths.

use std::fmt;

use compare::Compare;

use crate::node::Color;
use crate::Tree;

/// Checks the red-black and search-tree invariants, panicking on the first
/// violation: a Black (or absent) root, no red-red parent/child edge, a
/// uniform black-height on every root-to-nil path, strictly ascending keys
/// in order, consistent parent links, and arena/len accounting.
pub fn assert_invariants<K, V, C: Compare<K>>(tree: &Tree<K, V, C>) {
    fn walk<K, V, C: Compare<K>>(
        tree: &Tree<K, V, C>,
        i: Option<u32>,
        parent: Option<u32>,
    ) -> usize {
        let Some(i) = i else { return 0 };
        let node = tree.arena.node(i);
        assert_eq!(node.parent, parent, "parent link out of sync");
        if node.color == Color::Red {
            assert!(
                !tree.is_red(node.left) && !tree.is_red(node.right),
                "red node with a red child"
            );
        }
        let left = walk(tree, node.left, Some(i));
        let right = walk(tree, node.right, Some(i));
        assert_eq!(left, right, "black-height mismatch");
        left + usize::from(node.color == Color::Black)
    }

    if let Some(root) = tree.root {
        assert_eq!(
            tree.arena.node(root).color,
            Color::Black,
            "red root"
        );
    }
    walk(tree, tree.root, None);

    let mut count = 0;
    let mut prev: Option<&K> = None;
    for (key, _) in tree.iter() {
        if let Some(prev) = prev {
            assert_eq!(
                tree.cmp.compare(prev, key),
                std::cmp::Ordering::Less,
                "in-order keys not strictly ascending"
            );
        }
        prev = Some(key);
        count += 1;
    }
    assert_eq!(count, tree.len(), "len out of sync with traversal");

    assert_eq!(tree.arena.occupied(), tree.len(), "arena leaks slots");
    assert_eq!(
        tree.arena.free_list_len(),
        tree.arena.slot_count() - tree.len(),
        "free list out of sync"
    );
}

/// Renders the tree sideways to stderr, right subtree on top, with each
/// node's color.
pub fn visualize<K: fmt::Debug, V, C: Compare<K>>(tree: &Tree<K, V, C>) {
    fn dfs<K: fmt::Debug, V, C: Compare<K>>(
        tree: &Tree<K, V, C>,
        i: Option<u32>,
        depth: usize,
    ) {
        let Some(i) = i else { return };
        let node = tree.arena.node(i);
        dfs(tree, node.right, depth + 1);
        let mark = match node.color {
            Color::Red => "R",
            Color::Black => "B",
        };
        eprintln!("{:pad$}{:?} ({mark})", "", node.key, pad = 4 * depth);
        dfs(tree, node.left, depth + 1);
    }

    dfs(tree, tree.root, 0);
}

#[test]
fn checker_passes_on_known_shapes() {
    let tree: Tree<i32, ()> = Tree::new();
    assert_invariants(&tree);

    let tree: Tree<_, _> = (0..32).map(|i| (i, ())).collect();
    assert_invariants(&tree);
    visualize(&tree);
}

#[test]
#[should_panic(expected = "red node with a red child")]
fn checker_rejects_red_red() {
    let mut tree: Tree<_, _> = (0..8).map(|i| (i, ())).collect();
    // recolor everything below the root red; eight nodes guarantee a
    // red-red edge somewhere below the first level
    for k in 0..8 {
        let i = tree.arena.resolve(tree.find(&k).unwrap()).unwrap();
        if Some(i) != tree.root {
            tree.arena.node_mut(i).color = Color::Red;
        }
    }
    assert_invariants(&tree);
}

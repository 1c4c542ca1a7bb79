use std::{error, fmt};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) enum Dir {
    Left,
    Right,
}

impl Dir {
    pub(crate) fn flip(self) -> Self {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    // child links own the subtree; `parent` is navigation only
    pub(crate) parent: Option<u32>,
    pub(crate) left: Option<u32>,
    pub(crate) right: Option<u32>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn child(&self, dir: Dir) -> Option<u32> {
        match dir {
            Dir::Left => self.left,
            Dir::Right => self.right,
        }
    }
    pub(crate) fn child_mut(&mut self, dir: Dir) -> &mut Option<u32> {
        match dir {
            Dir::Left => &mut self.left,
            Dir::Right => &mut self.right,
        }
    }
}

/// Handle to an entry of a [`Tree`](crate::Tree).
///
/// A handle stays valid until the entry it refers to is removed; removing
/// *other* entries never invalidates it, even when the removal reshapes the
/// tree around it. Methods taking a handle detect staleness instead of
/// dereferencing it. Handles are only meaningful with the tree that issued
/// them.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId {
    index: u32,
    gen: u32,
}

/// Error returned by [`Tree::remove_node`](crate::Tree::remove_node) for a
/// handle whose entry has already been removed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StaleHandle;

impl fmt::Display for StaleHandle {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str("node handle does not refer to a live entry")
    }
}

impl error::Error for StaleHandle {}

#[derive(Clone)]
enum SlotState<K, V> {
    Occupied(Node<K, V>),
    Vacant { next_free: Option<u32> },
}

#[derive(Clone)]
struct Slot<K, V> {
    gen: u32,
    state: SlotState<K, V>,
}

/// Slot arena. Indices handed out by `alloc` stay stable until `free`;
/// vacated slots are chained into an intrusive free list and reused with a
/// bumped generation, so a `NodeId` into a reused slot no longer resolves.
#[derive(Clone)]
pub(crate) struct Arena<K, V> {
    slots: Vec<Slot<K, V>>,
    free_head: Option<u32>,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn new() -> Self { Self { slots: vec![], free_head: None } }

    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> u32 {
        match self.free_head {
            Some(i) => {
                let next = match self.slots[i as usize].state {
                    SlotState::Vacant { next_free } => next_free,
                    SlotState::Occupied(_) => {
                        unreachable!("free list points at a live slot")
                    }
                };
                self.free_head = next;
                self.slots[i as usize].state = SlotState::Occupied(node);
                i
            }
            None => {
                let i = self.slots.len() as u32;
                self.slots.push(Slot {
                    gen: 0,
                    state: SlotState::Occupied(node),
                });
                i
            }
        }
    }

    pub(crate) fn free(&mut self, i: u32) -> Node<K, V> {
        let next_free = self.free_head;
        let slot = &mut self.slots[i as usize];
        let state = std::mem::replace(
            &mut slot.state,
            SlotState::Vacant { next_free },
        );
        slot.gen = slot.gen.wrapping_add(1);
        self.free_head = Some(i);
        match state {
            SlotState::Occupied(node) => node,
            SlotState::Vacant { .. } => {
                unreachable!("slot freed twice")
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        for i in 0..self.slots.len() as u32 {
            if let SlotState::Occupied(_) = self.slots[i as usize].state {
                self.free(i);
            }
        }
    }

    pub(crate) fn node(&self, i: u32) -> &Node<K, V> {
        match &self.slots[i as usize].state {
            SlotState::Occupied(node) => node,
            SlotState::Vacant { .. } => unreachable!("dangling node index"),
        }
    }

    pub(crate) fn node_mut(&mut self, i: u32) -> &mut Node<K, V> {
        match &mut self.slots[i as usize].state {
            SlotState::Occupied(node) => node,
            SlotState::Vacant { .. } => unreachable!("dangling node index"),
        }
    }

    pub(crate) fn id(&self, i: u32) -> NodeId {
        NodeId { index: i, gen: self.slots[i as usize].gen }
    }

    pub(crate) fn resolve(&self, id: NodeId) -> Option<u32> {
        let slot = self.slots.get(id.index as usize)?;
        match slot.state {
            SlotState::Occupied(_) if slot.gen == id.gen => Some(id.index),
            _ => None,
        }
    }

    pub(crate) fn occupied(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot.state, SlotState::Occupied(_)))
            .count()
    }

    pub(crate) fn free_list_len(&self) -> usize {
        let mut len = 0;
        let mut cur = self.free_head;
        while let Some(i) = cur {
            len += 1;
            cur = match self.slots[i as usize].state {
                SlotState::Vacant { next_free } => next_free,
                SlotState::Occupied(_) => {
                    unreachable!("free list points at a live slot")
                }
            };
        }
        len
    }

    pub(crate) fn slot_count(&self) -> usize { self.slots.len() }
}

#[test]
fn slot_reuse_bumps_generation() {
    let node = |key: u32| Node {
        key,
        value: (),
        color: Color::Red,
        parent: None,
        left: None,
        right: None,
    };

    let mut arena = Arena::new();
    let a = arena.alloc(node(1));
    let b = arena.alloc(node(2));
    let id_a = arena.id(a);
    assert_eq!(arena.resolve(id_a), Some(a));

    arena.free(a);
    assert_eq!(arena.resolve(id_a), None);

    // the vacated slot is reused, but under a new generation
    let c = arena.alloc(node(3));
    assert_eq!(c, a);
    assert_eq!(arena.resolve(id_a), None);
    assert_eq!(arena.resolve(arena.id(c)), Some(c));

    assert_eq!(arena.node(b).key, 2);
    assert_eq!(arena.occupied(), 2);
    assert_eq!(arena.free_list_len(), 0);
}

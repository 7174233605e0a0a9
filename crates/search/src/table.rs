use reversi_core::Color;

use crate::node::{SearchNode, UNEXPANDED};

/// Identity of a table entry.
///
/// The hash is the raw packed position, never a symmetry-folded value: the
/// node's move list is orientation-specific, so two orientations of one
/// symmetric position must land in different slots. Mover and ply complete
/// the key.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NodeKey {
    pub hash: u32,
    pub mover: Color,
    pub ply: u8,
}

struct Slot {
    key: NodeKey,
    node: SearchNode,
}

/// Fixed-capacity open-addressed node store with linear probing.
///
/// Slot indices are stable for the lifetime of an entry, which lets
/// [`SearchNode::child_slot`] reference children directly. When the table
/// fills past nine tenths, the search evicts every entry unreachable from
/// the current root and the survivors are reinserted with their child
/// references remapped.
pub struct NodeTable {
    slots: Vec<Option<Slot>>,
    mask: usize,
    used: usize,
}

impl NodeTable {
    /// Creates a table with `capacity` slots, rounded up to a power of two.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.next_power_of_two().max(2);
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        NodeTable {
            slots,
            mask: capacity - 1,
            used: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// True once occupancy exceeds nine tenths; past this point claims are
    /// refused until entries are evicted.
    pub fn at_capacity(&self) -> bool {
        self.used * 10 > self.capacity() * 9
    }

    /// Slot index holding `key`, if present.
    pub fn find(&self, key: NodeKey) -> Option<usize> {
        let mut idx = key.hash as usize & self.mask;
        for _ in 0..self.slots.len() {
            match &self.slots[idx] {
                Some(slot) if slot.key == key => return Some(idx),
                None => return None,
                _ => idx = (idx + 1) & self.mask,
            }
        }
        None
    }

    /// Returns the slot holding `key`, claiming a fresh one with `make` if
    /// absent. `None` when the occupancy cap refuses the claim.
    pub fn find_or_claim(
        &mut self,
        key: NodeKey,
        make: impl FnOnce() -> SearchNode,
    ) -> Option<usize> {
        let mut idx = key.hash as usize & self.mask;
        for _ in 0..self.slots.len() {
            match &self.slots[idx] {
                Some(slot) if slot.key == key => return Some(idx),
                Some(_) => idx = (idx + 1) & self.mask,
                None => {
                    if self.at_capacity() {
                        return None;
                    }
                    self.slots[idx] = Some(Slot { key, node: make() });
                    self.used += 1;
                    return Some(idx);
                }
            }
        }
        None
    }

    pub fn node(&self, idx: usize) -> &SearchNode {
        &self.slots[idx]
            .as_ref()
            .expect("BUG: slot index points at an empty slot")
            .node
    }

    pub fn node_mut(&mut self, idx: usize) -> &mut SearchNode {
        &mut self.slots[idx]
            .as_mut()
            .expect("BUG: slot index points at an empty slot")
            .node
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.used = 0;
    }

    /// Evicts every entry not reachable from `root` through child edges,
    /// reinserts the survivors, and returns the root's new slot index.
    pub fn evict_unreachable(&mut self, root: usize) -> usize {
        let capacity = self.slots.len();
        let mut reachable = vec![false; capacity];
        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            if reachable[idx] {
                continue;
            }
            reachable[idx] = true;
            for &child in &self.node(idx).child_slot {
                if child != UNEXPANDED && !reachable[child] {
                    stack.push(child);
                }
            }
        }

        // Reinsert survivors into a fresh probe sequence, then remap the
        // child edges through old-index -> new-index.
        let mut remap = vec![UNEXPANDED; capacity];
        let mut fresh: Vec<Option<Slot>> = Vec::with_capacity(capacity);
        fresh.resize_with(capacity, || None);
        let mut used = 0;
        for (old_idx, slot) in self.slots.iter_mut().enumerate() {
            if !reachable[old_idx] {
                *slot = None;
                continue;
            }
            let slot = slot.take().expect("BUG: reachable slot is empty");
            let mut idx = slot.key.hash as usize & self.mask;
            while fresh[idx].is_some() {
                idx = (idx + 1) & self.mask;
            }
            fresh[idx] = Some(slot);
            remap[old_idx] = idx;
            used += 1;
        }
        for slot in fresh.iter_mut().flatten() {
            for child in &mut slot.node.child_slot {
                if *child != UNEXPANDED {
                    *child = remap[*child];
                }
            }
        }

        self.slots = fresh;
        self.used = used;
        remap[root]
    }
}

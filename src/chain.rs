//! Node Chain
//!
//! The doubly linked chain of nodes behind an [`UnrolledList`](crate::UnrolledList).
//!
//! Structure:
//! - All nodes are stored in one `Vec` and addressed by `u32` index (no raw
//!   pointers, no reference counting). `NONE` terminates the chain.
//! - Unlinked nodes go to a free list and are recycled with their slot array.
//! - `head`/`tail` are both `NONE` when the chain is empty. A linked node is
//!   never empty.
//!
//! Operations:
//! - `walk`: resolve a global index to a seat, scanning from whichever end is
//!   closer.
//! - `insert`: local insertion, escalating to neighbor transfer or expansion
//!   when the node is saturated. Returns the seat the element landed on.
//! - `remove`: local removal followed by defragmentation when the node drops
//!   under half capacity. Returns a [`Relocation`] describing where the
//!   removed position now lives.
//!
//! No operation moves an element to another node without reporting it through
//! its return value; cursors and the sort engine re-seat from those reports.

use tracing::trace;

use crate::config::{is_full, is_underfilled, prefers_next, prefers_prev};
use crate::node::{Node, NodeIdx, Relocation, Seat, NONE};

#[derive(Clone, Debug)]
pub(crate) struct Chain<T> {
    nodes: Vec<Node<T>>,
    /// Indices of unlinked nodes ready for reuse.
    free: Vec<NodeIdx>,
    pub head: NodeIdx,
    pub tail: NodeIdx,
    roll_size: usize,
}

impl<T> Chain<T> {
    pub fn new(roll_size: usize) -> Chain<T> {
        return Chain {
            nodes: Vec::new(),
            free: Vec::new(),
            head: NONE,
            tail: NONE,
            roll_size,
        };
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        return self.head == NONE;
    }

    #[inline(always)]
    pub fn node(&self, idx: NodeIdx) -> &Node<T> {
        return &self.nodes[idx as usize];
    }

    #[inline(always)]
    pub fn node_mut(&mut self, idx: NodeIdx) -> &mut Node<T> {
        return &mut self.nodes[idx as usize];
    }

    /// Number of linked nodes.
    pub fn node_count(&self) -> usize {
        return self.nodes.len() - self.free.len();
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = NONE;
        self.tail = NONE;
    }

    /// Node indices from head to tail.
    pub fn indices(&self) -> NodeIndices<'_, T> {
        return NodeIndices {
            chain: self,
            current: self.head,
        };
    }

    /// All linked nodes, mutably, in chain order.
    pub fn nodes_in_order_mut(&mut self) -> Vec<&mut Node<T>> {
        let order: Vec<NodeIdx> = self.indices().collect();
        let mut by_index: Vec<Option<&mut Node<T>>> = self.nodes.iter_mut().map(Some).collect();
        let mut result = Vec::with_capacity(order.len());
        for idx in order {
            if let Some(node) = by_index[idx as usize].take() {
                result.push(node);
            }
        }
        return result;
    }

    /// Consume the chain, yielding nodes in order.
    pub fn into_nodes_in_order(self) -> Vec<Node<T>> {
        let order: Vec<NodeIdx> = self.indices().collect();
        let mut by_index: Vec<Option<Node<T>>> = self.nodes.into_iter().map(Some).collect();
        let mut result = Vec::with_capacity(order.len());
        for idx in order {
            if let Some(node) = by_index[idx as usize].take() {
                result.push(node);
            }
        }
        return result;
    }

    /// Allocate a detached node, reusing from the free list if available.
    fn alloc_node(&mut self) -> NodeIdx {
        if let Some(idx) = self.free.pop() {
            return idx;
        }
        let idx = self.nodes.len() as NodeIdx;
        self.nodes.push(Node::new(self.roll_size));
        return idx;
    }

    /// Create the only node of an empty chain.
    pub fn push_first(&mut self) -> NodeIdx {
        debug_assert!(self.is_empty());
        let idx = self.alloc_node();
        self.head = idx;
        self.tail = idx;
        trace!(node = idx, "allocated first node");
        return idx;
    }

    /// Link a new empty node right after `idx`.
    fn insert_after(&mut self, idx: NodeIdx) -> NodeIdx {
        let new = self.alloc_node();
        let next = self.node(idx).next;
        {
            let node = self.node_mut(new);
            node.prev = idx;
            node.next = next;
        }
        if next != NONE {
            self.node_mut(next).prev = new;
        } else {
            self.tail = new;
        }
        self.node_mut(idx).next = new;
        trace!(node = new, after = idx, "allocated node");
        return new;
    }

    /// Splice `idx` out of the chain and recycle it. Its slots must be vacant.
    fn unlink(&mut self, idx: NodeIdx) {
        let (prev, next) = {
            let node = self.node(idx);
            (node.prev, node.next)
        };
        if prev != NONE {
            self.node_mut(prev).next = next;
        } else {
            self.head = next;
        }
        if next != NONE {
            self.node_mut(next).prev = prev;
        } else {
            self.tail = prev;
        }
        self.node_mut(idx).reset();
        self.free.push(idx);
        trace!(node = idx, "unlinked node");
    }

    /// Move `count` live elements between physical slot positions of two
    /// distinct nodes. Offsets and lengths are the caller's job.
    fn move_slots(&mut self, from: NodeIdx, from_at: usize, to: NodeIdx, to_at: usize, count: usize) {
        debug_assert_ne!(from, to);
        for i in 0..count {
            let value = self.nodes[from as usize].slots[from_at + i].take();
            debug_assert!(value.is_some());
            debug_assert!(self.nodes[to as usize].slots[to_at + i].is_none());
            self.nodes[to as usize].slots[to_at + i] = value;
        }
    }

    // =========================================================================
    // Position resolution
    // =========================================================================

    /// Resolve global `index` in a chain holding `len` elements.
    ///
    /// `index == len` resolves to `(tail, tail.len)`, the append position.
    /// An empty chain resolves to [`Seat::END`].
    pub fn walk(&self, index: usize, len: usize) -> Seat {
        if self.head == NONE {
            return Seat::END;
        }
        if index > len >> 1 {
            return self.walk_backward(index, len);
        }
        return self.walk_forward(index);
    }

    fn walk_forward(&self, index: usize) -> Seat {
        let mut idx = self.head;
        let mut remaining = index;
        loop {
            let node = self.node(idx);
            if remaining < node.len || node.next == NONE {
                break;
            }
            remaining -= node.len;
            idx = node.next;
        }
        return Seat::new(idx, remaining);
    }

    fn walk_backward(&self, index: usize, len: usize) -> Seat {
        let mut idx = self.tail;
        let mut remaining = len - index;
        loop {
            let node = self.node(idx);
            if remaining <= node.len || node.prev == NONE {
                break;
            }
            remaining -= node.len;
            idx = node.prev;
        }
        let node_len = self.node(idx).len;
        return Seat::new(idx, node_len - remaining);
    }

    /// Roll a seat forward past the end of its node. Seats that run off the
    /// tail become [`Seat::END`].
    pub fn normalize(&self, mut seat: Seat) -> Seat {
        while seat.node != NONE {
            let node = self.node(seat.node);
            if seat.pos < node.len {
                break;
            }
            seat.pos -= node.len;
            seat.node = node.next;
        }
        if seat.node == NONE {
            return Seat::END;
        }
        return seat;
    }

    /// Seat at which an element would be appended, creating the first node
    /// if the chain is empty.
    pub fn append_seat(&mut self) -> Seat {
        if self.head == NONE {
            let idx = self.push_first();
            return Seat::new(idx, 0);
        }
        let tail = self.tail;
        return Seat::new(tail, self.node(tail).len);
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Insert `value` so that it becomes the element at `seat`. Returns where
    /// the element actually landed, which may be a neighbor of `seat.node`.
    pub fn insert(&mut self, seat: Seat, value: T) -> Seat {
        debug_assert!(seat.node != NONE);
        let target = self.make_room(seat.node, seat.pos);
        self.node_mut(target.node).insert(target.pos, value);
        return target;
    }

    /// Find a seat equivalent to `(idx, pos)` in a node with a vacant slot.
    fn make_room(&mut self, idx: NodeIdx, pos: usize) -> Seat {
        let len = self.node(idx).len;
        if !self.node(idx).is_saturated() {
            return Seat::new(idx, pos);
        }
        if prefers_prev(pos, len) {
            if let Some(seat) = self.offload_prefix_to_prev(idx, pos) {
                return seat;
            }
        }
        if prefers_next(pos, len) {
            if let Some(seat) = self.offload_suffix_to_next(idx, pos) {
                return seat;
            }
        }
        return self.expand(idx, pos);
    }

    /// Move the `pos` elements before the insertion point into the trailing
    /// room of the previous node.
    fn offload_prefix_to_prev(&mut self, idx: NodeIdx, pos: usize) -> Option<Seat> {
        let prev = self.node(idx).prev;
        if prev == NONE {
            return None;
        }
        let room = self.node(prev).free_back();
        if pos == 0 {
            if room == 0 {
                return None;
            }
            return Some(Seat::new(prev, self.node(prev).len));
        }
        if room < pos {
            return None;
        }

        let from_at = self.node(idx).start;
        let to_at = self.node(prev).end();
        self.move_slots(idx, from_at, prev, to_at, pos);
        self.node_mut(prev).len += pos;
        let node = self.node_mut(idx);
        node.start += pos;
        node.len -= pos;
        trace!(from = idx, to = prev, count = pos, "transferred prefix");
        return Some(Seat::new(idx, 0));
    }

    /// Move the elements from the insertion point onward into the leading
    /// room of the next node.
    fn offload_suffix_to_next(&mut self, idx: NodeIdx, pos: usize) -> Option<Seat> {
        let next = self.node(idx).next;
        if next == NONE {
            return None;
        }
        let capacity = self.roll_size;
        if is_full(self.node(next).len, capacity) {
            return None;
        }
        let to_move = self.node(idx).len - pos;
        if to_move == 0 {
            return Some(Seat::new(next, 0));
        }
        let next_start = self.node(next).start;
        if next_start < to_move {
            return None;
        }

        let from_at = self.node(idx).start + pos;
        self.move_slots(idx, from_at, next, next_start - to_move, to_move);
        {
            let next_node = self.node_mut(next);
            next_node.start -= to_move;
            next_node.len += to_move;
        }
        self.node_mut(idx).len = pos;
        trace!(from = idx, to = next, count = to_move, "transferred suffix");
        return Some(Seat::new(idx, pos));
    }

    /// The next node if it can take data, otherwise a fresh node linked
    /// after `idx`.
    fn optimal_next(&mut self, idx: NodeIdx) -> NodeIdx {
        let next = self.node(idx).next;
        if next != NONE && !is_full(self.node(next).len, self.roll_size) {
            return next;
        }
        return self.insert_after(idx);
    }

    /// Split roughly a quarter of a saturated node into the optimal next node.
    fn expand(&mut self, idx: NodeIdx, pos: usize) -> Seat {
        let target = self.optimal_next(idx);
        let len = self.node(idx).len;
        let target_free = self.roll_size - self.node(target).len;
        // A non-full target always has two vacant slots: one for the moved
        // block and one left for the pending insertion.
        assert!(target_free >= 2, "expansion target has no room");
        let amount = (len / 4).max(1).min(target_free - 1);

        if self.node(target).free_front() < amount {
            self.node_mut(target).shift_to(amount);
        }
        let to_at = self.node(target).start - amount;
        let from_at = self.node(idx).end() - amount;
        self.move_slots(idx, from_at, target, to_at, amount);
        {
            let target_node = self.node_mut(target);
            target_node.start = to_at;
            target_node.len += amount;
        }
        let kept = len - amount;
        self.node_mut(idx).len = kept;
        trace!(from = idx, to = target, count = amount, "expanded node");

        if pos > kept {
            return Seat::new(target, pos - kept);
        }
        return Seat::new(idx, pos);
    }

    // =========================================================================
    // Removal and defragmentation
    // =========================================================================

    /// Remove the element at `seat`.
    pub fn remove(&mut self, seat: Seat) -> (T, Relocation) {
        let idx = seat.node;
        let value = self.node_mut(idx).remove(seat.pos);
        let len = self.node(idx).len;
        if !is_underfilled(len, self.roll_size) {
            return (value, Relocation::unchanged(idx));
        }
        if len > 0 {
            return (value, self.defrag(idx));
        }

        let (prev, next) = {
            let node = self.node(idx);
            (node.prev, node.next)
        };
        self.unlink(idx);
        let relocation = if next != NONE {
            Relocation { node: next, offset: 0 }
        } else if prev != NONE {
            Relocation {
                node: prev,
                offset: self.node(prev).len,
            }
        } else {
            Relocation { node: NONE, offset: 0 }
        };
        return (value, relocation);
    }

    /// Fold an underfilled node into its neighbors when they have room.
    fn defrag(&mut self, idx: NodeIdx) -> Relocation {
        let (start, len, prev, next) = {
            let node = self.node(idx);
            (node.start, node.len, node.prev, node.next)
        };

        // Whole node into the previous node's trailing room.
        if prev != NONE && self.node(prev).free_back() >= len {
            let old_len = self.node(prev).len;
            let to_at = self.node(prev).end();
            self.move_slots(idx, start, prev, to_at, len);
            self.node_mut(prev).len += len;
            self.node_mut(idx).len = 0;
            self.unlink(idx);
            trace!(from = idx, to = prev, count = len, "defrag into prev");
            return Relocation {
                node: prev,
                offset: old_len,
            };
        }

        // Whole node into the next node's leading room.
        if next != NONE && self.node(next).free_front() >= len {
            let to_at = self.node(next).start - len;
            self.move_slots(idx, start, next, to_at, len);
            {
                let next_node = self.node_mut(next);
                next_node.start = to_at;
                next_node.len += len;
            }
            self.node_mut(idx).len = 0;
            self.unlink(idx);
            trace!(from = idx, to = next, count = len, "defrag into next");
            return Relocation { node: next, offset: 0 };
        }

        // Next node into this node's trailing room.
        if next != NONE && self.node(idx).free_back() >= self.node(next).len {
            let (next_start, next_len) = {
                let next_node = self.node(next);
                (next_node.start, next_node.len)
            };
            let to_at = self.node(idx).end();
            self.move_slots(next, next_start, idx, to_at, next_len);
            self.node_mut(idx).len += next_len;
            self.node_mut(next).len = 0;
            self.unlink(next);
            trace!(from = next, to = idx, count = next_len, "defrag absorbed next");
            return Relocation::unchanged(idx);
        }

        // Split between both neighbors.
        if prev != NONE && next != NONE {
            let prev_room = self.node(prev).free_back();
            let next_room = self.node(next).free_front();
            if prev_room + next_room >= len {
                // The single-neighbor cases above failed, so both sides take
                // a non-empty share.
                let to_prev = prev_room;
                let to_next = len - to_prev;
                assert!(
                    to_prev > 0 && to_next > 0 && to_next <= next_room,
                    "three-way defrag without room on both sides"
                );

                let old_len = self.node(prev).len;
                let prev_at = self.node(prev).end();
                self.move_slots(idx, start, prev, prev_at, to_prev);
                self.node_mut(prev).len += to_prev;

                let next_at = self.node(next).start - to_next;
                self.move_slots(idx, start + to_prev, next, next_at, to_next);
                {
                    let next_node = self.node_mut(next);
                    next_node.start = next_at;
                    next_node.len += to_next;
                }

                self.node_mut(idx).len = 0;
                self.unlink(idx);
                trace!(node = idx, to_prev, to_next, "defrag split between neighbors");
                return Relocation {
                    node: prev,
                    offset: old_len,
                };
            }
        }

        return Relocation::unchanged(idx);
    }
}

/// Iterator over node indices in chain order.
pub(crate) struct NodeIndices<'a, T> {
    chain: &'a Chain<T>,
    current: NodeIdx,
}

impl<'a, T> Iterator for NodeIndices<'a, T> {
    type Item = NodeIdx;

    fn next(&mut self) -> Option<NodeIdx> {
        if self.current == NONE {
            return None;
        }
        let idx = self.current;
        self.current = self.chain.node(idx).next;
        return Some(idx);
    }
}

//! Fixed-capacity node storage.
//!
//! A node owns a slot array whose length never changes. The live elements
//! occupy the contiguous range `[start, start + len)`; every slot outside it
//! is `None`, so no stale element is kept alive by a node.
//!
//! ```text
//!  capacity = 8, start = 2, len = 4
//!  +----+----+----+----+----+----+----+----+
//!  |    |    | a  | b  | c  | d  |    |    |
//!  +----+----+----+----+----+----+----+----+
//!   free_front     live range      free_back
//! ```
//!
//! Everything here is local to one node. Operations that look at or move data
//! into neighbors live in [`chain`](crate::chain).

use std::cmp::Ordering;

/// Index into the node arena.
pub(crate) type NodeIdx = u32;

/// Sentinel for "no node": chain ends and the end-of-list seat.
pub(crate) const NONE: NodeIdx = u32::MAX;

/// A position in the chain: a node plus a local position inside its live range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Seat {
    pub node: NodeIdx,
    pub pos: usize,
}

impl Seat {
    /// One past the last element.
    pub const END: Seat = Seat { node: NONE, pos: 0 };

    #[inline(always)]
    pub fn new(node: NodeIdx, pos: usize) -> Seat {
        return Seat { node, pos };
    }

    #[inline(always)]
    pub fn is_end(&self) -> bool {
        return self.node == NONE;
    }
}

/// Relocation report returned by chain mutations that may move elements out
/// of the node they were called on.
///
/// The element that sat at local position `i` of the mutated node (counted
/// after the mutation's own shift) now sits `offset + i` elements after the
/// start of `node`, rolling forward over node boundaries. A `node` of
/// [`NONE`] means every such position is now the end of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Relocation {
    pub node: NodeIdx,
    pub offset: usize,
}

impl Relocation {
    #[inline(always)]
    pub fn unchanged(node: NodeIdx) -> Relocation {
        return Relocation { node, offset: 0 };
    }

    /// Seat for old local position `local`. Not yet normalized.
    #[inline(always)]
    pub fn seat(&self, local: usize) -> Seat {
        if self.node == NONE {
            return Seat::END;
        }
        return Seat::new(self.node, self.offset + local);
    }
}

#[inline(always)]
pub(crate) fn occupied<T>(slot: &Option<T>) -> &T {
    match slot {
        Some(value) => value,
        None => unreachable!("vacant slot inside a live range"),
    }
}

#[inline(always)]
pub(crate) fn occupied_mut<T>(slot: &mut Option<T>) -> &mut T {
    match slot {
        Some(value) => value,
        None => unreachable!("vacant slot inside a live range"),
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub slots: Box<[Option<T>]>,
    pub start: usize,
    pub len: usize,
    pub prev: NodeIdx,
    pub next: NodeIdx,
}

impl<T> Node<T> {
    pub fn new(capacity: usize) -> Node<T> {
        let slots = std::iter::repeat_with(|| None).take(capacity).collect();
        return Node {
            slots,
            start: 0,
            len: 0,
            prev: NONE,
            next: NONE,
        };
    }

    /// Clears links and offsets so the node can be recycled. The slots must
    /// already be vacant.
    pub fn reset(&mut self) {
        debug_assert!(self.slots.iter().all(Option::is_none));
        self.start = 0;
        self.len = 0;
        self.prev = NONE;
        self.next = NONE;
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        return self.slots.len();
    }

    #[inline(always)]
    pub fn is_saturated(&self) -> bool {
        return self.len == self.slots.len();
    }

    #[inline(always)]
    pub fn free_front(&self) -> usize {
        return self.start;
    }

    #[inline(always)]
    pub fn free_back(&self) -> usize {
        return self.slots.len() - self.start - self.len;
    }

    /// One past the last live slot.
    #[inline(always)]
    pub fn end(&self) -> usize {
        return self.start + self.len;
    }

    #[inline]
    pub fn live(&self) -> &[Option<T>] {
        return &self.slots[self.start..self.start + self.len];
    }

    #[inline]
    pub fn live_mut(&mut self) -> &mut [Option<T>] {
        return &mut self.slots[self.start..self.start + self.len];
    }

    #[inline]
    pub fn get(&self, pos: usize) -> &T {
        debug_assert!(pos < self.len);
        return occupied(&self.slots[self.start + pos]);
    }

    #[inline]
    pub fn get_mut(&mut self, pos: usize) -> &mut T {
        debug_assert!(pos < self.len);
        return occupied_mut(&mut self.slots[self.start + pos]);
    }

    #[inline]
    pub fn first(&self) -> &T {
        return self.get(0);
    }

    #[inline]
    pub fn last(&self) -> &T {
        return self.get(self.len - 1);
    }

    pub fn set(&mut self, pos: usize, value: T) -> T {
        return std::mem::replace(self.get_mut(pos), value);
    }

    /// Insert into a node that has at least one vacant slot.
    ///
    /// Uses the front gap when the insertion point is in the first half of the
    /// live range (or when there is no room at the back), otherwise shifts the
    /// suffix toward the back gap. Either way at most one side moves.
    pub fn insert(&mut self, pos: usize, value: T) {
        debug_assert!(pos <= self.len);
        debug_assert!(!self.is_saturated());
        let start = self.start;
        if start > 0 && (pos < self.len / 2 || self.free_back() == 0) {
            self.slots[start - 1..start + pos].rotate_left(1);
            self.start = start - 1;
            self.slots[self.start + pos] = Some(value);
        } else {
            let at = start + pos;
            let end = self.end();
            self.slots[at..=end].rotate_right(1);
            self.slots[at] = Some(value);
        }
        self.len += 1;
    }

    /// Remove the element at `pos`, closing the gap from the shorter side.
    pub fn remove(&mut self, pos: usize) -> T {
        debug_assert!(pos < self.len);
        let at = self.start + pos;
        let value = match self.slots[at].take() {
            Some(value) => value,
            None => unreachable!("vacant slot inside a live range"),
        };
        if pos < self.len / 2 {
            self.slots[self.start..=at].rotate_right(1);
            self.start += 1;
        } else {
            let end = self.end();
            self.slots[at..end].rotate_left(1);
        }
        self.len -= 1;
        if self.len == 0 {
            self.start = 0;
        }
        return value;
    }

    /// Slide the live range so it starts at `new_start`. The range must fit.
    pub fn shift_to(&mut self, new_start: usize) {
        debug_assert!(new_start + self.len <= self.capacity());
        let start = self.start;
        if new_start > start {
            self.slots[start..new_start + self.len].rotate_right(new_start - start);
        } else if new_start < start {
            self.slots[new_start..start + self.len].rotate_left(start - new_start);
        }
        self.start = new_start;
    }

    pub fn sort_by<F>(&mut self, compare: &mut F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.len < 2 {
            return;
        }
        self.live_mut()
            .sort_by(|a, b| compare(occupied(a), occupied(b)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(node: &Node<u32>) -> Vec<u32> {
        return node.live().iter().map(|slot| *occupied(slot)).collect();
    }

    fn assert_vacant_outside(node: &Node<u32>) {
        for (i, slot) in node.slots.iter().enumerate() {
            let inside = i >= node.start && i < node.end();
            assert_eq!(slot.is_some(), inside, "slot {} of {:?}", i, node);
        }
    }

    #[test]
    fn insert_appends_and_shifts() {
        let mut node = Node::new(8);
        node.insert(0, 1);
        node.insert(1, 3);
        node.insert(1, 2);
        assert_eq!(contents(&node), vec![1, 2, 3]);
        assert_eq!(node.start, 0);
        assert_vacant_outside(&node);
    }

    #[test]
    fn insert_uses_front_gap() {
        let mut node = Node::new(8);
        for i in 0..6 {
            node.insert(i, i as u32 + 10);
        }
        node.shift_to(2);
        assert_eq!(node.start, 2);

        // First half: the prefix moves left into the front gap.
        node.insert(1, 99);
        assert_eq!(node.start, 1);
        assert_eq!(contents(&node), vec![10, 99, 11, 12, 13, 14, 15]);
        assert_vacant_outside(&node);

        // No back room left: even a late position borrows the front gap.
        assert_eq!(node.free_back(), 0);
        node.insert(6, 77);
        assert_eq!(node.start, 0);
        assert_eq!(contents(&node), vec![10, 99, 11, 12, 13, 14, 77, 15]);
        assert!(node.is_saturated());
    }

    #[test]
    fn remove_closes_shorter_side() {
        let mut node = Node::new(8);
        for i in 0..8 {
            node.insert(i, i as u32);
        }

        // Early position: prefix shifts right, start advances.
        assert_eq!(node.remove(1), 1);
        assert_eq!(node.start, 1);
        assert_eq!(contents(&node), vec![0, 2, 3, 4, 5, 6, 7]);

        // Late position: suffix shifts left, start stays.
        assert_eq!(node.remove(5), 6);
        assert_eq!(node.start, 1);
        assert_eq!(contents(&node), vec![0, 2, 3, 4, 5, 7]);
        assert_vacant_outside(&node);
    }

    #[test]
    fn remove_last_resets_start() {
        let mut node = Node::new(4);
        node.insert(0, 5);
        node.shift_to(3);
        assert_eq!(node.remove(0), 5);
        assert_eq!(node.len, 0);
        assert_eq!(node.start, 0);
    }

    #[test]
    fn shift_both_directions() {
        let mut node = Node::new(6);
        for i in 0..3 {
            node.insert(i, i as u32);
        }
        node.shift_to(3);
        assert_eq!(contents(&node), vec![0, 1, 2]);
        assert_vacant_outside(&node);
        node.shift_to(1);
        assert_eq!(contents(&node), vec![0, 1, 2]);
        assert_vacant_outside(&node);
    }

    #[test]
    fn set_and_sort() {
        let mut node = Node::new(5);
        for (i, v) in [4, 1, 3].into_iter().enumerate() {
            node.insert(i, v);
        }
        assert_eq!(node.set(0, 5), 4);
        node.sort_by(&mut |a: &u32, b: &u32| a.cmp(b));
        assert_eq!(contents(&node), vec![1, 3, 5]);
        assert_eq!(*node.first(), 1);
        assert_eq!(*node.last(), 5);
    }

    #[test]
    fn relocation_seats() {
        let moved = Relocation { node: 3, offset: 4 };
        assert_eq!(moved.seat(2), Seat::new(3, 6));
        assert_eq!(Relocation::unchanged(1).seat(0), Seat::new(1, 0));
        assert!(Relocation { node: NONE, offset: 0 }.seat(5).is_end());
    }
}

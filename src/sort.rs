//! Sort Engine
//!
//! Sorts the list in place over the node chain, without copying it out.
//!
//! Phases:
//! 1. Every node sorts its own live range (stable).
//! 2. Adjacent nodes whose boundary is already in order are coalesced into
//!    chunks. A chunk is one or more whole nodes holding a sorted run.
//! 3. Chunks are merged pairwise, bottom up (widths 1, 2, 4, ...), until one
//!    chunk remains.
//!
//! A merge writes its output over the same slots its two inputs occupy, left
//! to right. Nodes keep their offsets and lengths throughout, so cursors over
//! the chain stay valid and only values move. The destination can never
//! overtake an unread right element, but it can land on an unread left
//! element; that element is parked in a queue and the left side reads from
//! the queue first. The queue holds at most as many elements as the right
//! chunk has consumed, so it is bounded by the right run and can reach half
//! the list in the final pass. It is allocated once and reused by every merge.
//!
//! A panicking comparator never loses elements: local sorts use the standard
//! slice sort, and an unwinding merge puts its parked elements back into the
//! vacant slots of its span.
//!
//! ```text
//!  left: [1 4 7 | 9]   right: [2 3 | 8]
//!  dst writes 1, then 2 over the slot of 4  -> 4 parked
//!  dst writes 3 over the slot of 7          -> 7 parked
//!  dst writes 4 (from the queue) over 9     -> 9 parked
//!  ...
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::chain::Chain;
use crate::list::UnrolledList;
use crate::node::{occupied, NodeIdx};

impl<T> UnrolledList<T> {
    /// Stable sort with a comparator.
    ///
    /// ```
    /// use unrolled::UnrolledList;
    ///
    /// let mut list: UnrolledList<i32> = [5, -3, 9, 0, -7].into_iter().collect();
    /// list.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(list.to_vec(), vec![9, 5, 0, -3, -7]);
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        sort_chain(&mut self.chain, &mut compare);
    }

    /// Stable sort by a key extracted from each element.
    pub fn sort_by_key<K, F>(&mut self, mut key: F)
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.sort_by(|a, b| key(a).cmp(&key(b)));
    }
}

impl<T: Ord> UnrolledList<T> {
    /// Stable sort in ascending order.
    pub fn sort(&mut self) {
        self.sort_by(T::cmp);
    }
}

/// A sorted run of whole nodes: `len` elements starting at the first live
/// element of `node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Chunk {
    node: NodeIdx,
    len: usize,
}

/// Physical read or write position used by the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SlotCursor {
    node: NodeIdx,
    pos: usize,
}

impl SlotCursor {
    fn at(node: NodeIdx) -> SlotCursor {
        return SlotCursor { node, pos: 0 };
    }

    fn slot<'c, T>(&self, chain: &'c Chain<T>) -> &'c Option<T> {
        let node = chain.node(self.node);
        return &node.slots[node.start + self.pos];
    }

    fn slot_mut<'c, T>(&self, chain: &'c mut Chain<T>) -> &'c mut Option<T> {
        let node = chain.node_mut(self.node);
        let at = node.start + self.pos;
        return &mut node.slots[at];
    }

    /// Step to the next live position, crossing into the next node at the
    /// end of this one.
    fn advance<T>(&mut self, chain: &Chain<T>) {
        let node = chain.node(self.node);
        self.pos += 1;
        if self.pos >= node.len {
            self.node = node.next;
            self.pos = 0;
        }
    }

    fn take<T>(&mut self, chain: &mut Chain<T>) -> T {
        let value = match self.slot_mut(chain).take() {
            Some(value) => value,
            None => unreachable!("merge read a vacant slot"),
        };
        self.advance(chain);
        return value;
    }
}

pub(crate) fn sort_chain<T, F>(chain: &mut Chain<T>, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if chain.is_empty() {
        return;
    }
    for node in chain.nodes_in_order_mut() {
        node.sort_by(compare);
    }
    if chain.node_count() == 1 {
        return;
    }

    let mut chunks = coalesce(chain, compare);
    debug!(nodes = chain.node_count(), chunks = chunks.len(), "merging sorted runs");

    let mut pending = VecDeque::new();
    let mut width = 1;
    while chunks.len() > 1 {
        let mut merged: SmallVec<[Chunk; 16]> = SmallVec::with_capacity((chunks.len() + 1) / 2);
        for pair in chunks.chunks(2) {
            match *pair {
                [left, right] => {
                    merge(chain, left, right, &mut pending, compare);
                    merged.push(Chunk {
                        node: left.node,
                        len: left.len + right.len,
                    });
                }
                [single] => merged.push(single),
                _ => unreachable!("chunks(2) yields one or two chunks"),
            }
        }
        trace!(width, chunks = merged.len(), "merge pass");
        chunks = merged;
        width *= 2;
    }
}

/// Group nodes into maximal runs whose node boundaries are already ordered.
fn coalesce<T, F>(chain: &Chain<T>, compare: &mut F) -> SmallVec<[Chunk; 16]>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut chunks = SmallVec::new();
    let mut current = Chunk {
        node: chain.head,
        len: 0,
    };
    let mut last = chain.head;
    for idx in chain.indices() {
        let node = chain.node(idx);
        if current.len > 0 && compare(node.first(), chain.node(last).last()) == Ordering::Less {
            chunks.push(current);
            current = Chunk { node: idx, len: 0 };
        }
        current.len += node.len;
        last = idx;
    }
    chunks.push(current);
    return chunks;
}

/// Slots of two adjacent chunks while they are being merged.
///
/// Between steps every parked element matches one vacant slot at or after
/// `dst`. If the comparator unwinds, dropping the span writes the parked
/// elements back into those slots, so no element is lost. Their order is
/// then unspecified.
struct MergeSpan<'c, T> {
    chain: &'c mut Chain<T>,
    pending: &'c mut VecDeque<T>,
    dst: SlotCursor,
    /// Slots from `dst` to the end of the span.
    remaining: usize,
}

impl<T> Drop for MergeSpan<'_, T> {
    fn drop(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let mut cursor = self.dst;
        for _ in 0..self.remaining {
            let slot = cursor.slot_mut(self.chain);
            if slot.is_none() {
                *slot = self.pending.pop_front();
                if self.pending.is_empty() {
                    break;
                }
            }
            cursor.advance(self.chain);
        }
        debug_assert!(self.pending.is_empty());
    }
}

/// Merge two adjacent chunks over their own slots. `pending` must be empty
/// and is left empty, even when `compare` panics.
fn merge<T, F>(chain: &mut Chain<T>, left: Chunk, right: Chunk, pending: &mut VecDeque<T>, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    debug_assert!(pending.is_empty());
    let mut span = MergeSpan {
        chain,
        pending,
        dst: SlotCursor::at(left.node),
        remaining: left.len + right.len,
    };
    let mut left_cursor = span.dst;
    let mut right_cursor = SlotCursor::at(right.node);
    let mut left_taken = 0;
    let mut right_taken = 0;

    // Once the left side runs dry the rest of the right side already sits
    // where it belongs.
    while left_taken < left.len {
        let take_right = right_taken < right.len && {
            let right_head = occupied(right_cursor.slot(span.chain));
            let left_head = match span.pending.front() {
                Some(value) => value,
                None => occupied(left_cursor.slot(span.chain)),
            };
            // Ties go left.
            compare(right_head, left_head) == Ordering::Less
        };

        let value = if take_right {
            right_taken += 1;
            right_cursor.take(span.chain)
        } else {
            left_taken += 1;
            match span.pending.pop_front() {
                Some(value) => value,
                None => left_cursor.take(span.chain),
            }
        };

        if let Some(evicted) = span.dst.slot_mut(span.chain).replace(value) {
            // Only an unread left element can still occupy the destination.
            debug_assert_eq!(span.dst, left_cursor);
            span.pending.push_back(evicted);
            left_cursor.advance(span.chain);
        }
        span.dst.advance(span.chain);
        span.remaining -= 1;
    }
    debug_assert!(span.pending.is_empty());
}

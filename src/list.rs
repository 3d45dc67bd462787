//! The list controller.
//!
//! `UnrolledList` owns the node chain and the element count. Every indexed
//! operation resolves its index to a seat with one chain walk from the nearer
//! end, then hands the array work to the node.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::chain::Chain;
use crate::config::ListConfig;
use crate::cursor::{Cursor, ListCursor};
use crate::error::{check_index, check_position, ListError, Result};
use crate::iter::{IntoIter, Iter, IterMut};
use crate::node::{occupied, NONE};
use crate::spliterator::Spliterator;

/// A sequence stored as fixed-capacity array nodes chained by links.
///
/// Random access walks at most half the chain; insertion and removal touch
/// one node and occasionally a neighbor.
///
/// ```
/// use unrolled::UnrolledList;
///
/// let mut list = UnrolledList::with_roll_size(4).unwrap();
/// for value in 1..=9 {
///     list.insert(0, value).unwrap();
/// }
/// assert_eq!(list.to_vec(), vec![9, 8, 7, 6, 5, 4, 3, 2, 1]);
/// assert!(list.node_count() > 1);
/// ```
#[derive(Clone)]
pub struct UnrolledList<T> {
    pub(crate) chain: Chain<T>,
    pub(crate) len: usize,
    config: ListConfig,
}

/// Shape of one node, reported by [`UnrolledList::node_layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeLayout {
    pub start: usize,
    pub len: usize,
    pub capacity: usize,
}

impl<T> UnrolledList<T> {
    /// An empty list with the default roll size of 16.
    pub fn new() -> UnrolledList<T> {
        let config = ListConfig::default();
        return UnrolledList {
            chain: Chain::new(config.roll_size),
            len: 0,
            config,
        };
    }

    pub fn with_roll_size(roll_size: usize) -> Result<UnrolledList<T>> {
        return Self::with_config(ListConfig::new().with_roll_size(roll_size));
    }

    pub fn with_config(config: ListConfig) -> Result<UnrolledList<T>> {
        config.validate()?;
        return Ok(UnrolledList {
            chain: Chain::new(config.roll_size),
            len: 0,
            config,
        });
    }

    #[inline(always)]
    pub fn config(&self) -> ListConfig {
        return self.config;
    }

    #[inline(always)]
    pub fn roll_size(&self) -> usize {
        return self.config.roll_size;
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        return self.len;
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    /// Number of nodes currently linked.
    pub fn node_count(&self) -> usize {
        return self.chain.node_count();
    }

    /// `(start, len, capacity)` of every node from head to tail.
    pub fn node_layout(&self) -> Vec<NodeLayout> {
        return self
            .chain
            .indices()
            .map(|idx| {
                let node = self.chain.node(idx);
                NodeLayout {
                    start: node.start,
                    len: node.len,
                    capacity: node.capacity(),
                }
            })
            .collect();
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        let seat = self.chain.walk(index, self.len);
        return Some(self.chain.node(seat.node).get(seat.pos));
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        let seat = self.chain.walk(index, self.len);
        return Some(self.chain.node_mut(seat.node).get_mut(seat.pos));
    }

    /// Like [`get`](Self::get), but reports the bound on failure.
    pub fn try_get(&self, index: usize) -> Result<&T> {
        check_index(index, self.len)?;
        let seat = self.chain.walk(index, self.len);
        return Ok(self.chain.node(seat.node).get(seat.pos));
    }

    pub fn first(&self) -> Option<&T> {
        if self.chain.head == NONE {
            return None;
        }
        return Some(self.chain.node(self.chain.head).first());
    }

    pub fn last(&self) -> Option<&T> {
        if self.chain.tail == NONE {
            return None;
        }
        return Some(self.chain.node(self.chain.tail).last());
    }

    /// Replace the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        check_index(index, self.len)?;
        let seat = self.chain.walk(index, self.len);
        return Ok(self.chain.node_mut(seat.node).set(seat.pos, value));
    }

    /// Append to the end.
    pub fn push(&mut self, value: T) {
        let seat = self.chain.append_seat();
        self.chain.insert(seat, value);
        self.len += 1;
    }

    /// Insert so that `value` ends up at `index`. Fails when `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        check_position(index, self.len)?;
        let seat = if self.chain.is_empty() {
            self.chain.append_seat()
        } else {
            self.chain.walk(index, self.len)
        };
        self.chain.insert(seat, value);
        self.len += 1;
        return Ok(());
    }

    pub fn remove(&mut self, index: usize) -> Result<T> {
        check_index(index, self.len)?;
        let seat = self.chain.walk(index, self.len);
        let (value, _) = self.chain.remove(seat);
        self.len -= 1;
        return Ok(value);
    }

    /// Drop every element and node.
    pub fn clear(&mut self) {
        self.chain.clear();
        self.len = 0;
    }

    /// Replace every element, in order, with `f` applied to it.
    ///
    /// Each element stays in its slot until its replacement exists, so a
    /// panicking `f` leaves a whole list, updated up to the failing element.
    pub fn replace_all<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> T,
    {
        for node in self.chain.nodes_in_order_mut() {
            for slot in node.live_mut() {
                let value = f(occupied(slot));
                *slot = Some(value);
            }
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        return Iter::new(&self.chain, self.len);
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let len = self.len;
        return IterMut::new(&mut self.chain, len);
    }

    /// Forward cursor starting at the first element, able to remove what it
    /// just returned.
    pub fn cursor(&mut self) -> Cursor<'_, T> {
        return Cursor::new(self);
    }

    /// Bidirectional cursor whose first `next` returns the element at `index`.
    pub fn list_cursor(&mut self, index: usize) -> Result<ListCursor<'_, T>> {
        return ListCursor::new(self, index);
    }

    pub fn spliterator(&self) -> Spliterator<'_, T> {
        return Spliterator::new(self);
    }

    /// Check every structural invariant, panicking with a description of the
    /// first one that does not hold.
    pub fn assert_invariants(&self) {
        let chain = &self.chain;
        if self.len == 0 {
            assert_eq!(chain.head, NONE, "empty list with a head node");
            assert_eq!(chain.tail, NONE, "empty list with a tail node");
            return;
        }

        let mut forward = Vec::new();
        let mut total = 0;
        let mut prev = NONE;
        for idx in chain.indices() {
            let node = chain.node(idx);
            assert_eq!(node.prev, prev, "node {} has a broken prev link", idx);
            assert!(node.len > 0, "node {} is linked while empty", idx);
            assert_eq!(node.capacity(), self.config.roll_size, "node {} has the wrong capacity", idx);
            assert!(node.start + node.len <= node.capacity(), "node {} overruns its slots", idx);
            for (i, slot) in node.slots.iter().enumerate() {
                let live = i >= node.start && i < node.end();
                assert_eq!(slot.is_some(), live, "node {} slot {} occupancy is wrong", idx, i);
            }
            total += node.len;
            forward.push(idx);
            prev = idx;
        }
        assert_eq!(prev, chain.tail, "last node is not the tail");
        assert_eq!(total, self.len, "node sizes do not add up to the list length");
        assert_eq!(forward.len(), chain.node_count(), "unreachable nodes in the arena");

        let mut backward = Vec::new();
        let mut idx = chain.tail;
        while idx != NONE {
            backward.push(idx);
            idx = chain.node(idx).prev;
        }
        backward.reverse();
        assert_eq!(forward, backward, "backward walk differs from forward walk");
    }
}

impl<T: Clone> UnrolledList<T> {
    /// Copy the elements out in order.
    pub fn to_vec(&self) -> Vec<T> {
        let mut result = Vec::with_capacity(self.len);
        for idx in self.chain.indices() {
            result.extend(self.chain.node(idx).live().iter().map(|slot| occupied(slot).clone()));
        }
        return result;
    }
}

impl<T: PartialEq> UnrolledList<T> {
    pub fn contains(&self, value: &T) -> bool {
        return self.iter().any(|item| item == value);
    }

    pub fn index_of(&self, value: &T) -> Option<usize> {
        return self.iter().position(|item| item == value);
    }
}

impl<T> Default for UnrolledList<T> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<T> Index<usize> for UnrolledList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        let len = self.len;
        match self.get(index) {
            Some(value) => value,
            None => panic!("{}", ListError::IndexOutOfBounds { index, len }),
        }
    }
}

impl<T> IndexMut<usize> for UnrolledList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("{}", ListError::IndexOutOfBounds { index, len }),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for UnrolledList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_list().entries(self.iter()).finish();
    }
}

/// Elements grouped by node: `[1, 2 - 3, 4]`.
impl<T: fmt::Display> fmt::Display for UnrolledList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (n, idx) in self.chain.indices().enumerate() {
            if n > 0 {
                f.write_str(" - ")?;
            }
            for (i, slot) in self.chain.node(idx).live().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", occupied(slot))?;
            }
        }
        return f.write_str("]");
    }
}

impl<T: PartialEq> PartialEq for UnrolledList<T> {
    fn eq(&self, other: &Self) -> bool {
        return self.len == other.len && self.iter().eq(other.iter());
    }
}

impl<T: Eq> Eq for UnrolledList<T> {}

impl<T> FromIterator<T> for UnrolledList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = UnrolledList::new();
        list.extend(iter);
        return list;
    }
}

impl<T> Extend<T> for UnrolledList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> IntoIterator for UnrolledList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        return IntoIter::new(self.chain, self.len);
    }
}

impl<'a, T> IntoIterator for &'a UnrolledList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        return self.iter();
    }
}

impl<'a, T> IntoIterator for &'a mut UnrolledList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        return self.iter_mut();
    }
}

//! Plain iterators over an [`UnrolledList`](crate::UnrolledList).

use std::iter::FusedIterator;

use crate::chain::Chain;
use crate::node::{occupied_mut, Node, Seat, NONE};

/// Borrowing iterator, walking node arrays front to back (or back to front).
pub struct Iter<'a, T> {
    chain: &'a Chain<T>,
    /// Next element from the front. May sit one past the end of its node.
    front: Seat,
    /// Elements `[.., back.pos)` of `back.node` are still unvisited.
    back: Seat,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(chain: &'a Chain<T>, len: usize) -> Iter<'a, T> {
        let back = if chain.tail == NONE {
            Seat::END
        } else {
            Seat::new(chain.tail, chain.node(chain.tail).len)
        };
        return Iter {
            chain,
            front: Seat::new(chain.head, 0),
            back,
            remaining: len,
        };
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let chain = self.chain;
        let mut node = chain.node(self.front.node);
        while self.front.pos >= node.len {
            self.front = Seat::new(node.next, 0);
            node = chain.node(self.front.node);
        }
        let item = node.get(self.front.pos);
        self.front.pos += 1;
        self.remaining -= 1;
        return Some(item);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return (self.remaining, Some(self.remaining));
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let chain = self.chain;
        while self.back.pos == 0 {
            let prev = chain.node(self.back.node).prev;
            self.back = Seat::new(prev, chain.node(prev).len);
        }
        self.back.pos -= 1;
        self.remaining -= 1;
        return Some(chain.node(self.back.node).get(self.back.pos));
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        return Iter {
            chain: self.chain,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        };
    }
}

/// Mutable iterator. Node slices are gathered in chain order up front, so
/// every element is handed out through its own slot.
pub struct IterMut<'a, T> {
    slots: std::iter::Flatten<std::vec::IntoIter<std::slice::IterMut<'a, Option<T>>>>,
    remaining: usize,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(chain: &'a mut Chain<T>, len: usize) -> IterMut<'a, T> {
        let slices: Vec<std::slice::IterMut<'a, Option<T>>> = chain
            .nodes_in_order_mut()
            .into_iter()
            .map(|node| node.live_mut().iter_mut())
            .collect();
        return IterMut {
            slots: slices.into_iter().flatten(),
            remaining: len,
        };
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        let slot = self.slots.next()?;
        self.remaining -= 1;
        return Some(occupied_mut(slot));
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return (self.remaining, Some(self.remaining));
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator. Consumes the nodes in chain order.
pub struct IntoIter<T> {
    nodes: std::vec::IntoIter<Node<T>>,
    current: std::vec::IntoIter<Option<T>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(chain: Chain<T>, len: usize) -> IntoIter<T> {
        return IntoIter {
            nodes: chain.into_nodes_in_order().into_iter(),
            current: Vec::new().into_iter(),
            remaining: len,
        };
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            match self.current.next() {
                Some(Some(value)) => {
                    self.remaining -= 1;
                    return Some(value);
                }
                // Vacant slot outside the live range.
                Some(None) => continue,
                None => {
                    let node = self.nodes.next()?;
                    self.current = node.slots.into_vec().into_iter();
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return (self.remaining, Some(self.remaining));
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

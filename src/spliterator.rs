//! Splittable range traversal.
//!
//! A [`Spliterator`] covers the global range `[index, fence)` and keeps a
//! seat on the element at `index`. Splitting hands the front half to a new
//! spliterator and jumps this one to the midpoint, so the pieces, consumed in
//! split order, reproduce the list order exactly.

use crate::list::UnrolledList;
use crate::node::Seat;

pub struct Spliterator<'a, T> {
    list: &'a UnrolledList<T>,
    index: usize,
    /// Exclusive end of the range. Bound to the list length on first use.
    fence: Option<usize>,
    /// Seat of the element at `index`. Only meaningful once `fence` is bound.
    seat: Seat,
}

impl<'a, T> Spliterator<'a, T> {
    pub(crate) fn new(list: &'a UnrolledList<T>) -> Spliterator<'a, T> {
        return Spliterator {
            list,
            index: 0,
            fence: None,
            seat: Seat::END,
        };
    }

    fn fence(&mut self) -> usize {
        if let Some(fence) = self.fence {
            return fence;
        }
        let list = self.list;
        self.fence = Some(list.len);
        self.seat = list.chain.normalize(list.chain.walk(self.index, list.len));
        return list.len;
    }

    /// Split off the first half of the remaining range. Returns `None` once
    /// fewer than two elements remain.
    pub fn try_split(&mut self) -> Option<Spliterator<'a, T>> {
        let hi = self.fence();
        let lo = self.index;
        let mid = (lo + hi) >> 1;
        if lo >= mid {
            return None;
        }
        let prefix = Spliterator {
            list: self.list,
            index: lo,
            fence: Some(mid),
            seat: self.seat,
        };
        let list = self.list;
        self.index = mid;
        self.seat = list.chain.normalize(list.chain.walk(mid, list.len));
        return Some(prefix);
    }

    /// Feed the next element to `action`. Returns `false` when the range is
    /// exhausted.
    pub fn try_advance<F>(&mut self, action: F) -> bool
    where
        F: FnOnce(&'a T),
    {
        let Some(item) = self.advance() else {
            return false;
        };
        action(item);
        return true;
    }

    pub fn for_each_remaining<F>(&mut self, mut action: F)
    where
        F: FnMut(&'a T),
    {
        while let Some(item) = self.advance() {
            action(item);
        }
    }

    /// Exact number of elements left in the range.
    pub fn estimate_size(&mut self) -> usize {
        return self.fence() - self.index;
    }

    fn advance(&mut self) -> Option<&'a T> {
        if self.index >= self.fence() {
            return None;
        }
        let list: &'a UnrolledList<T> = self.list;
        let chain = &list.chain;
        let seat = self.seat;
        self.seat = chain.normalize(Seat::new(seat.node, seat.pos + 1));
        self.index += 1;
        return Some(chain.node(seat.node).get(seat.pos));
    }
}

impl<'a, T> Iterator for Spliterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        return self.advance();
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let fence = self.fence.unwrap_or(self.list.len);
        let remaining = fence - self.index;
        return (remaining, Some(remaining));
    }
}

impl<T> ExactSizeIterator for Spliterator<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::UnrolledList;

    fn sample(roll_size: usize, n: u32) -> UnrolledList<u32> {
        let mut list = UnrolledList::with_roll_size(roll_size).unwrap();
        list.extend(0..n);
        return list;
    }

    #[test]
    fn unsplit_walks_everything() {
        let list = sample(4, 19);
        let mut split = list.spliterator();
        assert_eq!(split.estimate_size(), 19);
        let mut seen = Vec::new();
        split.for_each_remaining(|v| seen.push(*v));
        assert_eq!(seen, (0..19).collect::<Vec<_>>());
        assert!(!split.try_advance(|_| panic!("range is exhausted")));
    }

    #[test]
    fn split_halves() {
        let list = sample(3, 10);
        let mut suffix = list.spliterator();
        let mut prefix = suffix.try_split().unwrap();
        assert_eq!(prefix.estimate_size(), 5);
        assert_eq!(suffix.estimate_size(), 5);
        assert_eq!(prefix.by_ref().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
        assert_eq!(suffix.by_ref().copied().collect::<Vec<_>>(), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn split_after_advance() {
        let list = sample(4, 12);
        let mut split = list.spliterator();
        let mut first = None;
        assert!(split.try_advance(|v| first = Some(*v)));
        assert_eq!(first, Some(0));
        let prefix = split.try_split().unwrap();
        assert_eq!(prefix.copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(split.copied().collect::<Vec<_>>(), vec![6, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn too_small_to_split() {
        let empty: UnrolledList<u32> = UnrolledList::new();
        assert!(empty.spliterator().try_split().is_none());
        let single = sample(4, 1);
        let mut split = single.spliterator();
        assert!(split.try_split().is_none());
        assert_eq!(split.len(), 1);
    }
}

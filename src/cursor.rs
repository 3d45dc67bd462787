//! Editing cursors.
//!
//! Both cursors borrow the list mutably, so the only structural changes they
//! can ever observe are their own. After every mutation they re-seat from the
//! seat or relocation report the chain returns instead
//! of walking from the head again.

use crate::error::{check_position, ListError, Result};
use crate::list::UnrolledList;
use crate::node::Seat;

/// Forward cursor that can remove the element it just returned.
///
/// ```
/// use unrolled::UnrolledList;
///
/// let mut list: UnrolledList<u32> = (0..10).collect();
/// let mut cursor = list.cursor();
/// while cursor.has_next() {
///     if cursor.next().unwrap() % 2 == 1 {
///         cursor.remove().unwrap();
///     }
/// }
/// assert_eq!(list.to_vec(), vec![0, 2, 4, 6, 8]);
/// ```
pub struct Cursor<'a, T> {
    list: &'a mut UnrolledList<T>,
    /// Seat of the element the next call to `next` returns. Always
    /// normalized, the end seat once exhausted.
    seat: Seat,
    /// Seat of the element last returned, until it is removed.
    last: Option<Seat>,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(list: &'a mut UnrolledList<T>) -> Cursor<'a, T> {
        let seat = list.chain.normalize(list.chain.walk(0, list.len));
        return Cursor {
            list,
            seat,
            last: None,
        };
    }

    pub fn has_next(&self) -> bool {
        return !self.seat.is_end();
    }

    /// The element the next call to `next` would return.
    pub fn peek(&self) -> Option<&T> {
        if self.seat.is_end() {
            return None;
        }
        return Some(self.list.chain.node(self.seat.node).get(self.seat.pos));
    }

    pub fn next(&mut self) -> Result<&T> {
        if self.seat.is_end() {
            return Err(ListError::Exhausted);
        }
        let seat = self.seat;
        self.last = Some(seat);
        self.seat = self.list.chain.normalize(Seat::new(seat.node, seat.pos + 1));
        return Ok(self.list.chain.node(seat.node).get(seat.pos));
    }

    /// Remove the element last returned by `next`.
    pub fn remove(&mut self) -> Result<T> {
        let last = self
            .last
            .take()
            .ok_or(ListError::IllegalState("remove without a returned element"))?;
        let (value, relocation) = self.list.chain.remove(last);
        self.list.len -= 1;
        self.seat = self.list.chain.normalize(relocation.seat(last.pos));
        return Ok(value);
    }
}

/// Which side of the cursor the last returned element is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Returned {
    /// Returned by `next`: sits just before the cursor.
    Forward(Seat),
    /// Returned by `previous`: sits at the cursor.
    Backward(Seat),
}

impl Returned {
    fn seat(self) -> Seat {
        return match self {
            Returned::Forward(seat) | Returned::Backward(seat) => seat,
        };
    }
}

/// Bidirectional cursor with insertion, replacement and removal.
///
/// The cursor sits between two elements. `next` returns the element after
/// it and moves right, `previous` returns the element before it and moves
/// left. `set` and `remove` act on whichever element was returned last.
pub struct ListCursor<'a, T> {
    list: &'a mut UnrolledList<T>,
    /// Seat of the element after the cursor, normalized.
    seat: Seat,
    /// Global index of the element after the cursor.
    index: usize,
    last: Option<Returned>,
}

impl<'a, T> ListCursor<'a, T> {
    pub(crate) fn new(list: &'a mut UnrolledList<T>, index: usize) -> Result<ListCursor<'a, T>> {
        check_position(index, list.len)?;
        let seat = list.chain.normalize(list.chain.walk(index, list.len));
        return Ok(ListCursor {
            list,
            seat,
            index,
            last: None,
        });
    }

    pub fn has_next(&self) -> bool {
        return self.index < self.list.len;
    }

    pub fn has_previous(&self) -> bool {
        return self.index > 0;
    }

    /// Index of the element `next` would return.
    pub fn next_index(&self) -> usize {
        return self.index;
    }

    /// Index of the element `previous` would return.
    pub fn previous_index(&self) -> Option<usize> {
        return self.index.checked_sub(1);
    }

    pub fn next(&mut self) -> Result<&T> {
        if !self.has_next() {
            return Err(ListError::Exhausted);
        }
        let seat = self.seat;
        self.last = Some(Returned::Forward(seat));
        self.seat = self.list.chain.normalize(Seat::new(seat.node, seat.pos + 1));
        self.index += 1;
        return Ok(self.list.chain.node(seat.node).get(seat.pos));
    }

    pub fn previous(&mut self) -> Result<&T> {
        if !self.has_previous() {
            return Err(ListError::Exhausted);
        }
        let chain = &self.list.chain;
        let seat = if self.seat.is_end() {
            Seat::new(chain.tail, chain.node(chain.tail).len - 1)
        } else if self.seat.pos > 0 {
            Seat::new(self.seat.node, self.seat.pos - 1)
        } else {
            let prev = chain.node(self.seat.node).prev;
            Seat::new(prev, chain.node(prev).len - 1)
        };
        self.seat = seat;
        self.last = Some(Returned::Backward(seat));
        self.index -= 1;
        return Ok(self.list.chain.node(seat.node).get(seat.pos));
    }

    /// Replace the element last returned by `next` or `previous`.
    pub fn set(&mut self, value: T) -> Result<T> {
        let seat = match self.last {
            Some(returned) => returned.seat(),
            None => return Err(ListError::IllegalState("set without a returned element")),
        };
        return Ok(self.list.chain.node_mut(seat.node).set(seat.pos, value));
    }

    /// Insert before the cursor. A following `previous` returns `value`.
    pub fn add(&mut self, value: T) {
        let target = if self.seat.is_end() {
            self.list.chain.append_seat()
        } else {
            self.seat
        };
        let landed = self.list.chain.insert(target, value);
        self.list.len += 1;
        self.index += 1;
        self.seat = self.list.chain.normalize(Seat::new(landed.node, landed.pos + 1));
        self.last = None;
    }

    /// Remove the element last returned by `next` or `previous`.
    pub fn remove(&mut self) -> Result<T> {
        let returned = self
            .last
            .take()
            .ok_or(ListError::IllegalState("remove without a returned element"))?;
        let last = returned.seat();
        let (value, relocation) = self.list.chain.remove(last);
        self.list.len -= 1;
        self.seat = self.list.chain.normalize(relocation.seat(last.pos));
        if let Returned::Forward(_) = returned {
            self.index -= 1;
        }
        return Ok(value);
    }
}

#[cfg(test)]
mod tests {
    use crate::{ListError, UnrolledList};

    fn sample(roll_size: usize, n: u32) -> UnrolledList<u32> {
        let mut list = UnrolledList::with_roll_size(roll_size).unwrap();
        list.extend(0..n);
        return list;
    }

    #[test]
    fn cursor_walks_everything() {
        let mut list = sample(4, 13);
        let mut cursor = list.cursor();
        let mut seen = Vec::new();
        while cursor.has_next() {
            seen.push(*cursor.next().unwrap());
        }
        assert_eq!(cursor.next(), Err(ListError::Exhausted));
        assert_eq!(seen, (0..13).collect::<Vec<_>>());
    }

    #[test]
    fn cursor_remove_requires_next() {
        let mut list = sample(4, 3);
        let mut cursor = list.cursor();
        assert!(matches!(cursor.remove(), Err(ListError::IllegalState(_))));
        cursor.next().unwrap();
        assert_eq!(cursor.remove(), Ok(0));
        assert!(matches!(cursor.remove(), Err(ListError::IllegalState(_))));
        assert_eq!(cursor.peek(), Some(&1));
    }

    #[test]
    fn cursor_removes_everything() {
        for roll_size in [2, 3, 4, 8] {
            let mut list = sample(roll_size, 50);
            let mut cursor = list.cursor();
            let mut removed = Vec::new();
            while cursor.has_next() {
                cursor.next().unwrap();
                removed.push(cursor.remove().unwrap());
            }
            assert_eq!(removed, (0..50).collect::<Vec<_>>());
            assert!(list.is_empty());
            list.assert_invariants();
        }
    }

    #[test]
    fn list_cursor_indices() {
        let mut list = sample(4, 6);
        let mut cursor = list.list_cursor(3).unwrap();
        assert_eq!(cursor.next_index(), 3);
        assert_eq!(cursor.previous_index(), Some(2));
        assert_eq!(cursor.previous(), Ok(&2));
        assert_eq!(cursor.previous(), Ok(&1));
        assert_eq!(cursor.next(), Ok(&1));
        assert_eq!(cursor.next_index(), 2);
    }

    #[test]
    fn list_cursor_previous_from_end() {
        let mut list = sample(3, 10);
        let mut cursor = list.list_cursor(10).unwrap();
        assert!(!cursor.has_next());
        let mut seen = Vec::new();
        while cursor.has_previous() {
            seen.push(*cursor.previous().unwrap());
        }
        assert_eq!(cursor.previous(), Err(ListError::Exhausted));
        assert_eq!(cursor.previous_index(), None);
        assert_eq!(seen, (0..10).rev().collect::<Vec<_>>());
    }

    #[test]
    fn list_cursor_set_and_remove() {
        let mut list = sample(4, 8);
        {
            let mut cursor = list.list_cursor(2).unwrap();
            assert!(matches!(cursor.set(0), Err(ListError::IllegalState(_))));
            cursor.next().unwrap();
            assert_eq!(cursor.set(20), Ok(2));
            assert_eq!(cursor.remove(), Ok(20));
            assert_eq!(cursor.next_index(), 2);
            assert!(matches!(cursor.set(0), Err(ListError::IllegalState(_))));
            cursor.previous().unwrap();
            assert_eq!(cursor.remove(), Ok(1));
            assert_eq!(cursor.next_index(), 1);
            assert_eq!(cursor.next(), Ok(&3));
        }
        assert_eq!(list.to_vec(), vec![0, 3, 4, 5, 6, 7]);
        list.assert_invariants();
    }

    #[test]
    fn list_cursor_add() {
        let mut list = sample(2, 5);
        {
            let mut cursor = list.list_cursor(2).unwrap();
            cursor.add(100);
            cursor.add(101);
            assert_eq!(cursor.next_index(), 4);
            assert!(matches!(cursor.remove(), Err(ListError::IllegalState(_))));
            assert_eq!(cursor.previous(), Ok(&101));
            assert_eq!(cursor.next(), Ok(&101));
            assert_eq!(cursor.next(), Ok(&2));
        }
        assert_eq!(list.to_vec(), vec![0, 1, 100, 101, 2, 3, 4]);
        list.assert_invariants();
    }

    #[test]
    fn list_cursor_add_at_end_and_empty() {
        let mut list: UnrolledList<u32> = UnrolledList::with_roll_size(2).unwrap();
        {
            let mut cursor = list.list_cursor(0).unwrap();
            for i in 0..7 {
                cursor.add(i);
            }
            assert_eq!(cursor.next_index(), 7);
            assert!(!cursor.has_next());
        }
        assert_eq!(list.to_vec(), (0..7).collect::<Vec<_>>());
        list.assert_invariants();
    }
}

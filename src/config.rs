//! List configuration and the node fill-ratio policy.
//!
//! The roll size is the capacity given to every node when it is allocated.
//! Small roll sizes make middle mutation cheaper; large ones make random
//! access and iteration closer to a flat array.
//!
//! # Fill-ratio policy
//!
//! - A node is *saturated* at `len == capacity`. Only then does insertion try
//!   to push elements into a neighbor or split the node.
//! - A node is *full* at `len >= capacity * 3 / 4`. Full nodes are never
//!   chosen as a transfer or expansion target.
//! - A removal that leaves `len < capacity / 2` triggers defragmentation.

use crate::error::{ListError, Result};

/// Roll size used by [`ListConfig::default`].
pub const DEFAULT_ROLL_SIZE: usize = 16;

/// Smallest roll size that still leaves room to split a node.
pub const MIN_ROLL_SIZE: usize = 2;

#[inline(always)]
pub(crate) fn is_full(len: usize, capacity: usize) -> bool {
    return len >= capacity * 3 / 4;
}

#[inline(always)]
pub(crate) fn is_underfilled(len: usize, capacity: usize) -> bool {
    return len < capacity / 2;
}

/// Whether an insertion at `pos` in a saturated node should try the previous
/// node first. Biased toward the front so data packs backward.
#[inline(always)]
pub(crate) fn prefers_prev(pos: usize, len: usize) -> bool {
    return pos <= len / 2;
}

#[inline(always)]
pub(crate) fn prefers_next(pos: usize, len: usize) -> bool {
    return pos >= len * 3 / 4;
}

/// Construction-time options for an [`UnrolledList`](crate::UnrolledList).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListConfig {
    /// Capacity of each node.
    pub roll_size: usize,
}

impl ListConfig {
    pub fn new() -> ListConfig {
        return ListConfig {
            roll_size: DEFAULT_ROLL_SIZE,
        };
    }

    pub fn with_roll_size(mut self, roll_size: usize) -> ListConfig {
        self.roll_size = roll_size;
        return self;
    }

    pub fn validate(&self) -> Result<()> {
        if self.roll_size < MIN_ROLL_SIZE {
            return Err(ListError::InvalidRollSize {
                roll_size: self.roll_size,
                min: MIN_ROLL_SIZE,
            });
        }
        return Ok(());
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        return Self::new();
    }
}

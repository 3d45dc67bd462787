//! Errors surfaced by list, cursor and configuration operations.
//!
//! Every variant is reported before the list is mutated, so an `Err` always
//! leaves the structure exactly as it was. Broken internal invariants are not
//! represented here: they are bugs and panic at the point of detection.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// An index outside the bound accepted by the operation.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A cursor was asked to `set` or `remove` without a preceding
    /// `next`/`previous`, or after the element was already consumed.
    #[error("illegal cursor state: {0}")]
    IllegalState(&'static str),

    /// `next` or `previous` was called with no element in that direction.
    #[error("no more elements")]
    Exhausted,

    #[error("roll size must be at least {min}, got {roll_size}")]
    InvalidRollSize { roll_size: usize, min: usize },
}

pub type Result<T> = std::result::Result<T, ListError>;

/// Fails unless `index < len`.
#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(ListError::IndexOutOfBounds { index, len });
    }
    return Ok(());
}

/// Fails unless `index <= len`, the bound used by insertion.
#[inline]
pub(crate) fn check_position(index: usize, len: usize) -> Result<()> {
    if index > len {
        return Err(ListError::IndexOutOfBounds { index, len });
    }
    return Ok(());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_checks() {
        assert!(check_index(0, 1).is_ok());
        assert_eq!(
            check_index(1, 1),
            Err(ListError::IndexOutOfBounds { index: 1, len: 1 })
        );
        assert!(check_position(1, 1).is_ok());
        assert!(check_position(2, 1).is_err());
    }

    #[test]
    fn messages() {
        let err = ListError::IndexOutOfBounds { index: 7, len: 3 };
        assert_eq!(err.to_string(), "index 7 out of bounds for length 3");

        let err = ListError::InvalidRollSize { roll_size: 1, min: 2 };
        assert_eq!(err.to_string(), "roll size must be at least 2, got 1");
    }
}

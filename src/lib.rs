//! Unrolled - A sequence container built from linked fixed-capacity arrays.
//!
//! Each node holds up to `roll_size` elements in a contiguous slot array with
//! free room at both ends. Nodes are chained in both directions and stored in
//! one arena, addressed by index.
//!
//! # Quick Start
//!
//! ```
//! use unrolled::UnrolledList;
//!
//! let mut list = UnrolledList::with_roll_size(8).unwrap();
//! list.extend([3, 1, 2]);
//! list.insert(1, 10).unwrap();
//! assert_eq!(list.to_vec(), vec![3, 10, 1, 2]);
//!
//! list.sort();
//! assert_eq!(list.to_vec(), vec![1, 2, 3, 10]);
//!
//! let mut cursor = list.list_cursor(2).unwrap();
//! assert_eq!(cursor.next(), Ok(&3));
//! cursor.add(4);
//! drop(cursor);
//! assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 10]);
//! ```
//!
//! # Modules
//!
//! - `node`: one node's slot array and its local insert/remove.
//! - `chain`: the node arena, position resolution, neighbor transfer,
//!   expansion and defragmentation.
//! - `list`: the public [`UnrolledList`] type.
//! - `iter`, `cursor`, `spliterator`: traversal.
//! - `sort`: the chunked in-place merge sort.

mod chain;
pub mod config;
mod cursor;
pub mod error;
mod iter;
mod list;
mod node;
mod sort;
mod spliterator;

pub use config::{ListConfig, DEFAULT_ROLL_SIZE, MIN_ROLL_SIZE};
pub use cursor::{Cursor, ListCursor};
pub use error::{ListError, Result};
pub use iter::{IntoIter, Iter, IterMut};
pub use list::{NodeLayout, UnrolledList};
pub use spliterator::Spliterator;

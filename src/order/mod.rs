//! Order statistics over a bounded set of values
//!
//! # Algorithms
//!
//! - [`SkipList`]: indexable skip list with expected O(log n) insert, remove
//!   and rank access; the median is the value at rank `len / 2`
//!
//! # Example
//!
//! ```
//! use movingstats::order::SkipList;
//!
//! let mut list = SkipList::new(SkipList::<i16>::levels_for(8));
//! for value in [12, 4, 9, 4, 30] {
//!     list.insert(value);
//! }
//!
//! // duplicates collapse: {4, 9, 12, 30}
//! assert_eq!(list.len(), 4);
//! assert_eq!(list.get_median(), Ok(12));
//! ```

mod skiplist;

pub use skiplist::{Iter, SkipList, DEFAULT_SEED, MAX_LEVEL_LIMIT};

//! Array-backed segment tree with pluggable aggregates.
//!
//! The tree stores one array per level and answers point updates and
//! inclusive range queries in `O(log n)` policy calls. What a node holds and
//! how nodes combine is decided by an [`AggregatePolicy`]:
//!
//! - [`Sum`], [`Xor`], [`And`], [`Or`]: plain reductions.
//! - [`MaxSubarraySum`]: best contiguous sum inside the range.
//! - [`InRangeCount`]: how many elements in the index range have a value in a
//!   [`ValueRange`].
//!
//! ```
//! use segment_tree::{MaxSubarraySum, SegmentTree, Sum};
//!
//! let mut sums = SegmentTree::<Sum<i64>>::new(&[2, -1, 3, -4, 5]);
//! assert_eq!(sums.query(0, 4), Ok(5));
//! sums.update(1, 10).unwrap();
//! assert_eq!(sums.query(0, 4), Ok(16));
//!
//! let best = SegmentTree::<MaxSubarraySum<i64>>::new(&[2, -1, 3, -4, 5]);
//! assert_eq!(best.query(0, 2), Ok(4));
//! ```

mod error;
mod segment_tree;
mod util;

pub mod policy;

pub use error::{Result, SegmentTreeError};
pub use policy::{
    AggregatePolicy, And, InRangeCount, MaxSubarraySum, Or, SubarraySummary, Sum, ValueRange, Xor,
};
pub use segment_tree::SegmentTree;

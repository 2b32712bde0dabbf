use thiserror::Error;

/// Errors reported at the API boundary of [`SegmentTree`](crate::SegmentTree).
///
/// Every variant is raised before the tree is touched, so a rejected call
/// leaves it unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentTreeError {
    /// The input sequence could not be consumed into a tree.
    #[error("invalid input sequence: {reason}")]
    InvalidArgument {
        /// Why the sequence was rejected.
        reason: String,
    },

    /// A point index fell outside `[0, len)`.
    #[error("index {index} out of range for tree of length {len}")]
    OutOfRange { index: usize, len: usize },

    /// A query range was reversed or reached past the last element.
    #[error("invalid query range [{left}, {right}] for tree of length {len}")]
    InvalidRange { left: usize, right: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, SegmentTreeError>;

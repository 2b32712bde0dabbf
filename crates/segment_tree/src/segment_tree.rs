use std::fmt;

use tracing::{debug, trace};

use crate::error::{Result, SegmentTreeError};
use crate::policy::AggregatePolicy;
use crate::util::tree_height;

/// Fixed-size segment tree stored as one array per level.
///
/// `levels[0]` is the root level and `levels[height - 1]` holds one datum per
/// element. Node `i` of level `h + 1` has parent `i / 2` on level `h`. A level
/// of odd length leaves its last node without a sibling; that node is copied
/// into its parent as is.
pub struct SegmentTree<P: AggregatePolicy> {
    levels: Vec<Vec<P::Datum>>,
}

impl<P: AggregatePolicy> SegmentTree<P> {
    /// Builds leaves with `Args::default()`.
    pub fn new(values: &[P::Value]) -> Self
    where
        P::Args: Default,
    {
        Self::new_with(values, &P::Args::default())
    }

    /// Builds leaves with explicit policy arguments.
    pub fn new_with(values: &[P::Value], args: &P::Args) -> Self {
        let leaves = values.iter().map(|value| P::leaf(value, args)).collect();
        Self::from_leaves(leaves)
    }

    /// Builds from an iterator that reports its exact length up front.
    ///
    /// Fails with [`SegmentTreeError::InvalidArgument`] when `size_hint` is not
    /// exact, or when the iterator yields a different number of items than it
    /// advertised.
    pub fn try_from_iter<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = P::Value>,
        P::Args: Default,
    {
        let iter = values.into_iter();
        let len = match iter.size_hint() {
            (lower, Some(upper)) if lower == upper => lower,
            (lower, upper) => {
                trace!(lower, ?upper, "rejected input without exact length");
                return Err(SegmentTreeError::InvalidArgument {
                    reason: format!("length is not known in advance (size hint {lower}..{upper:?})"),
                });
            }
        };

        let args = P::Args::default();
        let mut leaves = Vec::with_capacity(len);
        for value in iter {
            if leaves.len() == len {
                trace!(len, yielded = len + 1, "input yielded more items than advertised");
                return Err(SegmentTreeError::InvalidArgument {
                    reason: format!("sequence yielded more than the advertised {len} items"),
                });
            }
            leaves.push(P::leaf(&value, &args));
        }
        if leaves.len() != len {
            trace!(len, yielded = leaves.len(), "input ended before its advertised length");
            return Err(SegmentTreeError::InvalidArgument {
                reason: format!(
                    "sequence ended after {} of the advertised {len} items",
                    leaves.len()
                ),
            });
        }

        Ok(Self::from_leaves(leaves))
    }

    /// Builds from a fallible one-shot source, stopping at the first error.
    pub fn try_from_results<I, E>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = std::result::Result<P::Value, E>>,
        E: fmt::Display,
        P::Args: Default,
    {
        let args = P::Args::default();
        let mut leaves = Vec::new();
        for (position, value) in values.into_iter().enumerate() {
            match value {
                Ok(value) => leaves.push(P::leaf(&value, &args)),
                Err(err) => {
                    trace!(position, "input sequence failed mid-read");
                    return Err(SegmentTreeError::InvalidArgument {
                        reason: format!("reading element {position} failed: {err}"),
                    });
                }
            }
        }
        Ok(Self::from_leaves(leaves))
    }

    fn from_leaves(leaves: Vec<P::Datum>) -> Self {
        let len = leaves.len();
        let height = tree_height(len);

        let mut levels = Vec::with_capacity(height);
        levels.push(leaves);
        while let Some(below) = levels.last().filter(|level| level.len() > 1) {
            let above = below
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => P::combine(left, right),
                    [single] => single.clone(),
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                })
                .collect();
            levels.push(above);
        }
        levels.reverse();
        debug_assert_eq!(levels.len(), height);

        debug!(len, height, "built segment tree");
        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.leaves().len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves().is_empty()
    }

    /// Number of levels, `ceil(log2(len)) + 1`, and `1` when `len <= 1`.
    pub fn height(&self) -> usize {
        self.levels.len()
    }

    /// Data of level `h`, `0` being the root level.
    pub fn level(&self, h: usize) -> Option<&[P::Datum]> {
        self.levels.get(h).map(Vec::as_slice)
    }

    /// Leaf datum at `index`.
    pub fn leaf(&self, index: usize) -> Option<&P::Datum> {
        self.leaves().get(index)
    }

    /// Datum covering the whole sequence, `None` when empty.
    pub fn root(&self) -> Option<&P::Datum> {
        self.levels[0].first()
    }

    #[inline(always)]
    fn leaves(&self) -> &[P::Datum] {
        // Construction always leaves at least the leaf level in place.
        &self.levels[self.levels.len() - 1]
    }

    /// Replaces element `index` and recomputes its path to the root.
    pub fn update_with(&mut self, index: usize, value: P::Value, args: &P::Args) -> Result<()> {
        let len = self.len();
        if index >= len {
            trace!(index, len, "rejected update");
            return Err(SegmentTreeError::OutOfRange { index, len });
        }

        let bottom = self.levels.len() - 1;
        self.levels[bottom][index] = P::leaf(&value, args);

        let mut i = index;
        for h in (1..=bottom).rev() {
            let level = &self.levels[h];
            let parent = if i % 2 == 0 {
                match level.get(i + 1) {
                    Some(right) => P::combine(&level[i], right),
                    None => level[i].clone(),
                }
            } else {
                P::combine(&level[i - 1], &level[i])
            };
            i /= 2;
            self.levels[h - 1][i] = parent;
        }
        Ok(())
    }

    /// Aggregate over the inclusive index range `[left, right]`.
    pub fn query_with(&self, left: usize, right: usize, args: &P::Args) -> Result<P::Output> {
        let len = self.len();
        if left > right || right >= len {
            trace!(left, right, len, "rejected query");
            return Err(SegmentTreeError::InvalidRange { left, right, len });
        }
        Ok(P::finalize(self.fold(left, right, args)))
    }

    fn fold(&self, mut l: usize, mut r: usize, args: &P::Args) -> P::Transition {
        let mut h = self.levels.len() - 1;
        let leaves = &self.levels[h];

        let mut acc_l = P::extract(&leaves[l], args);
        if l == r {
            return acc_l;
        }
        let mut acc_r = P::extract(&leaves[r], args);

        // `acc_l` covers [left, end of node l], `acc_r` covers [start of node r, right].
        while l / 2 < r / 2 {
            let level = &self.levels[h];
            if l % 2 == 0 {
                acc_l = P::merge(acc_l, P::extract(&level[l + 1], args), args);
            }
            if r % 2 == 1 {
                acc_r = P::merge(P::extract(&level[r - 1], args), acc_r, args);
            }
            l /= 2;
            r /= 2;
            h -= 1;
        }

        P::merge(acc_l, acc_r, args)
    }
}

impl<P> SegmentTree<P>
where
    P: AggregatePolicy<Args = ()>,
{
    pub fn update(&mut self, index: usize, value: P::Value) -> Result<()> {
        self.update_with(index, value, &())
    }

    pub fn query(&self, left: usize, right: usize) -> Result<P::Output> {
        self.query_with(left, right, &())
    }
}

impl<P: AggregatePolicy> Clone for SegmentTree<P> {
    fn clone(&self) -> Self {
        Self {
            levels: self.levels.clone(),
        }
    }
}

impl<P> fmt::Debug for SegmentTree<P>
where
    P: AggregatePolicy,
    P::Datum: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentTree")
            .field("len", &self.len())
            .field("levels", &self.levels)
            .finish()
    }
}

//! Aggregate policies for [`SegmentTree`](crate::SegmentTree).
//!
//! A policy is a stateless marker type. It names the element, node, walk and
//! answer types and says how they combine; the tree owns all storage.

use std::marker::PhantomData;
use std::ops::{Add, BitAnd, BitOr, BitXor};

/// How values combine inside a segment tree.
///
/// `combine` must be associative over any left-to-right sequence of data, so
/// that every binary grouping the tree picks yields the same node. It need not
/// be commutative: the tree always passes the left operand first.
///
/// A node without a right sibling is carried to its parent unchanged instead
/// of being combined with a neutral element, so policies need no identity.
pub trait AggregatePolicy {
    /// Element stored at a leaf position.
    type Value;
    /// Per-node datum.
    type Datum: Clone;
    /// Accumulator built while walking a query.
    type Transition;
    /// Answer returned by a query.
    type Output;
    /// Query-time parameters. `()` when the policy takes none.
    type Args;

    fn leaf(value: &Self::Value, args: &Self::Args) -> Self::Datum;

    /// Merge two sibling data as `left ++ right`.
    fn combine(left: &Self::Datum, right: &Self::Datum) -> Self::Datum;

    /// Turn a stored datum into an accumulator under the query parameters.
    fn extract(datum: &Self::Datum, args: &Self::Args) -> Self::Transition;

    /// Merge two accumulators as `left ++ right`.
    fn merge(
        left: Self::Transition,
        right: Self::Transition,
        args: &Self::Args,
    ) -> Self::Transition;

    fn finalize(transition: Self::Transition) -> Self::Output;
}

/// Range sum.
pub struct Sum<V>(PhantomData<fn() -> V>);

impl<V> AggregatePolicy for Sum<V>
where
    V: Copy + Add<Output = V>,
{
    type Value = V;
    type Datum = V;
    type Transition = V;
    type Output = V;
    type Args = ();

    #[inline(always)]
    fn leaf(value: &V, _args: &()) -> V {
        *value
    }

    #[inline(always)]
    fn combine(left: &V, right: &V) -> V {
        *left + *right
    }

    #[inline(always)]
    fn extract(datum: &V, _args: &()) -> V {
        *datum
    }

    #[inline(always)]
    fn merge(left: V, right: V, _args: &()) -> V {
        left + right
    }

    #[inline(always)]
    fn finalize(transition: V) -> V {
        transition
    }
}

/// Range bitwise XOR.
pub struct Xor<V>(PhantomData<fn() -> V>);

impl<V> AggregatePolicy for Xor<V>
where
    V: Copy + BitXor<Output = V>,
{
    type Value = V;
    type Datum = V;
    type Transition = V;
    type Output = V;
    type Args = ();

    #[inline(always)]
    fn leaf(value: &V, _args: &()) -> V {
        *value
    }

    #[inline(always)]
    fn combine(left: &V, right: &V) -> V {
        *left ^ *right
    }

    #[inline(always)]
    fn extract(datum: &V, _args: &()) -> V {
        *datum
    }

    #[inline(always)]
    fn merge(left: V, right: V, _args: &()) -> V {
        left ^ right
    }

    #[inline(always)]
    fn finalize(transition: V) -> V {
        transition
    }
}

/// Range bitwise AND.
pub struct And<V>(PhantomData<fn() -> V>);

impl<V> AggregatePolicy for And<V>
where
    V: Copy + BitAnd<Output = V>,
{
    type Value = V;
    type Datum = V;
    type Transition = V;
    type Output = V;
    type Args = ();

    #[inline(always)]
    fn leaf(value: &V, _args: &()) -> V {
        *value
    }

    #[inline(always)]
    fn combine(left: &V, right: &V) -> V {
        *left & *right
    }

    #[inline(always)]
    fn extract(datum: &V, _args: &()) -> V {
        *datum
    }

    #[inline(always)]
    fn merge(left: V, right: V, _args: &()) -> V {
        left & right
    }

    #[inline(always)]
    fn finalize(transition: V) -> V {
        transition
    }
}

/// Range bitwise OR.
pub struct Or<V>(PhantomData<fn() -> V>);

impl<V> AggregatePolicy for Or<V>
where
    V: Copy + BitOr<Output = V>,
{
    type Value = V;
    type Datum = V;
    type Transition = V;
    type Output = V;
    type Args = ();

    #[inline(always)]
    fn leaf(value: &V, _args: &()) -> V {
        *value
    }

    #[inline(always)]
    fn combine(left: &V, right: &V) -> V {
        *left | *right
    }

    #[inline(always)]
    fn extract(datum: &V, _args: &()) -> V {
        *datum
    }

    #[inline(always)]
    fn merge(left: V, right: V, _args: &()) -> V {
        left | right
    }

    #[inline(always)]
    fn finalize(transition: V) -> V {
        transition
    }
}

/// Best contiguous sum of a non-empty span, plus what is needed to extend it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubarraySummary<V> {
    /// Maximum sum over all non-empty contiguous runs.
    pub best: V,
    /// Maximum sum of a non-empty run starting at the left edge.
    pub prefix: V,
    /// Maximum sum of a non-empty run ending at the right edge.
    pub suffix: V,
    pub total: V,
}

impl<V> SubarraySummary<V>
where
    V: Copy + Ord + Add<Output = V>,
{
    pub fn single(value: V) -> Self {
        Self {
            best: value,
            prefix: value,
            suffix: value,
            total: value,
        }
    }

    /// Summary of `self ++ right`.
    pub fn concat(&self, right: &Self) -> Self {
        Self {
            best: self.best.max(right.best).max(self.suffix + right.prefix),
            prefix: self.prefix.max(self.total + right.prefix),
            suffix: right.suffix.max(right.total + self.suffix),
            total: self.total + right.total,
        }
    }
}

/// Maximum contiguous-subarray sum (Kadane's merge).
///
/// Runs are non-empty, so an all-negative range answers its largest element.
/// `concat` is not commutative.
pub struct MaxSubarraySum<V>(PhantomData<fn() -> V>);

impl<V> AggregatePolicy for MaxSubarraySum<V>
where
    V: Copy + Ord + Add<Output = V>,
{
    type Value = V;
    type Datum = SubarraySummary<V>;
    type Transition = SubarraySummary<V>;
    type Output = V;
    type Args = ();

    #[inline(always)]
    fn leaf(value: &V, _args: &()) -> Self::Datum {
        SubarraySummary::single(*value)
    }

    #[inline(always)]
    fn combine(left: &Self::Datum, right: &Self::Datum) -> Self::Datum {
        left.concat(right)
    }

    #[inline(always)]
    fn extract(datum: &Self::Datum, _args: &()) -> Self::Transition {
        *datum
    }

    #[inline(always)]
    fn merge(left: Self::Transition, right: Self::Transition, _args: &()) -> Self::Transition {
        left.concat(&right)
    }

    #[inline(always)]
    fn finalize(transition: Self::Transition) -> V {
        transition.best
    }
}

/// Inclusive value filter `[lo, hi]` for [`InRangeCount`].
///
/// `lo > hi` is an empty filter, not an error: it matches nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValueRange<V> {
    pub lo: V,
    pub hi: V,
}

impl<V: Ord> ValueRange<V> {
    pub fn new(lo: V, hi: V) -> Self {
        Self { lo, hi }
    }

    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    pub fn contains(&self, value: &V) -> bool {
        self.lo <= *value && *value <= self.hi
    }
}

/// Counts elements whose value lies in a [`ValueRange`] (merge-sort tree).
///
/// Each node keeps the sorted values of its span, so a query over an index
/// range answers "how many values fall in `[lo, hi]`" with two binary searches
/// per visited node. Building costs `O(n log n)`; an update re-merges every
/// node on the leaf-to-root path, `O(n)` in total.
///
/// `leaf` ignores the filter. [`SegmentTree::new`](crate::SegmentTree::new)
/// needs `V: Default` for its placeholder filter; element types without a
/// default build through [`SegmentTree::new_with`](crate::SegmentTree::new_with).
pub struct InRangeCount<V>(PhantomData<fn() -> V>);

impl<V> InRangeCount<V>
where
    V: Copy + Ord,
{
    fn merge_sorted(left: &[V], right: &[V]) -> Vec<V> {
        let mut merged = Vec::with_capacity(left.len() + right.len());
        let mut i = 0;
        let mut j = 0;

        while i < left.len() && j < right.len() {
            if left[i] <= right[j] {
                merged.push(left[i]);
                i += 1;
            } else {
                merged.push(right[j]);
                j += 1;
            }
        }

        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);
        merged
    }

    fn count_within(sorted: &[V], range: &ValueRange<V>) -> usize {
        let upper = sorted.partition_point(|v| *v <= range.hi);
        let lower = sorted.partition_point(|v| *v < range.lo);
        upper.saturating_sub(lower)
    }
}

impl<V> AggregatePolicy for InRangeCount<V>
where
    V: Copy + Ord,
{
    type Value = V;
    type Datum = Vec<V>;
    type Transition = usize;
    type Output = usize;
    type Args = ValueRange<V>;

    fn leaf(value: &V, _args: &ValueRange<V>) -> Vec<V> {
        vec![*value]
    }

    fn combine(left: &Vec<V>, right: &Vec<V>) -> Vec<V> {
        Self::merge_sorted(left, right)
    }

    fn extract(datum: &Vec<V>, args: &ValueRange<V>) -> usize {
        Self::count_within(datum, args)
    }

    fn merge(left: usize, right: usize, args: &ValueRange<V>) -> usize {
        // Empty filter: nothing was counted on either side.
        if args.is_empty() {
            return left;
        }
        left + right
    }

    #[inline(always)]
    fn finalize(transition: usize) -> usize {
        transition
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offset table trait and visible-range computation.

use core::ops::RangeInclusive;

use crate::Scalar;

/// Cumulative layout model for a dense strip of rows indexed `0..len`.
///
/// Implementations map between row indices and vertical offsets. Methods take
/// `&mut self` so that variable-height tables can extend a prefix-sum cache on
/// demand.
///
/// All offsets are non-negative and `top_offset_of(i + 1) == top_offset_of(i)
/// + height_of(i)` for every `i < len`.
pub trait OffsetTable {
    /// Scalar used for heights and offsets.
    type Scalar: Scalar;

    /// Number of rows.
    fn len(&self) -> usize;

    /// Returns `true` when there are no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Height of row `index`. Callers keep `index < len`.
    fn height_of(&mut self, index: usize) -> Self::Scalar;

    /// Sum of the heights of all rows strictly before `index`.
    ///
    /// Valid for `index` in `0..=len`; larger indices are treated as `len`.
    fn top_offset_of(&mut self, index: usize) -> Self::Scalar;

    /// Sum of all row heights.
    fn total_height(&mut self) -> Self::Scalar {
        let len = self.len();
        self.top_offset_of(len)
    }

    /// Returns the row whose span `[top, top + height)` contains `offset`.
    ///
    /// Offsets at or before zero (and non-finite offsets) map to row 0,
    /// offsets at or past the total height map to the last row. Returns
    /// `None` only when the table is empty.
    fn index_at_offset(&mut self, offset: Self::Scalar) -> Option<usize>;
}

/// Extra rows realized beyond the strictly visible window.
///
/// Overscan hides blank frames during fast scrolling at the cost of a few
/// additional rows per frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Overscan {
    /// Rows realized above the first visible row.
    pub before: usize,
    /// Rows realized below the last visible row.
    pub after: usize,
}

impl Overscan {
    /// No overscan.
    pub const NONE: Self = Self::symmetric(0);

    /// Same overscan above and below the viewport.
    #[must_use]
    pub const fn symmetric(rows: usize) -> Self {
        Self {
            before: rows,
            after: rows,
        }
    }

    /// Different overscan above and below the viewport.
    #[must_use]
    pub const fn asymmetric(before: usize, after: usize) -> Self {
        Self { before, after }
    }
}

/// Inclusive range of row indices that must be realized.
///
/// Ranges produced by [`compute_visible_range`] always satisfy
/// `start_index <= stop_index`; an empty window is represented as
/// `Option::<VisibleRange>::None`. A hand-built range with
/// `start_index > stop_index` is treated as empty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VisibleRange {
    /// First realized row.
    pub start_index: usize,
    /// Last realized row (inclusive).
    pub stop_index: usize,
}

impl VisibleRange {
    /// Number of rows in the range.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stop_index
            .checked_sub(self.start_index)
            .map_or(0, |span| span.saturating_add(1))
    }

    /// Returns `true` only for an inverted range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start_index > self.stop_index
    }

    /// Returns `true` if `index` lies in the range.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..=self.stop_index).contains(&index)
    }

    /// Row indices in ascending order.
    #[must_use]
    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start_index..=self.stop_index
    }
}

/// Computes which rows to realize for a scroll position and viewport.
///
/// The visible rows are those intersecting `[scroll_top, scroll_top +
/// viewport_height)`; the viewport end is exclusive, so a row starting exactly
/// at the bottom edge is not included. Overscan is then added on each side and
/// clamped to `0..len`.
///
/// Negative or non-finite inputs are treated as zero. A zero-height viewport
/// still yields the single row at `scroll_top`. Work is O(1) for uniform
/// tables and O(log len) for prefix-sum tables, independent of how many rows
/// are visible.
///
/// ```rust
/// use understory_table_window::{compute_visible_range, Overscan, UniformOffsets};
///
/// let mut table = UniformOffsets::new(1000, 30.0_f64);
/// let range = compute_visible_range(&mut table, 150.0, 300.0, Overscan::NONE).unwrap();
/// assert_eq!((range.start_index, range.stop_index), (5, 14));
/// ```
pub fn compute_visible_range<T: OffsetTable>(
    table: &mut T,
    scroll_top: T::Scalar,
    viewport_height: T::Scalar,
    overscan: Overscan,
) -> Option<VisibleRange> {
    let len = table.len();
    let scroll_top = scroll_top.sanitize();
    let viewport_height = viewport_height.sanitize();

    let raw_start = table.index_at_offset(scroll_top)?;
    let end = scroll_top + viewport_height;
    let mut raw_stop = table.index_at_offset(end)?.min(len - 1);
    while raw_stop > raw_start && table.top_offset_of(raw_stop) >= end {
        raw_stop -= 1;
    }

    let start_index = raw_start.saturating_sub(overscan.before);
    let stop_index = raw_stop.saturating_add(overscan.after).min(len - 1);
    debug_assert!(
        start_index <= stop_index,
        "visible range must not be inverted"
    );

    Some(VisibleRange {
        start_index,
        stop_index,
    })
}

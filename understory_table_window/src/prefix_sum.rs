// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;

use crate::{OffsetTable, RowHeight, Scalar};

/// Offset table for rows with individually computed heights.
///
/// Row tops are kept in a prefix-sum cache that grows on demand: only the
/// rows up to the highest queried index are ever summed, so scrolling near
/// the top of a huge table never touches the rows below it. Lookups by offset
/// binary search the cache.
///
/// The cache is dropped in full whenever the row count shrinks or the height
/// source changes. Growing the row count keeps the already-summed prefix,
/// since existing rows keep their heights.
///
/// ```rust
/// use understory_table_window::{OffsetTable, PrefixSumOffsets, RowHeight};
///
/// let heights = RowHeight::per_row(|i| if i % 2 == 0 { 20.0_f64 } else { 40.0 });
/// let mut table = PrefixSumOffsets::new(100, heights);
/// assert_eq!(table.top_offset_of(3), 80.0);
/// assert_eq!(table.index_at_offset(85.0), Some(3));
/// ```
#[derive(Clone, Debug)]
pub struct PrefixSumOffsets<S: Scalar> {
    len: usize,
    heights: RowHeight<S>,
    /// `tops[i]` is the top of row `i`; always holds at least `tops[0] == 0`.
    tops: Vec<S>,
}

impl<S: Scalar> PrefixSumOffsets<S> {
    /// Creates a table of `len` rows whose heights come from `heights`.
    #[must_use]
    pub fn new(len: usize, heights: RowHeight<S>) -> Self {
        Self {
            len,
            heights,
            tops: vec![S::zero()],
        }
    }

    /// Number of rows whose top offset is currently cached.
    ///
    /// This is `0` right after construction or invalidation and at most
    /// `len`.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.tops.len() - 1
    }

    /// Sets the number of rows.
    ///
    /// Shrinking invalidates the whole cache; growing keeps it.
    pub fn set_len(&mut self, len: usize) {
        if len < self.len {
            self.invalidate();
        }
        self.len = len;
    }

    /// Replaces the height source and invalidates the cache.
    pub fn set_row_height(&mut self, heights: RowHeight<S>) {
        self.heights = heights;
        self.invalidate();
    }

    /// Returns the height source.
    #[must_use]
    pub fn row_height(&self) -> &RowHeight<S> {
        &self.heights
    }

    /// Drops every cached offset.
    ///
    /// Call this when heights changed without a new source being installed,
    /// for example after the backing data of a [`RowHeight::PerRow`] closure
    /// was mutated through shared state.
    pub fn invalidate(&mut self) {
        self.tops.truncate(1);
    }

    /// Extends the cache so that `tops[index]` is available.
    fn ensure_through(&mut self, index: usize) {
        let index = index.min(self.len);
        while self.tops.len() <= index {
            let row = self.tops.len() - 1;
            let next = self.tops[row] + self.heights.height_of(row);
            self.tops.push(next);
        }
    }

    /// Extends the cache until it reaches past `offset` or covers every row.
    fn ensure_covers(&mut self, offset: S) {
        while self.cached_len() < self.len {
            if self.tops.last().is_some_and(|&last| last > offset) {
                return;
            }
            let next = self.cached_len() + 1;
            self.ensure_through(next);
        }
    }
}

impl<S: Scalar> OffsetTable for PrefixSumOffsets<S> {
    type Scalar = S;

    fn len(&self) -> usize {
        self.len
    }

    fn height_of(&mut self, index: usize) -> S {
        if index < self.cached_len() {
            self.tops[index + 1] - self.tops[index]
        } else {
            self.heights.height_of(index)
        }
    }

    fn top_offset_of(&mut self, index: usize) -> S {
        let index = index.min(self.len);
        self.ensure_through(index);
        self.tops[index]
    }

    fn index_at_offset(&mut self, offset: S) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let offset = offset.sanitize();
        if offset <= S::zero() {
            return Some(0);
        }
        self.ensure_covers(offset);

        // Number of row tops at or before `offset`; the row containing it is
        // the last of those.
        let at_or_before = self.tops.partition_point(|&top| top <= offset);
        Some(at_or_before.saturating_sub(1).min(self.len - 1))
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{OffsetTable, Scalar};

/// Offset table for rows that all share one height.
///
/// Every query is O(1) arithmetic; no per-row storage is allocated, which is
/// what keeps uniform tables cheap for very large row counts.
///
/// A height of zero (or a negative/non-finite height, which is clamped to
/// zero) produces a table with zero total height in which every offset maps
/// to row 0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UniformOffsets<S: Scalar> {
    len: usize,
    row_height: S,
}

impl<S: Scalar> UniformOffsets<S> {
    /// Creates a table of `len` rows, each `row_height` tall.
    #[must_use]
    pub fn new(len: usize, row_height: S) -> Self {
        Self {
            len,
            row_height: row_height.sanitize(),
        }
    }

    /// Returns the shared row height.
    #[must_use]
    pub fn row_height(&self) -> S {
        self.row_height
    }

    /// Sets the number of rows.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
    }

    /// Sets the shared row height.
    pub fn set_row_height(&mut self, row_height: S) {
        self.row_height = row_height.sanitize();
    }
}

impl<S: Scalar> OffsetTable for UniformOffsets<S> {
    type Scalar = S;

    fn len(&self) -> usize {
        self.len
    }

    fn height_of(&mut self, _index: usize) -> S {
        self.row_height
    }

    fn top_offset_of(&mut self, index: usize) -> S {
        S::from_usize(index.min(self.len)) * self.row_height
    }

    fn index_at_offset(&mut self, offset: S) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let last = self.len - 1;
        let offset = offset.sanitize();
        if self.row_height <= S::zero() || offset <= S::zero() {
            return Some(0);
        }
        if offset >= self.total_height() {
            return Some(last);
        }

        let mut index = (offset / self.row_height).whole_rows().min(last);
        // Division can land one row off near boundaries; nudge it back.
        if index > 0 && self.top_offset_of(index) > offset {
            index -= 1;
        } else if index < last && self.top_offset_of(index + 1) <= offset {
            index += 1;
        }
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::UniformOffsets;
    use crate::OffsetTable;

    #[test]
    fn offsets_are_index_times_height() {
        let mut table = UniformOffsets::new(1000, 30.0_f64);
        for i in [0_usize, 1, 17, 500, 999, 1000] {
            assert_eq!(table.top_offset_of(i), i as f64 * 30.0);
        }
        assert_eq!(table.total_height(), 30_000.0);
        // Indices past the end clamp to `len`.
        assert_eq!(table.top_offset_of(5000), 30_000.0);
    }

    #[test]
    fn index_at_top_offset_round_trips() {
        let mut table = UniformOffsets::new(1000, 30.0_f64);
        for i in 0..1000 {
            let top = table.top_offset_of(i);
            assert_eq!(table.index_at_offset(top), Some(i));
        }
    }

    #[test]
    fn index_at_offset_round_trips_with_fractional_heights() {
        let mut table = UniformOffsets::new(5000, 0.1_f64);
        for i in 0..5000 {
            let top = table.top_offset_of(i);
            assert_eq!(table.index_at_offset(top), Some(i), "row {i}");
        }
    }

    #[test]
    fn index_at_offset_edges() {
        let mut table = UniformOffsets::new(10, 10.0_f32);
        assert_eq!(table.index_at_offset(-5.0), Some(0));
        assert_eq!(table.index_at_offset(0.0), Some(0));
        assert_eq!(table.index_at_offset(9.99), Some(0));
        assert_eq!(table.index_at_offset(10.0), Some(1));
        assert_eq!(table.index_at_offset(100.0), Some(9));
        assert_eq!(table.index_at_offset(1.0e9), Some(9));
        assert_eq!(table.index_at_offset(f32::INFINITY), Some(0));
    }

    #[test]
    fn empty_table_has_no_index() {
        let mut table = UniformOffsets::new(0, 30.0_f64);
        assert_eq!(table.total_height(), 0.0);
        assert_eq!(table.index_at_offset(0.0), None);
    }

    #[test]
    fn zero_height_rows_collapse_to_row_zero() {
        let mut table = UniformOffsets::new(10, 0.0_f64);
        assert_eq!(table.total_height(), 0.0);
        assert_eq!(table.index_at_offset(50.0), Some(0));

        let mut negative = UniformOffsets::new(10, -4.0_f64);
        assert_eq!(negative.row_height(), 0.0);
    }
}

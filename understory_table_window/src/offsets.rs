// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{OffsetTable, PrefixSumOffsets, RowHeight, Scalar, UniformOffsets};

/// Offset table selected from a [`RowHeight`] source.
///
/// Fixed heights use [`UniformOffsets`] (no storage, O(1) lookups); per-row
/// heights use [`PrefixSumOffsets`].
#[derive(Clone, Debug)]
pub enum RowOffsets<S: Scalar> {
    /// All rows share one height.
    Uniform(UniformOffsets<S>),
    /// Rows have individually computed heights.
    Variable(PrefixSumOffsets<S>),
}

impl<S: Scalar> RowOffsets<S> {
    /// Builds the table matching `heights`.
    #[must_use]
    pub fn new(len: usize, heights: RowHeight<S>) -> Self {
        match heights.uniform() {
            Some(height) => Self::Uniform(UniformOffsets::new(len, height)),
            None => Self::Variable(PrefixSumOffsets::new(len, heights)),
        }
    }

    /// Applies a data change: new row count and height source.
    ///
    /// Any cached offsets are discarded, even if the height source is the
    /// same closure, since its backing data may have changed.
    pub fn reset(&mut self, len: usize, heights: RowHeight<S>) {
        match (self, heights.uniform()) {
            (Self::Uniform(table), Some(height)) => {
                table.set_len(len);
                table.set_row_height(height);
            }
            (Self::Variable(table), None) => {
                table.set_len(len);
                table.set_row_height(heights);
            }
            (this, _) => *this = Self::new(len, heights),
        }
    }

    /// Returns the height source currently backing the table.
    #[must_use]
    pub fn row_height(&self) -> RowHeight<S> {
        match self {
            Self::Uniform(table) => RowHeight::Fixed(table.row_height()),
            Self::Variable(table) => table.row_height().clone(),
        }
    }

    /// Returns `true` when a fixed height is set and it is not positive.
    ///
    /// Such a table has nothing to show.
    #[must_use]
    pub fn has_degenerate_uniform_height(&self) -> bool {
        match self {
            Self::Uniform(table) => !table.row_height().is_positive_finite(),
            Self::Variable(_) => false,
        }
    }
}

impl<S: Scalar> OffsetTable for RowOffsets<S> {
    type Scalar = S;

    fn len(&self) -> usize {
        match self {
            Self::Uniform(table) => table.len(),
            Self::Variable(table) => table.len(),
        }
    }

    fn height_of(&mut self, index: usize) -> S {
        match self {
            Self::Uniform(table) => table.height_of(index),
            Self::Variable(table) => table.height_of(index),
        }
    }

    fn top_offset_of(&mut self, index: usize) -> S {
        match self {
            Self::Uniform(table) => table.top_offset_of(index),
            Self::Variable(table) => table.top_offset_of(index),
        }
    }

    fn total_height(&mut self) -> S {
        match self {
            Self::Uniform(table) => table.total_height(),
            Self::Variable(table) => table.total_height(),
        }
    }

    fn index_at_offset(&mut self, offset: S) -> Option<usize> {
        match self {
            Self::Uniform(table) => table.index_at_offset(offset),
            Self::Variable(table) => table.index_at_offset(offset),
        }
    }
}

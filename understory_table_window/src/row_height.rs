// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use core::fmt;

use crate::Scalar;

/// Source of row heights: one scalar for every row, or a function per index.
///
/// Per-row functions must be deterministic: asking for the same index twice
/// without a data change has to return the same height, otherwise cached
/// offsets and `scroll_to_row` results drift apart. Hosts that change the
/// heights must hand a new source to
/// [`WindowedRenderer::on_data_change`](crate::WindowedRenderer::on_data_change).
pub enum RowHeight<S: Scalar> {
    /// Every row has the same height. Offsets use O(1) arithmetic.
    Fixed(S),
    /// Height is computed per row index.
    PerRow(Rc<dyn Fn(usize) -> S>),
}

impl<S: Scalar> RowHeight<S> {
    /// Wraps a per-row height function.
    pub fn per_row(f: impl Fn(usize) -> S + 'static) -> Self {
        Self::PerRow(Rc::new(f))
    }

    /// Returns the height for `index`, clamped to be non-negative.
    ///
    /// For [`RowHeight::PerRow`] the caller must keep `index` inside the
    /// current row count.
    pub fn height_of(&self, index: usize) -> S {
        match self {
            Self::Fixed(height) => height.sanitize(),
            Self::PerRow(f) => {
                let height = f(index);
                if !height.is_finite() || height.is_sign_negative() {
                    log::warn!("row {index} reported invalid height {height:?}; using 0");
                }
                height.sanitize()
            }
        }
    }

    /// Returns the shared height when all rows are the same size.
    #[must_use]
    pub fn uniform(&self) -> Option<S> {
        match self {
            Self::Fixed(height) => Some(height.sanitize()),
            Self::PerRow(_) => None,
        }
    }

    /// Returns `true` if both sources are known to yield the same heights:
    /// equal fixed heights, or the same shared per-row function.
    #[must_use]
    pub fn is_same_source(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a.sanitize() == b.sanitize(),
            (Self::PerRow(a), Self::PerRow(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<S: Scalar> Clone for RowHeight<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Fixed(height) => Self::Fixed(*height),
            Self::PerRow(f) => Self::PerRow(Rc::clone(f)),
        }
    }
}

impl<S: Scalar> fmt::Debug for RowHeight<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(height) => f.debug_tuple("Fixed").field(height).finish(),
            Self::PerRow(_) => f.write_str("PerRow(..)"),
        }
    }
}

impl<S: Scalar> From<S> for RowHeight<S> {
    fn from(height: S) -> Self {
        Self::Fixed(height)
    }
}

#[cfg(test)]
mod tests {
    use super::RowHeight;

    #[test]
    fn fixed_height_is_uniform() {
        let heights = RowHeight::Fixed(30.0_f64);
        assert_eq!(heights.uniform(), Some(30.0));
        assert_eq!(heights.height_of(0), 30.0);
        assert_eq!(heights.height_of(999), 30.0);
    }

    #[test]
    fn per_row_heights_clamp_negative_values() {
        let heights = RowHeight::per_row(|i| if i == 2 { -5.0_f32 } else { 10.0 });
        assert_eq!(heights.uniform(), None);
        assert_eq!(heights.height_of(1), 10.0);
        assert_eq!(heights.height_of(2), 0.0);
    }

    #[test]
    fn same_source_compares_values_and_identity() {
        let shared = RowHeight::per_row(|_| 3.0_f64);
        assert!(shared.is_same_source(&shared.clone()));
        assert!(!shared.is_same_source(&RowHeight::per_row(|_| 3.0)));
        assert!(RowHeight::Fixed(3.0).is_same_source(&RowHeight::Fixed(3.0)));
        assert!(!RowHeight::Fixed(3.0).is_same_source(&shared));
    }

    #[test]
    fn zero_height_is_a_legal_row() {
        let heights = RowHeight::per_row(|i| if i % 2 == 0 { 0.0_f64 } else { 4.0 });
        assert_eq!(heights.height_of(0), 0.0);
        assert_eq!(heights.height_of(1), 4.0);
    }
}

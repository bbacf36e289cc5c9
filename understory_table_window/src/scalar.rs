// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric type for row heights, offsets, and scroll positions.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Sub};

/// Floating-point type the row layout is computed in.
///
/// Implemented for `f32` and `f64`, usually in logical pixels. Only the
/// handful of operations the offset tables need are required; everything
/// else is derived.
pub trait Scalar:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// `0`.
    fn zero() -> Self;

    /// Larger of the two values; NaN loses.
    fn max(self, other: Self) -> Self;

    /// Smaller of the two values; NaN loses.
    fn min(self, other: Self) -> Self;

    /// `false` for NaN and infinities.
    fn is_finite(self) -> bool;

    /// `true` for negative values, `-0.0` included.
    fn is_sign_negative(self) -> bool;

    /// Row count or index as a scalar. Exact below 2^24 (`f32`) or 2^53 (`f64`).
    fn from_usize(value: usize) -> Self;

    /// Whole rows contained in `self`, rounding down.
    ///
    /// Negative values and NaN give `0`; values too large for `usize`
    /// saturate. Used to turn `offset / row_height` into a row index guess.
    fn whole_rows(self) -> usize;

    /// Clamps negative values to zero.
    fn clamp_non_negative(self) -> Self {
        if self.is_sign_negative() {
            Self::zero()
        } else {
            self
        }
    }

    /// Maps NaN, infinities, and negative values to zero.
    ///
    /// Every external dimension (scroll offsets, viewport heights, row
    /// heights) passes through this before it reaches offset arithmetic.
    fn sanitize(self) -> Self {
        if self.is_finite() {
            self.clamp_non_negative()
        } else {
            Self::zero()
        }
    }

    /// `true` for finite values strictly greater than zero.
    fn is_positive_finite(self) -> bool {
        self.is_finite() && self > Self::zero()
    }
}

macro_rules! float_scalar {
    ($($ty:ty),*) => {$(
        impl Scalar for $ty {
            fn zero() -> Self {
                0.0
            }

            fn max(self, other: Self) -> Self {
                <$ty>::max(self, other)
            }

            fn min(self, other: Self) -> Self {
                <$ty>::min(self, other)
            }

            fn is_finite(self) -> bool {
                <$ty>::is_finite(self)
            }

            fn is_sign_negative(self) -> bool {
                <$ty>::is_sign_negative(self)
            }

            fn from_usize(value: usize) -> Self {
                value as $ty
            }

            #[expect(
                clippy::cast_possible_truncation,
                reason = "float to int `as` casts truncate toward zero and saturate"
            )]
            fn whole_rows(self) -> usize {
                self as usize
            }
        }
    )*};
}

float_scalar!(f32, f64);

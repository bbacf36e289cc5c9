// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flexbox-style column width resolution.

use smallvec::SmallVec;

/// Flex parameters of one column.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlexItem {
    /// Preferred width before flexing.
    pub basis: f64,
    /// Share of positive free space the item takes.
    pub grow: f64,
    /// Weight (scaled by `basis`) of negative free space the item absorbs.
    pub shrink: f64,
}

/// Column widths for one table layout; inline for typical column counts.
pub type ColumnWidths = SmallVec<[f64; 8]>;

/// Sum of the bases, the width the columns ask for before flexing.
#[must_use]
pub fn content_width(items: &[FlexItem]) -> f64 {
    items.iter().map(|item| sanitize(item.basis)).sum()
}

/// Resolves final widths for `items` laid out in a row `available` wide.
///
/// - Positive free space is split in proportion to `grow`. When the grow
///   factors sum to less than 1, only that fraction of the free space is
///   handed out, as in CSS.
/// - Negative free space is taken in proportion to `shrink * basis`.
/// - Items never shrink below zero; any overflow left after that stays
///   overflow.
///
/// Negative or non-finite inputs are treated as zero.
#[must_use]
pub fn resolve_widths(items: &[FlexItem], available: f64) -> ColumnWidths {
    let available = sanitize(available);
    let free = available - content_width(items);

    if free > 0.0 {
        let total_grow: f64 = items.iter().map(|item| sanitize(item.grow)).sum();
        if total_grow > 0.0 {
            let divisor = total_grow.max(1.0);
            return items
                .iter()
                .map(|item| sanitize(item.basis) + free * sanitize(item.grow) / divisor)
                .collect();
        }
    } else if free < 0.0 {
        let total_scaled: f64 = items
            .iter()
            .map(|item| sanitize(item.shrink) * sanitize(item.basis))
            .sum();
        if total_scaled > 0.0 {
            return items
                .iter()
                .map(|item| {
                    let basis = sanitize(item.basis);
                    let scaled = sanitize(item.shrink) * basis;
                    (basis + free * scaled / total_scaled).max(0.0)
                })
                .collect();
        }
    }

    items.iter().map(|item| sanitize(item.basis)).collect()
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

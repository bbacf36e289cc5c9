// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Sort direction shown in the header and forwarded to the sort callback.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// A sort change requested by a header click.
///
/// The table never reorders rows itself; hosts apply the request to their
/// data, then feed the new `sort_by`/`sort_direction` back through the
/// table configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortRequest {
    /// Data key of the column to sort by.
    pub sort_by: String,
    /// Requested direction.
    pub direction: SortDirection,
}

/// Computes the sort request for a click on the column keyed `clicked`.
///
/// Clicking the column that is already sorted flips the direction; clicking
/// any other column starts ascending.
#[must_use]
pub fn next_sort(
    current_sort_by: Option<&str>,
    current_direction: SortDirection,
    clicked: &str,
) -> SortRequest {
    let direction = if current_sort_by == Some(clicked) {
        current_direction.toggled()
    } else {
        SortDirection::Asc
    };
    SortRequest {
        sort_by: clicked.into(),
        direction,
    }
}

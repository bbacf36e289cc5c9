// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

use understory_table_window::{Overscan, RowHeight};

use crate::SortDirection;

/// Configuration of a [`FlexTable`](crate::FlexTable).
///
/// Validated with [`TableConfig::validate`] whenever it is handed to the
/// table. Zero sizes are valid and simply render nothing; negative or
/// non-finite sizes are rejected.
#[derive(Clone, Debug)]
pub struct TableConfig {
    /// Outer width of the table. Default: `430`.
    pub width: f64,
    /// Outer height of the table, header included. Default: `300`.
    pub height: f64,
    /// Height of the fixed header band above the scrolling body. Default: `20`.
    pub header_height: f64,
    /// Number of rows. Default: `0`.
    pub rows_count: usize,
    /// Row height source. Default: fixed `30`.
    pub row_height: RowHeight<f64>,
    /// Rows rendered above and below the visible ones. Default: `10`.
    pub overscan_row_count: usize,
    /// Row to bring into view; `None` leaves the scroll position alone.
    /// Out-of-range targets are clamped. Default: `None`.
    pub scroll_to_index: Option<isize>,
    /// Data key of the column the host sorted by. Default: `None`.
    pub sort_by: Option<String>,
    /// Direction the host sorted in. Default: ascending.
    pub sort_direction: SortDirection,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            width: 430.0,
            height: 300.0,
            header_height: 20.0,
            rows_count: 0,
            row_height: RowHeight::Fixed(30.0),
            overscan_row_count: 10,
            scroll_to_index: None,
            sort_by: None,
            sort_direction: SortDirection::Asc,
        }
    }
}

impl TableConfig {
    /// Height of the scrollable body: the table height minus the header.
    #[must_use]
    pub fn body_height(&self) -> f64 {
        (self.height - self.header_height).max(0.0)
    }

    /// Overscan passed to the windowing engine.
    #[must_use]
    pub fn overscan(&self) -> Overscan {
        Overscan::symmetric(self.overscan_row_count)
    }

    /// Checks dimensions and the fixed row height.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dimension("width", self.width)?;
        check_dimension("height", self.height)?;
        check_dimension("header_height", self.header_height)?;
        if let RowHeight::Fixed(row_height) = self.row_height {
            check_dimension("row_height", row_height)?;
        }
        if self.header_height > self.height {
            return Err(ConfigError::HeaderTallerThanTable {
                header_height: self.header_height,
                height: self.height,
            });
        }
        Ok(())
    }
}

fn check_dimension(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { name, value })
    }
}

/// Reasons a table configuration or column set is rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A size was negative, NaN, or infinite.
    InvalidDimension {
        /// Name of the offending option.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The header does not fit inside the table.
    HeaderTallerThanTable {
        /// Configured header height.
        header_height: f64,
        /// Configured table height.
        height: f64,
    },
    /// A column's width was negative, NaN, or infinite.
    InvalidColumnWidth {
        /// Data key of the column.
        data_key: String,
        /// The rejected width.
        width: f64,
    },
    /// A table needs at least one column.
    NoColumns,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { name, value } => {
                write!(f, "`{name}` must be finite and non-negative, got {value}")
            }
            Self::HeaderTallerThanTable {
                header_height,
                height,
            } => write!(
                f,
                "header height {header_height} exceeds table height {height}"
            ),
            Self::InvalidColumnWidth { data_key, width } => write!(
                f,
                "column `{data_key}` width must be finite and non-negative, got {width}"
            ),
            Self::NoColumns => f.write_str("a table needs at least one column"),
        }
    }
}

impl core::error::Error for ConfigError {}

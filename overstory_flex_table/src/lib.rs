// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overstory Flex Table: a virtualized table with flex columns.
//!
//! [`FlexTable`] puts a fixed header band over a scrolling body and renders
//! only the body rows in the current window, using
//! [`understory_table_window`] for the row math. On top of that it adds:
//!
//! - [`Column`]s with a data key, label, flex basis, grow and shrink factors,
//!   a cell data getter, and an optional cell renderer.
//! - [`resolve_widths`]: flexbox-style distribution of the table width over
//!   the columns.
//! - Header-driven sorting: clicks produce a [`SortRequest`] (see
//!   [`next_sort`]) for the host, which owns the data and does the sorting.
//! - [`TableConfig`]: every option with its default, validated into a
//!   [`ConfigError`] on bad sizes.
//!
//! Rows are supplied through a [`RowGetter`], which the table calls only for
//! indices inside the window.
//!
//! ```rust
//! use overstory_flex_table::{Column, FlexTable, RowFields, SortDirection, TableConfig};
//!
//! struct Item(usize);
//!
//! impl RowFields for Item {
//!     fn field(&self, data_key: &str) -> Option<String> {
//!         match data_key {
//!             "index" => Some(self.0.to_string()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let config = TableConfig {
//!     rows_count: 1000,
//!     scroll_to_index: Some(999),
//!     ..TableConfig::default()
//! };
//! let columns = vec![
//!     Column::new("index", 50.0).label("Index"),
//!     Column::new("description", 210.0).flex_grow(1.0).disable_sort(),
//! ];
//! let mut table = FlexTable::new(config, columns).unwrap();
//!
//! let rows = table.render_rows(&|index: usize| Item(index));
//! assert_eq!(rows.last().unwrap().cells[0].text, "999");
//! assert_eq!(table.layout().column_widths[1], 380.0);
//!
//! let request = table.header_click(0).unwrap();
//! assert_eq!(request.direction, SortDirection::Asc);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod column;
mod config;
mod flex;
mod sort;
mod table;

pub use column::{CellContext, CellDataGetter, CellRenderer, Column, RowFields, RowGetter};
pub use config::{ConfigError, TableConfig};
pub use flex::{ColumnWidths, FlexItem, content_width, resolve_widths};
pub use sort::{SortDirection, SortRequest, next_sort};
pub use table::{FlexTable, HeaderCell, RenderedCell, RenderedRow, SortCallback, TableLayout};

pub use understory_table_window::{Overscan, RowHeight, ScrollAlign};

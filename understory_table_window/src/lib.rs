// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Table Window: row windowing for large virtualized tables.
//!
//! This crate is the layout core behind a virtualized table body. Given a row
//! count, a source of row heights, a scroll offset, and a viewport height, it
//! decides which rows need to exist and where each one sits, doing work
//! proportional to the number of visible rows rather than the size of the
//! dataset.
//!
//! The core concepts are:
//!
//! - [`RowHeight`]: one height for every row, or a function of the row index.
//! - [`OffsetTable`]: maps row indices to vertical offsets and back.
//!   [`UniformOffsets`] does this with O(1) arithmetic; [`PrefixSumOffsets`]
//!   keeps a lazily grown prefix-sum cache and binary searches it.
//!   [`RowOffsets`] picks between them from a [`RowHeight`].
//! - [`compute_visible_range`]: the inclusive [`VisibleRange`] of rows to
//!   realize for a scroll offset, viewport height, and [`Overscan`].
//! - [`WindowedRenderer`]: the stateful driver. It owns the
//!   [`ViewportState`], reacts to scroll, resize, and data-change events, and
//!   emits [`RowInstruction`]s (index, top, height) for exactly the window. It
//!   also implements index-based scrolling via [`ScrollAlign`].
//!
//! The crate does **not** know about cells, columns, sorting, or the data
//! itself. Hosts are responsible for:
//!
//! - Owning the rows and fetching only those named by the emitted
//!   instructions.
//! - Positioning each rendered row at its `top` inside a content area of
//!   [`WindowedRenderer::total_height`].
//! - Forwarding scroll and resize events, and calling
//!   [`WindowedRenderer::on_data_change`] whenever the row count or heights
//!   change.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_table_window::{Overscan, RowHeight, WindowedRenderer};
//!
//! // 1000 rows, 30px each, in a 300px tall viewport.
//! let mut window = WindowedRenderer::new(1000, RowHeight::Fixed(30.0_f64), 300.0, Overscan::NONE);
//!
//! if let Some(rows) = window.on_scroll(150.0) {
//!     for row in rows {
//!         // Render row `row.index` at `row.top`, `row.height` tall.
//!         assert!(row.index >= 5 && row.index <= 14);
//!     }
//! }
//! ```
//!
//! All work happens synchronously inside each event call; there is no
//! intermediate state where stale and fresh rows coexist. Extents are
//! expected to be finite and non-negative; anything else is treated as zero
//! and degrades to an empty or clamped window rather than panicking.
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod fixed;
mod model;
mod offsets;
mod prefix_sum;
mod row_height;
mod scalar;
mod windowed;

pub use fixed::UniformOffsets;
pub use model::{OffsetTable, Overscan, VisibleRange, compute_visible_range};
pub use offsets::RowOffsets;
pub use prefix_sum::PrefixSumOffsets;
pub use row_height::RowHeight;
pub use scalar::Scalar;
pub use windowed::{RowInstruction, ScrollAlign, ViewportState, WindowedRenderer};

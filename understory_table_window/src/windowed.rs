// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::{
    OffsetTable, Overscan, RowHeight, RowOffsets, Scalar, VisibleRange, compute_visible_range,
};

/// Scroll position, viewport size, and overscan for one renderer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportState<S: Scalar> {
    /// Offset of the viewport's top edge from the top of the content.
    pub scroll_top: S,
    /// Height of the scrollable viewport.
    pub viewport_height: S,
    /// Extra rows realized around the visible ones.
    pub overscan: Overscan,
}

/// One row the host should materialize, positioned absolutely.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RowInstruction<S: Scalar> {
    /// Row index in `0..rows_count`.
    pub index: usize,
    /// Top offset of the row within the scrollable content.
    pub top: S,
    /// Row height.
    pub height: S,
}

impl<S: Scalar> RowInstruction<S> {
    /// Offset just past the bottom edge of the row.
    #[must_use]
    pub fn bottom(&self) -> S {
        self.top + self.height
    }
}

/// Where a row should land when scrolling to it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollAlign {
    /// Row top at the viewport top.
    Start,
    /// Row centered in the viewport.
    Center,
    /// Row bottom at the viewport bottom.
    End,
    /// Smallest scroll change that makes the row fully visible; no change if
    /// it already is. Rows taller than the viewport align to their top.
    #[default]
    Nearest,
}

/// Stateful windowing engine bound to one live viewport.
///
/// Each input event (scroll, resize, data change, programmatic scroll)
/// recomputes the visible range synchronously and, when something changed,
/// rebuilds the list of [`RowInstruction`]s for exactly the visible rows plus
/// overscan. Event methods return `Some(rows)` when new instructions were
/// emitted and `None` when the previous ones are still valid, so hosts can
/// skip re-rendering on scroll deltas that stay within the same rows.
///
/// Scroll positions are always clamped to `[0, max_scroll_top]`.
///
/// ```rust
/// use understory_table_window::{Overscan, RowHeight, WindowedRenderer};
///
/// let mut window = WindowedRenderer::new(1000, RowHeight::Fixed(30.0_f64), 300.0, Overscan::NONE);
/// assert_eq!(window.rows().len(), 10);
///
/// // Row 10 comes into view, then further scrolling stays within the same rows.
/// assert!(window.on_scroll(15.0).is_some());
/// assert!(window.on_scroll(20.0).is_none());
///
/// let rows = window.scroll_to_row(Some(999)).unwrap();
/// assert_eq!(rows.last().unwrap().index, 999);
/// assert_eq!(window.scroll_top(), 29_700.0);
/// ```
#[derive(Clone, Debug)]
pub struct WindowedRenderer<S: Scalar> {
    offsets: RowOffsets<S>,
    viewport: ViewportState<S>,
    range: Option<VisibleRange>,
    rows: Vec<RowInstruction<S>>,
    /// Scroll target that could not be applied yet because the viewport had
    /// no usable height.
    pending_scroll: Option<(usize, ScrollAlign)>,
    revision: u64,
}

impl<S: Scalar> WindowedRenderer<S> {
    /// Creates a renderer scrolled to the top and computes its first window.
    pub fn new(
        rows_count: usize,
        row_height: impl Into<RowHeight<S>>,
        viewport_height: S,
        overscan: Overscan,
    ) -> Self {
        let mut renderer = Self {
            offsets: RowOffsets::new(rows_count, row_height.into()),
            viewport: ViewportState {
                scroll_top: S::zero(),
                viewport_height: viewport_height.sanitize(),
                overscan,
            },
            range: None,
            rows: Vec::new(),
            pending_scroll: None,
            revision: 0,
        };
        renderer.recompute(true);
        renderer
    }

    /// Instructions for the current window, ascending by index.
    #[must_use]
    pub fn rows(&self) -> &[RowInstruction<S>] {
        &self.rows
    }

    /// Current window, or `None` when nothing is rendered.
    #[must_use]
    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.range
    }

    /// Current viewport state.
    #[must_use]
    pub fn viewport(&self) -> &ViewportState<S> {
        &self.viewport
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll_top(&self) -> S {
        self.viewport.scroll_top
    }

    /// Number of rows.
    #[must_use]
    pub fn rows_count(&self) -> usize {
        self.offsets.len()
    }

    /// Counter bumped every time new instructions are emitted.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Row waiting for a usable viewport before it can be scrolled to.
    #[must_use]
    pub fn pending_scroll_target(&self) -> Option<usize> {
        self.pending_scroll.map(|(index, _)| index)
    }

    /// Height of the scrollable content.
    pub fn total_height(&mut self) -> S {
        self.offsets.total_height()
    }

    /// Largest valid scroll offset.
    pub fn max_scroll_top(&mut self) -> S {
        let total = self.offsets.total_height();
        (total - self.viewport.viewport_height).clamp_non_negative()
    }

    /// Direct access to the offset table, for hit testing and similar queries.
    pub fn offsets_mut(&mut self) -> &mut RowOffsets<S> {
        &mut self.offsets
    }

    /// Returns `true` if row `index` lies entirely inside the viewport.
    pub fn is_row_fully_visible(&mut self, index: usize) -> bool {
        if index >= self.offsets.len() {
            return false;
        }
        let top = self.offsets.top_offset_of(index);
        let bottom = top + self.offsets.height_of(index);
        top >= self.viewport.scroll_top
            && bottom <= self.viewport.scroll_top + self.viewport.viewport_height
    }

    /// Handles a scroll event.
    ///
    /// A user scroll supersedes any pending programmatic scroll target.
    pub fn on_scroll(&mut self, scroll_top: S) -> Option<&[RowInstruction<S>]> {
        self.pending_scroll = None;
        self.viewport.scroll_top = self.clamp_scroll(scroll_top);
        let changed = self.recompute(false);
        self.emitted(changed)
    }

    /// Handles a viewport resize.
    pub fn on_resize(&mut self, viewport_height: S) -> Option<&[RowInstruction<S>]> {
        self.viewport.viewport_height = viewport_height.sanitize();
        self.viewport.scroll_top = self.clamp_scroll(self.viewport.scroll_top);
        self.apply_pending_scroll();
        let changed = self.recompute(false);
        self.emitted(changed)
    }

    /// Replaces the row count and height source.
    ///
    /// Cached offsets are dropped, a pending scroll target is re-clamped to
    /// the new row count, and fresh instructions are always emitted since row
    /// positions may have moved even when the range did not.
    pub fn on_data_change(
        &mut self,
        rows_count: usize,
        row_height: impl Into<RowHeight<S>>,
    ) -> &[RowInstruction<S>] {
        self.offsets.reset(rows_count, row_height.into());
        self.pending_scroll = self.pending_scroll.and_then(|(index, align)| {
            let last = rows_count.checked_sub(1)?;
            Some((index.min(last), align))
        });
        self.viewport.scroll_top = self.clamp_scroll(self.viewport.scroll_top);
        self.apply_pending_scroll();
        self.recompute(true);
        &self.rows
    }

    /// Changes the overscan.
    pub fn set_overscan(&mut self, overscan: Overscan) -> Option<&[RowInstruction<S>]> {
        self.viewport.overscan = overscan;
        let changed = self.recompute(false);
        self.emitted(changed)
    }

    /// Scrolls the minimal distance that brings row `index` fully into view.
    ///
    /// `None` is a no-op, as is any index when there are no rows. Other
    /// out-of-range indices clamp to the nearest valid row. Repeating the call
    /// without an intervening change does not move the viewport again.
    pub fn scroll_to_row(&mut self, index: Option<isize>) -> Option<&[RowInstruction<S>]> {
        self.scroll_to_row_aligned(index, ScrollAlign::Nearest)
    }

    /// Scrolls so that row `index` lands at `align` within the viewport.
    ///
    /// Index handling matches [`WindowedRenderer::scroll_to_row`]. If the
    /// viewport currently has no usable height, the target is remembered and
    /// applied by the next resize or data change.
    pub fn scroll_to_row_aligned(
        &mut self,
        index: Option<isize>,
        align: ScrollAlign,
    ) -> Option<&[RowInstruction<S>]> {
        let target = self.clamp_row_index(index?)?;
        if !self.viewport_is_usable() {
            log::debug!("deferring scroll to row {target}: viewport has no usable height");
            self.pending_scroll = Some((target, align));
            return None;
        }
        self.pending_scroll = None;
        self.viewport.scroll_top = self.scroll_top_for_row(target, align);
        log::debug!(
            "scrolled to row {target} ({align:?}), scroll_top {:?}",
            self.viewport.scroll_top
        );
        let changed = self.recompute(false);
        self.emitted(changed)
    }

    /// Scroll offset that places row `index` at `align`, clamped to the
    /// valid scroll range. Does not change any state.
    pub fn scroll_top_for_row(&mut self, index: usize, align: ScrollAlign) -> S {
        if self.offsets.is_empty() {
            return S::zero();
        }
        let index = index.min(self.offsets.len() - 1);
        let top = self.offsets.top_offset_of(index);
        let height = self.offsets.height_of(index);
        let bottom = top + height;
        let current = self.viewport.scroll_top;
        let viewport = self.viewport.viewport_height;
        let two = S::from_usize(2);

        let target = match align {
            ScrollAlign::Start => top,
            ScrollAlign::End => bottom - viewport,
            ScrollAlign::Center => top + (height - viewport) / two,
            ScrollAlign::Nearest => {
                if top >= current && bottom <= current + viewport {
                    current
                } else if height > viewport || top < current {
                    top
                } else {
                    bottom - viewport
                }
            }
        };
        self.clamp_scroll(target)
    }

    fn clamp_row_index(&self, index: isize) -> Option<usize> {
        let last = self.offsets.len().checked_sub(1)?;
        Some(usize::try_from(index).unwrap_or(0).min(last))
    }

    /// Clamps to `[0, max_scroll_top]`.
    ///
    /// The total height is only needed when the content ends inside the
    /// viewport, so a prefix-sum table is summed no further than the
    /// viewport's bottom edge.
    fn clamp_scroll(&mut self, scroll_top: S) -> S {
        let scroll_top = scroll_top.sanitize();
        if self.content_extends_past(scroll_top + self.viewport.viewport_height) {
            scroll_top
        } else {
            scroll_top.min(self.max_scroll_top())
        }
    }

    /// Returns `true` if some row ends strictly below `offset`.
    fn content_extends_past(&mut self, offset: S) -> bool {
        match self.offsets.index_at_offset(offset) {
            Some(index) => self.offsets.top_offset_of(index + 1) > offset,
            None => false,
        }
    }

    fn viewport_is_usable(&self) -> bool {
        self.viewport.viewport_height.is_positive_finite()
            && !self.offsets.has_degenerate_uniform_height()
    }

    fn apply_pending_scroll(&mut self) {
        if !self.viewport_is_usable() {
            return;
        }
        if let Some((index, align)) = self.pending_scroll.take() {
            self.viewport.scroll_top = self.scroll_top_for_row(index, align);
            log::debug!(
                "applied deferred scroll to row {index}, scroll_top {:?}",
                self.viewport.scroll_top
            );
        }
    }

    /// Recomputes the window; returns `true` if new instructions were emitted.
    fn recompute(&mut self, force: bool) -> bool {
        let range = if self.viewport_is_usable() {
            compute_visible_range(
                &mut self.offsets,
                self.viewport.scroll_top,
                self.viewport.viewport_height,
                self.viewport.overscan,
            )
        } else {
            if !self.offsets.is_empty() {
                log::debug!(
                    "viewport height {:?} leaves no room for rows; rendering nothing",
                    self.viewport.viewport_height
                );
            }
            None
        };

        if !force && range == self.range {
            return false;
        }

        self.range = range;
        self.rows.clear();
        if let Some(range) = range {
            self.rows.reserve(range.len());
            for index in range.indices() {
                let top = self.offsets.top_offset_of(index);
                let height = self.offsets.height_of(index);
                self.rows.push(RowInstruction { index, top, height });
            }
        }
        self.revision += 1;
        log::trace!(
            "window {:?} at scroll_top {:?} (revision {})",
            self.range,
            self.viewport.scroll_top,
            self.revision
        );
        true
    }

    fn emitted(&self, changed: bool) -> Option<&[RowInstruction<S>]> {
        changed.then_some(self.rows.as_slice())
    }
}

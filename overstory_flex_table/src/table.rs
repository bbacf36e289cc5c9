// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;
use smallvec::SmallVec;
use understory_table_window::{RowHeight, RowInstruction, ScrollAlign, WindowedRenderer};

use crate::flex::{ColumnWidths, content_width, resolve_widths};
use crate::{
    Column, ConfigError, FlexItem, RowGetter, SortDirection, SortRequest, TableConfig, next_sort,
};

/// Callback receiving header-click sort requests: `(sort_by, direction)`.
pub type SortCallback = Box<dyn FnMut(&str, SortDirection)>;

/// Header and body regions plus resolved column widths.
///
/// The header band and the scrolling body are independent regions; only the
/// body is virtualized.
#[derive(Clone, Debug, PartialEq)]
pub struct TableLayout {
    /// Header band at the top of the table.
    pub header: Rect,
    /// Scrollable body below the header.
    pub body: Rect,
    /// Final width of each column, in column order.
    pub column_widths: ColumnWidths,
}

/// One header cell, positioned within the header band.
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderCell {
    /// Data key of the column.
    pub data_key: String,
    /// Label text.
    pub label: String,
    /// Left edge relative to the table.
    pub x: f64,
    /// Resolved width.
    pub width: f64,
    /// Sort indicator when this is the sorted column.
    pub sort_direction: Option<SortDirection>,
    /// Whether clicking this header requests a sort.
    pub sortable: bool,
}

/// One rendered cell of a body row.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedCell {
    /// Left edge relative to the table.
    pub x: f64,
    /// Resolved column width.
    pub width: f64,
    /// Rendered cell text.
    pub text: String,
}

/// One rendered body row, positioned within the scrollable content.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedRow {
    /// Row index.
    pub index: usize,
    /// Top offset within the scrollable content.
    pub top: f64,
    /// Row height.
    pub height: f64,
    /// Cells in column order.
    pub cells: SmallVec<[RenderedCell; 8]>,
}

/// A virtualized table with a fixed header and a scrolling body.
///
/// `FlexTable` composes columns, the header band, and sort state on top of a
/// [`WindowedRenderer`]. Only the rows in the current window are fetched from
/// the [`RowGetter`] and rendered. Sorting is the host's job: header clicks
/// produce a [`SortRequest`] that is forwarded to the sort callback, and the
/// host updates its data and the table configuration in response.
///
/// ```rust
/// use overstory_flex_table::{Column, FlexTable, RowFields, TableConfig};
///
/// struct Item(usize);
///
/// impl RowFields for Item {
///     fn field(&self, data_key: &str) -> Option<String> {
///         (data_key == "name").then(|| format!("Item {}", self.0 + 1))
///     }
/// }
///
/// let config = TableConfig { rows_count: 1000, ..TableConfig::default() };
/// let mut table = FlexTable::new(config, vec![Column::<Item>::new("name", 90.0)]).unwrap();
///
/// table.on_scroll(300.0);
/// let rows = table.render_rows(&|index: usize| Item(index));
/// assert_eq!(rows[0].index, 0);
/// assert_eq!(rows[10].cells[0].text, "Item 11");
/// ```
pub struct FlexTable<R> {
    config: TableConfig,
    columns: Vec<Column<R>>,
    window: WindowedRenderer<f64>,
    sort: Option<SortCallback>,
}

impl<R> FlexTable<R> {
    /// Creates a table, validating the configuration and columns.
    ///
    /// A `scroll_to_index` in the configuration is applied right away.
    pub fn new(config: TableConfig, columns: Vec<Column<R>>) -> Result<Self, ConfigError> {
        config.validate()?;
        validate_columns(&columns)?;
        let mut window = WindowedRenderer::new(
            config.rows_count,
            config.row_height.clone(),
            config.body_height(),
            config.overscan(),
        );
        window.scroll_to_row(config.scroll_to_index);
        Ok(Self {
            config,
            columns,
            window,
            sort: None,
        })
    }

    /// Installs the callback invoked on sortable header clicks.
    pub fn set_sort_callback(&mut self, sort: impl FnMut(&str, SortDirection) + 'static) {
        self.sort = Some(Box::new(sort));
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// The windowing engine behind the body.
    #[must_use]
    pub fn window(&self) -> &WindowedRenderer<f64> {
        &self.window
    }

    /// Replaces the columns.
    pub fn set_columns(&mut self, columns: Vec<Column<R>>) -> Result<(), ConfigError> {
        validate_columns(&columns)?;
        self.columns = columns;
        Ok(())
    }

    /// Applies a new configuration.
    ///
    /// Only the parts that changed are pushed into the windowing engine: a
    /// body resize, a data change, an overscan change, or a new scroll
    /// target. A data change is a new row count, a new height source, or any
    /// update with a [`RowHeight::PerRow`] source, whose heights may have
    /// moved behind the same closure. An invalid configuration is rejected
    /// and the previous one stays in effect.
    pub fn update(&mut self, config: TableConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let previous = core::mem::replace(&mut self.config, config);
        let config = &self.config;

        if previous.rows_count != config.rows_count
            || matches!(config.row_height, RowHeight::PerRow(_))
            || !previous.row_height.is_same_source(&config.row_height)
        {
            self.window
                .on_data_change(config.rows_count, config.row_height.clone());
        }
        if previous.body_height() != config.body_height() {
            self.window.on_resize(config.body_height());
        }
        if previous.overscan_row_count != config.overscan_row_count {
            self.window.set_overscan(config.overscan());
        }
        if config.scroll_to_index.is_some() && previous.scroll_to_index != config.scroll_to_index {
            self.window.scroll_to_row(config.scroll_to_index);
        }
        Ok(())
    }

    /// Drops all cached row offsets and re-emits the window.
    ///
    /// Call this after editing or reordering rows when the configuration
    /// itself stays the same, for example when a per-row height closure reads
    /// from shared data the host just sorted.
    pub fn on_data_change(&mut self) {
        self.window
            .on_data_change(self.config.rows_count, self.config.row_height.clone());
    }

    /// Forwards a body scroll event; returns `true` if the window changed.
    pub fn on_scroll(&mut self, scroll_top: f64) -> bool {
        self.window.on_scroll(scroll_top).is_some()
    }

    /// Scrolls the body so that row `index` is fully visible.
    ///
    /// `None` is a no-op; out-of-range indices are clamped. Returns `true`
    /// if the window changed.
    pub fn scroll_to_row(&mut self, index: Option<isize>) -> bool {
        self.window.scroll_to_row(index).is_some()
    }

    /// Like [`FlexTable::scroll_to_row`], placing the row at `align`.
    pub fn scroll_to_row_aligned(&mut self, index: Option<isize>, align: ScrollAlign) -> bool {
        self.window.scroll_to_row_aligned(index, align).is_some()
    }

    /// Width the columns ask for before flexing.
    #[must_use]
    pub fn content_width(&self) -> f64 {
        content_width(&self.flex_items())
    }

    /// Height of the scrollable body content.
    pub fn content_height(&mut self) -> f64 {
        self.window.total_height()
    }

    /// Header and body regions with resolved column widths.
    #[must_use]
    pub fn layout(&self) -> TableLayout {
        let width = self.config.width;
        let header_height = self.config.header_height;
        TableLayout {
            header: Rect::new(0.0, 0.0, width, header_height),
            body: Rect::new(0.0, header_height, width, header_height + self.config.body_height()),
            column_widths: resolve_widths(&self.flex_items(), width),
        }
    }

    /// Header cells with positions and sort indicators.
    #[must_use]
    pub fn header_cells(&self) -> Vec<HeaderCell> {
        let widths = resolve_widths(&self.flex_items(), self.config.width);
        let sort_by = self.config.sort_by.as_deref();
        let mut x = 0.0;
        self.columns
            .iter()
            .zip(widths)
            .map(|(column, width)| {
                let cell = HeaderCell {
                    data_key: column.data_key().into(),
                    label: column.header_label().into(),
                    x,
                    width,
                    sort_direction: (sort_by == Some(column.data_key()))
                        .then_some(self.config.sort_direction),
                    sortable: column.is_sortable(),
                };
                x += width;
                cell
            })
            .collect()
    }

    /// Handles a click on the header of column `column_index`.
    ///
    /// Returns the forwarded request, or `None` for unknown or unsortable
    /// columns. The table's own sort state is not changed.
    pub fn header_click(&mut self, column_index: usize) -> Option<SortRequest> {
        let column = self.columns.get(column_index)?;
        if !column.is_sortable() {
            return None;
        }
        let request = next_sort(
            self.config.sort_by.as_deref(),
            self.config.sort_direction,
            column.data_key(),
        );
        log::debug!(
            "sort requested by `{}` {:?}",
            request.sort_by,
            request.direction
        );
        if let Some(sort) = &mut self.sort {
            sort(&request.sort_by, request.direction);
        }
        Some(request)
    }

    /// Renders every row in the current window.
    ///
    /// `rows` is only asked for indices in the window, each exactly once.
    pub fn render_rows(&self, rows: &impl RowGetter<R>) -> Vec<RenderedRow> {
        let widths = resolve_widths(&self.flex_items(), self.config.width);
        self.window
            .rows()
            .iter()
            .map(|instruction| self.render_row(instruction, rows, &widths))
            .collect()
    }

    fn render_row(
        &self,
        instruction: &RowInstruction<f64>,
        rows: &impl RowGetter<R>,
        widths: &[f64],
    ) -> RenderedRow {
        let row_data = rows.row(instruction.index);
        let mut x = 0.0;
        let cells = self
            .columns
            .iter()
            .zip(widths)
            .map(|(column, &width)| {
                let cell = RenderedCell {
                    x,
                    width,
                    text: column.render_cell(&row_data, instruction.index),
                };
                x += width;
                cell
            })
            .collect();
        RenderedRow {
            index: instruction.index,
            top: instruction.top,
            height: instruction.height,
            cells,
        }
    }

    fn flex_items(&self) -> SmallVec<[FlexItem; 8]> {
        self.columns.iter().map(Column::flex_item).collect()
    }
}

impl<R> fmt::Debug for FlexTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlexTable")
            .field("config", &self.config)
            .field("columns", &self.columns)
            .field("window", &self.window)
            .field("sort", &self.sort.is_some())
            .finish()
    }
}

fn validate_columns<R>(columns: &[Column<R>]) -> Result<(), ConfigError> {
    if columns.is_empty() {
        return Err(ConfigError::NoColumns);
    }
    for column in columns {
        let width = column.width();
        if !width.is_finite() || width < 0.0 {
            return Err(ConfigError::InvalidColumnWidth {
                data_key: column.data_key().into(),
                width,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::FlexTable;
    use crate::{Column, ConfigError, RowFields, SortDirection, TableConfig};

    #[derive(Debug)]
    struct Item {
        id: usize,
    }

    impl RowFields for Item {
        fn field(&self, data_key: &str) -> Option<String> {
            match data_key {
                "id" => Some(self.id.to_string()),
                "name" => Some(alloc::format!("Item {}", self.id + 1)),
                _ => None,
            }
        }
    }

    fn columns() -> Vec<Column<Item>> {
        vec![
            Column::new("id", 50.0).label("Index"),
            Column::new("name", 90.0).label("Name"),
            Column::new("random", 210.0)
                .label("Description")
                .flex_grow(1.0)
                .disable_sort(),
        ]
    }

    fn table(rows_count: usize) -> FlexTable<Item> {
        let config = TableConfig {
            rows_count,
            overscan_row_count: 0,
            sort_by: Some("name".into()),
            ..TableConfig::default()
        };
        FlexTable::new(config, columns()).unwrap()
    }

    #[test]
    fn layout_splits_header_and_body() {
        let table = table(1000);
        let layout = table.layout();
        assert_eq!(layout.header.height(), 20.0);
        assert_eq!(layout.body.y0, 20.0);
        assert_eq!(layout.body.height(), 280.0);
        assert_eq!(layout.column_widths.as_slice(), &[50.0, 90.0, 290.0]);
        assert_eq!(table.content_width(), 350.0);
    }

    #[test]
    fn body_window_excludes_header_height() {
        let table = table(1000);
        let range = table.window().visible_range().unwrap();
        // 280px body / 30px rows: rows 0..=9, the last partially visible.
        assert_eq!((range.start_index, range.stop_index), (0, 9));
    }

    #[test]
    fn rows_are_fetched_only_for_the_window() {
        let mut table = table(1000);
        table.on_scroll(3000.0);
        let fetched = RefCell::new(Vec::new());
        let rows = table.render_rows(&|index: usize| {
            fetched.borrow_mut().push(index);
            Item { id: index }
        });
        assert_eq!(fetched.into_inner(), (100..=109).collect::<Vec<_>>());
        assert_eq!(rows[0].top, 3000.0);
        assert_eq!(rows[0].cells[1].text, "Item 101");
        assert_eq!(rows[0].cells[2].text, "");
        assert_eq!(rows[0].cells[2].x, 140.0);
        assert_eq!(rows[0].cells[2].width, 290.0);
    }

    #[test]
    fn header_cells_carry_sort_indicator() {
        let table = table(10);
        let header = table.header_cells();
        assert_eq!(header.len(), 3);
        assert_eq!(header[0].label, "Index");
        assert_eq!(header[0].sort_direction, None);
        assert_eq!(header[1].sort_direction, Some(SortDirection::Asc));
        assert_eq!(header[2].x, 140.0);
        assert!(!header[2].sortable);
    }

    #[test]
    fn header_click_forwards_sort_requests() {
        let mut table = table(10);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        table.set_sort_callback(move |key, direction| {
            sink.borrow_mut().push((key.to_string(), direction));
        });

        let request = table.header_click(1).unwrap();
        assert_eq!(request.direction, SortDirection::Desc);
        assert_eq!(table.header_click(0).unwrap().direction, SortDirection::Asc);
        assert_eq!(table.header_click(2), None);
        assert_eq!(table.header_click(7), None);

        assert_eq!(
            *seen.borrow(),
            vec![
                ("name".to_string(), SortDirection::Desc),
                ("id".to_string(), SortDirection::Asc),
            ]
        );
        // The table does not sort or change its own state.
        assert_eq!(table.config().sort_by.as_deref(), Some("name"));
    }

    #[test]
    fn update_pushes_changes_into_the_window() {
        let mut table = table(1000);
        let mut config = table.config().clone();
        config.scroll_to_index = Some(999);
        table.update(config.clone()).unwrap();
        assert_eq!(table.window().scroll_top(), 30_000.0 - 280.0);

        config.rows_count = 20;
        table.update(config.clone()).unwrap();
        assert_eq!(table.window().rows_count(), 20);
        assert_eq!(table.window().scroll_top(), 600.0 - 280.0);

        config.height = 320.0;
        table.update(config.clone()).unwrap();
        assert_eq!(table.window().viewport().viewport_height, 300.0);
        assert_eq!(table.window().scroll_top(), 300.0);

        config.overscan_row_count = 2;
        table.update(config).unwrap();
        assert_eq!(table.window().viewport().overscan.after, 2);
    }

    #[test]
    fn invalid_update_keeps_previous_config() {
        let mut table = table(10);
        let config = TableConfig {
            height: f64::NAN,
            ..table.config().clone()
        };
        assert!(table.update(config).is_err());
        assert_eq!(table.config().height, 300.0);
    }

    #[test]
    fn construction_rejects_bad_columns() {
        let err = FlexTable::<Item>::new(TableConfig::default(), Vec::new()).unwrap_err();
        assert_eq!(err, ConfigError::NoColumns);

        let err =
            FlexTable::new(TableConfig::default(), vec![Column::<Item>::new("id", -5.0)]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColumnWidth { .. }));
    }

    #[test]
    fn scroll_to_row_none_is_noop() {
        let mut table = table(1000);
        table.on_scroll(600.0);
        assert!(!table.scroll_to_row(None));
        assert_eq!(table.window().scroll_top(), 600.0);
    }

    #[test]
    fn empty_table_renders_nothing() {
        let mut table = table(0);
        assert!(!table.scroll_to_row(Some(5)));
        assert!(table.render_rows(&|index: usize| Item { id: index }).is_empty());
        assert_eq!(table.content_height(), 0.0);
    }
}

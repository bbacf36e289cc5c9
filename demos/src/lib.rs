// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless host for the flex table demo.
//!
//! [`TableExample`] plays the part of an application embedding a
//! [`FlexTable`]: it owns 1000 rows, sorts them when the header asks, and
//! turns text-box style inputs (row count, scroll target, sizes) into
//! configuration updates.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use overstory_flex_table::{
    Column, ConfigError, FlexTable, RowFields, RowHeight, SortDirection, TableConfig,
};

/// Number of rows the demo owns.
pub const ITEM_COUNT: usize = 1000;

const LOREM_IPSUM: &[&str] = &[
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
    "Phasellus vulputate odio commodo tortor sodales, et vehicula ipsum viverra.",
    "Cras tincidunt nisi in urna molestie varius.",
    "Curabitur ac enim dictum arcu varius fermentum vel sodales dui.",
    "Ut tristique augue at congue molestie.",
    "Cras eget enim nec odio feugiat tristique eu quis ante.",
    "Phasellus eget enim vitae nunc luctus sodales a eu erat.",
    "Nulla bibendum quam id velit blandit dictum.",
    "Donec dignissim mi ac libero feugiat, vitae lacinia odio viverra.",
    "Praesent vel lectus venenatis, elementum mauris vitae, ullamcorper nulla.",
    "Quisque sollicitudin nulla nec tellus feugiat hendrerit.",
    "Vestibulum a eros accumsan, lacinia eros non, pretium diam.",
    "Donec ornare felis et dui hendrerit, eget bibendum nibh interdum.",
    "Donec nec diam vel tellus egestas lobortis.",
    "Sed ornare nisl sit amet dolor pellentesque, eu fermentum leo interdum.",
    "Sed eget mauris condimentum, molestie justo eu, feugiat felis.",
    "Sed luctus justo vitae nibh bibendum blandit.",
    "Nulla ac eros vestibulum, mollis ante eu, rutrum nulla.",
    "Sed cursus magna ut vehicula rutrum.",
];

/// Approximate glyph advance used for the text rendering.
const CHAR_WIDTH: f64 = 7.0;

/// One row of demo data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExampleRow {
    /// Position in the unsorted list.
    pub id: usize,
    /// `Item {id + 1}`.
    pub name: String,
    /// Filler text.
    pub random: &'static str,
}

impl RowFields for ExampleRow {
    fn field(&self, data_key: &str) -> Option<String> {
        match data_key {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            "random" => Some(self.random.into()),
            _ => None,
        }
    }
}

type PendingSort = Rc<RefCell<Option<(String, SortDirection)>>>;

/// Application state around one table.
#[derive(Debug)]
pub struct TableExample {
    list: Vec<ExampleRow>,
    sorted: Vec<ExampleRow>,
    table: FlexTable<ExampleRow>,
    pending_sort: PendingSort,
}

impl TableExample {
    /// Builds the demo table: 1000 rows sorted by name, 300px tall.
    pub fn new() -> Result<Self, ConfigError> {
        let list: Vec<_> = (0..ITEM_COUNT)
            .map(|id| ExampleRow {
                id,
                name: format!("Item {}", id + 1),
                random: LOREM_IPSUM[id % LOREM_IPSUM.len()],
            })
            .collect();
        let config = TableConfig {
            width: 430.0,
            height: 300.0,
            header_height: 20.0,
            rows_count: ITEM_COUNT,
            row_height: RowHeight::Fixed(30.0),
            sort_by: Some("name".into()),
            sort_direction: SortDirection::Asc,
            ..TableConfig::default()
        };

        let mut table = FlexTable::new(config, columns())?;
        let pending_sort = PendingSort::default();
        let sink = Rc::clone(&pending_sort);
        table.set_sort_callback(move |sort_by, direction| {
            *sink.borrow_mut() = Some((sort_by.into(), direction));
        });

        let mut example = Self {
            sorted: list.clone(),
            list,
            table,
            pending_sort,
        };
        example.resort();
        Ok(example)
    }

    /// The table being driven.
    pub fn table(&self) -> &FlexTable<ExampleRow> {
        &self.table
    }

    /// Rows in display order.
    pub fn sorted(&self) -> &[ExampleRow] {
        &self.sorted
    }

    /// Forwards a body scroll.
    pub fn scroll(&mut self, scroll_top: f64) -> bool {
        self.table.on_scroll(scroll_top)
    }

    /// Clicks the header of column `column_index` and applies the resulting sort.
    pub fn click_header(&mut self, column_index: usize) -> Result<(), ConfigError> {
        self.table.header_click(column_index);
        let Some((sort_by, sort_direction)) = self.pending_sort.borrow_mut().take() else {
            return Ok(());
        };
        log::info!("sorting by `{sort_by}` {sort_direction:?}");
        let config = TableConfig {
            sort_by: Some(sort_by),
            sort_direction,
            ..self.table.config().clone()
        };
        self.table.update(config)?;
        self.resort();
        Ok(())
    }

    /// "Num rows" input: unparsable text counts as 0, and the value is
    /// clamped to the rows the demo owns.
    pub fn set_rows_count(&mut self, input: &str) -> Result<(), ConfigError> {
        let requested = input.trim().parse::<i64>().unwrap_or(0);
        let rows_count = usize::try_from(requested.max(0))
            .unwrap_or(usize::MAX)
            .min(self.list.len());
        let config = TableConfig {
            rows_count,
            ..self.table.config().clone()
        };
        self.table.update(config)
    }

    /// "Scroll to" input: unparsable text clears the target, anything else
    /// is capped at the last row and scrolled to.
    pub fn set_scroll_to(&mut self, input: &str) -> Result<(), ConfigError> {
        let last = isize::try_from(self.table.config().rows_count)
            .unwrap_or(isize::MAX)
            .saturating_sub(1);
        let scroll_to_index = input.trim().parse::<isize>().ok().map(|index| index.min(last));
        let config = TableConfig {
            scroll_to_index,
            ..self.table.config().clone()
        };
        self.table.update(config)?;
        self.table.scroll_to_row(scroll_to_index);
        Ok(())
    }

    /// "List height" input.
    pub fn set_height(&mut self, input: &str) -> Result<(), ConfigError> {
        let config = TableConfig {
            height: parse_dimension(input),
            ..self.table.config().clone()
        };
        self.table.update(config)
    }

    /// "Row height" input.
    pub fn set_row_height(&mut self, input: &str) -> Result<(), ConfigError> {
        let config = TableConfig {
            row_height: RowHeight::Fixed(parse_dimension(input)),
            ..self.table.config().clone()
        };
        self.table.update(config)
    }

    /// "Header height" input.
    pub fn set_header_height(&mut self, input: &str) -> Result<(), ConfigError> {
        let config = TableConfig {
            header_height: parse_dimension(input),
            ..self.table.config().clone()
        };
        self.table.update(config)
    }

    /// Renders the header and the current window as plain text.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for cell in self.table.header_cells() {
            let marker = match cell.sort_direction {
                Some(SortDirection::Asc) => " ^",
                Some(SortDirection::Desc) => " v",
                None => "",
            };
            push_cell(&mut out, &format!("{}{marker}", cell.label), cell.width);
        }
        out.push('\n');

        let rows = self
            .table
            .render_rows(&|index: usize| self.sorted[index].clone());
        for row in rows {
            let _ = write!(out, "{:>7} ", row.top);
            for cell in &row.cells {
                push_cell(&mut out, &cell.text, cell.width);
            }
            out.push('\n');
        }
        out
    }

    fn resort(&mut self) {
        let config = self.table.config();
        self.sorted.clone_from(&self.list);
        if let Some(sort_by) = config.sort_by.as_deref() {
            self.sorted.sort_by_cached_key(|row| row.field(sort_by));
        }
        if config.sort_direction == SortDirection::Desc {
            self.sorted.reverse();
        }
    }
}

fn columns() -> Vec<Column<ExampleRow>> {
    vec![
        Column::with_data_getter("index", 50.0, |_, row: &ExampleRow| row.id.to_string())
            .label("Index"),
        Column::new("name", 90.0).label("Name"),
        Column::new("random", 210.0)
            .label("The description label is really long")
            .cell_renderer(|cx| cx.cell_data.into())
            .flex_grow(1.0)
            .disable_sort(),
    ]
}

/// Parses a size input; unparsable text and zero both become `1`.
fn parse_dimension(input: &str) -> f64 {
    match input.trim().parse::<i32>() {
        Ok(0) | Err(_) => 1.0,
        Ok(value) => f64::from(value),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "column widths are small and non-negative"
)]
fn push_cell(out: &mut String, text: &str, width: f64) {
    let chars = (width / CHAR_WIDTH).floor().max(1.0) as usize;
    let shown: String = text.chars().take(chars - 1).collect();
    let _ = write!(out, "{shown:<chars$}");
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use crate::FlexItem;

/// Row types whose cells can be looked up by column data key.
///
/// This backs the default cell data getter installed by [`Column::new`].
pub trait RowFields {
    /// Returns the display value of the field named `data_key`, if any.
    fn field(&self, data_key: &str) -> Option<String>;
}

/// Row accessor supplied by the data collaborator.
///
/// The table only calls it for indices inside the current window, so it
/// should be cheap for any single index. Implemented for closures.
pub trait RowGetter<R> {
    /// Returns the row at `index`.
    fn row(&self, index: usize) -> R;
}

impl<R, F: Fn(usize) -> R> RowGetter<R> for F {
    fn row(&self, index: usize) -> R {
        self(index)
    }
}

/// Everything a cell renderer gets to see about one cell.
#[derive(Debug)]
pub struct CellContext<'a, R> {
    /// Value produced by the column's cell data getter.
    pub cell_data: &'a str,
    /// Data key of the column.
    pub data_key: &'a str,
    /// The row being rendered.
    pub row_data: &'a R,
    /// Index of the row.
    pub row_index: usize,
}

/// Extracts a cell value from a row: `(data_key, row) -> value`.
pub type CellDataGetter<R> = Box<dyn Fn(&str, &R) -> String>;

/// Turns a cell value into its rendered text.
pub type CellRenderer<R> = Box<dyn Fn(&CellContext<'_, R>) -> String>;

/// One column of a [`FlexTable`](crate::FlexTable).
///
/// `width` is the flex basis; `flex_grow` and `flex_shrink` decide how the
/// column takes up or gives back space when the table is wider or narrower
/// than the sum of the bases. Defaults follow flexbox: no growing, shrink
/// factor 1.
pub struct Column<R> {
    data_key: String,
    label: String,
    width: f64,
    flex_grow: f64,
    flex_shrink: f64,
    disable_sort: bool,
    cell_data_getter: CellDataGetter<R>,
    cell_renderer: Option<CellRenderer<R>>,
}

impl<R: RowFields + 'static> Column<R> {
    /// Creates a column reading its cells through [`RowFields`].
    ///
    /// Missing fields render as empty strings.
    pub fn new(data_key: impl Into<String>, width: f64) -> Self {
        Self::with_data_getter(data_key, width, |key, row: &R| {
            row.field(key).unwrap_or_default()
        })
    }
}

impl<R> Column<R> {
    /// Creates a column with a custom cell data getter.
    pub fn with_data_getter(
        data_key: impl Into<String>,
        width: f64,
        getter: impl Fn(&str, &R) -> String + 'static,
    ) -> Self {
        let data_key = data_key.into();
        Self {
            label: data_key.clone(),
            data_key,
            width,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            disable_sort: false,
            cell_data_getter: Box::new(getter),
            cell_renderer: None,
        }
    }

    /// Sets the header label (defaults to the data key).
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the flex grow factor.
    #[must_use]
    pub fn flex_grow(mut self, flex_grow: f64) -> Self {
        self.flex_grow = flex_grow;
        self
    }

    /// Sets the flex shrink factor.
    #[must_use]
    pub fn flex_shrink(mut self, flex_shrink: f64) -> Self {
        self.flex_shrink = flex_shrink;
        self
    }

    /// Excludes the column from header-click sorting.
    #[must_use]
    pub fn disable_sort(mut self) -> Self {
        self.disable_sort = true;
        self
    }

    /// Sets a custom cell renderer.
    #[must_use]
    pub fn cell_renderer(
        mut self,
        renderer: impl Fn(&CellContext<'_, R>) -> String + 'static,
    ) -> Self {
        self.cell_renderer = Some(Box::new(renderer));
        self
    }

    /// Data key identifying the column.
    #[must_use]
    pub fn data_key(&self) -> &str {
        &self.data_key
    }

    /// Header label.
    #[must_use]
    pub fn header_label(&self) -> &str {
        &self.label
    }

    /// Flex basis.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns `true` if header clicks on this column should sort.
    #[must_use]
    pub fn is_sortable(&self) -> bool {
        !self.disable_sort
    }

    /// Flex parameters of the column.
    #[must_use]
    pub fn flex_item(&self) -> FlexItem {
        FlexItem {
            basis: self.width,
            grow: self.flex_grow,
            shrink: self.flex_shrink,
        }
    }

    /// Renders the cell of this column for one row.
    pub fn render_cell(&self, row_data: &R, row_index: usize) -> String {
        let cell_data = (self.cell_data_getter)(&self.data_key, row_data);
        match &self.cell_renderer {
            Some(renderer) => renderer(&CellContext {
                cell_data: &cell_data,
                data_key: &self.data_key,
                row_data,
                row_index,
            }),
            None => cell_data,
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("data_key", &self.data_key)
            .field("label", &self.label)
            .field("width", &self.width)
            .field("flex_grow", &self.flex_grow)
            .field("flex_shrink", &self.flex_shrink)
            .field("disable_sort", &self.disable_sort)
            .field("cell_renderer", &self.cell_renderer.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::{String, ToString};

    use super::{Column, RowFields, RowGetter};

    struct Item {
        id: usize,
        name: &'static str,
    }

    impl RowFields for Item {
        fn field(&self, data_key: &str) -> Option<String> {
            match data_key {
                "id" => Some(self.id.to_string()),
                "name" => Some(self.name.to_string()),
                _ => None,
            }
        }
    }

    #[test]
    fn default_getter_reads_fields() {
        let column = Column::<Item>::new("name", 90.0);
        let item = Item { id: 1, name: "Item 2" };
        assert_eq!(column.render_cell(&item, 0), "Item 2");
        assert_eq!(column.header_label(), "name");

        let missing = Column::<Item>::new("random", 90.0);
        assert_eq!(missing.render_cell(&item, 0), "");
    }

    #[test]
    fn custom_getter_and_renderer() {
        let column = Column::with_data_getter("index", 50.0, |_, row: &Item| row.id.to_string())
            .label("Index")
            .cell_renderer(|cx| format!("#{} (row {})", cx.cell_data, cx.row_index));
        let item = Item { id: 7, name: "x" };
        assert_eq!(column.render_cell(&item, 3), "#7 (row 3)");
        assert_eq!(column.header_label(), "Index");
    }

    #[test]
    fn builder_sets_flex_and_sorting() {
        let column = Column::<Item>::new("random", 210.0)
            .flex_grow(1.0)
            .flex_shrink(0.0)
            .disable_sort();
        let item = column.flex_item();
        assert_eq!((item.basis, item.grow, item.shrink), (210.0, 1.0, 0.0));
        assert!(!column.is_sortable());
    }

    #[test]
    fn closures_are_row_getters() {
        let getter = |index: usize| index * 2;
        assert_eq!(getter.row(21), 42);
    }
}

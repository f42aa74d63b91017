//! Table state: rows, columns and the view state tying them together.

use super::column::{Column, find_column, validate_columns};
use super::csv::CsvFormat;
use super::sort::sort_rows;
use super::view::ViewState;
use crate::error::SchemaError;
use crate::model::Record;

/// A row as handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayRow<'a> {
    Record(&'a Record),
    /// Stands in for the rows of an empty table.
    Placeholder,
}

/// A table over caller-supplied rows.
///
/// Rows and columns are fixed for the table's lifetime; only the view state
/// changes. Every derived view (ordered rows, CSV) is recomputed on demand.
///
/// # Example
///
/// ```
/// use tabkit_lib::model::Record;
/// use tabkit_lib::table::{Column, Table, ValueType};
///
/// let columns = vec![Column::new("Score", "score", ValueType::Int)];
/// let rows = vec![
///     Record::new(1).set("score", 3i64),
///     Record::new(2).set("score", 1i64),
/// ];
/// let mut table = Table::new(columns, rows).unwrap();
///
/// table.on_header_click("score");
/// let first = table.sorted_rows()[0];
/// assert_eq!(first.id().to_string(), "2");
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Record>,
    state: ViewState,
}

impl Table {
    /// Create a table, rejecting column lists with empty or duplicate accessors.
    pub fn new(columns: Vec<Column>, rows: Vec<Record>) -> Result<Self, SchemaError> {
        validate_columns(&columns)?;
        let state = ViewState::new(&columns);
        log::debug!(
            "table created with {} columns, {} rows",
            columns.len(),
            rows.len()
        );
        Ok(Self {
            columns,
            rows,
            state,
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Rows in input order.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    /// Handle a click on a column header.
    ///
    /// Returns `false` when the accessor names no column or the column is not
    /// sortable; the sort state is untouched in that case.
    pub fn on_header_click(&mut self, accessor: &str) -> bool {
        let sortable = find_column(&self.columns, accessor).is_some_and(|c| c.sortable);
        if !sortable {
            log::debug!("header click on '{}' ignored", accessor);
            return false;
        }

        self.state.toggle_sort(accessor);
        log::debug!("sort is now {:?}", self.state.sort);
        true
    }

    /// Rows ordered by the current sort state.
    pub fn sorted_rows(&self) -> Vec<&Record> {
        sort_rows(
            &self.rows,
            &self.columns,
            self.state.sort.key(),
            self.state.sort.direction(),
        )
    }

    /// Rows to render: the sorted rows, or one placeholder for an empty table.
    pub fn display_rows(&self) -> Vec<DisplayRow<'_>> {
        if self.rows.is_empty() {
            return vec![DisplayRow::Placeholder];
        }
        self.sorted_rows()
            .into_iter()
            .map(DisplayRow::Record)
            .collect()
    }

    /// Currently visible columns, in declaration order.
    pub fn visible_columns(&self) -> Vec<&Column> {
        self.state.visible_columns(&self.columns)
    }

    /// CSV of the rows in input order over the visible columns.
    pub fn to_csv(&self) -> String {
        self.to_csv_with(&CsvFormat::default())
    }

    pub fn to_csv_with(&self, format: &CsvFormat) -> String {
        format.render(&self.rows, &self.visible_columns())
    }
}

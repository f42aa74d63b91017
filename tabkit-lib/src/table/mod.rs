//! Tabular data engine - sorting, column visibility and CSV export.
//!
//! The engine provides:
//! - Column descriptors with dotted accessor paths into open row records
//! - A type-aware sort with missing values last and a timestamp tie-break
//! - A header-click sort toggle (ascending, descending, unsorted)
//! - Column visibility controls
//! - CSV export over the visible columns
//!
//! Everything here is synchronous and never mutates the caller's rows.

mod column;
mod csv;
mod sort;
mod state;
mod view;

pub use column::{Column, ValueType, find_column, validate_columns};
pub use csv::{CsvFormat, QuotePolicy, cell_text, to_csv};
pub use sort::{SortDirection, compare_records, sort_rows};
pub use state::{DisplayRow, Table};
pub use view::{SortState, ViewState};

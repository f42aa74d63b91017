//! CSV export.
//!
//! The default format reproduces what the kit's download button has always
//! produced: cells are quoted only when they contain a comma, and the header
//! and rows are concatenated without a separator. [`CsvFormat::rfc4180`] is
//! the conventional alternative.

use serde::Deserialize;
use serde::Serialize;

use super::column::Column;
use crate::model::Record;

/// When a cell gets wrapped in double quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotePolicy {
    /// Only cells containing a comma.
    #[default]
    CommaOnly,
    /// Cells containing a comma, quote, CR or LF.
    Rfc4180,
}

impl QuotePolicy {
    fn needs_quotes(self, cell: &str) -> bool {
        match self {
            Self::CommaOnly => cell.contains(','),
            Self::Rfc4180 => cell.contains([',', '"', '\r', '\n']),
        }
    }
}

/// Output options for [`CsvFormat::render`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CsvFormat {
    /// Inserted between the header and each row. Empty by default.
    pub row_separator: String,
    pub quote_policy: QuotePolicy,
}

impl CsvFormat {
    /// Newline-separated rows with standard quoting.
    pub fn rfc4180() -> Self {
        Self {
            row_separator: "\n".to_string(),
            quote_policy: QuotePolicy::Rfc4180,
        }
    }

    /// Escapes a single cell.
    pub fn escape(&self, cell: &str) -> String {
        if self.quote_policy.needs_quotes(cell) {
            format!("\"{}\"", cell.replace('"', "\"\""))
        } else {
            cell.to_string()
        }
    }

    fn line(&self, cells: impl Iterator<Item = String>) -> String {
        cells
            .map(|cell| self.escape(&cell))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Renders rows over `columns`, in the given order.
    ///
    /// With no rows only the header is produced; with no columns either the
    /// result is empty.
    pub fn render<'r, C, R>(&self, rows: R, columns: &[C]) -> String
    where
        C: AsRef<Column>,
        R: IntoIterator<Item = &'r Record>,
    {
        let mut lines = vec![self.line(columns.iter().map(|c| c.as_ref().title.clone()))];
        for row in rows {
            lines.push(self.line(columns.iter().map(|c| cell_text(row, c.as_ref()))));
        }

        if lines.len() == 1 && columns.is_empty() {
            return String::new();
        }

        log::trace!("rendered {} csv lines", lines.len());
        lines.join(&self.row_separator)
    }
}

/// Display text of one cell, empty when missing.
pub fn cell_text(row: &Record, column: &Column) -> String {
    column
        .resolve(row)
        .map(|value| value.to_string())
        .unwrap_or_default()
}

/// Renders CSV with the default format.
pub fn to_csv<'r, C, R>(rows: R, columns: &[C]) -> String
where
    C: AsRef<Column>,
    R: IntoIterator<Item = &'r Record>,
{
    CsvFormat::default().render(rows, columns)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::table::ValueType;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("Name", "name", ValueType::String),
            Column::new("Score", "score", ValueType::Float),
        ]
    }

    #[test]
    fn test_header_and_rows_are_concatenated() {
        let rows = vec![
            Record::new(1).set("name", "Ada").set("score", 9.5),
            Record::new(2).set("name", "Bob").set("score", 7i64),
        ];
        assert_eq!(to_csv(&rows, &columns()), "Name,ScoreAda,9.5Bob,7");
    }

    #[test]
    fn test_comma_cells_are_quoted() {
        let rows = vec![Record::new(1).set("name", "a,\"b\"")];
        assert_eq!(to_csv(&rows, &columns()), "Name,Score\"a,\"\"b\"\"\",");
    }

    #[test]
    fn test_quote_without_comma_is_left_alone() {
        let rows = vec![Record::new(1).set("name", "a\"b")];
        assert_eq!(to_csv(&rows, &columns()), "Name,Scorea\"b,");
    }

    #[test]
    fn test_rfc4180_quotes_quotes() {
        let rows = vec![Record::new(1).set("name", "a\"b").set("score", 1i64)];
        let csv = CsvFormat::rfc4180().render(&rows, &columns());
        assert_eq!(csv, "Name,Score\n\"a\"\"b\",1");
    }

    #[test]
    fn test_json_and_missing_cells() {
        let columns = vec![
            Column::new("Tags", "tags", ValueType::Json),
            Column::new("Note", "note", ValueType::String),
        ];
        let rows = vec![Record::new(1).set("tags", json!(["x", "y"]))];
        let csv = CsvFormat::rfc4180().render(&rows, &columns);
        assert_eq!(csv, "Tags,Note\n\"[\"\"x\"\",\"\"y\"\"]\",");
    }

    #[test]
    fn test_empty_rows_give_header_only() {
        let rows: Vec<Record> = Vec::new();
        assert_eq!(to_csv(&rows, &columns()), "Name,Score");

        let no_columns: Vec<Column> = Vec::new();
        assert_eq!(to_csv(&rows, &no_columns), "");
    }

    #[test]
    fn test_comma_in_title_is_quoted() {
        let columns = vec![Column::new("Last, First", "name", ValueType::String)];
        let rows: Vec<Record> = Vec::new();
        assert_eq!(to_csv(&rows, &columns), "\"Last, First\"");
    }
}

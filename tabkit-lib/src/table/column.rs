//! Column descriptors and accessor resolution.

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::error::SchemaError;
use crate::model::Record;
use crate::model::Value;

/// Declared value type of a column.
///
/// Drives comparison in the sort engine. CSV output always uses the cell's
/// own display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Boolean,
    Int,
    Float,
    String,
    Json,
}

/// Column configuration.
///
/// Columns define the structure of the table: header title, the dotted
/// accessor path into each row, the value type, and initial visibility.
///
/// # Examples
///
/// ```
/// use tabkit_lib::table::{Column, ValueType};
///
/// let columns = vec![
///     Column::new("Name", "user.name", ValueType::String),
///     Column::new("Score", "score", ValueType::Float),
///     Column::new("Raw", "payload", ValueType::Json).hidden(),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column header text
    pub title: String,
    /// Dotted path into the row, unique within a table
    pub accessor: String,
    /// Declared value type
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Excluded from the visible set when the table is created
    #[serde(default, rename = "hidden")]
    pub starts_hidden: bool,
    /// Whether header clicks change the sort
    #[serde(default = "default_sortable")]
    pub sortable: bool,
}

fn default_sortable() -> bool {
    true
}

impl Column {
    /// Create a new visible, sortable column.
    pub fn new(title: impl Into<String>, accessor: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            title: title.into(),
            accessor: accessor.into(),
            value_type,
            starts_hidden: false,
            sortable: true,
        }
    }

    /// Start the column hidden.
    pub fn hidden(mut self) -> Self {
        self.starts_hidden = true;
        self
    }

    /// Ignore header clicks on this column.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Resolve this column's cell in a row.
    pub fn resolve(&self, record: &Record) -> Option<Value> {
        record.resolve(&self.accessor)
    }
}

impl AsRef<Column> for Column {
    fn as_ref(&self) -> &Column {
        self
    }
}

/// Checks that every accessor is non-empty and unique.
pub fn validate_columns(columns: &[Column]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for column in columns {
        if column.accessor.is_empty() {
            return Err(SchemaError::EmptyAccessor {
                title: column.title.clone(),
            });
        }
        if !seen.insert(column.accessor.as_str()) {
            return Err(SchemaError::DuplicateAccessor {
                accessor: column.accessor.clone(),
            });
        }
    }
    Ok(())
}

/// Finds a column by accessor.
pub fn find_column<'a>(columns: &'a [Column], accessor: &str) -> Option<&'a Column> {
    columns.iter().find(|c| c.accessor == accessor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_accessor_rejected() {
        let columns = vec![
            Column::new("A", "a", ValueType::Int),
            Column::new("A again", "a", ValueType::String),
        ];
        assert_eq!(
            validate_columns(&columns),
            Err(SchemaError::DuplicateAccessor {
                accessor: "a".into()
            })
        );
    }

    #[test]
    fn test_empty_accessor_rejected() {
        let columns = vec![Column::new("Blank", "", ValueType::Int)];
        assert!(matches!(
            validate_columns(&columns),
            Err(SchemaError::EmptyAccessor { .. })
        ));
    }

    #[test]
    fn test_deserialize_column() {
        let json = r#"{"title": "Email", "accessor": "user.email", "type": "string", "hidden": true}"#;
        let column: Column = serde_json::from_str(json).unwrap();

        assert_eq!(column.value_type, ValueType::String);
        assert!(column.starts_hidden);
        assert!(column.sortable);
    }
}

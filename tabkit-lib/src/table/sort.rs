//! Type-aware row ordering.
//!
//! Rows are ordered by a single column. Missing cells always go last, and
//! anything the primary comparison leaves equal falls back to the row
//! timestamp, most recent first. Neither rule depends on the direction.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use super::column::{Column, ValueType, find_column};
use crate::model::Record;
use crate::model::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// A cell reduced to the part its column type compares on.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Bool(bool),
    Number(f64),
    Text(String),
    Size(usize),
}

impl SortKey {
    /// Returns `None` when the cell is missing or unreadable as `value_type`.
    ///
    /// NaN has no place in a numeric order, so it counts as missing.
    fn extract(value: Option<Value>, value_type: ValueType) -> Option<Self> {
        let value = value?;
        match value_type {
            ValueType::Boolean => value.as_bool().map(Self::Bool),
            ValueType::Int | ValueType::Float => value
                .as_f64()
                .filter(|n| !n.is_nan())
                .map(Self::Number),
            ValueType::String => Some(Self::Text(value.to_string())),
            ValueType::Json => Some(Self::Size(json_size(&value))),
        }
    }

    /// Ascending comparison.
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            // true first
            (Self::Bool(a), Self::Bool(b)) => b.cmp(a),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Size(a), Self::Size(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Element count of a JSON cell: array length or object key count.
///
/// Strings count their characters; other scalars count as empty.
fn json_size(value: &Value) -> usize {
    match value {
        Value::Json(serde_json::Value::Array(items)) => items.len(),
        Value::Json(serde_json::Value::Object(map)) => map.len(),
        Value::String(s) => s.chars().count(),
        _ => 0,
    }
}

fn tie_break(a: &Record, b: &Record) -> Ordering {
    b.timestamp().total_cmp(&a.timestamp())
}

fn compare_keys(
    a: (&Option<SortKey>, &Record),
    b: (&Option<SortKey>, &Record),
    direction: SortDirection,
) -> Ordering {
    let primary = match (a.0, b.0) {
        (Some(ka), Some(kb)) => direction.apply(ka.compare(kb)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    primary.then_with(|| tie_break(a.1, b.1))
}

/// Compares two rows on one column.
pub fn compare_records(a: &Record, b: &Record, column: &Column, direction: SortDirection) -> Ordering {
    let ka = SortKey::extract(column.resolve(a), column.value_type);
    let kb = SortKey::extract(column.resolve(b), column.value_type);
    compare_keys((&ka, a), (&kb, b), direction)
}

/// Orders rows by the column whose accessor is `sort_key`.
///
/// Without a key, or with a key that names no column, the input order is
/// returned unchanged. The caller's slice is never reordered.
pub fn sort_rows<'a>(
    rows: &'a [Record],
    columns: &[Column],
    sort_key: Option<&str>,
    direction: SortDirection,
) -> Vec<&'a Record> {
    let Some(column) = sort_key.and_then(|key| find_column(columns, key)) else {
        return rows.iter().collect();
    };

    let mut keyed: Vec<(Option<SortKey>, &Record)> = rows
        .iter()
        .map(|row| (SortKey::extract(column.resolve(row), column.value_type), row))
        .collect();

    // Stable, so rows equal on value and timestamp keep input order
    keyed.sort_by(|a, b| compare_keys((&a.0, a.1), (&b.0, b.1), direction));

    log::trace!(
        "sorted {} rows by '{}' {:?}",
        keyed.len(),
        column.accessor,
        direction
    );

    keyed.into_iter().map(|(_, row)| row).collect()
}

//! Typed getter errors

use crate::model::Value;

/// Why a typed getter on a [`Record`](crate::model::Record) refused a field.
///
/// Getters only read top-level fields. Nested paths go through
/// [`Record::resolve`](crate::model::Record::resolve), which never errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// The row has no such field.
    #[error("Row has no field '{field}'")]
    Missing { field: String },

    /// The field holds another kind of value. `found` keeps the cell so
    /// callers can fall back to its display text.
    #[error("Field '{field}' holds {} '{found}', expected {expected}", .found.type_name())]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: Value,
    },
}

impl FieldError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &'static str, found: &Value) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            found: found.clone(),
        }
    }

    /// Top-level field name this error refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::TypeMismatch { field, .. } => field,
        }
    }
}

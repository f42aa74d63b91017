//! Column schema errors

/// Errors raised when a column list cannot back a table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Two columns declare the same accessor path.
    #[error("Duplicate column accessor '{accessor}'")]
    DuplicateAccessor { accessor: String },

    /// A column declares an empty accessor path.
    #[error("Column '{title}' has an empty accessor")]
    EmptyAccessor { title: String },
}

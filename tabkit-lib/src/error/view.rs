//! View state errors

/// Errors from the column visibility controller.
///
/// These are user-facing: the message is meant to be shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// The customization view was closed with every column hidden.
    #[error("Please select at least one column")]
    NoVisibleColumns,

    /// The accessor does not name a declared column.
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),
}

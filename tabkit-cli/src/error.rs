//! CLI error type

use std::path::PathBuf;

use tabkit_lib::error::{SchemaError, ViewError};

/// Everything that can stop a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid column schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("{0}")]
    View(#[from] ViewError),

    #[error("column '{0}' cannot be sorted")]
    NotSortable(String),

    #[error("invalid log level '{0}'")]
    LogLevel(String),
}

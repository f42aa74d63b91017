//! Subcommand implementations. Each returns the text to print.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use serde::de::DeserializeOwned;
use tabkit_lib::model::Record;
use tabkit_lib::table::{Column, CsvFormat, DisplayRow, QuotePolicy, Table};

use crate::error::CliError;

/// Which rows and columns to load, and how to order and filter them.
#[derive(Debug, Clone, Args)]
pub struct SelectionArgs {
    /// JSON array of row objects, each with an `id`
    #[arg(long)]
    pub rows: PathBuf,

    /// JSON array of column descriptors
    #[arg(long)]
    pub columns: PathBuf,

    /// Accessor of the column to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Show a column that starts hidden (repeatable)
    #[arg(long)]
    pub show: Vec<String>,

    /// Hide a column (repeatable)
    #[arg(long)]
    pub hide: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Newline-separated rows with standard quoting
    #[arg(long)]
    pub rfc4180: bool,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the table and apply the selection the way a user would: header
/// clicks for the sort, then the visibility checkboxes.
fn load_table(args: &SelectionArgs) -> Result<Table, CliError> {
    let columns: Vec<Column> = read_json(&args.columns)?;
    let rows: Vec<Record> = read_json(&args.rows)?;
    let mut table = Table::new(columns, rows)?;
    log::info!(
        "loaded {} rows from {}",
        table.len(),
        args.rows.display()
    );

    if let Some(key) = &args.sort {
        let clicks = if args.desc { 2 } else { 1 };
        for _ in 0..clicks {
            if !table.on_header_click(key) {
                return Err(CliError::NotSortable(key.clone()));
            }
        }
    }

    for key in &args.hide {
        table.state_mut().hide(key)?;
    }
    for key in &args.show {
        table.state_mut().show(key)?;
    }
    table.state().close_customization()?;

    Ok(table)
}

/// CSV of the selected columns. Rows keep their file order.
pub fn export(args: &ExportArgs, format: &CsvFormat) -> Result<String, CliError> {
    let table = load_table(&args.selection)?;
    let format = if args.rfc4180 {
        CsvFormat::rfc4180()
    } else {
        format.clone()
    };
    if format.quote_policy == QuotePolicy::CommaOnly {
        log::debug!("exporting with comma-only quoting");
    }
    Ok(table.to_csv_with(&format))
}

/// Row ids in sorted order, one per line.
pub fn sort(args: &SelectionArgs) -> Result<String, CliError> {
    let table = load_table(args)?;
    let lines: Vec<String> = table
        .display_rows()
        .into_iter()
        .map(|row| match row {
            DisplayRow::Record(record) => record.id().to_string(),
            DisplayRow::Placeholder => "(no rows)".to_string(),
        })
        .collect();
    Ok(lines.join("\n"))
}

//! tabkit - sort and export tabular JSON data from the command line.

mod commands;
mod error;
mod paths;
mod settings;

use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

use commands::{ExportArgs, SelectionArgs};
use error::CliError;
use settings::Settings;

#[derive(Parser)]
#[command(name = "tabkit")]
#[command(about = "Sort and export tabular JSON data")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to settings.json in the config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level, overriding the settings file
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the selected columns as CSV
    Export(ExportArgs),
    /// Print row ids in sorted order
    Sort(SelectionArgs),
}

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Log to `latest.log` in the cache directory, archiving the previous run.
fn init_logging(level: LevelFilter) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };

    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, Config::default(), file);
        }
        Err(e) => eprintln!("Warning: cannot open log file {}: {}", path.display(), e),
    }
}

/// Resolve settings and the log level.
///
/// An explicit `--config` file has to exist; the default one is optional.
fn load_settings(
    config: Option<PathBuf>,
    log_level: Option<String>,
) -> Result<(Settings, LevelFilter), CliError> {
    let settings = match config {
        Some(path) => Settings::load(&path)?,
        None => match paths::settings_file() {
            Some(path) => Settings::load_or_default(&path)?,
            None => Settings::default(),
        },
    };

    let settings = match log_level {
        Some(log_level) => Settings {
            log_level,
            ..settings
        },
        None => settings,
    };
    let level = settings.level_filter()?;
    Ok((settings, level))
}

fn run(cli: Cli) -> Result<String, CliError> {
    let (settings, level) = match load_settings(cli.config, cli.log_level) {
        Ok(loaded) => loaded,
        Err(e) => {
            // Logger goes up first so main can record the failure
            init_logging(DEFAULT_LOG_LEVEL);
            return Err(e);
        }
    };
    init_logging(level);

    match cli.command {
        Command::Export(args) => commands::export(&args, &settings.csv_format()),
        Command::Sort(args) => commands::sort(&args),
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

//! User settings loaded from `settings.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::LevelFilter;
use serde::Deserialize;
use serde::Serialize;
use tabkit_lib::table::{CsvFormat, QuotePolicy};

use crate::error::CliError;

/// Settings file contents. Every key is optional.
///
/// ```json
/// { "row_separator": "\n", "quote_policy": "rfc4180", "log_level": "debug" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Inserted between CSV lines.
    pub row_separator: String,
    pub quote_policy: QuotePolicy,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        let csv = CsvFormat::default();
        Self {
            row_separator: csv.row_separator,
            quote_policy: csv.quote_policy,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, which has to exist.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`Settings::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, CliError> {
        match Self::load(path) {
            Err(CliError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
                log::debug!("no settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn csv_format(&self) -> CsvFormat {
        CsvFormat {
            row_separator: self.row_separator.clone(),
            quote_policy: self.quote_policy,
        }
    }

    pub fn level_filter(&self) -> Result<LevelFilter, CliError> {
        self.log_level
            .parse()
            .map_err(|_| CliError::LogLevel(self.log_level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_or_default(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.csv_format(), CsvFormat::default());
        assert_eq!(settings.level_filter().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn test_load_requires_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::load(&dir.path().join("settings.json"));
        assert!(matches!(result, Err(CliError::Read { .. })));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"quote_policy": "rfc4180"}"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.quote_policy, QuotePolicy::Rfc4180);
        assert_eq!(settings.row_separator, "");
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_bad_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ nope").unwrap();

        assert!(matches!(Settings::load(&path), Err(CliError::Json { .. })));
    }

    #[test]
    fn test_bad_log_level() {
        let settings = Settings {
            log_level: "loud".into(),
            ..Settings::default()
        };
        assert!(matches!(settings.level_filter(), Err(CliError::LogLevel(_))));
    }
}

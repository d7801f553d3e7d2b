//! User settings loaded from `settings.toml`.
//!
//! Resolution order for every value: CLI flag, then the settings file, then
//! the built-in default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::CliError;

/// Settings file format.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub database: DatabaseSettings,
    pub import: ImportSettings,
    pub export: ExportSettings,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub(crate) struct DatabaseSettings {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub(crate) struct ImportSettings {
    /// Row errors shown after an import before the rest are elided.
    pub error_preview: usize,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self { error_preview: 5 }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub(crate) struct ExportSettings {
    pub separator: char,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self { separator: ',' }
    }
}

impl Settings {
    /// Load settings from the default location. A missing file yields defaults.
    pub(crate) fn load() -> Result<Self, CliError> {
        match settings_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| CliError::config(format!("{}: {}", path.display(), e)))
    }

    pub(crate) fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// The database to open: `--db` wins over the settings file.
    pub(crate) fn db_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.database.path.clone())
            .unwrap_or_else(default_db_path)
    }

    /// The export separator: `--separator` wins over the settings file.
    ///
    /// Only separators the importer can detect are accepted.
    pub(crate) fn separator(&self, flag: Option<char>) -> Result<char, CliError> {
        let separator = flag.unwrap_or(self.export.separator);
        if !vidcat_catalog::is_supported_separator(separator) {
            return Err(CliError::config(format!(
                "Export separator must be ',' or ';', got {:?}",
                separator
            )));
        }
        Ok(separator)
    }
}

/// Return the path to the settings file.
pub(crate) fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vidcat").join("settings.toml"))
}

/// Default catalog database location.
pub(crate) fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vidcat")
        .join("catalog.db")
}

//! YAML loading for human-curated seed data.
//!
//! Loads series, categories, and user accounts from a seed directory so a
//! fresh catalog can be populated without going through CSV imports.

use crate::types::{Series, User};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
}

/// Everything a seed directory can contain.
#[derive(Debug, Default)]
pub struct SeedData {
    pub series: Vec<Series>,
    pub categories: Vec<String>,
    pub users: Vec<User>,
}

impl SeedData {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty() && self.categories.is_empty() && self.users.is_empty()
    }
}

/// Load all seed data from the standard directory layout.
///
/// Expected structure (every file optional):
/// ```text
/// seed_dir/
///   series.yaml       # list of { title, description? }
///   categories.yaml   # list of names
///   users.yaml        # list of { email, client_name, role?, status? }
/// ```
pub fn load_seed(seed_dir: &Path) -> Result<SeedData, YamlError> {
    if !seed_dir.is_dir() {
        return Err(YamlError::DirNotFound(seed_dir.display().to_string()));
    }
    Ok(SeedData {
        series: load_list(&seed_dir.join("series.yaml"))?,
        categories: load_list(&seed_dir.join("categories.yaml"))?,
        users: load_list(&seed_dir.join("users.yaml"))?,
    })
}

/// Load a YAML sequence of `T` from a file. A missing file is an empty list.
pub fn load_list<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, YamlError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| YamlError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yml::from_str(&contents).map_err(|e| YamlError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

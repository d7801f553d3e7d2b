pub(crate) mod catalog;
pub(crate) mod categories;
pub(crate) mod config;
pub(crate) mod csv_import;
pub(crate) mod series;
pub(crate) mod users;
pub(crate) mod videos;

use std::path::Path;

use rusqlite::Connection;
use vidcat_catalog::csv_line::split_multi_value;

use crate::CliError;

/// Open (or create) the catalog database.
pub(crate) fn open_db(db_path: &Path) -> Result<Connection, CliError> {
    vidcat_db::open_database(db_path)
        .map_err(|e| CliError::database(format!("Failed to open catalog database: {}", e)))
}

/// Open the catalog database only if the file already exists.
///
/// Read-only commands use this so that browsing an unset location does not
/// leave an empty database behind.
pub(crate) fn open_existing_db(db_path: &Path) -> Result<Option<Connection>, CliError> {
    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'vidcat catalog seed <dir>' or an import to create one.");
        return Ok(None);
    }
    open_db(db_path).map(Some)
}

/// Split a user-supplied list on `,` or `|`, trimmed and de-duplicated.
pub(crate) fn split_names(list: &str) -> Vec<String> {
    split_multi_value(&list.replace(',', "|"))
}

/// Truncate a string to a maximum width in characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

/// Write `content` to `output`, or to stdout when no path is given.
pub(crate) fn write_output(output: Option<&Path>, content: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::other(format!("Failed to serialize output: {}", e)))?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_str("Intro", 10), "Intro");
        assert_eq!(truncate_str("Introducción a SAP", 10), "Introdu...");
        assert_eq!(truncate_str("abcdef", 3), "abc");
    }

    #[test]
    fn split_names_accepts_both_separators() {
        assert_eq!(
            split_names(" SAP, FIORI |Ventas,,SAP "),
            vec!["SAP", "FIORI", "Ventas"]
        );
        assert!(split_names(" , ").is_empty());
    }

    #[test]
    fn write_output_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("videos.csv");
        write_output(Some(&path), "a,b\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b\n");
    }
}

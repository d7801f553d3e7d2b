use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Show the most recent import batches, newest first.
pub(crate) fn run_catalog_imports(db_path: &Path, limit: u32) -> Result<(), CliError> {
    let Some(conn) = super::super::open_existing_db(db_path)? else {
        return Ok(());
    };

    let logs = vidcat_db::list_import_logs(&conn, Some(limit))
        .map_err(|e| CliError::database(format!("Failed to query import log: {}", e)))?;

    if logs.is_empty() {
        log::info!("No imports recorded.");
        return Ok(());
    }

    log::info!("{}", "Recent Imports".if_supports_color(Stdout, |t| t.bold()));
    crate::log_blank();
    for entry in &logs {
        let mark = if entry.errors == 0 {
            "\u{2714}".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            "\u{2718}".if_supports_color(Stdout, |t| t.red()).to_string()
        };
        let when = chrono::DateTime::parse_from_rfc3339(&entry.imported_at)
            .map(|t| {
                t.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
            })
            .unwrap_or_else(|_| entry.imported_at.clone());
        log::info!(
            "  {} {}  {:<6}  {:<30}  +{} ~{} -{}  {} error(s)",
            mark,
            when.if_supports_color(Stdout, |t| t.dimmed()),
            entry.kind,
            super::super::truncate_str(&entry.source_name, 30),
            entry.created,
            entry.updated,
            entry.deleted,
            entry.errors,
        );
    }

    Ok(())
}

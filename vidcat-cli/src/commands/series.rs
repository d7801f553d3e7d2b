use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use vidcat_db::OperationError;

use crate::CliError;

use super::{open_db, open_existing_db, truncate_str};

fn series_error(title: &str, e: OperationError) -> CliError {
    match e {
        OperationError::NotFound { .. } => CliError::not_found(format!("series '{}'", title)),
        OperationError::AlreadyExists { key, .. } => {
            CliError::other(format!("Series '{}' already exists", key))
        }
        e => CliError::database(e.to_string()),
    }
}

pub(crate) fn run_series_list(db_path: &Path) -> Result<(), CliError> {
    let Some(conn) = open_existing_db(db_path)? else {
        return Ok(());
    };
    let series = vidcat_db::list_series(&conn)
        .map_err(|e| CliError::database(format!("Failed to list series: {}", e)))?;

    if series.is_empty() {
        log::info!("No series defined.");
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{} series", series.len()).if_supports_color(Stdout, |t| t.bold()),
    );
    for s in &series {
        match s.description {
            Some(ref d) => log::info!(
                "  {:<30}  {}",
                s.title,
                truncate_str(d, 60).if_supports_color(Stdout, |t| t.dimmed()),
            ),
            None => log::info!("  {}", s.title),
        }
    }
    Ok(())
}

pub(crate) fn run_series_add(
    db_path: &Path,
    title: &str,
    description: Option<&str>,
) -> Result<(), CliError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CliError::other("Series title is required"));
    }
    let conn = open_db(db_path)?;
    vidcat_db::create_series(&conn, title, description).map_err(|e| series_error(title, e))?;
    log::info!(
        "{} Created series '{}'",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        title,
    );
    Ok(())
}

pub(crate) fn run_series_rename(
    db_path: &Path,
    old_title: &str,
    new_title: &str,
) -> Result<(), CliError> {
    let new_title = new_title.trim();
    if new_title.is_empty() {
        return Err(CliError::other("New series title is required"));
    }
    let conn = open_db(db_path)?;
    vidcat_db::rename_series(&conn, old_title, new_title)
        .map_err(|e| series_error(old_title, e))?;
    log::info!(
        "{} Renamed '{}' to '{}'",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        old_title,
        new_title,
    );
    Ok(())
}

pub(crate) fn run_series_delete(db_path: &Path, title: &str) -> Result<(), CliError> {
    let conn = open_db(db_path)?;
    let deleted =
        vidcat_db::delete_series(&conn, title).map_err(|e| CliError::database(e.to_string()))?;
    if !deleted {
        return Err(CliError::not_found(format!("series '{}'", title)));
    }
    log::info!(
        "{} Deleted series '{}'",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        title,
    );
    Ok(())
}

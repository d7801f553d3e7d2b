use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

pub(crate) fn run_catalog_stats(db_path: &Path, json: bool) -> Result<(), CliError> {
    let Some(conn) = super::super::open_existing_db(db_path)? else {
        return Ok(());
    };

    let stats = vidcat_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    if json {
        return super::super::print_json(&stats);
    }

    let size = std::fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    log::info!(
        "{}",
        "Catalog Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    log::info!("  Size:     {}", super::format_file_size(size));
    crate::log_blank();
    log::info!("  Videos:         {:>8}", stats.videos);
    log::info!("  Featured:       {:>8}", stats.featured);
    log::info!("  Series:         {:>8}", stats.series);
    log::info!("  Categories:     {:>8}", stats.categories);
    log::info!("  Users:          {:>8}", stats.users);
    log::info!("  Import batches: {:>8}", stats.imports);

    Ok(())
}

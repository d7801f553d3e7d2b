use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Delete the catalog database file.
pub(crate) fn run_catalog_reset(db_path: &Path, confirm: bool) -> Result<(), CliError> {
    if !confirm {
        log::warn!(
            "This will permanently delete the catalog database at:\n  {}",
            db_path.display(),
        );
        log::info!("Re-run with --confirm to proceed:");
        log::info!("  vidcat catalog reset --confirm");
        return Ok(());
    }

    if !db_path.exists() {
        log::info!("No catalog database found at {}", db_path.display());
        log::info!("Nothing to reset.");
        return Ok(());
    }

    let file_size = std::fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    std::fs::remove_file(db_path)
        .map_err(|e| CliError::other(format!("Failed to delete {}: {}", db_path.display(), e)))?;

    // WAL side files are recreated on the next open.
    for suffix in ["-wal", "-shm"] {
        let mut side = db_path.as_os_str().to_owned();
        side.push(suffix);
        let side = std::path::PathBuf::from(side);
        if side.exists() {
            if let Err(e) = std::fs::remove_file(&side) {
                log::warn!("Failed to delete {}: {}", side.display(), e);
            }
        }
    }

    log::info!(
        "{}",
        "Catalog database deleted.".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Path: {}", db_path.display());
    log::info!("  Freed: {}", super::format_file_size(file_size));
    crate::log_blank();
    log::info!("Run 'vidcat catalog seed <dir>' to start over.");

    Ok(())
}

use std::collections::HashMap;
use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{open_db, open_existing_db, split_names};

/// List every category with the number of videos tagged with it.
pub(crate) fn run_categories_list(db_path: &Path) -> Result<(), CliError> {
    let Some(conn) = open_existing_db(db_path)? else {
        return Ok(());
    };
    let categories = vidcat_db::list_categories(&conn)
        .map_err(|e| CliError::database(format!("Failed to list categories: {}", e)))?;
    let counts: HashMap<String, i64> = vidcat_db::category_counts(&conn)
        .map_err(|e| CliError::database(format!("Failed to count categories: {}", e)))?
        .into_iter()
        .map(|c| (c.name, c.videos))
        .collect();

    if categories.is_empty() {
        log::info!("No categories defined.");
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{} categories", categories.len()).if_supports_color(Stdout, |t| t.bold()),
    );
    for category in &categories {
        let videos = counts.get(&category.name).copied().unwrap_or(0);
        log::info!("  {:<30} {:>6}", category.name, videos);
    }
    Ok(())
}

/// Create categories from a comma-separated list. Existing names are skipped.
pub(crate) fn run_categories_add(db_path: &Path, names: &str) -> Result<(), CliError> {
    let names = split_names(names);
    if names.is_empty() {
        return Err(CliError::other("No category names given"));
    }

    let conn = open_db(db_path)?;
    let created = vidcat_db::create_categories_bulk(&conn, &names)
        .map_err(|e| CliError::database(format!("Failed to create categories: {}", e)))?;

    log::info!(
        "{} Created {} new categor{} ({} already existed)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        created,
        if created == 1 { "y" } else { "ies" },
        names.len() - created,
    );
    Ok(())
}

pub(crate) fn run_categories_delete(db_path: &Path, name: &str) -> Result<(), CliError> {
    let conn = open_db(db_path)?;
    let deleted = vidcat_db::delete_category(&conn, name)
        .map_err(|e| CliError::database(e.to_string()))?;
    if !deleted {
        return Err(CliError::not_found(format!("category '{}'", name)));
    }
    log::info!(
        "{} Deleted category '{}'",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        name,
    );
    Ok(())
}

use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Load series, categories, and users from a YAML seed directory.
pub(crate) fn run_catalog_seed(db_path: &Path, seed_dir: &Path) -> Result<(), CliError> {
    if !seed_dir.is_dir() {
        return Err(CliError::not_found(format!(
            "seed directory {}",
            seed_dir.display()
        )));
    }

    let conn = super::super::open_db(db_path)?;
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| CliError::database(e.to_string()))?;
    let stats = vidcat_db::seed_from_catalog(&tx, seed_dir)
        .map_err(|e| CliError::database(format!("Failed to seed catalog: {}", e)))?;
    tx.commit().map_err(|e| CliError::database(e.to_string()))?;

    log::info!(
        "{} Seeded {} series, {} new categories, {} users from {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.series,
        stats.categories,
        stats.users,
        seed_dir.display(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_and_reseeds() {
        let dir = tempfile::tempdir().unwrap();
        let seed_dir = dir.path().join("seed");
        std::fs::create_dir(&seed_dir).unwrap();
        std::fs::write(
            seed_dir.join("series.yaml"),
            "- title: Basics\n  description: Getting started\n",
        )
        .unwrap();
        std::fs::write(seed_dir.join("categories.yaml"), "- SAP\n- FIORI\n").unwrap();
        let db_path = dir.path().join("catalog.db");

        run_catalog_seed(&db_path, &seed_dir).unwrap();
        run_catalog_seed(&db_path, &seed_dir).unwrap();

        let conn = vidcat_db::open_database(&db_path).unwrap();
        assert_eq!(vidcat_db::list_series(&conn).unwrap().len(), 1);
        assert_eq!(vidcat_db::list_categories(&conn).unwrap().len(), 2);
    }

    #[test]
    fn missing_dir_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_catalog_seed(&dir.path().join("catalog.db"), &dir.path().join("nope"))
            .unwrap_err();
        assert!(matches!(err, CliError::NotFound(_)));
    }
}

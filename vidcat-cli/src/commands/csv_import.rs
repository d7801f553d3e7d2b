use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use vidcat_import::{ImportKind, ImportReport};

use crate::CliError;
use crate::progress::Reporter;
use crate::settings::Settings;

/// Import one CSV file of `kind` and report the outcome.
///
/// Row failures never fail the command; they are summarized, and the full
/// list goes to `error_log` when given.
pub(crate) fn run_csv_import(
    kind: ImportKind,
    db_path: &Path,
    file: &Path,
    error_log: Option<&Path>,
    settings: &Settings,
    quiet: bool,
) -> Result<(), CliError> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| CliError::csv(format!("Cannot read {}: {}", file.display(), e)))?;

    let conn = super::open_db(db_path)?;

    log::info!(
        "{}",
        format!("Importing {} from {}", kind.as_str(), file.display())
            .if_supports_color(Stdout, |t| t.bold()),
    );

    let reporter = Reporter::new(quiet);
    let progress = Some(reporter.as_progress());
    let report = match kind {
        ImportKind::Videos => vidcat_import::import_videos(&conn, &text, progress),
        ImportKind::Users => vidcat_import::import_users(&conn, &text, progress),
    }
    .map_err(|e| CliError::csv(format!("{}: {}", file.display(), e)))?;

    let source_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    if let Err(e) = vidcat_import::log_import(&conn, kind, &source_name, &report.stats) {
        log::warn!("Failed to record import log: {}", e);
    }

    print_report(&report, settings.import.error_preview);

    if let Some(path) = error_log {
        write_error_log(path, &report.errors)?;
        if !report.errors.is_empty() {
            log::info!("  Full error list written to {}", path.display());
        }
    } else if report.errors.len() > settings.import.error_preview {
        log::info!("  Re-run with --error-log <file> to see every error.");
    }

    Ok(())
}

fn print_report(report: &ImportReport, max_errors: usize) {
    let stats = &report.stats;
    let mark = if stats.errors == 0 {
        "\u{2714}".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "\u{2718}".if_supports_color(Stdout, |t| t.red()).to_string()
    };

    crate::log_blank();
    log::info!(
        "{} {} applied, {} failed",
        mark,
        stats.applied(),
        stats.errors,
    );
    for line in report.summary(max_errors).lines() {
        log::info!("  {}", line);
    }
}

fn write_error_log(path: &Path, errors: &[String]) -> Result<(), CliError> {
    let mut content = errors.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    super::write_output(Some(path), &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIDEOS_CSV: &str = "id,title,url,series,author,categories,action\n\
        ,Intro,https://vimeo.com/1,,,SAP,CREATE\n\
        ,Broken,,,,,CREATE\n";

    #[test]
    fn import_records_log_and_error_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("catalog.db");
        let csv_path = dir.path().join("videos.csv");
        let log_path = dir.path().join("errors.txt");
        std::fs::write(&csv_path, VIDEOS_CSV).unwrap();

        run_csv_import(
            ImportKind::Videos,
            &db_path,
            &csv_path,
            Some(&log_path),
            &Settings::default(),
            true,
        )
        .unwrap();

        let conn = vidcat_db::open_database(&db_path).unwrap();
        assert_eq!(vidcat_db::list_videos(&conn).unwrap().len(), 1);

        let logs = vidcat_db::list_import_logs(&conn, None).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].kind, "videos");
        assert_eq!(logs[0].source_name, "videos.csv");
        assert_eq!(logs[0].created, 1);
        assert_eq!(logs[0].errors, 1);

        let errors = std::fs::read_to_string(&log_path).unwrap();
        assert!(errors.starts_with("Fila 3: "));
        assert_eq!(errors.lines().count(), 1);
    }

    #[test]
    fn missing_file_is_a_csv_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_csv_import(
            ImportKind::Users,
            &dir.path().join("catalog.db"),
            &dir.path().join("nope.csv"),
            None,
            &Settings::default(),
            true,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Csv(_)));
    }
}

//! Bulk CSV import of videos and users.
//!
//! Rows are applied strictly in file order. Every row runs in its own
//! transaction: a row either lands completely or leaves no trace, and a
//! failing row never aborts the batch. Failures are counted and reported as
//! `"Fila {line}: {reason}"` where `line` is the 1-based physical line the
//! record starts on (the header is line 1).

use std::collections::HashMap;

use rusqlite::Connection;
use thiserror::Error;
use vidcat_catalog::csv_line::{detect_separator, parse_line, split_records};
use vidcat_catalog::types::*;
use vidcat_catalog::vimeo;
use vidcat_db::operations::{self, OperationError};
use vidcat_db::queries;

use crate::mapper::{MappingError, map_user_row, map_video_row};
use crate::progress::ImportProgress;

/// Author recorded for imported videos that do not name one.
pub const DEFAULT_AUTHOR: &str = "Admin";

/// Description recorded for videos created by an import.
pub const IMPORTED_DESCRIPTION: &str = "Imported via CSV";

/// Batch-fatal failures. Nothing has been written when one of these is returned.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Input is empty: expected a header line")]
    MissingHeader,
}

/// Why a single row was rejected. Always recovered at the row level.
#[derive(Debug, Error)]
pub enum RowError {
    /// The row could not be read into a record.
    #[error("{0}")]
    Parse(MappingError),
    /// The row was read but a value is missing or invalid.
    #[error("{0}")]
    Validation(MappingError),
    /// The natural key did not resolve (or already exists, for creates).
    #[error("{0}")]
    Lookup(String),
    /// The store rejected a write. The row was rolled back.
    #[error("{0}")]
    Persistence(#[from] OperationError),
}

impl From<MappingError> for RowError {
    fn from(e: MappingError) -> Self {
        if e.is_parse_error() {
            Self::Parse(e)
        } else {
            Self::Validation(e)
        }
    }
}

impl From<rusqlite::Error> for RowError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Persistence(OperationError::Sqlite(e))
    }
}

/// Which record layout a batch uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Videos,
    Users,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Videos => "videos",
            Self::Users => "users",
        }
    }
}

/// One data row after field splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    /// 1-based physical line the record starts on.
    pub line: usize,
    pub fields: Vec<String>,
}

/// Outcome of one import batch.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub stats: ImportStats,
    /// One entry per failed row, in file order.
    pub errors: Vec<String>,
}

impl ImportReport {
    /// Render the counters followed by at most `max_errors` error lines.
    pub fn summary(&self, max_errors: usize) -> String {
        let mut out = format!(
            "Created: {}\nUpdated: {}\nDeleted: {}\nErrors: {}",
            self.stats.created, self.stats.updated, self.stats.deleted, self.stats.errors
        );
        if !self.errors.is_empty() {
            out.push('\n');
            for error in self.errors.iter().take(max_errors) {
                out.push('\n');
                out.push_str(error);
            }
            if self.errors.len() > max_errors {
                out.push_str(&format!("\n... and {} more", self.errors.len() - max_errors));
            }
        }
        out
    }
}

/// Row effect, used to bump the matching counter.
enum Applied {
    Created,
    Updated,
    Deleted,
}

/// Split file contents into data rows.
///
/// The first non-blank record is the header: it is skipped and decides the
/// field separator (`;` if it contains one, else `,`).
pub fn parse_rows(text: &str) -> Result<Vec<ParsedRow>, ImportError> {
    let records = split_records(text);
    let (header, data) = records.split_first().ok_or(ImportError::MissingHeader)?;
    let separator = detect_separator(header.text);
    log::debug!("Detected separator '{}'", separator);

    Ok(data
        .iter()
        .map(|record| ParsedRow {
            line: record.line,
            fields: parse_line(record.text, separator),
        })
        .collect())
}

/// Import a video CSV file's contents.
pub fn import_videos(
    conn: &Connection,
    text: &str,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportReport, ImportError> {
    let rows = parse_rows(text)?;
    import_batch(conn, &rows, ImportKind::Videos, progress)
}

/// Import a user CSV file's contents.
pub fn import_users(
    conn: &Connection,
    text: &str,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportReport, ImportError> {
    let rows = parse_rows(text)?;
    import_batch(conn, &rows, ImportKind::Users, progress)
}

/// Apply parsed rows of one kind, in order.
pub fn import_batch(
    conn: &Connection,
    rows: &[ParsedRow],
    kind: ImportKind,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportReport, ImportError> {
    let mut report = ImportReport::default();
    let total = rows.len();

    // Series are resolved by exact title against a snapshot taken once per batch.
    let series: HashMap<String, String> = match kind {
        ImportKind::Videos => queries::list_series(conn)?
            .into_iter()
            .map(|s| (s.title, s.id))
            .collect(),
        ImportKind::Users => HashMap::new(),
    };

    if let Some(p) = progress {
        p.on_phase(&format!("Importing {} {} row(s)", total, kind.as_str()));
    }

    for (i, row) in rows.iter().enumerate() {
        let outcome = match kind {
            ImportKind::Videos => apply_video_row(conn, &row.fields, &series),
            ImportKind::Users => apply_user_row(conn, &row.fields),
        };

        match outcome {
            Ok(Applied::Created) => report.stats.created += 1,
            Ok(Applied::Updated) => report.stats.updated += 1,
            Ok(Applied::Deleted) => report.stats.deleted += 1,
            Err(e) => {
                let message = format!("Fila {}: {}", row.line, e);
                log::warn!("{}", message);
                report.stats.errors += 1;
                report.errors.push(message);
            }
        }

        if let Some(p) = progress {
            p.on_row(i + 1, total);
        }
    }

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Import finished: {} created, {} updated, {} deleted, {} error(s)",
            report.stats.created, report.stats.updated, report.stats.deleted, report.stats.errors
        ));
    }

    Ok(report)
}

/// Record a finished batch in the import log.
pub fn log_import(
    conn: &Connection,
    kind: ImportKind,
    source_name: &str,
    stats: &ImportStats,
) -> Result<i64, ImportError> {
    let now = chrono::Utc::now().to_rfc3339();
    let log_entry = ImportLog {
        id: 0,
        kind: kind.as_str().to_string(),
        source_name: source_name.to_string(),
        imported_at: now,
        created: stats.created as i64,
        updated: stats.updated as i64,
        deleted: stats.deleted as i64,
        errors: stats.errors as i64,
    };
    let id = operations::insert_import_log(conn, &log_entry)?;
    Ok(id)
}

// ── Videos ──────────────────────────────────────────────────────────────────

fn apply_video_row(
    conn: &Connection,
    fields: &[String],
    series: &HashMap<String, String>,
) -> Result<Applied, RowError> {
    let record = map_video_row(fields)?;
    let tx = conn.unchecked_transaction()?;
    let applied = apply_video_record(&tx, &record, series)?;
    tx.commit()?;
    Ok(applied)
}

fn apply_video_record(
    conn: &Connection,
    record: &VideoImportRecord,
    series: &HashMap<String, String>,
) -> Result<Applied, RowError> {
    let series_id = record
        .series_name
        .as_ref()
        .and_then(|name| series.get(name).cloned());
    if let (Some(name), None) = (&record.series_name, &series_id) {
        log::debug!("Series '{}' not found, video left unlinked", name);
    }

    match record.action {
        ImportAction::Delete => {
            let id = require_video(conn, record)?;
            operations::delete_video(conn, id)?;
            log::debug!("Deleted video {} ({})", id, record.title);
            Ok(Applied::Deleted)
        }
        ImportAction::Update => {
            let id = require_video(conn, record)?;
            let changes = VideoChanges {
                title: Some(record.title.clone()),
                url: Some(record.url.clone()),
                series_id: record.supplies(VideoColumn::Series).then_some(series_id),
                author: record
                    .author
                    .clone()
                    .filter(|_| record.supplies(VideoColumn::Author)),
                ..Default::default()
            };
            operations::update_video(conn, id, &changes)?;
            if record.supplies(VideoColumn::Categories) {
                operations::set_video_categories(conn, id, &record.categories)?;
            }
            log::debug!("Updated video {} ({})", id, record.title);
            Ok(Applied::Updated)
        }
        ImportAction::Create => {
            let new = NewVideo {
                title: record.title.clone(),
                url: record.url.clone(),
                description: Some(IMPORTED_DESCRIPTION.to_string()),
                author: record
                    .author
                    .clone()
                    .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
                thumbnail_url: Some(vimeo::thumbnail_url(&record.url, None)),
                series_id,
                ..Default::default()
            };
            let id = operations::insert_video(conn, &new)?;
            if !record.categories.is_empty() {
                operations::set_video_categories(conn, &id, &record.categories)?;
            }
            log::debug!("Created video {} ({})", id, record.title);
            Ok(Applied::Created)
        }
    }
}

/// The record's id, provided it names an existing video.
fn require_video<'a>(
    conn: &Connection,
    record: &'a VideoImportRecord,
) -> Result<&'a str, RowError> {
    let id = record
        .id
        .as_deref()
        .ok_or(RowError::Validation(MappingError::MissingId(record.action)))?;
    if !operations::video_exists(conn, id)? {
        return Err(RowError::Lookup(format!("Video '{}' not found", id)));
    }
    Ok(id)
}

// ── Users ───────────────────────────────────────────────────────────────────

fn apply_user_row(conn: &Connection, fields: &[String]) -> Result<Applied, RowError> {
    let record = map_user_row(fields)?;
    let tx = conn.unchecked_transaction()?;
    let applied = apply_user_record(&tx, &record)?;
    tx.commit()?;
    Ok(applied)
}

fn apply_user_record(conn: &Connection, record: &UserImportRecord) -> Result<Applied, RowError> {
    let existing = operations::find_user_by_email(conn, &record.email)?;

    match (record.action, existing) {
        (ImportAction::Delete, Some(user)) => {
            operations::delete_user(conn, &user.id)?;
            log::debug!("Deleted user {}", record.email);
            Ok(Applied::Deleted)
        }
        (ImportAction::Update, Some(user)) => {
            operations::update_user(conn, &user.id, &record.client_name, record.role)?;
            log::debug!("Updated user {}", record.email);
            Ok(Applied::Updated)
        }
        (ImportAction::Delete | ImportAction::Update, None) => Err(RowError::Lookup(format!(
            "User '{}' not found",
            record.email
        ))),
        (ImportAction::Create, Some(_)) => Err(RowError::Lookup(format!(
            "User '{}' already exists",
            record.email
        ))),
        (ImportAction::Create, None) => {
            operations::create_user(
                conn,
                &record.email,
                &record.client_name,
                record.role,
                UserStatus::Pending,
            )?;
            log::debug!("Created user {}", record.email);
            Ok(Applied::Created)
        }
    }
}

//! Map parsed CSV fields onto typed import records.
//!
//! Columns are positional (see [`VIDEO_CSV_HEADER`] and [`USER_CSV_HEADER`]).
//! Short rows are accepted as long as they reach the record's minimum length;
//! missing trailing columns read as empty.

use thiserror::Error;
use vidcat_catalog::csv_line::split_multi_value;
use vidcat_catalog::types::*;

/// Fewest columns a video row may have (id, title).
pub const VIDEO_MIN_COLUMNS: usize = 2;

/// Fewest columns a user row may have (email, client, role).
pub const USER_MIN_COLUMNS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("Insufficient data: {found} column(s), at least {minimum} required")]
    TooFewColumns { found: usize, minimum: usize },
    #[error("Empty {0}")]
    MissingField(&'static str),
    #[error("{0} requires an id")]
    MissingId(ImportAction),
    #[error("Invalid role '{0}' (expected ADMIN or CLIENT)")]
    InvalidRole(String),
}

impl MappingError {
    /// True for structural failures (the row could not be read at all), as
    /// opposed to rows that were read but carry invalid values.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::TooFewColumns { .. })
    }
}

/// Column value, or "" when the row stops short of it.
fn column<S: AsRef<str>>(fields: &[S], index: usize) -> &str {
    fields.get(index).map(|f| f.as_ref().trim()).unwrap_or("")
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Map one parsed video row.
pub fn map_video_row<S: AsRef<str>>(fields: &[S]) -> Result<VideoImportRecord, MappingError> {
    if fields.len() < VIDEO_MIN_COLUMNS {
        return Err(MappingError::TooFewColumns {
            found: fields.len(),
            minimum: VIDEO_MIN_COLUMNS,
        });
    }

    let id = non_empty(column(fields, VideoColumn::Id as usize));
    let title = column(fields, VideoColumn::Title as usize);
    let url = column(fields, VideoColumn::Url as usize);
    let action = ImportAction::from_str_loose(column(fields, VideoColumn::Action as usize));

    if action != ImportAction::Delete {
        if title.is_empty() {
            return Err(MappingError::MissingField("title"));
        }
        if url.is_empty() {
            return Err(MappingError::MissingField("url"));
        }
    }
    if action != ImportAction::Create && id.is_none() {
        return Err(MappingError::MissingId(action));
    }

    Ok(VideoImportRecord {
        id,
        title: title.to_string(),
        url: url.to_string(),
        series_name: non_empty(column(fields, VideoColumn::Series as usize)),
        author: non_empty(column(fields, VideoColumn::Author as usize)),
        categories: split_multi_value(column(fields, VideoColumn::Categories as usize)),
        action,
        columns: fields.len(),
    })
}

/// Map one parsed user row.
pub fn map_user_row<S: AsRef<str>>(fields: &[S]) -> Result<UserImportRecord, MappingError> {
    if fields.len() < USER_MIN_COLUMNS {
        return Err(MappingError::TooFewColumns {
            found: fields.len(),
            minimum: USER_MIN_COLUMNS,
        });
    }

    let email = column(fields, 0);
    let client_name = column(fields, 1);
    let role = column(fields, 2);
    if email.is_empty() {
        return Err(MappingError::MissingField("email"));
    }
    if client_name.is_empty() {
        return Err(MappingError::MissingField("client"));
    }
    if role.is_empty() {
        return Err(MappingError::MissingField("role"));
    }
    let role = Role::parse(role).ok_or_else(|| MappingError::InvalidRole(role.to_string()))?;

    Ok(UserImportRecord {
        email: email.to_string(),
        client_name: client_name.to_string(),
        role,
        action: ImportAction::from_str_loose(column(fields, 3)),
    })
}

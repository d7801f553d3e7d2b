//! CRUD operations for all catalog entity types.
//!
//! Every function takes a plain `&Connection`; callers that need several
//! statements to succeed or fail together wrap them in a transaction and pass
//! the transaction (which derefs to a connection).

use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;
use vidcat_catalog::types::*;
use vidcat_catalog::yaml::YamlError;

use crate::queries::{VIDEO_COLUMNS, row_to_user, row_to_video};

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
    #[error("{entity_type} '{key}' already exists")]
    AlreadyExists { entity_type: String, key: String },
    #[error("Seed data error: {0}")]
    Seed(#[from] YamlError),
}

impl OperationError {
    fn not_found(entity_type: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.into(),
        }
    }

    fn already_exists(entity_type: &str, key: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type: entity_type.to_string(),
            key: key.into(),
        }
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ── Video Operations ────────────────────────────────────────────────────────

/// Insert a new video. Returns the generated ID.
pub fn insert_video(conn: &Connection, video: &NewVideo) -> Result<String, OperationError> {
    let id = new_id();
    conn.execute(
        "INSERT INTO videos (id, title, description, url, thumbnail_url, duration, author,
             featured, success_story, series_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            id,
            video.title,
            video.description,
            video.url,
            video.thumbnail_url,
            video.duration,
            video.author,
            video.featured,
            video.success_story,
            video.series_id,
        ],
    )?;
    Ok(id)
}

/// Find a video by ID.
pub fn find_video(conn: &Connection, id: &str) -> Result<Option<Video>, OperationError> {
    let mut stmt = conn.prepare(&format!("SELECT {VIDEO_COLUMNS} FROM videos v WHERE v.id = ?1"))?;
    stmt.query_row(params![id], row_to_video)
        .optional()
        .map_err(Into::into)
}

/// Apply a partial update. Columns left as `None` in `changes` are untouched.
///
/// Fails with `NotFound` if no video has this ID, even when `changes` is empty.
pub fn update_video(
    conn: &Connection,
    id: &str,
    changes: &VideoChanges,
) -> Result<(), OperationError> {
    let mut sets: Vec<&str> = Vec::new();
    let mut values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if let Some(ref v) = changes.title {
        sets.push("title");
        values.push(Box::new(v.clone()));
    }
    if let Some(ref v) = changes.url {
        sets.push("url");
        values.push(Box::new(v.clone()));
    }
    if let Some(ref v) = changes.description {
        sets.push("description");
        values.push(Box::new(v.clone()));
    }
    if let Some(ref v) = changes.author {
        sets.push("author");
        values.push(Box::new(v.clone()));
    }
    if let Some(ref v) = changes.thumbnail_url {
        sets.push("thumbnail_url");
        values.push(Box::new(v.clone()));
    }
    if let Some(ref v) = changes.series_id {
        sets.push("series_id");
        values.push(Box::new(v.clone()));
    }
    if let Some(v) = changes.featured {
        sets.push("featured");
        values.push(Box::new(v));
    }
    if let Some(v) = changes.success_story {
        sets.push("success_story");
        values.push(Box::new(v));
    }

    if sets.is_empty() {
        return if video_exists(conn, id)? {
            Ok(())
        } else {
            Err(OperationError::not_found("video", id))
        };
    }

    let assignments: Vec<String> = sets
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{col} = ?{}", i + 2))
        .collect();
    let sql = format!(
        "UPDATE videos SET {}, updated_at = datetime('now') WHERE id = ?1",
        assignments.join(", ")
    );

    let mut params: Vec<&dyn rusqlite::types::ToSql> = vec![&id];
    params.extend(values.iter().map(|v| v.as_ref()));

    let changed = conn.execute(&sql, params.as_slice())?;
    if changed == 0 {
        return Err(OperationError::not_found("video", id));
    }
    Ok(())
}

/// Delete a video. Category links cascade.
pub fn delete_video(conn: &Connection, id: &str) -> Result<(), OperationError> {
    let changed = conn.execute("DELETE FROM videos WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(OperationError::not_found("video", id));
    }
    Ok(())
}

pub fn video_exists(conn: &Connection, id: &str) -> Result<bool, OperationError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM videos WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Set the featured flag on a video.
pub fn set_featured(conn: &Connection, id: &str, featured: bool) -> Result<(), OperationError> {
    update_video(
        conn,
        id,
        &VideoChanges {
            featured: Some(featured),
            ..Default::default()
        },
    )
}

/// Flip the featured flag. Returns the new value.
pub fn toggle_featured(conn: &Connection, id: &str) -> Result<bool, OperationError> {
    let video = find_video(conn, id)?.ok_or_else(|| OperationError::not_found("video", id))?;
    let featured = !video.featured;
    set_featured(conn, id, featured)?;
    Ok(featured)
}

// ── Category Operations ─────────────────────────────────────────────────────

/// Find a category ID by exact name.
pub fn find_category_by_name(
    conn: &Connection,
    name: &str,
) -> Result<Option<String>, OperationError> {
    conn.query_row(
        "SELECT id FROM categories WHERE name = ?1",
        params![name],
        |row| row.get::<_, String>(0),
    )
    .optional()
    .map_err(Into::into)
}

/// Return the ID of the category with this exact name, creating it first
/// if it does not exist yet.
pub fn find_or_create_category(conn: &Connection, name: &str) -> Result<String, OperationError> {
    if let Some(id) = find_category_by_name(conn, name)? {
        return Ok(id);
    }
    let id = new_id();
    conn.execute(
        "INSERT INTO categories (id, name) VALUES (?1, ?2)",
        params![id, name],
    )?;
    log::debug!("Created category '{}'", name);
    Ok(id)
}

/// Replace the full set of categories linked to a video.
///
/// Existing links are deleted and each name is re-linked through
/// [`find_or_create_category`].
pub fn set_video_categories<S: AsRef<str>>(
    conn: &Connection,
    video_id: &str,
    names: &[S],
) -> Result<(), OperationError> {
    conn.execute(
        "DELETE FROM video_categories WHERE video_id = ?1",
        params![video_id],
    )?;
    for name in names {
        let category_id = find_or_create_category(conn, name.as_ref())?;
        conn.execute(
            "INSERT OR IGNORE INTO video_categories (video_id, category_id) VALUES (?1, ?2)",
            params![video_id, category_id],
        )?;
    }
    Ok(())
}

/// Create every missing category from `names`. Returns how many were new.
pub fn create_categories_bulk<S: AsRef<str>>(
    conn: &Connection,
    names: &[S],
) -> Result<usize, OperationError> {
    let mut created = 0;
    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() || find_category_by_name(conn, name)?.is_some() {
            continue;
        }
        find_or_create_category(conn, name)?;
        created += 1;
    }
    Ok(created)
}

/// Delete a category by name, unlinking it from every video.
///
/// Returns `false` if no category had that name.
pub fn delete_category(conn: &Connection, name: &str) -> Result<bool, OperationError> {
    let changed = conn.execute("DELETE FROM categories WHERE name = ?1", params![name])?;
    Ok(changed > 0)
}

// ── Series Operations ───────────────────────────────────────────────────────

/// Create a series. Titles are unique.
pub fn create_series(
    conn: &Connection,
    title: &str,
    description: Option<&str>,
) -> Result<String, OperationError> {
    if find_series_by_title(conn, title)?.is_some() {
        return Err(OperationError::already_exists("series", title));
    }
    let id = new_id();
    conn.execute(
        "INSERT INTO series (id, title, description) VALUES (?1, ?2, ?3)",
        params![id, title, description],
    )?;
    Ok(id)
}

/// Find a series by exact title.
pub fn find_series_by_title(
    conn: &Connection,
    title: &str,
) -> Result<Option<Series>, OperationError> {
    conn.query_row(
        "SELECT id, title, description, created_at FROM series WHERE title = ?1",
        params![title],
        |row| {
            Ok(Series {
                id: row.get(0)?,
                title: row.get(1)?,
                description: row.get(2)?,
                created_at: row.get(3)?,
            })
        },
    )
    .optional()
    .map_err(Into::into)
}

/// Rename a series, keeping its video links.
pub fn rename_series(
    conn: &Connection,
    old_title: &str,
    new_title: &str,
) -> Result<(), OperationError> {
    let series = find_series_by_title(conn, old_title)?
        .ok_or_else(|| OperationError::not_found("series", old_title))?;
    if old_title != new_title && find_series_by_title(conn, new_title)?.is_some() {
        return Err(OperationError::already_exists("series", new_title));
    }
    conn.execute(
        "UPDATE series SET title = ?2 WHERE id = ?1",
        params![series.id, new_title],
    )?;
    Ok(())
}

/// Delete a series by title. Its videos stay, without a series link.
///
/// Returns `false` if no series had that title.
pub fn delete_series(conn: &Connection, title: &str) -> Result<bool, OperationError> {
    let changed = conn.execute("DELETE FROM series WHERE title = ?1", params![title])?;
    Ok(changed > 0)
}

// ── User Operations ─────────────────────────────────────────────────────────

/// Create a user account. Emails are unique.
pub fn create_user(
    conn: &Connection,
    email: &str,
    client_name: &str,
    role: Role,
    status: UserStatus,
) -> Result<String, OperationError> {
    if find_user_by_email(conn, email)?.is_some() {
        return Err(OperationError::already_exists("user", email));
    }
    let id = new_id();
    conn.execute(
        "INSERT INTO users (id, email, role, client_name, status) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, email, role.as_str(), client_name, status.as_str()],
    )?;
    Ok(id)
}

/// Find a user by email (exact match).
pub fn find_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>, OperationError> {
    conn.query_row(
        "SELECT id, email, role, client_name, status, accepted_terms, created_at
         FROM users WHERE email = ?1",
        params![email],
        row_to_user,
    )
    .optional()
    .map_err(Into::into)
}

/// Update the client name and role of a user.
pub fn update_user(
    conn: &Connection,
    id: &str,
    client_name: &str,
    role: Role,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE users SET client_name = ?2, role = ?3 WHERE id = ?1",
        params![id, client_name, role.as_str()],
    )?;
    if changed == 0 {
        return Err(OperationError::not_found("user", id));
    }
    Ok(())
}

/// Change a user's lifecycle status.
pub fn set_user_status(
    conn: &Connection,
    id: &str,
    status: UserStatus,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE users SET status = ?2 WHERE id = ?1",
        params![id, status.as_str()],
    )?;
    if changed == 0 {
        return Err(OperationError::not_found("user", id));
    }
    Ok(())
}

/// Delete a user by ID.
pub fn delete_user(conn: &Connection, id: &str) -> Result<(), OperationError> {
    let changed = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(OperationError::not_found("user", id));
    }
    Ok(())
}

// ── Import Log Operations ───────────────────────────────────────────────────

/// Insert an import log entry. Returns the generated ID.
pub fn insert_import_log(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (kind, source_name, imported_at, created, updated, deleted, errors)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            log.kind,
            log.source_name,
            log.imported_at,
            log.created,
            log.updated,
            log.deleted,
            log.errors,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Seed Loading ────────────────────────────────────────────────────────────

/// Load YAML seed data into the database.
///
/// Series and categories are created when missing; users are upserted by
/// email. Safe to call repeatedly.
pub fn seed_from_catalog(
    conn: &Connection,
    seed_dir: &std::path::Path,
) -> Result<SeedStats, OperationError> {
    let seed = vidcat_catalog::yaml::load_seed(seed_dir)?;
    if seed.is_empty() {
        log::warn!("No seed data found in {}", seed_dir.display());
    }
    let mut stats = SeedStats::default();

    for series in &seed.series {
        let title = series.title.trim();
        if title.is_empty() {
            log::warn!("Skipping seed series with a blank title");
            continue;
        }
        let description = series
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());
        match find_series_by_title(conn, title)? {
            Some(existing) => {
                if description.is_some() && description != existing.description.as_deref() {
                    conn.execute(
                        "UPDATE series SET description = ?2 WHERE id = ?1",
                        params![existing.id, description],
                    )?;
                }
            }
            None => {
                create_series(conn, title, description)?;
            }
        }
        stats.series += 1;
    }

    stats.categories += create_categories_bulk(conn, &seed.categories)?;

    for user in &seed.users {
        let email = user.email.trim();
        let client_name = user.client_name.trim();
        if email.is_empty() {
            log::warn!("Skipping seed user with a blank email");
            continue;
        }
        conn.execute(
            "INSERT INTO users (id, email, role, client_name, status, accepted_terms)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(email) DO UPDATE SET
                 role = excluded.role,
                 client_name = excluded.client_name,
                 status = excluded.status",
            params![
                new_id(),
                email,
                user.role.as_str(),
                client_name,
                user.status.as_str(),
                user.accepted_terms,
            ],
        )?;
        stats.users += 1;
    }

    Ok(stats)
}

/// Statistics from seeding the database.
#[derive(Debug, Default)]
pub struct SeedStats {
    /// Series present in the seed (created or refreshed).
    pub series: usize,
    /// Categories that did not exist before.
    pub categories: usize,
    /// Users present in the seed (created or refreshed).
    pub users: usize,
}

//! Read queries for the catalog database.
//!
//! Provides the joined video listing, browse/search filtering, and the
//! series, category, user, and import-log listings.

use std::collections::HashMap;

use rusqlite::{params, Connection, OptionalExtension};
use vidcat_catalog::types::*;

use crate::operations::OperationError;

/// Column list for `row_to_video`, qualified for a `videos v` alias.
pub(crate) const VIDEO_COLUMNS: &str = "v.id, v.title, v.description, v.url, v.thumbnail_url,
    v.duration, v.author, v.featured, v.success_story, v.series_id, v.views,
    v.created_at, v.updated_at";

// ── Video Listings ──────────────────────────────────────────────────────────

/// List every video with its categories and series title, newest first.
pub fn list_videos(conn: &Connection) -> Result<Vec<VideoEntry>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {VIDEO_COLUMNS}, s.title
         FROM videos v LEFT JOIN series s ON s.id = v.series_id
         ORDER BY v.created_at DESC, v.rowid DESC"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok((row_to_video(row)?, row.get::<_, Option<String>>(13)?))
    })?;
    let videos = rows.collect::<Result<Vec<_>, _>>()?;

    let mut categories = categories_by_video(conn)?;
    Ok(videos
        .into_iter()
        .map(|(video, series)| VideoEntry {
            categories: categories.remove(&video.id).unwrap_or_default(),
            video,
            series,
        })
        .collect())
}

/// Fetch a single video with its categories and series title.
pub fn video_entry(conn: &Connection, id: &str) -> Result<Option<VideoEntry>, OperationError> {
    let found = conn
        .query_row(
            &format!(
                "SELECT {VIDEO_COLUMNS}, s.title
                 FROM videos v LEFT JOIN series s ON s.id = v.series_id
                 WHERE v.id = ?1"
            ),
            params![id],
            |row| Ok((row_to_video(row)?, row.get::<_, Option<String>>(13)?)),
        )
        .optional()?;

    let Some((video, series)) = found else {
        return Ok(None);
    };
    let categories = categories_for_video(conn, &video.id)?;
    Ok(Some(VideoEntry {
        video,
        categories,
        series,
    }))
}

/// Category names linked to one video, sorted by name.
pub fn categories_for_video(
    conn: &Connection,
    video_id: &str,
) -> Result<Vec<String>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT c.name FROM video_categories vc
         JOIN categories c ON c.id = vc.category_id
         WHERE vc.video_id = ?1 ORDER BY c.name",
    )?;
    let rows = stmt.query_map(params![video_id], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// All category links in one pass, keyed by video ID.
fn categories_by_video(conn: &Connection) -> Result<HashMap<String, Vec<String>>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT vc.video_id, c.name FROM video_categories vc
         JOIN categories c ON c.id = vc.category_id
         ORDER BY c.name",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for row in rows {
        let (video_id, name) = row?;
        map.entry(video_id).or_default().push(name);
    }
    Ok(map)
}

/// Browse/search criteria for [`search_videos`]. Empty criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct VideoFilter {
    /// Case-insensitive substring matched against title and description.
    pub text: Option<String>,
    /// Exact category name.
    pub category: Option<String>,
    /// Exact series title.
    pub series: Option<String>,
    pub featured: Option<bool>,
    pub success_story: Option<bool>,
    pub limit: Option<usize>,
}

impl VideoFilter {
    /// Whether an entry passes every criterion.
    pub fn matches(&self, entry: &VideoEntry) -> bool {
        if let Some(text) = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let needle = text.to_lowercase();
            let in_title = entry.video.title.to_lowercase().contains(&needle);
            let in_description = entry
                .video
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if !entry.categories.iter().any(|c| c == category) {
                return false;
            }
        }
        if let Some(ref series) = self.series {
            if entry.series.as_deref() != Some(series.as_str()) {
                return false;
            }
        }
        if self.featured.is_some_and(|f| f != entry.video.featured) {
            return false;
        }
        if self
            .success_story
            .is_some_and(|s| s != entry.video.success_story)
        {
            return false;
        }
        true
    }
}

/// Videos matching `filter`, newest first.
pub fn search_videos(
    conn: &Connection,
    filter: &VideoFilter,
) -> Result<Vec<VideoEntry>, OperationError> {
    let matched = list_videos(conn)?
        .into_iter()
        .filter(|entry| filter.matches(entry));
    Ok(match filter.limit {
        Some(limit) => matched.take(limit).collect(),
        None => matched.collect(),
    })
}

// ── Series & Category Queries ───────────────────────────────────────────────

/// List all series, ordered by title.
pub fn list_series(conn: &Connection) -> Result<Vec<Series>, OperationError> {
    let mut stmt =
        conn.prepare("SELECT id, title, description, created_at FROM series ORDER BY title")?;
    let rows = stmt.query_map([], |row| {
        Ok(Series {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            created_at: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List all categories, ordered by name.
pub fn list_categories(conn: &Connection) -> Result<Vec<Category>, OperationError> {
    let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY name")?;
    let rows = stmt.query_map([], |row| {
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Categories that have at least one video, with their video counts.
pub fn category_counts(conn: &Connection) -> Result<Vec<CategoryCount>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT c.name, COUNT(vc.video_id) FROM categories c
         JOIN video_categories vc ON vc.category_id = c.id
         GROUP BY c.id ORDER BY c.name",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(CategoryCount {
            name: row.get(0)?,
            videos: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── User Queries ────────────────────────────────────────────────────────────

/// Criteria for [`list_users`].
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Case-insensitive substring matched against email and client name.
    pub text: Option<String>,
    pub role: Option<Role>,
}

/// List users, newest first.
pub fn list_users(conn: &Connection, filter: &UserFilter) -> Result<Vec<User>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, email, role, client_name, status, accepted_terms, created_at
         FROM users ORDER BY created_at DESC, rowid DESC",
    )?;
    let rows = stmt.query_map([], row_to_user)?;
    let users = rows.collect::<Result<Vec<_>, _>>()?;

    let needle = filter
        .text
        .as_deref()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty());
    Ok(users
        .into_iter()
        .filter(|u| filter.role.is_none_or(|r| r == u.role))
        .filter(|u| {
            needle.as_ref().is_none_or(|n| {
                u.email.to_lowercase().contains(n) || u.client_name.to_lowercase().contains(n)
            })
        })
        .collect())
}

// ── Import Log Queries ──────────────────────────────────────────────────────

/// List recent import logs.
pub fn list_import_logs(
    conn: &Connection,
    limit: Option<u32>,
) -> Result<Vec<ImportLog>, OperationError> {
    let limit = limit.unwrap_or(20);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, kind, source_name, imported_at, created, updated, deleted, errors
         FROM import_log ORDER BY imported_at DESC, id DESC LIMIT {limit}"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            kind: row.get(1)?,
            source_name: row.get(2)?,
            imported_at: row.get(3)?,
            created: row.get(4)?,
            updated: row.get(5)?,
            deleted: row.get(6)?,
            errors: row.get(7)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get overall catalog statistics.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let videos: i64 = conn.query_row("SELECT COUNT(*) FROM videos", [], |r| r.get(0))?;
    let featured: i64 = conn.query_row(
        "SELECT COUNT(*) FROM videos WHERE featured = 1",
        [],
        |r| r.get(0),
    )?;
    let series: i64 = conn.query_row("SELECT COUNT(*) FROM series", [], |r| r.get(0))?;
    let categories: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
    let users: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?;
    let imports: i64 = conn.query_row("SELECT COUNT(*) FROM import_log", [], |r| r.get(0))?;

    Ok(CatalogStats {
        videos,
        featured,
        series,
        categories,
        users,
        imports,
    })
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

pub(crate) fn row_to_video(row: &rusqlite::Row<'_>) -> rusqlite::Result<Video> {
    Ok(Video {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        url: row.get(3)?,
        thumbnail_url: row.get(4)?,
        duration: row.get(5)?,
        author: row.get(6)?,
        featured: row.get(7)?,
        success_story: row.get(8)?,
        series_id: row.get(9)?,
        views: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

pub(crate) fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let role: String = row.get(2)?;
    let status: String = row.get(4)?;
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        role: Role::parse(&role).unwrap_or_default(),
        client_name: row.get(3)?,
        status: UserStatus::from_str_loose(&status),
        accepted_terms: row.get(5)?,
        created_at: row.get(6)?,
    })
}

//! Data model types for the video catalog.
//!
//! These types represent the persistent catalog schema: videos, series,
//! categories, users, and import tracking. The transient CSV import records
//! live here too so that the mapper, importer, and exporter share one model.

use serde::{Deserialize, Serialize};

// ── Video ───────────────────────────────────────────────────────────────────

/// A catalog video as stored in the `videos` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Embeddable third-party URL (Vimeo).
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Display duration, "MM:SS".
    #[serde(default)]
    pub duration: Option<String>,
    pub author: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub success_story: bool,
    #[serde(default)]
    pub series_id: Option<String>,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// A video joined with its category names and series title.
///
/// This is the shape listings display and the exporter serializes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoEntry {
    #[serde(flatten)]
    pub video: Video,
    /// Category names, sorted by name.
    pub categories: Vec<String>,
    pub series: Option<String>,
}

/// Fields for a new video. The id is generated at insert time.
#[derive(Debug, Clone, Default)]
pub struct NewVideo {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub author: String,
    pub thumbnail_url: Option<String>,
    pub duration: Option<String>,
    pub featured: bool,
    pub success_story: bool,
    pub series_id: Option<String>,
}

/// A partial update to a video. `None` leaves the column untouched.
///
/// `series_id` is doubly optional: `Some(None)` clears the series link.
#[derive(Debug, Clone, Default)]
pub struct VideoChanges {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub thumbnail_url: Option<String>,
    pub series_id: Option<Option<String>>,
    pub featured: Option<bool>,
    pub success_story: Option<bool>,
}

impl VideoChanges {
    /// True when no column would be written.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.author.is_none()
            && self.thumbnail_url.is_none()
            && self.series_id.is_none()
            && self.featured.is_none()
            && self.success_story.is_none()
    }
}

// ── Series & Category ───────────────────────────────────────────────────────

/// A named series grouping related videos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

/// A category tag. Names are unique and matched exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A category name with the number of videos linked to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub videos: i64,
}

// ── User ────────────────────────────────────────────────────────────────────

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    #[default]
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Client => "CLIENT",
        }
    }

    /// Parse a role name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Self::Admin),
            "CLIENT" => Some(Self::Client),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserStatus {
    Active,
    #[default]
    Pending,
    Disabled,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Pending => "PENDING",
            Self::Disabled => "DISABLED",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" | "ACTIVO" => Self::Active,
            "DISABLED" | "BAJA" => Self::Disabled,
            _ => Self::Pending,
        }
    }
}

/// A portal account. `email` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    pub client_name: String,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub accepted_terms: bool,
    #[serde(default)]
    pub created_at: String,
}

// ── Import Tracking ─────────────────────────────────────────────────────────

/// Log entry for one CSV import batch.
#[derive(Debug, Clone, Serialize)]
pub struct ImportLog {
    pub id: i64,
    /// "videos" or "users".
    pub kind: String,
    pub source_name: String,
    pub imported_at: String,
    pub created: i64,
    pub updated: i64,
    pub deleted: i64,
    pub errors: i64,
}

// ── CSV Import Records ──────────────────────────────────────────────────────

/// What a CSV row asks the importer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportAction {
    #[default]
    Create,
    Update,
    Delete,
}

impl ImportAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }

    /// Parse the action column. Empty or unrecognized values mean `Create`.
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "UPDATE" => Self::Update,
            "DELETE" => Self::Delete,
            _ => Self::Create,
        }
    }
}

impl std::fmt::Display for ImportAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positional columns of the video CSV layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoColumn {
    Id = 0,
    Title = 1,
    Url = 2,
    Series = 3,
    Author = 4,
    Categories = 5,
    Action = 6,
}

/// Header line of the video CSV layout.
pub const VIDEO_CSV_HEADER: [&str; 7] = [
    "id",
    "title",
    "url",
    "series",
    "author",
    "categories",
    "action",
];

/// Header line of the user CSV layout.
pub const USER_CSV_HEADER: [&str; 4] = ["email", "client", "role", "action"];

/// One mapped row of a video import file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoImportRecord {
    pub id: Option<String>,
    pub title: String,
    pub url: String,
    pub series_name: Option<String>,
    pub author: Option<String>,
    /// Column order, duplicates dropped.
    pub categories: Vec<String>,
    pub action: ImportAction,
    /// Number of columns the source row actually had.
    pub columns: usize,
}

impl VideoImportRecord {
    /// Whether the source row reached `column`, even if the value was empty.
    pub fn supplies(&self, column: VideoColumn) -> bool {
        self.columns > column as usize
    }
}

/// One mapped row of a user import file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserImportRecord {
    pub email: String,
    pub client_name: String,
    pub role: Role,
    pub action: ImportAction,
}

/// Per-batch outcome counters. Never decremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub created: u64,
    pub updated: u64,
    pub deleted: u64,
    pub errors: u64,
}

impl ImportStats {
    /// Rows that produced an effect.
    pub fn applied(&self) -> u64 {
        self.created + self.updated + self.deleted
    }
}

// ── Aggregates ──────────────────────────────────────────────────────────────

/// Row counts across the catalog.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogStats {
    pub videos: i64,
    pub featured: i64,
    pub series: i64,
    pub categories: i64,
    pub users: i64,
    pub imports: i64,
}

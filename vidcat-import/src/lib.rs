//! CSV import and export for the video catalog database.
//!
//! This crate owns the ETL logic: mapping parsed CSV rows onto typed import
//! records, applying them row by row against the database, and rendering the
//! catalog back into the same CSV layout.

pub mod export;
pub mod importer;
pub mod mapper;
pub mod progress;

pub use export::{ExportError, export_users, export_videos};
pub use importer::{
    DEFAULT_AUTHOR, IMPORTED_DESCRIPTION, ImportError, ImportKind, ImportReport, ParsedRow,
    RowError, import_batch, import_users, import_videos, log_import, parse_rows,
};
pub use mapper::{MappingError, USER_MIN_COLUMNS, VIDEO_MIN_COLUMNS, map_user_row, map_video_row};
pub use progress::{ImportProgress, LogProgress, SilentProgress};

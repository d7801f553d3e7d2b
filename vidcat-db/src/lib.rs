//! SQLite persistence layer for the video catalog.
//!
//! Provides schema creation, CRUD operations, and query APIs
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    OperationError, SeedStats, create_categories_bulk, create_series, create_user,
    delete_category, delete_series, delete_user, delete_video, find_category_by_name,
    find_or_create_category, find_series_by_title, find_user_by_email, find_video,
    insert_import_log, insert_video, rename_series, seed_from_catalog, set_featured,
    set_user_status, set_video_categories, toggle_featured, update_user, update_video,
    video_exists,
};
pub use queries::{
    UserFilter, VideoFilter, catalog_stats, categories_for_video, category_counts,
    list_categories, list_import_logs, list_series, list_users, list_videos, search_videos,
    video_entry,
};
pub use schema::{SchemaError, open_database, open_memory};

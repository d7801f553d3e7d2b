use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use vidcat_catalog::types::{NewVideo, VideoEntry};
use vidcat_catalog::vimeo;
use vidcat_db::VideoFilter;
use vidcat_import::{DEFAULT_AUTHOR, ImportKind};

use crate::CliError;
use crate::settings::Settings;

use super::{open_db, open_existing_db, print_json, split_names, truncate_str};

/// Arguments of `videos add`.
pub(crate) struct AddVideoArgs {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub series: Option<String>,
    pub categories: Option<String>,
    pub duration: Option<String>,
    pub featured: bool,
    pub success_story: bool,
}

pub(crate) fn run_videos_list(
    db_path: &Path,
    filter: &VideoFilter,
    json: bool,
) -> Result<(), CliError> {
    let Some(conn) = open_existing_db(db_path)? else {
        return Ok(());
    };
    let entries = vidcat_db::search_videos(&conn, filter)
        .map_err(|e| CliError::database(format!("Failed to search videos: {}", e)))?;

    if json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        log::info!("No videos match.");
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{} video(s)", entries.len()).if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    log::info!(
        "  {:<36}  {:<40}  {:<20}  {}",
        "ID".if_supports_color(Stdout, |t| t.dimmed()),
        "Title".if_supports_color(Stdout, |t| t.dimmed()),
        "Series".if_supports_color(Stdout, |t| t.dimmed()),
        "Categories".if_supports_color(Stdout, |t| t.dimmed()),
    );
    for entry in &entries {
        let marker = if entry.video.featured { "*" } else { " " };
        log::info!(
            "{} {:<36}  {:<40}  {:<20}  {}",
            marker.if_supports_color(Stdout, |t| t.yellow()),
            entry.video.id,
            truncate_str(&entry.video.title, 40),
            truncate_str(entry.series.as_deref().unwrap_or("-"), 20),
            entry.categories.join(", "),
        );
    }

    Ok(())
}

pub(crate) fn run_videos_show(db_path: &Path, id: &str) -> Result<(), CliError> {
    let Some(conn) = open_existing_db(db_path)? else {
        return Ok(());
    };
    let entry = vidcat_db::video_entry(&conn, id)
        .map_err(|e| CliError::database(format!("Failed to load video: {}", e)))?
        .ok_or_else(|| CliError::not_found(format!("video '{}'", id)))?;

    print_entry(&entry);
    Ok(())
}

fn print_entry(entry: &VideoEntry) {
    let video = &entry.video;
    log::info!("{}", video.title.if_supports_color(Stdout, |t| t.bold()));
    log::info!("  ID:          {}", video.id);
    log::info!("  URL:         {}", video.url);
    log::info!(
        "  Thumbnail:   {}",
        vimeo::thumbnail_url(&video.url, video.thumbnail_url.as_deref())
    );
    log::info!("  Author:      {}", video.author);
    if let Some(ref series) = entry.series {
        log::info!("  Series:      {}", series);
    }
    if !entry.categories.is_empty() {
        log::info!("  Categories:  {}", entry.categories.join(", "));
    }
    if let Some(ref duration) = video.duration {
        log::info!("  Duration:    {}", duration);
    }
    log::info!("  Featured:    {}", if video.featured { "yes" } else { "no" });
    log::info!(
        "  Success:     {}",
        if video.success_story { "yes" } else { "no" }
    );
    log::info!("  Views:       {}", video.views);
    log::info!("  Created:     {}", video.created_at);
    log::info!("  Updated:     {}", video.updated_at);
    if let Some(ref description) = video.description {
        crate::log_blank();
        for line in description.lines() {
            log::info!("  {}", line);
        }
    }
}

/// Trimmed value of an optional flag, or `None` when it is blank.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn run_videos_add(db_path: &Path, args: AddVideoArgs) -> Result<(), CliError> {
    let title = args.title.trim();
    let url = args.url.trim();
    if title.is_empty() || url.is_empty() {
        return Err(CliError::other("Title and URL are required"));
    }
    if vimeo::extract_vimeo_id(url).is_none() {
        log::warn!("'{}' does not look like a Vimeo URL; thumbnail will be a placeholder", url);
    }

    let conn = open_db(db_path)?;

    let series_id = match non_blank(args.series).as_deref() {
        Some(title) => Some(
            vidcat_db::find_series_by_title(&conn, title)
                .map_err(|e| CliError::database(e.to_string()))?
                .ok_or_else(|| CliError::not_found(format!("series '{}'", title)))?
                .id,
        ),
        None => None,
    };
    let categories = args.categories.as_deref().map(split_names).unwrap_or_default();

    let video = NewVideo {
        title: title.to_string(),
        url: url.to_string(),
        description: non_blank(args.description),
        author: non_blank(args.author).unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        thumbnail_url: Some(vimeo::thumbnail_url(url, None)),
        duration: non_blank(args.duration),
        featured: args.featured,
        success_story: args.success_story,
        series_id,
    };

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| CliError::database(e.to_string()))?;
    let id = vidcat_db::insert_video(&tx, &video)
        .and_then(|id| vidcat_db::set_video_categories(&tx, &id, &categories).map(|_| id))
        .map_err(|e| CliError::database(format!("Failed to add video: {}", e)))?;
    tx.commit().map_err(|e| CliError::database(e.to_string()))?;

    log::info!(
        "{} Added '{}' ({})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        title,
        id,
    );
    Ok(())
}

pub(crate) fn run_videos_import(
    db_path: &Path,
    file: &Path,
    error_log: Option<&Path>,
    settings: &Settings,
    quiet: bool,
) -> Result<(), CliError> {
    super::csv_import::run_csv_import(ImportKind::Videos, db_path, file, error_log, settings, quiet)
}

pub(crate) fn run_videos_export(
    db_path: &Path,
    output: Option<&Path>,
    separator: char,
) -> Result<(), CliError> {
    let conn = open_db(db_path)?;
    let entries = vidcat_db::list_videos(&conn)
        .map_err(|e| CliError::database(format!("Failed to list videos: {}", e)))?;
    let csv = vidcat_import::export_videos(&entries, separator)
        .map_err(|e| CliError::csv(e.to_string()))?;
    super::write_output(output, &csv)?;

    if let Some(path) = output {
        log::info!(
            "{} Exported {} video(s) to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            entries.len(),
            path.display(),
        );
    }
    Ok(())
}

pub(crate) fn run_videos_feature(db_path: &Path, id: &str) -> Result<(), CliError> {
    let conn = open_db(db_path)?;
    let featured = vidcat_db::toggle_featured(&conn, id).map_err(|e| match e {
        vidcat_db::OperationError::NotFound { .. } => {
            CliError::not_found(format!("video '{}'", id))
        }
        e => CliError::database(e.to_string()),
    })?;
    log::info!(
        "Video {} is {}",
        id,
        if featured { "now featured" } else { "no longer featured" },
    );
    Ok(())
}

pub(crate) fn run_videos_delete(db_path: &Path, id: &str) -> Result<(), CliError> {
    let conn = open_db(db_path)?;
    vidcat_db::delete_video(&conn, id).map_err(|e| match e {
        vidcat_db::OperationError::NotFound { .. } => {
            CliError::not_found(format!("video '{}'", id))
        }
        e => CliError::database(e.to_string()),
    })?;
    log::info!(
        "{} Deleted video {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        id,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_args(title: &str) -> AddVideoArgs {
        AddVideoArgs {
            title: title.to_string(),
            url: "https://vimeo.com/76979871".to_string(),
            description: None,
            author: None,
            series: None,
            categories: Some("SAP, FIORI".to_string()),
            duration: Some("12:30".to_string()),
            featured: false,
            success_story: false,
        }
    }

    #[test]
    fn add_then_feature_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("catalog.db");

        run_videos_add(&db_path, add_args("Intro")).unwrap();

        let conn = vidcat_db::open_database(&db_path).unwrap();
        let entries = vidcat_db::list_videos(&conn).unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.video.author, DEFAULT_AUTHOR);
        assert_eq!(entry.categories, vec!["FIORI", "SAP"]);
        assert_eq!(entry.video.duration.as_deref(), Some("12:30"));
        let id = entry.video.id.clone();
        drop(conn);

        run_videos_feature(&db_path, &id).unwrap();
        let conn = vidcat_db::open_database(&db_path).unwrap();
        assert!(vidcat_db::find_video(&conn, &id).unwrap().unwrap().featured);
        drop(conn);

        run_videos_delete(&db_path, &id).unwrap();
        assert!(matches!(
            run_videos_delete(&db_path, &id),
            Err(CliError::NotFound(_))
        ));
    }

    #[test]
    fn add_trims_padded_values() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("catalog.db");
        {
            let conn = vidcat_db::open_database(&db_path).unwrap();
            vidcat_db::create_series(&conn, "Basics", None).unwrap();
        }
        let mut args = add_args("  Intro ");
        args.author = Some(" Laura ".to_string());
        args.description = Some("  First steps\n".to_string());
        args.series = Some(" Basics ".to_string());
        args.duration = Some(" 12:30 ".to_string());

        run_videos_add(&db_path, args).unwrap();

        let conn = vidcat_db::open_database(&db_path).unwrap();
        let entries = vidcat_db::list_videos(&conn).unwrap();
        let video = &entries[0].video;
        assert_eq!(video.title, "Intro");
        assert_eq!(video.author, "Laura");
        assert_eq!(video.description.as_deref(), Some("First steps"));
        assert_eq!(video.duration.as_deref(), Some("12:30"));
        assert!(video.series_id.is_some());
    }

    #[test]
    fn blank_author_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("catalog.db");
        let mut args = add_args("Intro");
        args.author = Some("   ".to_string());
        args.description = Some(" ".to_string());

        run_videos_add(&db_path, args).unwrap();

        let conn = vidcat_db::open_database(&db_path).unwrap();
        let entries = vidcat_db::list_videos(&conn).unwrap();
        assert_eq!(entries[0].video.author, DEFAULT_AUTHOR);
        assert_eq!(entries[0].video.description, None);
    }

    #[test]
    fn add_with_unknown_series_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("catalog.db");
        let mut args = add_args("Intro");
        args.series = Some("Nope".to_string());

        assert!(matches!(
            run_videos_add(&db_path, args),
            Err(CliError::NotFound(_))
        ));
        let conn = vidcat_db::open_database(&db_path).unwrap();
        assert!(vidcat_db::list_videos(&conn).unwrap().is_empty());
        assert!(vidcat_db::list_categories(&conn).unwrap().is_empty());
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("catalog.db");
        let out = dir.path().join("videos.csv");
        run_videos_add(&db_path, add_args("Intro")).unwrap();

        run_videos_export(&db_path, Some(&out), ';').unwrap();
        let csv = std::fs::read_to_string(&out).unwrap();
        let mut lines = csv.trim_start_matches('\u{feff}').lines();
        assert_eq!(
            lines.next(),
            Some("id;title;url;series;author;categories;action")
        );
        let row = lines.next().unwrap();
        assert!(row.contains(";Intro;https://vimeo.com/76979871;;Admin;FIORI|SAP;UPDATE"));
        assert!(lines.next().is_none());
    }
}

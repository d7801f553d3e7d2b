use vidcat_catalog::types::*;
use vidcat_catalog::{UTF8_BOM, parse_line, split_records};
use vidcat_db::*;
use vidcat_import::*;

fn seeded_db() -> rusqlite::Connection {
    let conn = open_memory().unwrap();
    create_series(&conn, "Basics", None).unwrap();
    let text = "id,title,url,series,author,categories,action\n\
                ,Intro,https://vimeo.com/1,Basics,Laura,SAP|FIORI,\n\
                ,\"Sales, advanced\",https://vimeo.com/2,,,Ventas,\n\
                ,\"The \"\"Best\"\" Pitch\",https://player.vimeo.com/video/3,Basics,Admin,,\n";
    let report = import_videos(&conn, text, None).unwrap();
    assert_eq!(report.stats.created, 3);
    conn
}

#[test]
fn output_starts_with_bom_and_header() {
    let out = export_videos(&[], ',').unwrap();
    assert!(out.starts_with(UTF8_BOM));
    assert_eq!(
        out.trim_start_matches(UTF8_BOM),
        "id,title,url,series,author,categories,action\n"
    );

    let out = export_users(&[], ';').unwrap();
    assert_eq!(
        out.trim_start_matches(UTF8_BOM),
        "email;client;role;action\n"
    );
}

#[test]
fn one_line_per_video_in_order() {
    let conn = seeded_db();
    let entries = list_videos(&conn).unwrap();
    let out = export_videos(&entries, ',').unwrap();

    let records = split_records(&out);
    assert_eq!(records.len(), 4);
    for (record, entry) in records[1..].iter().zip(&entries) {
        let fields = parse_line(record.text, ',');
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[0], entry.video.id);
        assert_eq!(fields[1], entry.video.title);
        assert_eq!(fields[6], "UPDATE");
    }
}

#[test]
fn fields_quoted_only_when_needed() {
    let conn = seeded_db();
    let entries = list_videos(&conn).unwrap();
    let out = export_videos(&entries, ',').unwrap();

    assert!(out.contains("\"Sales, advanced\""));
    assert!(out.contains("\"The \"\"Best\"\" Pitch\""));
    assert!(out.contains(",Intro,"));

    let intro = entries.iter().find(|e| e.video.title == "Intro").unwrap();
    let line = format!(
        "{},Intro,https://vimeo.com/1,Basics,Laura,FIORI|SAP,UPDATE\n",
        intro.video.id
    );
    assert!(out.contains(&line));
}

#[test]
fn export_reimport_updates_everything() {
    let conn = seeded_db();
    let before = list_videos(&conn).unwrap();

    let out = export_videos(&before, ',').unwrap();
    let report = import_videos(&conn, &out, None).unwrap();
    assert_eq!(
        report.stats,
        ImportStats {
            updated: 3,
            ..Default::default()
        }
    );

    let after = list_videos(&conn).unwrap();
    assert_eq!(after.len(), before.len());
    for (a, b) in after.iter().zip(&before) {
        assert_eq!(a.video.id, b.video.id);
        assert_eq!(a.video.title, b.video.title);
        assert_eq!(a.video.url, b.video.url);
        assert_eq!(a.video.author, b.video.author);
        assert_eq!(a.series, b.series);
        assert_eq!(a.categories, b.categories);
    }
}

#[test]
fn semicolon_round_trip() {
    let conn = seeded_db();
    let before = list_videos(&conn).unwrap();

    let out = export_videos(&before, ';').unwrap();
    assert!(out.contains("Sales, advanced;"));

    let report = import_videos(&conn, &out, None).unwrap();
    assert_eq!(report.stats.updated, 3);
    assert_eq!(report.stats.errors, 0);
}

#[test]
fn exported_rows_map_back() {
    let conn = seeded_db();
    let entries = list_videos(&conn).unwrap();
    let out = export_videos(&entries, ',').unwrap();

    for (record, entry) in split_records(&out)[1..].iter().zip(&entries) {
        let mapped = map_video_row(&parse_line(record.text, ',')).unwrap();
        assert_eq!(mapped.id.as_deref(), Some(entry.video.id.as_str()));
        assert_eq!(mapped.title, entry.video.title);
        assert_eq!(mapped.url, entry.video.url);
        assert_eq!(mapped.series_name, entry.series);
        assert_eq!(mapped.author.as_deref(), Some(entry.video.author.as_str()));
        assert_eq!(mapped.categories, entry.categories);
        assert_eq!(mapped.action, ImportAction::Update);
    }
}

#[test]
fn users_round_trip() {
    let conn = open_memory().unwrap();
    create_user(&conn, "ana@acme.com", "Acme, Inc.", Role::Client, UserStatus::Active).unwrap();
    create_user(&conn, "root@corp.com", "Corp", Role::Admin, UserStatus::Active).unwrap();

    let users = list_users(&conn, &UserFilter::default()).unwrap();
    let out = export_users(&users, ',').unwrap();
    assert!(out.contains("ana@acme.com,\"Acme, Inc.\",CLIENT,UPDATE\n"));

    let report = import_users(&conn, &out, None).unwrap();
    assert_eq!(report.stats.updated, 2);
    assert_eq!(report.stats.errors, 0);
    assert_eq!(
        find_user_by_email(&conn, "ana@acme.com")
            .unwrap()
            .unwrap()
            .client_name,
        "Acme, Inc."
    );
}

#[test]
fn only_importable_separators_accepted() {
    for separator in ['\t', '|', '→'] {
        assert!(matches!(
            export_videos(&[], separator),
            Err(ExportError::InvalidSeparator(c)) if c == separator
        ));
        assert!(export_users(&[], separator).is_err());
    }

    // Whatever the exporter accepts, the importer reads back.
    let conn = seeded_db();
    let entries = list_videos(&conn).unwrap();
    for separator in [',', ';'] {
        let out = export_videos(&entries, separator).unwrap();
        let report = import_videos(&conn, &out, None).unwrap();
        assert_eq!(report.stats.updated, 3);
        assert_eq!(report.stats.errors, 0);
    }
}

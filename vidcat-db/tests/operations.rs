use vidcat_catalog::types::*;
use vidcat_db::*;

fn test_video(title: &str) -> NewVideo {
    NewVideo {
        title: title.to_string(),
        url: "https://player.vimeo.com/video/123456".to_string(),
        author: "Admin".to_string(),
        ..Default::default()
    }
}

#[test]
fn insert_and_find_video() {
    let conn = open_memory().unwrap();
    let id = insert_video(&conn, &test_video("Welcome")).unwrap();

    let video = find_video(&conn, &id).unwrap().unwrap();
    assert_eq!(video.title, "Welcome");
    assert_eq!(video.author, "Admin");
    assert!(!video.featured);
    assert_eq!(video.views, 0);
    assert!(video.series_id.is_none());
    assert!(!video.created_at.is_empty());
}

#[test]
fn generated_ids_are_unique() {
    let conn = open_memory().unwrap();
    let a = insert_video(&conn, &test_video("A")).unwrap();
    let b = insert_video(&conn, &test_video("B")).unwrap();
    assert_ne!(a, b);
}

#[test]
fn find_missing_video_is_none() {
    let conn = open_memory().unwrap();
    assert!(find_video(&conn, "nope").unwrap().is_none());
    assert!(!video_exists(&conn, "nope").unwrap());
}

#[test]
fn update_video_touches_only_given_fields() {
    let conn = open_memory().unwrap();
    let mut new = test_video("Old title");
    new.description = Some("Keep me".to_string());
    let id = insert_video(&conn, &new).unwrap();

    update_video(
        &conn,
        &id,
        &VideoChanges {
            title: Some("New title".to_string()),
            ..Default::default()
        },
    )
    .unwrap();

    let video = find_video(&conn, &id).unwrap().unwrap();
    assert_eq!(video.title, "New title");
    assert_eq!(video.description.as_deref(), Some("Keep me"));
    assert_eq!(video.author, "Admin");
}

#[test]
fn update_video_clears_series() {
    let conn = open_memory().unwrap();
    let series_id = create_series(&conn, "Basics", None).unwrap();
    let mut new = test_video("Lesson 1");
    new.series_id = Some(series_id.clone());
    let id = insert_video(&conn, &new).unwrap();
    assert_eq!(
        find_video(&conn, &id).unwrap().unwrap().series_id,
        Some(series_id)
    );

    update_video(
        &conn,
        &id,
        &VideoChanges {
            series_id: Some(None),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(find_video(&conn, &id).unwrap().unwrap().series_id.is_none());
}

#[test]
fn update_missing_video_is_not_found() {
    let conn = open_memory().unwrap();
    let changes = VideoChanges {
        title: Some("x".to_string()),
        ..Default::default()
    };
    let err = update_video(&conn, "ghost", &changes).unwrap_err();
    assert!(matches!(err, OperationError::NotFound { .. }));

    // Empty changes still check existence
    let err = update_video(&conn, "ghost", &VideoChanges::default()).unwrap_err();
    assert!(matches!(err, OperationError::NotFound { .. }));
}

#[test]
fn delete_video_cascades_category_links() {
    let conn = open_memory().unwrap();
    let id = insert_video(&conn, &test_video("Doomed")).unwrap();
    set_video_categories(&conn, &id, &["Ventas", "Marketing"]).unwrap();

    delete_video(&conn, &id).unwrap();
    assert!(find_video(&conn, &id).unwrap().is_none());

    let links: i64 = conn
        .query_row("SELECT COUNT(*) FROM video_categories", [], |r| r.get(0))
        .unwrap();
    assert_eq!(links, 0);
    // Categories themselves survive
    assert!(find_category_by_name(&conn, "Ventas").unwrap().is_some());
}

#[test]
fn delete_missing_video_is_not_found() {
    let conn = open_memory().unwrap();
    let err = delete_video(&conn, "ghost").unwrap_err();
    assert!(matches!(err, OperationError::NotFound { .. }));
}

#[test]
fn toggle_featured_flips() {
    let conn = open_memory().unwrap();
    let id = insert_video(&conn, &test_video("Star")).unwrap();

    assert!(toggle_featured(&conn, &id).unwrap());
    assert!(find_video(&conn, &id).unwrap().unwrap().featured);
    assert!(!toggle_featured(&conn, &id).unwrap());

    set_featured(&conn, &id, true).unwrap();
    assert!(find_video(&conn, &id).unwrap().unwrap().featured);
}

#[test]
fn find_or_create_category_reuses_existing() {
    let conn = open_memory().unwrap();
    let a = find_or_create_category(&conn, "Ventas").unwrap();
    let b = find_or_create_category(&conn, "Ventas").unwrap();
    assert_eq!(a, b);

    // Names match exactly
    let c = find_or_create_category(&conn, "ventas").unwrap();
    assert_ne!(a, c);
}

#[test]
fn set_video_categories_replaces_set() {
    let conn = open_memory().unwrap();
    let id = insert_video(&conn, &test_video("Tagged")).unwrap();

    set_video_categories(&conn, &id, &["A", "B"]).unwrap();
    assert_eq!(categories_for_video(&conn, &id).unwrap(), vec!["A", "B"]);

    set_video_categories(&conn, &id, &["C"]).unwrap();
    assert_eq!(categories_for_video(&conn, &id).unwrap(), vec!["C"]);

    set_video_categories::<&str>(&conn, &id, &[]).unwrap();
    assert!(categories_for_video(&conn, &id).unwrap().is_empty());
}

#[test]
fn create_categories_bulk_counts_new_only() {
    let conn = open_memory().unwrap();
    find_or_create_category(&conn, "Existing").unwrap();

    let created = create_categories_bulk(&conn, &["Existing", "New", " ", "Other"]).unwrap();
    assert_eq!(created, 2);
    assert_eq!(list_categories(&conn).unwrap().len(), 3);
}

#[test]
fn delete_category_unlinks_videos() {
    let conn = open_memory().unwrap();
    let id = insert_video(&conn, &test_video("Tagged")).unwrap();
    set_video_categories(&conn, &id, &["Gone", "Kept"]).unwrap();

    assert!(delete_category(&conn, "Gone").unwrap());
    assert!(!delete_category(&conn, "Gone").unwrap());
    assert_eq!(categories_for_video(&conn, &id).unwrap(), vec!["Kept"]);
}

#[test]
fn series_titles_are_unique() {
    let conn = open_memory().unwrap();
    create_series(&conn, "Onboarding", Some("First steps")).unwrap();
    let err = create_series(&conn, "Onboarding", None).unwrap_err();
    assert!(matches!(err, OperationError::AlreadyExists { .. }));

    let series = find_series_by_title(&conn, "Onboarding").unwrap().unwrap();
    assert_eq!(series.description.as_deref(), Some("First steps"));
}

#[test]
fn rename_series_keeps_links() {
    let conn = open_memory().unwrap();
    let series_id = create_series(&conn, "Old", None).unwrap();
    create_series(&conn, "Taken", None).unwrap();
    let mut new = test_video("Episode");
    new.series_id = Some(series_id.clone());
    let id = insert_video(&conn, &new).unwrap();

    rename_series(&conn, "Old", "New").unwrap();
    assert!(find_series_by_title(&conn, "Old").unwrap().is_none());
    assert_eq!(
        find_video(&conn, &id).unwrap().unwrap().series_id,
        Some(series_id)
    );

    let err = rename_series(&conn, "New", "Taken").unwrap_err();
    assert!(matches!(err, OperationError::AlreadyExists { .. }));
    let err = rename_series(&conn, "Missing", "Whatever").unwrap_err();
    assert!(matches!(err, OperationError::NotFound { .. }));
}

#[test]
fn delete_series_detaches_videos() {
    let conn = open_memory().unwrap();
    let series_id = create_series(&conn, "Short lived", None).unwrap();
    let mut new = test_video("Orphan");
    new.series_id = Some(series_id);
    let id = insert_video(&conn, &new).unwrap();

    assert!(delete_series(&conn, "Short lived").unwrap());
    let video = find_video(&conn, &id).unwrap().unwrap();
    assert!(video.series_id.is_none());
}

#[test]
fn create_and_find_user() {
    let conn = open_memory().unwrap();
    let id = create_user(
        &conn,
        "ana@example.com",
        "Acme",
        Role::Client,
        UserStatus::Pending,
    )
    .unwrap();

    let user = find_user_by_email(&conn, "ana@example.com").unwrap().unwrap();
    assert_eq!(user.id, id);
    assert_eq!(user.client_name, "Acme");
    assert_eq!(user.role, Role::Client);
    assert_eq!(user.status, UserStatus::Pending);
    assert!(!user.accepted_terms);
}

#[test]
fn duplicate_email_is_rejected() {
    let conn = open_memory().unwrap();
    create_user(&conn, "a@b.com", "X", Role::Client, UserStatus::Pending).unwrap();
    let err = create_user(&conn, "a@b.com", "Y", Role::Admin, UserStatus::Active).unwrap_err();
    assert!(matches!(err, OperationError::AlreadyExists { .. }));
}

#[test]
fn update_and_delete_user() {
    let conn = open_memory().unwrap();
    let id = create_user(&conn, "a@b.com", "X", Role::Client, UserStatus::Pending).unwrap();

    update_user(&conn, &id, "Renamed", Role::Admin).unwrap();
    set_user_status(&conn, &id, UserStatus::Active).unwrap();
    let user = find_user_by_email(&conn, "a@b.com").unwrap().unwrap();
    assert_eq!(user.client_name, "Renamed");
    assert_eq!(user.role, Role::Admin);
    assert_eq!(user.status, UserStatus::Active);

    delete_user(&conn, &id).unwrap();
    assert!(find_user_by_email(&conn, "a@b.com").unwrap().is_none());
    assert!(matches!(
        delete_user(&conn, &id).unwrap_err(),
        OperationError::NotFound { .. }
    ));
}

#[test]
fn insert_and_list_import_log() {
    let conn = open_memory().unwrap();
    let log = ImportLog {
        id: 0,
        kind: "videos".to_string(),
        source_name: "batch.csv".to_string(),
        imported_at: "2024-05-01T10:00:00Z".to_string(),
        created: 3,
        updated: 1,
        deleted: 0,
        errors: 2,
    };
    let id = insert_import_log(&conn, &log).unwrap();
    assert!(id > 0);

    let logs = list_import_logs(&conn, None).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].id, id);
    assert_eq!(logs[0].source_name, "batch.csv");
    assert_eq!(logs[0].errors, 2);
}

#[test]
fn seed_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("series.yaml"),
        "- title: Onboarding\n  description: First steps\n- title: Advanced\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("categories.yaml"), "- Ventas\n- Marketing\n").unwrap();
    std::fs::write(
        dir.path().join("users.yaml"),
        "- email: admin@example.com\n  client_name: Internal\n  role: ADMIN\n  status: ACTIVE\n",
    )
    .unwrap();

    let conn = open_memory().unwrap();
    let stats = seed_from_catalog(&conn, dir.path()).unwrap();
    assert_eq!(stats.series, 2);
    assert_eq!(stats.categories, 2);
    assert_eq!(stats.users, 1);

    let admin = find_user_by_email(&conn, "admin@example.com").unwrap().unwrap();
    assert_eq!(admin.role, Role::Admin);
    assert_eq!(admin.status, UserStatus::Active);

    // Seeding again creates nothing new
    let again = seed_from_catalog(&conn, dir.path()).unwrap();
    assert_eq!(again.categories, 0);
    assert_eq!(list_series(&conn).unwrap().len(), 2);
    assert_eq!(list_users(&conn, &UserFilter::default()).unwrap().len(), 1);
}

#[test]
fn seed_trims_padded_values() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("series.yaml"),
        "- title: \"  Onboarding \"\n  description: \" First steps \"\n- title: \"   \"\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("categories.yaml"), "- \" Ventas \"\n- Ventas\n").unwrap();
    std::fs::write(
        dir.path().join("users.yaml"),
        "- email: \" admin@example.com \"\n  client_name: \" Internal \"\n",
    )
    .unwrap();

    let conn = open_memory().unwrap();
    let stats = seed_from_catalog(&conn, dir.path()).unwrap();
    assert_eq!(stats.series, 1);
    assert_eq!(stats.categories, 1);

    let series = list_series(&conn).unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].title, "Onboarding");
    assert_eq!(series[0].description.as_deref(), Some("First steps"));

    let names: Vec<String> = list_categories(&conn)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Ventas"]);

    let admin = find_user_by_email(&conn, "admin@example.com").unwrap().unwrap();
    assert_eq!(admin.client_name, "Internal");
}

#[test]
fn seed_missing_directory_fails() {
    let conn = open_memory().unwrap();
    let err = seed_from_catalog(&conn, std::path::Path::new("/definitely/not/here")).unwrap_err();
    assert!(matches!(err, OperationError::Seed(_)));
}

use vidcat_catalog::vimeo::{PLACEHOLDER_THUMBNAIL, extract_vimeo_id, thumbnail_url};

#[test]
fn direct_url() {
    assert_eq!(extract_vimeo_id("https://vimeo.com/76979871").as_deref(), Some("76979871"));
    assert_eq!(extract_vimeo_id("vimeo.com/123").as_deref(), Some("123"));
}

#[test]
fn player_url() {
    assert_eq!(
        extract_vimeo_id("https://player.vimeo.com/video/555?badge=0").as_deref(),
        Some("555")
    );
}

#[test]
fn bare_id_and_whitespace() {
    assert_eq!(extract_vimeo_id("  42  ").as_deref(), Some("42"));
}

#[test]
fn unrecognized() {
    assert_eq!(extract_vimeo_id(""), None);
    assert_eq!(extract_vimeo_id("https://vimeo.com/channels/staff"), None);
    assert_eq!(extract_vimeo_id("https://example.com/1a"), None);
}

#[test]
fn stored_thumbnail_wins() {
    assert_eq!(
        thumbnail_url("https://vimeo.com/1", Some("https://cdn.example/t.jpg")),
        "https://cdn.example/t.jpg"
    );
}

#[test]
fn placeholder_is_replaced_by_id_thumbnail() {
    let url = thumbnail_url("https://vimeo.com/99", Some(PLACEHOLDER_THUMBNAIL));
    assert!(url.ends_with("Video+99"));
    assert_eq!(thumbnail_url("not a url", None), PLACEHOLDER_THUMBNAIL);
}

//! Helpers for Vimeo video URLs.
//!
//! Admins paste URLs in several shapes:
//! ```text
//! https://vimeo.com/123456789
//! https://player.vimeo.com/video/123456789
//! vimeo.com/123456789
//! 123456789
//! ```

/// Generic thumbnail used when a video has no usable image of its own.
pub const PLACEHOLDER_THUMBNAIL: &str =
    "https://images.unsplash.com/photo-1611162617474-5b21e879e113?w=800&q=80";

/// Extract the numeric Vimeo id from a URL or a bare id.
///
/// # Examples
///
/// ```
/// use vidcat_catalog::vimeo::extract_vimeo_id;
///
/// assert_eq!(extract_vimeo_id("https://vimeo.com/76979871"), Some("76979871".to_string()));
/// assert_eq!(
///     extract_vimeo_id("https://player.vimeo.com/video/76979871?h=abc"),
///     Some("76979871".to_string()),
/// );
/// assert_eq!(extract_vimeo_id("https://youtube.com/watch?v=x"), None);
/// ```
pub fn extract_vimeo_id(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    if let Some(id) = digits_after(url, "player.vimeo.com/video/") {
        return Some(id);
    }
    if let Some(id) = digits_after(url, "vimeo.com/") {
        return Some(id);
    }

    if url.chars().all(|c| c.is_ascii_digit()) {
        return Some(url.to_string());
    }

    None
}

/// Leading run of ASCII digits following the first occurrence of `marker`.
fn digits_after(url: &str, marker: &str) -> Option<String> {
    let start = url.find(marker)? + marker.len();
    let digits: String = url[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() { None } else { Some(digits) }
}

/// Pick the thumbnail to show for a video.
///
/// A stored thumbnail wins unless it is the generic placeholder. Otherwise
/// a placeholder labelled with the Vimeo id is returned, or the generic one
/// when the URL has no recognizable id.
pub fn thumbnail_url(vimeo_url: &str, stored: Option<&str>) -> String {
    if let Some(s) = stored.filter(|s| !s.is_empty() && *s != PLACEHOLDER_THUMBNAIL) {
        return s.to_string();
    }

    match extract_vimeo_id(vimeo_url) {
        Some(id) => format!("https://via.placeholder.com/1280x720/1e293b/ffffff?text=Video+{id}"),
        None => PLACEHOLDER_THUMBNAIL.to_string(),
    }
}

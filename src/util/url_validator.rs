use url::Url;

/// File extensions accepted for media attached to a post.
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Returns true if `url_str` looks like a directly addressable image.
///
/// A URL qualifies when it:
/// - parses as an absolute URL with a non-empty scheme and host
/// - has a path ending in one of [`IMAGE_EXTENSIONS`] (case-insensitive)
///
/// The query string and fragment are not part of the path, so
/// `https://img.example/render?file=a.png` is rejected while
/// `https://img.example/a.PNG?w=200` is accepted. Data URIs and relative
/// paths never qualify.
///
/// # Examples
///
/// ```
/// use feedcast::util::is_valid_image_url;
///
/// assert!(is_valid_image_url("https://example.com/cover.jpg"));
/// assert!(!is_valid_image_url("https://example.com/paper.pdf"));
/// assert!(!is_valid_image_url("/relative/cover.jpg"));
/// ```
pub fn is_valid_image_url(url_str: &str) -> bool {
    let Ok(url) = Url::parse(url_str.trim()) else {
        return false;
    };

    if url.scheme().is_empty() {
        return false;
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return false,
    }

    has_image_extension(url.path())
}

/// Returns true if the URL should be sent as an animation rather than a photo.
///
/// Only meaningful for URLs that already passed [`is_valid_image_url`].
pub fn is_animation_url(url_str: &str) -> bool {
    Url::parse(url_str.trim())
        .map(|url| url.path().to_ascii_lowercase().ends_with(".gif"))
        .unwrap_or(false)
}

fn has_image_extension(path: &str) -> bool {
    let path = path.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_image_urls() {
        assert!(is_valid_image_url("https://example.com/a.jpg"));
        assert!(is_valid_image_url("https://example.com/a.jpeg"));
        assert!(is_valid_image_url("http://example.com/img/a.png"));
        assert!(is_valid_image_url("https://example.com/a.gif"));
        assert!(is_valid_image_url("https://example.com/a.webp"));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(is_valid_image_url("https://example.com/PHOTO.JPG"));
        assert!(is_valid_image_url("https://example.com/Banner.WebP"));
    }

    #[test]
    fn test_non_image_extension_rejected() {
        assert!(!is_valid_image_url("https://x.test/file.pdf"));
        assert!(!is_valid_image_url("https://x.test/article.html"));
        assert!(!is_valid_image_url("https://x.test/"));
    }

    #[test]
    fn test_relative_and_data_uris_rejected() {
        assert!(!is_valid_image_url("/images/a.png"));
        assert!(!is_valid_image_url("a.png"));
        assert!(!is_valid_image_url("data:image/png;base64,iVBORw0KGgo="));
        assert!(!is_valid_image_url(""));
    }

    #[test]
    fn test_query_string_is_not_part_of_path() {
        assert!(!is_valid_image_url("https://img.example/render?file=a.png"));
        assert!(is_valid_image_url("https://img.example/a.png?w=200"));
    }

    #[test]
    fn test_hostless_scheme_rejected() {
        assert!(!is_valid_image_url("file:///tmp/a.png"));
    }

    #[test]
    fn test_animation_detection() {
        assert!(is_animation_url("https://example.com/loop.GIF"));
        assert!(!is_animation_url("https://example.com/photo.png"));
        assert!(!is_animation_url("not a url.gif"));
    }
}

use regex::Regex;
use std::sync::OnceLock;

use crate::feed::FeedEntry;
use crate::util::is_valid_image_url;

fn img_src_regex() -> &'static Regex {
    static IMG_SRC: OnceLock<Regex> = OnceLock::new();
    IMG_SRC.get_or_init(|| {
        Regex::new(r#"(?i)<img[^>]+src=["']([^"']+)["']"#).expect("img src pattern is valid")
    })
}

/// Pick an illustrative image for `entry`, or `None` if nothing usable exists.
///
/// Sources are tried in order, first hit wins:
///
/// 1. enclosures whose href passes [`is_valid_image_url`]
/// 2. the first media thumbnail, taken as-is
/// 3. the first `<img src>` in the summary followed by the first content block, taken as-is
///
/// Only step 1 is validated. Thumbnails and inline images come from
/// structured or author-written markup and are trusted; validating them
/// rejects most real-world thumbnails, which are often served without an
/// extension.
pub fn resolve_image(entry: &FeedEntry) -> Option<String> {
    from_enclosures(entry)
        .or_else(|| from_thumbnails(entry))
        .or_else(|| from_inline_html(entry))
}

fn from_enclosures(entry: &FeedEntry) -> Option<String> {
    entry
        .enclosures
        .iter()
        .filter_map(|e| e.href.as_deref())
        .map(str::trim)
        .find(|href| is_valid_image_url(href))
        .map(str::to_string)
}

fn from_thumbnails(entry: &FeedEntry) -> Option<String> {
    entry
        .media_thumbnails
        .first()
        .and_then(|t| t.url.as_deref())
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

fn from_inline_html(entry: &FeedEntry) -> Option<String> {
    let mut html = entry.summary.clone().unwrap_or_default();
    html.push_str(entry.first_content().unwrap_or(""));

    img_src_regex()
        .captures(&html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

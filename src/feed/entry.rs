use chrono::{DateTime, Utc};

/// One item from a parsed feed.
///
/// Feeds are untrusted and frequently incomplete, so every field may be
/// absent or empty. Consumers unwrap explicitly; nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    /// Full-content blocks in document order.
    pub content: Vec<ContentBlock>,
    /// Attached media in document order.
    pub enclosures: Vec<Enclosure>,
    /// `media:thumbnail` style preview images in document order.
    pub media_thumbnails: Vec<Thumbnail>,
    pub published: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentBlock {
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enclosure {
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thumbnail {
    pub url: Option<String>,
}

impl FeedEntry {
    /// Value of the first content block, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.content.first().and_then(|c| c.value.as_deref())
    }
}

impl Enclosure {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
        }
    }
}

impl Thumbnail {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}

impl ContentBlock {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}

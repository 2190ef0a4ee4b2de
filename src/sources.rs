//! The fixed list of feeds the publisher polls.
//!
//! Sources are declared once at startup and shared read-only. Declaration
//! order is the order in which a cycle visits them.

use std::sync::Arc;

/// One external feed plus the label shown above its posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Human-readable name, used in logs only.
    pub name: String,
    pub feed_url: String,
    /// Display label placed on the first line of the caption.
    pub tag: String,
}

impl SourceConfig {
    pub fn new(
        name: impl Into<String>,
        feed_url: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            feed_url: feed_url.into(),
            tag: tag.into(),
        }
    }
}

const DEFAULT_SOURCES: &[(&str, &str, &str)] = &[
    (
        "Психология.ру",
        "https://www.psychology.ru/rss/",
        "🧠 Психология",
    ),
    (
        "Psychologies.ru",
        "https://psychologies.ru/rss/",
        "❤️ Отношения",
    ),
    (
        "Московский центр психотерапии",
        "https://mcpsy.ru/feed/",
        "👨‍👩‍👧 Семья",
    ),
    (
        "Habr — Психология",
        "https://habr.com/ru/hub/psychology/rss/",
        "📚 Саморазвитие",
    ),
    (
        "Психология отношений (TG)",
        "https://rsshub.app/telegram/channel/psihologiya_otnosheniy",
        "💬 Советы",
    ),
];

/// Returns the built-in source list in publishing order.
pub fn default_sources() -> Arc<[SourceConfig]> {
    DEFAULT_SOURCES
        .iter()
        .map(|(name, url, tag)| SourceConfig::new(*name, *url, *tag))
        .collect()
}

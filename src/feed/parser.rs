use feed_rs::model::{Entry, MediaObject};
use feed_rs::parser;

use super::entry::{ContentBlock, Enclosure, FeedEntry, Thumbnail};

/// Parse RSS/Atom/JSON Feed bytes into entries, preserving document order.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedEntry>, parser::ParseFeedError> {
    let feed = parser::parse(bytes)?;
    Ok(feed.entries.into_iter().map(convert_entry).collect())
}

fn convert_entry(entry: Entry) -> FeedEntry {
    let title = entry.title.map(|t| t.content);
    let summary = entry.summary.map(|s| s.content);

    // Atom puts the article link first; enclosure links are flagged by rel.
    let link = entry
        .links
        .iter()
        .find(|l| l.rel.as_deref().map_or(true, |rel| rel == "alternate"))
        .or_else(|| entry.links.first())
        .map(|l| l.href.clone());

    let content = entry
        .content
        .map(|c| vec![ContentBlock { value: c.body }])
        .unwrap_or_default();

    let mut enclosures: Vec<Enclosure> = entry
        .media
        .iter()
        .flat_map(media_content_urls)
        .map(Enclosure::new)
        .collect();
    enclosures.extend(
        entry
            .links
            .iter()
            .filter(|l| l.rel.as_deref() == Some("enclosure"))
            .map(|l| Enclosure::new(l.href.clone())),
    );

    let media_thumbnails = entry
        .media
        .iter()
        .flat_map(|m| m.thumbnails.iter())
        .map(|t| Thumbnail::new(t.image.uri.clone()))
        .collect();

    FeedEntry {
        title,
        link,
        summary,
        content,
        enclosures,
        media_thumbnails,
        published: entry.published.or(entry.updated),
    }
}

fn media_content_urls(media: &MediaObject) -> impl Iterator<Item = String> + '_ {
    media
        .content
        .iter()
        .filter_map(|c| c.url.as_ref().map(|u| u.to_string()))
}

use std::fmt;

use chrono::{DateTime, Utc};

use crate::feed::{FeedFetcher, FetchError};
use crate::sources::SourceConfig;
use crate::storage::SeenSet;

use super::image::resolve_image;

/// A feed item selected for publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishCandidate {
    pub source_tag: String,
    pub title: String,
    /// Non-empty; doubles as the dedup key.
    pub link: String,
    pub image_url: Option<String>,
    /// Feed-reported publication time, kept for logging.
    pub published: Option<DateTime<Utc>>,
}

/// Why a source produced nothing to publish this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The feed had no entries.
    Empty,
    /// The newest entry lacks a title or a link.
    MissingFields,
    /// The newest entry was already published.
    Duplicate,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::Empty => "feed has no entries",
            SkipReason::MissingFields => "newest entry has no title or link",
            SkipReason::Duplicate => "newest entry already published",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Candidate(PublishCandidate),
    Skip(SkipReason),
}

/// Poll one source and decide whether its newest entry should be published.
///
/// Only the first entry of the feed is considered. If it was already
/// published, newer-than-last-cycle items further down are not examined.
pub async fn poll_source(
    fetcher: &dyn FeedFetcher,
    source: &SourceConfig,
    seen: &SeenSet,
) -> Result<PollOutcome, FetchError> {
    let entries = fetcher.fetch(&source.feed_url).await?;

    let Some(entry) = entries.first() else {
        return Ok(PollOutcome::Skip(SkipReason::Empty));
    };

    let title = entry.title.as_deref().map(str::trim).unwrap_or_default();
    let link = entry.link.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() || link.is_empty() {
        return Ok(PollOutcome::Skip(SkipReason::MissingFields));
    }

    if seen.contains(link) {
        return Ok(PollOutcome::Skip(SkipReason::Duplicate));
    }

    Ok(PollOutcome::Candidate(PublishCandidate {
        source_tag: source.tag.clone(),
        title: title.to_string(),
        link: link.to_string(),
        image_url: resolve_image(entry),
        published: entry.published,
    }))
}

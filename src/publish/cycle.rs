use std::sync::Arc;
use std::time::Duration;

use crate::feed::FeedFetcher;
use crate::sources::SourceConfig;
use crate::storage::DedupStore;
use crate::telegram::Transport;

use super::caption::format_caption;
use super::delivery::{deliver, DeliveryOutcome};
use super::poller::{poll_source, PollOutcome};

/// Tallies for one pass over all sources.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    /// Posts delivered with their media.
    pub published: usize,
    /// Posts delivered as text after the media send failed.
    pub degraded: usize,
    pub skipped: usize,
    /// Sources whose fetch failed or whose post could not be delivered.
    pub failed: usize,
}

impl CycleStats {
    /// Posts that reached the channel in any form.
    pub fn delivered(&self) -> usize {
        self.published + self.degraded
    }
}

/// Everything a publish cycle needs, built once at startup.
///
/// Holds the collaborators explicitly instead of reaching for process-wide
/// state, so a cycle can run against fake transports and fetchers.
pub struct Publisher {
    sources: Arc<[SourceConfig]>,
    fetcher: Arc<dyn FeedFetcher>,
    transport: Arc<dyn Transport>,
    store: DedupStore,
    default_animation: String,
    pacing_delay: Duration,
}

impl Publisher {
    pub fn new(
        sources: Arc<[SourceConfig]>,
        fetcher: Arc<dyn FeedFetcher>,
        transport: Arc<dyn Transport>,
        store: DedupStore,
        default_animation: impl Into<String>,
    ) -> Self {
        Self {
            sources,
            fetcher,
            transport,
            store,
            default_animation: default_animation.into(),
            pacing_delay: Duration::from_secs(1),
        }
    }

    /// Pause inserted after every delivery attempt.
    pub fn with_pacing_delay(mut self, delay: Duration) -> Self {
        self.pacing_delay = delay;
        self
    }

    pub fn sources(&self) -> &[SourceConfig] {
        &self.sources
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Run one pass over every source, in declaration order.
    ///
    /// Sources are processed one at a time. A failing source is logged and
    /// skipped; it never stops the remaining sources, and it is not retried
    /// until the next cycle. A link is recorded as published only after the
    /// channel accepted the post, either with media or as text.
    pub async fn run_cycle(&self) -> CycleStats {
        tracing::info!(sources = self.sources.len(), "Publish cycle started");

        let mut seen = self.store.load();
        let mut stats = CycleStats::default();

        for source in self.sources.iter() {
            tracing::debug!(source = %source.name, url = %source.feed_url, "Polling source");

            let candidate = match poll_source(self.fetcher.as_ref(), source, &seen).await {
                Ok(PollOutcome::Candidate(candidate)) => candidate,
                Ok(PollOutcome::Skip(reason)) => {
                    tracing::info!(source = %source.name, %reason, "Source skipped");
                    stats.skipped += 1;
                    continue;
                }
                Err(e) => {
                    tracing::error!(source = %source.name, error = %e, "Failed to fetch source");
                    stats.failed += 1;
                    continue;
                }
            };

            let caption = format_caption(&candidate.source_tag, &candidate.title, &candidate.link);
            let outcome = deliver(
                self.transport.as_ref(),
                &caption,
                candidate.image_url.as_deref(),
                &self.default_animation,
            )
            .await;

            match outcome {
                DeliveryOutcome::Success(media) => {
                    tracing::info!(
                        source = %source.name,
                        title = %candidate.title,
                        media = ?media,
                        published_at = ?candidate.published,
                        "Published"
                    );
                    stats.published += 1;
                }
                DeliveryOutcome::Degraded => {
                    tracing::info!(
                        source = %source.name,
                        title = %candidate.title,
                        published_at = ?candidate.published,
                        "Published as text only"
                    );
                    stats.degraded += 1;
                }
                DeliveryOutcome::Failed => {
                    tracing::error!(
                        source = %source.name,
                        link = %candidate.link,
                        "Delivery failed, will retry next cycle"
                    );
                    stats.failed += 1;
                }
            }

            if outcome.is_published() {
                seen = self.store.record(&candidate.link);
            }

            tokio::time::sleep(self.pacing_delay).await;
        }

        tracing::info!(
            published = stats.published,
            degraded = stats.degraded,
            skipped = stats.skipped,
            failed = stats.failed,
            "Publish cycle finished"
        );
        stats
    }
}

use async_trait::async_trait;
use futures::stream::StreamExt;
use std::time::Duration;
use thiserror::Error;

use super::entry::FeedEntry;
use super::parser::parse_feed;

const MAX_RETRIES: u32 = 3;
const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while fetching and parsing one feed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request or body download exceeded the 30-second deadline
    #[error("Request timed out")]
    Timeout,
    /// Feed could not be parsed as RSS, Atom or JSON Feed
    #[error("Parse error: {0}")]
    Parse(String),
    /// Server returned 429 Too Many Requests after max retries
    #[error("Rate limited after {0} retries")]
    RateLimited(u32),
    /// Response body exceeded the 10MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Response was incomplete (received fewer bytes than Content-Length)
    #[error("Incomplete response: expected {expected} bytes, received {received}")]
    IncompleteResponse { expected: u64, received: usize },
}

/// Source of parsed feed entries.
///
/// The publisher only depends on this trait, so cycles can be driven by
/// canned entries in tests.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch `url` and return its entries, newest first as published by the feed.
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>, FetchError>;
}

/// Fetches feeds over HTTP and parses them with `feed-rs`.
///
/// # Behavior
///
/// - Each attempt has a 30-second deadline covering headers and body
/// - HTTP 429 and 5xx trigger exponential backoff (1s, 2s, 4s) with up to 3 retries
/// - Other non-2xx responses fail immediately
/// - Response bodies are limited to 10MB
/// - Truncated bodies (short of Content-Length) are retried like 5xx
#[derive(Debug, Clone)]
pub struct HttpFeedFetcher {
    client: reqwest::Client,
    backoff_base: Duration,
    request_timeout: Duration,
}

impl HttpFeedFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            backoff_base: Duration::from_secs(1),
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    /// Override the first backoff step. Tests use a few milliseconds.
    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    /// Override the per-attempt deadline, which covers headers and body.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn backoff(&self, retry: u32) -> Duration {
        self.backoff_base.saturating_mul(2u32.saturating_pow(retry))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut retry_count = 0;

        loop {
            let deadline = tokio::time::Instant::now() + self.request_timeout;
            let response = tokio::time::timeout_at(deadline, self.client.get(url).send())
                .await
                .map_err(|_| FetchError::Timeout)?
                .map_err(FetchError::Network)?;

            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                if retry_count >= MAX_RETRIES {
                    return Err(FetchError::RateLimited(MAX_RETRIES));
                }
                let delay = self.backoff(retry_count);
                tracing::warn!(
                    feed = %url,
                    retry = retry_count,
                    delay_ms = delay.as_millis() as u64,
                    "Rate limited, backing off"
                );
                tokio::time::sleep(delay).await;
                retry_count += 1;
                continue;
            }

            if status.is_server_error() {
                if retry_count >= MAX_RETRIES {
                    return Err(FetchError::HttpStatus(status.as_u16()));
                }
                let delay = self.backoff(retry_count);
                tracing::warn!(
                    feed = %url,
                    status = %status,
                    retry = retry_count,
                    delay_ms = delay.as_millis() as u64,
                    "Server error, retrying after delay"
                );
                tokio::time::sleep(delay).await;
                retry_count += 1;
                continue;
            }

            if !status.is_success() {
                return Err(FetchError::HttpStatus(status.as_u16()));
            }

            let body = tokio::time::timeout_at(deadline, read_limited_bytes(response, MAX_FEED_SIZE))
                .await
                .map_err(|_| FetchError::Timeout)?;

            match body {
                Ok(bytes) => return Ok(bytes),
                Err(FetchError::IncompleteResponse { expected, received }) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(FetchError::IncompleteResponse { expected, received });
                    }
                    let delay = self.backoff(retry_count);
                    tracing::debug!(
                        feed = %url,
                        expected = expected,
                        received = received,
                        attempt = retry_count + 1,
                        "Retrying incomplete download"
                    );
                    tokio::time::sleep(delay).await;
                    retry_count += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>, FetchError> {
        let bytes = self.fetch_bytes(url).await?;
        let entries = parse_feed(&bytes).map_err(|e| FetchError::Parse(e.to_string()))?;
        tracing::debug!(feed = %url, entries = entries.len(), bytes = bytes.len(), "Feed fetched");
        Ok(entries)
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    let expected_length = response.content_length();

    if let Some(len) = expected_length {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    if let Some(expected) = expected_length {
        if (bytes.len() as u64) < expected {
            return Err(FetchError::IncompleteResponse {
                expected,
                received: bytes.len(),
            });
        }
    }

    Ok(bytes)
}

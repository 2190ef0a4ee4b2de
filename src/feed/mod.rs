//! Feed retrieval and parsing.
//!
//! - [`entry`] - The structured, all-optional [`FeedEntry`] record
//! - [`parser`] - Conversion from `feed-rs` models into [`FeedEntry`]
//! - [`fetcher`] - The [`FeedFetcher`] seam and its HTTP implementation
//!
//! # Example
//!
//! ```ignore
//! use feedcast::feed::{FeedFetcher, HttpFeedFetcher};
//!
//! let fetcher = HttpFeedFetcher::new(reqwest::Client::new());
//! let entries = fetcher.fetch("https://example.com/rss").await?;
//! ```

mod entry;
mod fetcher;
mod parser;

pub use entry::{ContentBlock, Enclosure, FeedEntry, Thumbnail};
pub use fetcher::{FeedFetcher, FetchError, HttpFeedFetcher};
pub use parser::parse_feed;

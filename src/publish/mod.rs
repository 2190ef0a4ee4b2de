//! The publishing pipeline: pick, illustrate, caption, deliver, remember.
//!
//! # Architecture
//!
//! - [`image`] - Image selection with an ordered fallback chain
//! - [`caption`] - HTML caption layout
//! - [`poller`] - Per-source candidate selection
//! - [`delivery`] - Media send with a single text-only downgrade
//! - [`cycle`] - The [`Publisher`] that drives one pass over all sources
//!
//! # Example
//!
//! ```ignore
//! let publisher = Publisher::new(sources, fetcher, transport, store, default_gif);
//! let stats = publisher.run_cycle().await;
//! ```

mod caption;
mod cycle;
pub(crate) mod delivery;
mod image;
mod poller;

pub use caption::{format_caption, READ_MORE_LABEL};
pub use cycle::{CycleStats, Publisher};
pub use delivery::{deliver, DeliveryOutcome, MediaKind};
pub use image::resolve_image;
pub use poller::{poll_source, PollOutcome, PublishCandidate, SkipReason};

//! Persistent state owned by the publisher.
//!
//! Only the dedup record lives here today. Callers go through
//! [`DedupStore`]'s `load`/`record` and [`SeenSet::contains`], so the flat
//! JSON file can be swapped for an embedded key-value store without touching
//! them.

mod seen;

pub use seen::{DedupStore, SeenSet, StoreError, SEEN_CAP};

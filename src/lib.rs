//! Scheduled feed-to-channel publisher.
//!
//! Every cycle polls a fixed list of RSS/Atom sources, takes the newest
//! entry of each, skips anything already published, picks an illustrative
//! image, and posts a captioned message to one Telegram channel. Published
//! links are remembered in a small JSON file so restarts never repost.

pub mod config;
pub mod feed;
pub mod publish;
pub mod scheduler;
pub mod sources;
pub mod storage;
pub mod telegram;
pub mod util;

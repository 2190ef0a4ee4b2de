//! Telegram Bot API transport.
//!
//! Provides the [`Transport`] seam used by the publisher and a minimal
//! [`TelegramClient`] that sends HTML-formatted text, photos and animations
//! to one chat.
//!
//! # Example
//!
//! ```rust,ignore
//! use feedcast::telegram::{TelegramClient, Transport};
//!
//! let client = TelegramClient::new(reqwest::Client::new(), token, "@channel");
//! client.send_message("Hello, World!").await?;
//! ```

mod client;
mod error;

pub use client::{TelegramClient, Transport};
pub use error::TelegramError;

//! Utility functions for common operations.
//!
//! This module provides reusable utilities for:
//!
//! - **Image URL validation**: the extension policy applied to enclosures and
//!   to media before it is handed to the transport
//! - **Text processing**: escaping feed text for Telegram's HTML markup
//!
//! # Examples
//!
//! ```
//! use feedcast::util::{escape_html, is_valid_image_url};
//!
//! assert!(is_valid_image_url("https://example.com/cover.png"));
//! assert_eq!(escape_html("Tom & Jerry"), "Tom &amp; Jerry");
//! ```

mod text;
mod url_validator;

pub use text::{escape_attr, escape_html, strip_control_chars};
pub use url_validator::{is_animation_url, is_valid_image_url, IMAGE_EXTENSIONS};

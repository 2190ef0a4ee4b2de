use thiserror::Error;

/// Telegram Bot API errors
#[derive(Debug, Error)]
pub enum TelegramError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request exceeded the client-side timeout
    #[error("Request timed out")]
    Timeout,

    /// Telegram API returned an error
    #[error("Telegram API error (status {status}): {description}")]
    Api { status: u16, description: String },
}

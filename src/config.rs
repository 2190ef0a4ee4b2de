//! Runtime configuration: optional TOML file overlaid with environment variables.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Environment variables always win over file values. The bot token and the
//! channel id are required; everything else has a default.
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default illustrative animation used when a post has no usable image.
pub const DEFAULT_ANIMATION_URL: &str = "https://media.giphy.com/media/l0MYt5jPR6QX5pnqM/giphy.gif";

/// Longest accepted publish interval (one year).
pub const MAX_INTERVAL_HOURS: u64 = 24 * 365;

pub const ENV_BOT_TOKEN: &str = "BOT_TOKEN";
pub const ENV_CHANNEL_ID: &str = "CHANNEL_ID";
pub const ENV_INTERVAL_HOURS: &str = "POST_INTERVAL_HOURS";
pub const ENV_SEEN_PATH: &str = "SEEN_LINKS_PATH";
pub const ENV_DEFAULT_ANIMATION: &str = "DEFAULT_ANIMATION_URL";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

// ============================================================================
// Configuration Struct
// ============================================================================

/// Top-level service configuration.
///
/// Custom Debug impl masks `bot_token` so the secret never reaches logs.
#[derive(Deserialize)]
#[serde(default)]
pub struct Config {
    /// Telegram bot token.
    #[serde(deserialize_with = "deserialize_secret")]
    pub bot_token: Option<SecretString>,

    /// Target channel: numeric id or `@channelname`.
    pub channel_id: String,

    /// Hours between publish cycles.
    pub interval_hours: u64,

    /// Location of the JSON file holding already-published links.
    pub seen_path: PathBuf,

    /// Animation sent with posts that have no valid image.
    pub default_animation_url: String,

    /// Pause after each delivery attempt, in milliseconds.
    pub pacing_delay_ms: u64,

    /// Bot API base URL. Overridden in tests.
    pub telegram_api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_token: None,
            channel_id: String::new(),
            interval_hours: 6,
            seen_path: PathBuf::from("posted_links.json"),
            default_animation_url: DEFAULT_ANIMATION_URL.to_string(),
            pacing_delay_ms: 1000,
            telegram_api_base: "https://api.telegram.org".to_string(),
        }
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let token = Option::<String>::deserialize(deserializer)?;
    Ok(token.map(SecretString::from))
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "[REDACTED]"))
            .field("channel_id", &self.channel_id)
            .field("interval_hours", &self.interval_hours)
            .field("seen_path", &self.seen_path)
            .field("default_animation_url", &self.default_animation_url)
            .field("pacing_delay_ms", &self.pacing_delay_ms)
            .field("telegram_api_base", &self.telegram_api_base)
            .finish()
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: &'static [&'static str] = &[
        "bot_token",
        "channel_id",
        "interval_hours",
        "seen_path",
        "default_animation_url",
        "pacing_delay_ms",
        "telegram_api_base",
    ];

    /// Load configuration from an optional file, then apply the process
    /// environment and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)`
    /// - Unknown keys → accepted, logged as warning
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Overlay values from an environment lookup. Empty variables are ignored.
    ///
    /// Takes the lookup as a closure so tests don't have to mutate the
    /// process environment.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get(ENV_BOT_TOKEN) {
            self.bot_token = Some(SecretString::from(token.trim().to_string()));
        }
        if let Some(channel) = get(ENV_CHANNEL_ID) {
            self.channel_id = channel.trim().to_string();
        }
        if let Some(hours) = get(ENV_INTERVAL_HOURS) {
            self.interval_hours = hours.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue {
                    key: ENV_INTERVAL_HOURS,
                    reason: e.to_string(),
                }
            })?;
        }
        if let Some(path) = get(ENV_SEEN_PATH) {
            self.seen_path = PathBuf::from(path);
        }
        if let Some(url) = get(ENV_DEFAULT_ANIMATION) {
            self.default_animation_url = url.trim().to_string();
        }
        Ok(self)
    }

    /// Reject configurations the service cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        use secrecy::ExposeSecret;

        let has_token = self
            .bot_token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().trim().is_empty());
        if !has_token {
            return Err(ConfigError::Missing(ENV_BOT_TOKEN));
        }
        if self.channel_id.trim().is_empty() {
            return Err(ConfigError::Missing(ENV_CHANNEL_ID));
        }
        if self.interval_hours == 0 {
            return Err(ConfigError::InvalidValue {
                key: ENV_INTERVAL_HOURS,
                reason: "must be at least 1".to_string(),
            });
        }
        if self.interval_hours > MAX_INTERVAL_HOURS {
            return Err(ConfigError::InvalidValue {
                key: ENV_INTERVAL_HOURS,
                reason: format!("must be at most {MAX_INTERVAL_HOURS}"),
            });
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_hours.saturating_mul(3600))
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }
}

// ============================================================================
// Tests
// ============================================================================

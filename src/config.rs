//! Configuration Module
//!
//! Handles loading and managing bot configuration from environment variables.

use std::env;

use crate::error::ConfigError;

/// Default Bot API base URL.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Longest accepted long-poll timeout, in seconds.
pub const MAX_POLL_TIMEOUT_SECS: u64 = 60 * 60;

/// Bot configuration parameters.
///
/// All values except the tokens can be configured via environment variables
/// with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Token used outside debug mode
    pub bot_token: String,
    /// Token used in debug mode
    pub debug_bot_token: String,
    /// Debug mode: debug logs, debug token, no admin check
    pub debug_mode: bool,
    /// Long-poll timeout in seconds
    pub poll_timeout: u64,
    /// Bot API base URL
    pub api_url: String,
    /// Number of chats whose administrator lists are remembered
    pub cache_capacity: usize,
    /// How long an administrator list is trusted, in seconds
    pub cache_ttl_secs: i64,
    /// Admin HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `GEEKSONATOR_TELEGRAM_BOT_TOKEN` - Bot token
    /// - `GEEKSONATOR_DEBUG_TELEGRAM_BOT_TOKEN` - Bot token for debug mode
    /// - `GEEKSONATOR_DEBUG_MODE` - `true`/`1` enables debug mode (default: false)
    /// - `GEEKSONATOR_TELEGRAM_TIMEOUT_SECONDS` - Long-poll timeout (default: 15)
    /// - `GEEKSONATOR_TELEGRAM_API_URL` - Bot API base (default: https://api.telegram.org)
    /// - `GEEKSONATOR_ADMIN_CACHE_SIZE` - Cached chats (default: 1)
    /// - `GEEKSONATOR_ADMIN_CACHE_TTL_SECONDS` - Cache TTL (default: 86400)
    /// - `GEEKSONATOR_SERVER_PORT` - Admin HTTP port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bot_token: env::var("GEEKSONATOR_TELEGRAM_BOT_TOKEN").unwrap_or_default(),
            debug_bot_token: env::var("GEEKSONATOR_DEBUG_TELEGRAM_BOT_TOKEN").unwrap_or_default(),
            debug_mode: env::var("GEEKSONATOR_DEBUG_MODE")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.debug_mode),
            poll_timeout: parsed("GEEKSONATOR_TELEGRAM_TIMEOUT_SECONDS")
                .unwrap_or(defaults.poll_timeout),
            api_url: env::var("GEEKSONATOR_TELEGRAM_API_URL").unwrap_or(defaults.api_url),
            cache_capacity: parsed("GEEKSONATOR_ADMIN_CACHE_SIZE")
                .unwrap_or(defaults.cache_capacity),
            cache_ttl_secs: parsed("GEEKSONATOR_ADMIN_CACHE_TTL_SECONDS")
                .unwrap_or(defaults.cache_ttl_secs),
            server_port: parsed("GEEKSONATOR_SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    /// Token for the active mode.
    pub fn active_token(&self) -> &str {
        if self.debug_mode {
            &self.debug_bot_token
        } else {
            &self.bot_token
        }
    }

    /// Administrator cache TTL. Saturates at `Duration::MAX` for values
    /// `validate` rejects.
    pub fn cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::try_seconds(self.cache_ttl_secs).unwrap_or(chrono::Duration::MAX)
    }

    /// Checks the values the bot cannot start without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.active_token().trim().is_empty() {
            return Err(ConfigError::Missing(if self.debug_mode {
                "GEEKSONATOR_DEBUG_TELEGRAM_BOT_TOKEN"
            } else {
                "GEEKSONATOR_TELEGRAM_BOT_TOKEN"
            }));
        }

        if self.cache_capacity == 0 {
            return Err(ConfigError::Invalid {
                name: "GEEKSONATOR_ADMIN_CACHE_SIZE",
                reason: "must be at least 1".to_string(),
            });
        }

        if self.cache_ttl_secs <= 0 {
            return Err(ConfigError::Invalid {
                name: "GEEKSONATOR_ADMIN_CACHE_TTL_SECONDS",
                reason: "must be positive".to_string(),
            });
        }

        if chrono::Duration::try_seconds(self.cache_ttl_secs).is_none() {
            return Err(ConfigError::Invalid {
                name: "GEEKSONATOR_ADMIN_CACHE_TTL_SECONDS",
                reason: format!("{} seconds is out of range", self.cache_ttl_secs),
            });
        }

        if self.poll_timeout > MAX_POLL_TIMEOUT_SECS {
            return Err(ConfigError::Invalid {
                name: "GEEKSONATOR_TELEGRAM_TIMEOUT_SECONDS",
                reason: format!("must be at most {MAX_POLL_TIMEOUT_SECS}"),
            });
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                name: "GEEKSONATOR_TELEGRAM_API_URL",
                reason: format!("{} is not an http(s) URL", self.api_url),
            });
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            debug_bot_token: String::new(),
            debug_mode: false,
            poll_timeout: 15,
            api_url: DEFAULT_API_URL.to_string(),
            cache_capacity: 1,
            cache_ttl_secs: 24 * 60 * 60,
            server_port: 3000,
        }
    }
}

fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

//! Error types for the relay bot
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Usage errors raised by the administrator cache.
///
/// All variants are configuration or caller mistakes: they are returned
/// immediately and never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity must be at least one entry
    #[error("must specify a positive capacity")]
    InvalidCapacity,

    /// TTL must be strictly positive
    #[error("must specify a positive ttl")]
    InvalidTtl,

    /// The key equals the key type's empty value
    #[error("key is empty")]
    EmptyKey,
}

// == Bot Error Enum ==
/// Errors raised while talking to the chat transport.
#[derive(Error, Debug)]
pub enum BotError {
    /// Network or HTTP-level failure
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Bot API answered with `ok: false`
    #[error("{method} rejected: {description}")]
    Api { method: String, description: String },

    /// The Bot API answered `ok: true` without a result payload
    #[error("{0} returned no result")]
    MissingResult(String),
}

// == Config Error Enum ==
/// Errors raised while loading configuration at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is present but cannot be used
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Convenience Result type for transport operations.
pub type BotResult<T> = std::result::Result<T, BotError>;

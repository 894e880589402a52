//! API Handlers
//!
//! HTTP request handlers for the admin endpoints.

use axum::{extract::State, Json};

use crate::cache::{CacheOptions, SharedTtlCache};
use crate::config::Config;
use crate::error::Result;
use crate::models::{ChatId, ChatMember, HealthResponse, StatsResponse};

/// Shared administrator cache, also held by the observer.
pub type SharedAdminCache = SharedTtlCache<ChatId, Vec<ChatMember>>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Administrator cache; clones share the same store
    pub cache: SharedAdminCache,
}

impl AppState {
    /// Creates a new AppState around an existing cache handle.
    pub fn new(cache: SharedAdminCache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Initializes the administrator cache with the configured capacity and
    /// TTL; cache tracing follows debug mode.
    pub fn from_config(config: &Config) -> Result<Self> {
        let options = CacheOptions::new()
            .concurrency_safe(true)
            .debug_log(config.debug_mode);
        let cache = SharedTtlCache::new(config.cache_capacity, config.cache_ttl(), options)?;
        Ok(Self::new(cache))
    }
}

/// Handler for GET /stats
///
/// Returns the administrator cache counters.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

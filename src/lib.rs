//! Geeksonator - chat moderation relay bot
//!
//! Answers a fixed set of slash-commands for chat administrators, memoizing
//! administrator lists in a bounded TTL cache.

pub mod api;
pub mod bot;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_polling_task;

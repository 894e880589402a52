//! Bot Module
//!
//! Chat transport seam, command table and the update observer.

pub mod commands;
pub mod observer;
pub mod provider;

#[cfg(test)]
pub(crate) mod testing;

pub use observer::{author_is_admin, build_reply, AdminCache, Observer};
pub use provider::{BotProvider, TelegramClient};

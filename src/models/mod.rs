//! Data models
//!
//! Telegram Bot API payloads and the admin API response bodies.

pub mod responses;
pub mod telegram;

// Re-export commonly used types
pub use responses::{HealthResponse, StatsResponse};
pub use telegram::{
    ApiResponse, Chat, ChatId, ChatMember, GetChatAdministrators, GetUpdates, Message,
    SendMessage, Update, User,
};

//! Telegram Bot API DTOs
//!
//! Only the fields the relay reads or writes are modelled; unknown fields in
//! incoming JSON are ignored.

use serde::{Deserialize, Serialize};

use crate::error::{BotError, BotResult};

/// Chat identifier used as the administrator cache key.
pub type ChatId = i64;

/// One incoming update from `getUpdates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

/// A chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    /// Sender; absent for channel posts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// The message this one answers, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_message: Option<Box<Message>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl User {
    /// First name followed by the last name when there is one.
    pub fn full_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
}

/// Entry of `getChatAdministrators`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMember {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

// == Outgoing Requests ==
/// Body of `sendMessage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessage {
    pub chat_id: ChatId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<String>,
    #[serde(default)]
    pub disable_web_page_preview: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
}

impl SendMessage {
    /// Plain-text message to `chat_id`.
    pub fn new(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            parse_mode: None,
            disable_web_page_preview: false,
            reply_to_message_id: None,
        }
    }
}

/// Body of `getUpdates`.
#[derive(Debug, Clone, Serialize)]
pub struct GetUpdates {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: Vec<String>,
}

/// Body of `getChatAdministrators`.
#[derive(Debug, Clone, Serialize)]
pub struct GetChatAdministrators {
    pub chat_id: ChatId,
}

// == Response Envelope ==
/// Envelope wrapping every Bot API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Unwraps the envelope of a call to `method`.
    pub fn into_result(self, method: &str) -> BotResult<T> {
        if !self.ok {
            return Err(BotError::Api {
                method: method.to_string(),
                description: self
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            });
        }

        self.result
            .ok_or_else(|| BotError::MissingResult(method.to_string()))
    }
}

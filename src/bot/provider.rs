//! Bot Provider
//!
//! The transport seam: everything the relay needs from the chat platform, and
//! the HTTP implementation against the Telegram Bot API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::{BotError, BotResult};
use crate::models::{
    ApiResponse, ChatId, ChatMember, GetChatAdministrators, GetUpdates, Message, SendMessage,
    Update, User,
};

/// Extra time the HTTP client waits on top of the long-poll timeout.
const REQUEST_GRACE: Duration = Duration::from_secs(10);

// == Bot Provider ==
/// Operations the relay needs from the chat transport.
#[async_trait]
pub trait BotProvider: Send + Sync {
    /// Long-polls for updates with `update_id >= offset`.
    async fn get_updates(&self, offset: i64, timeout_secs: u64) -> BotResult<Vec<Update>>;

    /// Returns the administrators of `chat_id`.
    async fn get_chat_administrators(&self, chat_id: ChatId) -> BotResult<Vec<ChatMember>>;

    /// Sends a message.
    async fn send_message(&self, message: &SendMessage) -> BotResult<Message>;
}

// == Telegram Client ==
/// Bot API client over HTTPS + JSON.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    /// `{api_url}/bot{token}`; never logged
    endpoint: String,
}

impl TelegramClient {
    /// Creates a client for `token` against `api_url`.
    ///
    /// # Arguments
    /// * `api_url` - Bot API base, e.g. `https://api.telegram.org`
    /// * `token` - Bot token
    /// * `poll_timeout` - Long-poll timeout; requests may take this long plus a grace period
    pub fn new(api_url: &str, token: &str, poll_timeout: Duration) -> BotResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(poll_timeout.saturating_add(REQUEST_GRACE))
            .build()
            .map_err(|e| BotError::Http(e.without_url()))?;

        Ok(Self {
            http,
            endpoint: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
        })
    }

    /// Returns the bot's own account.
    pub async fn get_me(&self) -> BotResult<User> {
        self.call("getMe", &serde_json::json!({})).await
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> BotResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(method, "calling bot api");

        // Errors carry the request URL, which embeds the token
        let response = self
            .http
            .post(format!("{}/{}", self.endpoint, method))
            .json(body)
            .send()
            .await
            .map_err(|e| BotError::Http(e.without_url()))?;

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| BotError::Http(e.without_url()))?;

        envelope.into_result(method)
    }
}

#[async_trait]
impl BotProvider for TelegramClient {
    async fn get_updates(&self, offset: i64, timeout_secs: u64) -> BotResult<Vec<Update>> {
        let body = GetUpdates {
            offset,
            timeout: timeout_secs,
            allowed_updates: vec!["message".to_string()],
        };
        self.call("getUpdates", &body).await
    }

    async fn get_chat_administrators(&self, chat_id: ChatId) -> BotResult<Vec<ChatMember>> {
        self.call("getChatAdministrators", &GetChatAdministrators { chat_id })
            .await
    }

    async fn send_message(&self, message: &SendMessage) -> BotResult<Message> {
        self.call("sendMessage", message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client =
            TelegramClient::new("http://localhost:8081/", "123:abc", Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.endpoint, "http://localhost:8081/bot123:abc");
    }

    #[test]
    fn test_huge_poll_timeout_is_accepted() {
        let client = TelegramClient::new("http://localhost:8081", "123:abc", Duration::MAX);
        assert!(client.is_ok());
    }
}

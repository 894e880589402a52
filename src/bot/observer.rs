//! Update Observer
//!
//! Turns incoming updates into replies: recognizes commands, checks that the
//! author is a chat administrator and sends the canned text back.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::bot::{commands, BotProvider};
use crate::cache::Cacher;
use crate::error::BotResult;
use crate::models::{ChatId, ChatMember, Message, SendMessage, Update};

/// Parse mode used for every reply.
const PARSE_MODE: &str = "HTML";

/// Administrator lists memoized per chat.
pub type AdminCache = Box<dyn Cacher<ChatId, Vec<ChatMember>>>;

// == Observer ==
/// Processes updates one at a time.
pub struct Observer {
    provider: Arc<dyn BotProvider>,
    cache: AdminCache,
    skip_admin_check: bool,
}

impl Observer {
    /// Creates an observer replying through `provider` and memoizing
    /// administrator lists in `cache`.
    pub fn new(provider: Arc<dyn BotProvider>, cache: AdminCache) -> Self {
        Self {
            provider,
            cache,
            skip_admin_check: false,
        }
    }

    /// Answers every command regardless of who sent it.
    pub fn skip_admin_check(mut self, skip: bool) -> Self {
        self.skip_admin_check = skip;
        self
    }

    // == Process Update ==
    /// Handles one update, sending a reply when it carries an admin's command.
    pub async fn process_update(&mut self, update: &Update) -> BotResult<()> {
        let Some(message) = update.message.as_ref() else {
            return Ok(());
        };

        let Some(reply) = self.process_message(message).await? else {
            return Ok(());
        };

        self.send_reply(message, reply).await?;
        Ok(())
    }

    // == Process Message ==
    /// Returns the reply owed to `message`, if any.
    ///
    /// Unknown text yields `None` without touching the transport. Known
    /// commands are answered only for chat administrators unless the admin
    /// check is skipped.
    pub async fn process_message(&mut self, message: &Message) -> BotResult<Option<&'static str>> {
        let text = message.text.as_deref().unwrap_or_default();
        debug!(chat_id = message.chat.id, text, "received message");

        let Some(reply) = commands::reply_for(text) else {
            return Ok(None);
        };
        debug!(chat_id = message.chat.id, reply, "output message");

        if self.skip_admin_check {
            return Ok(Some(reply));
        }

        let Some(author) = message.from.as_ref() else {
            return Ok(None);
        };

        let admins = self.admins(message.chat.id).await?;
        if author_is_admin(&admins, author.id) {
            Ok(Some(reply))
        } else {
            debug!(chat_id = message.chat.id, user_id = author.id, "author is not an admin");
            Ok(None)
        }
    }

    // == Send Reply ==
    /// Sends `text` as an answer to `message`.
    pub async fn send_reply(&self, message: &Message, text: &str) -> BotResult<Message> {
        let outgoing = build_reply(message, text);
        self.provider.send_message(&outgoing).await
    }

    /// Administrator list of `chat_id`, from the cache when possible.
    async fn admins(&mut self, chat_id: ChatId) -> BotResult<Vec<ChatMember>> {
        if let Some(admins) = self.cache.get(&chat_id) {
            return Ok(admins);
        }

        let admins = self.provider.get_chat_administrators(chat_id).await?;

        // The cache only saves a round trip; a failed write is not fatal
        if let Err(err) = self.cache.set(chat_id, admins.clone()) {
            warn!(chat_id, error = %err, "failed to cache chat administrators");
        }

        Ok(admins)
    }
}

/// Whether `user_id` appears in `admins`.
pub fn author_is_admin(admins: &[ChatMember], user_id: i64) -> bool {
    admins
        .iter()
        .any(|admin| admin.user.as_ref().is_some_and(|user| user.id == user_id))
}

/// Builds the outgoing message for `text` in answer to `message`.
///
/// When the command itself replies to someone, the bot replies to that
/// message instead and mentions its author: by `@username` when there is one,
/// otherwise by an HTML user link carrying their name.
pub fn build_reply(message: &Message, text: &str) -> SendMessage {
    let mut outgoing = SendMessage::new(message.chat.id, text);
    outgoing.parse_mode = Some(PARSE_MODE.to_string());
    outgoing.disable_web_page_preview = true;

    if let Some(target) = message.reply_to_message.as_deref() {
        outgoing.reply_to_message_id = Some(target.message_id);

        if let Some(author) = target.from.as_ref() {
            let mention = match author.username.as_deref() {
                Some(username) if !username.is_empty() => format!("@{username}"),
                _ => format!(
                    r#"<a href="tg://user?id={}">{}</a>"#,
                    author.id,
                    escape_html(&author.full_name())
                ),
            };
            outgoing.text = format!("{mention} {text}");
        }
    }

    outgoing
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

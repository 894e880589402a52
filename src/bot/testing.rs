//! In-memory BotProvider and message builders for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::bot::BotProvider;
use crate::error::{BotError, BotResult};
use crate::models::{Chat, ChatId, ChatMember, Message, SendMessage, Update, User};

#[derive(Debug, Default)]
pub struct MockProvider {
    pub admins: Vec<ChatMember>,
    pub fail_admins: bool,
    pub fail_send: bool,
    pub admin_calls: AtomicUsize,
    pub update_batches: Mutex<VecDeque<BotResult<Vec<Update>>>>,
    pub offsets: Mutex<Vec<i64>>,
    pub sent: Mutex<Vec<SendMessage>>,
}

impl MockProvider {
    pub fn with_admins(admins: Vec<ChatMember>) -> Self {
        Self {
            admins,
            ..Self::default()
        }
    }

    pub fn push_updates(&self, batch: BotResult<Vec<Update>>) {
        self.update_batches.lock().unwrap().push_back(batch);
    }

    pub fn sent(&self) -> Vec<SendMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn admin_calls(&self) -> usize {
        self.admin_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BotProvider for MockProvider {
    async fn get_updates(&self, offset: i64, _timeout_secs: u64) -> BotResult<Vec<Update>> {
        self.offsets.lock().unwrap().push(offset);
        let next = self.update_batches.lock().unwrap().pop_front();
        match next {
            Some(batch) => batch,
            None => {
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
                Ok(Vec::new())
            }
        }
    }

    async fn get_chat_administrators(&self, _chat_id: ChatId) -> BotResult<Vec<ChatMember>> {
        self.admin_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_admins {
            return Err(BotError::Api {
                method: "getChatAdministrators".to_string(),
                description: "Bad Request: chat not found".to_string(),
            });
        }
        Ok(self.admins.clone())
    }

    async fn send_message(&self, message: &SendMessage) -> BotResult<Message> {
        if self.fail_send {
            return Err(BotError::Api {
                method: "sendMessage".to_string(),
                description: "Forbidden: bot was kicked".to_string(),
            });
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(Message {
            message_id: 1000,
            from: None,
            chat: Chat {
                id: message.chat_id,
            },
            text: Some(message.text.clone()),
            reply_to_message: None,
        })
    }
}

pub fn user(id: i64, first_name: &str, username: Option<&str>) -> User {
    User {
        id,
        is_bot: false,
        first_name: first_name.to_string(),
        last_name: None,
        username: username.map(str::to_string),
    }
}

pub fn admin(id: i64) -> ChatMember {
    ChatMember {
        status: "administrator".to_string(),
        user: Some(user(id, "Admin", None)),
    }
}

pub fn message(chat_id: ChatId, from: Option<User>, text: &str) -> Message {
    Message {
        message_id: 1,
        from,
        chat: Chat { id: chat_id },
        text: Some(text.to_string()),
        reply_to_message: None,
    }
}

pub fn update(update_id: i64, message: Option<Message>) -> Update {
    Update { update_id, message }
}

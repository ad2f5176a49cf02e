//! Telegram-backed sender using teloxide.

use async_trait::async_trait;
use teloxide::prelude::*;

use crate::answers::handler::MessageSender;

/// Sends plain-text replies through the Telegram Bot API.
pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send_text(&self, recipient: i64, text: &str) -> Result<i64, String> {
        self.bot
            .send_message(ChatId(recipient), text)
            .await
            .map(|msg| msg.id.0 as i64)
            .map_err(|e| format!("Failed to send: {e}"))
    }
}

//! Handler logic, independent of the chat SDK.
//!
//! The Telegram adapter extracts ids and text from updates and calls into
//! [`BotService`]; replies go out through the [`MessagingPort`].

use std::sync::Arc;

use crate::{
    commands::{ButtonChoice, Command},
    domain::{ChatId, MessageRef},
    messaging::port::MessagingPort,
    registry::UserRegistry,
    replies, Result,
};

pub struct BotService {
    registry: UserRegistry,
    messenger: Arc<dyn MessagingPort>,
}

impl BotService {
    pub fn new(registry: UserRegistry, messenger: Arc<dyn MessagingPort>) -> Self {
        Self {
            registry,
            messenger,
        }
    }

    pub fn registry(&self) -> &UserRegistry {
        &self.registry
    }

    pub async fn handle_command(
        &self,
        chat_id: ChatId,
        display_name: &str,
        cmd: Command,
    ) -> Result<()> {
        tracing::debug!(chat_id = chat_id.0, command = cmd.name(), "handling command");
        match cmd {
            Command::Start => self.start(chat_id, display_name).await,
            Command::Users => self.users(chat_id).await,
            Command::Buttons => self.buttons(chat_id).await,
        }
    }

    async fn start(&self, chat_id: ChatId, display_name: &str) -> Result<()> {
        let name = if display_name.trim().is_empty() {
            replies::FALLBACK_NAME
        } else {
            display_name
        };
        let added = self.registry.register(chat_id, name).await?;
        self.messenger
            .send_text(chat_id, &replies::greeting(name, added))
            .await?;
        Ok(())
    }

    async fn users(&self, chat_id: ChatId) -> Result<()> {
        let names = self.registry.list_all().await?;
        self.messenger
            .send_text(chat_id, &replies::user_list(&names))
            .await?;
        Ok(())
    }

    async fn buttons(&self, chat_id: ChatId) -> Result<()> {
        self.messenger
            .send_inline_keyboard(chat_id, replies::BUTTONS_PROMPT, replies::choice_keyboard())
            .await?;
        Ok(())
    }

    /// Echo plain (non-command) text back to the chat.
    pub async fn handle_text(&self, chat_id: ChatId, text: &str) -> Result<()> {
        self.messenger
            .send_text(chat_id, &replies::echo(text))
            .await?;
        Ok(())
    }

    /// Handle an inline-button press. The query is always answered so the
    /// client stops its loading indicator.
    pub async fn handle_callback(
        &self,
        callback_id: &str,
        message: Option<MessageRef>,
        data: &str,
    ) -> Result<()> {
        self.messenger.answer_callback_query(callback_id).await?;

        let Some(choice) = ButtonChoice::from_token(data) else {
            tracing::debug!(data, "ignoring unknown callback token");
            return Ok(());
        };
        let Some(msg) = message else {
            return Ok(());
        };

        self.messenger
            .edit_text(msg, replies::button_pressed(choice))
            .await
    }
}

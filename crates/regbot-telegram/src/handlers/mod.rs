//! Telegram update handlers.
//!
//! Each handler is a small adapter that extracts ids and text from the
//! teloxide update and calls into the core `BotService`.

use std::sync::Arc;

use teloxide::types::{CallbackQuery, Message, MessageEntity, MessageEntityKind};

use regbot_core::{
    commands::{parse_command, Command},
    Result,
};

use crate::router::AppState;
mod callback;
mod commands;
mod text;

/// What to do with an incoming text message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Route {
    Command(Command),
    /// A command this bot does not know: no reply.
    Ignore,
    Echo,
}

/// A message is a command only when Telegram marks a `bot_command` entity at
/// offset 0; anything else (including `/ hello`) is plain text.
pub(crate) fn route(text: &str, entities: &[MessageEntity]) -> Route {
    let is_command = entities
        .iter()
        .any(|e| e.offset == 0 && matches!(e.kind, MessageEntityKind::BotCommand));
    if !is_command {
        return Route::Echo;
    }

    match parse_command(text) {
        Some(cmd) => Route::Command(cmd),
        None => Route::Ignore,
    }
}

pub async fn handle_callback(q: CallbackQuery, state: Arc<AppState>) -> Result<()> {
    callback::handle_callback(q, state).await
}

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> Result<()> {
    let Some(text) = msg.text() else {
        tracing::debug!(chat_id = msg.chat.id.0, "ignoring non-text message");
        return Ok(());
    };

    match route(text, msg.entities().unwrap_or_default()) {
        Route::Command(cmd) => commands::handle_command(&msg, cmd, state).await,
        Route::Echo => text::handle_text(&msg, text, state).await,
        Route::Ignore => {
            tracing::debug!(chat_id = msg.chat.id.0, "ignoring unknown command");
            Ok(())
        }
    }
}

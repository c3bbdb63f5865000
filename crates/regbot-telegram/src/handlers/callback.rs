use std::sync::Arc;

use teloxide::types::CallbackQuery;

use regbot_core::{
    domain::{ChatId, MessageId, MessageRef},
    Result,
};

use crate::router::AppState;

pub async fn handle_callback(q: CallbackQuery, state: Arc<AppState>) -> Result<()> {
    let message = q.message.as_ref().map(|m| MessageRef {
        chat_id: ChatId(m.chat.id.0),
        message_id: MessageId(m.id.0),
    });
    let data = q.data.as_deref().unwrap_or_default();

    state.service.handle_callback(&q.id, message, data).await
}

use std::sync::Arc;

use teloxide::types::Message;

use regbot_core::{domain::ChatId, Result};

use crate::router::AppState;

pub async fn handle_text(msg: &Message, text: &str, state: Arc<AppState>) -> Result<()> {
    state.service.handle_text(ChatId(msg.chat.id.0), text).await
}

use std::sync::Arc;

use teloxide::types::Message;

use regbot_core::{commands::Command, domain::ChatId, Result};

use crate::router::AppState;

pub async fn handle_command(msg: &Message, cmd: Command, state: Arc<AppState>) -> Result<()> {
    let name = display_name(
        msg.from().map(|u| u.first_name.as_str()),
        msg.chat.first_name(),
    );

    state
        .service
        .handle_command(ChatId(msg.chat.id.0), &name, cmd)
        .await
}

/// First name of the sender; messages without a sender fall back to the
/// chat's own first name.
fn display_name(sender_first_name: Option<&str>, chat_first_name: Option<&str>) -> String {
    sender_first_name
        .or(chat_first_name)
        .unwrap_or_default()
        .to_string()
}

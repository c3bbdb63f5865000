//! User-visible reply texts.

use crate::{
    commands::ButtonChoice,
    messaging::types::{InlineButton, InlineKeyboard},
};

pub const NO_USERS: &str = "No users found yet.";
pub const BUTTONS_PROMPT: &str = "Choose an option:";

/// Name used when Telegram hands us an empty first name.
pub const FALLBACK_NAME: &str = "there";

pub fn greeting(name: &str, newly_added: bool) -> String {
    if newly_added {
        format!("👋 Hi {name}! You’ve been added to the database.")
    } else {
        format!("👋 Hi {name}! You are already registered.")
    }
}

pub fn user_list(names: &[String]) -> String {
    if names.is_empty() {
        return NO_USERS.to_string();
    }
    let lines = names
        .iter()
        .map(|n| format!("• {n}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("📋 Registered users:\n{lines}")
}

pub fn echo(text: &str) -> String {
    format!("You said: {text}")
}

pub fn button_label(choice: ButtonChoice) -> &'static str {
    match choice {
        ButtonChoice::Hi => "Say Hi 👋",
        ButtonChoice::Bye => "Say Bye 👋",
    }
}

pub fn button_pressed(choice: ButtonChoice) -> &'static str {
    match choice {
        ButtonChoice::Hi => "You pressed 👋 Hi!",
        ButtonChoice::Bye => "You pressed 👋 Bye!",
    }
}

pub fn choice_keyboard() -> InlineKeyboard {
    InlineKeyboard::single_row(
        ButtonChoice::ALL
            .into_iter()
            .map(|c| InlineButton::new(button_label(c), c.token()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_list_formats_bullets() {
        let names = vec!["Alice".to_string(), "Bob".to_string()];
        assert_eq!(user_list(&names), "📋 Registered users:\n• Alice\n• Bob");
        assert_eq!(user_list(&[]), NO_USERS);
    }

    #[test]
    fn keyboard_has_one_row_with_both_choices() {
        let kb = choice_keyboard();
        assert_eq!(kb.rows.len(), 1);
        let tokens: Vec<&str> = kb.buttons().map(|b| b.callback_data.as_str()).collect();
        assert_eq!(tokens, vec!["hi", "bye"]);
    }
}

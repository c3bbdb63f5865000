//! Closed set of bot commands and inline-button choices.

/// A command the bot understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Start,
    Users,
    Buttons,
}

impl Command {
    /// Command table: every variant with its name and the description
    /// published to Telegram's command menu.
    pub const ALL: [(Command, &'static str, &'static str); 3] = [
        (Command::Start, "start", "Register and get a greeting"),
        (Command::Users, "users", "List registered users"),
        (Command::Buttons, "buttons", "Show a choice keyboard"),
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Users => "users",
            Command::Buttons => "buttons",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(_, n, _)| n.eq_ignore_ascii_case(name))
            .map(|(cmd, _, _)| *cmd)
    }
}

/// Parse `/cmd`, `/cmd@botname`, `/cmd args`.
///
/// Returns `None` for plain text and for commands the bot does not know.
pub fn parse_command(text: &str) -> Option<Command> {
    let first = text.trim().split_whitespace().next()?;
    let name = first.strip_prefix('/')?.split('@').next().unwrap_or("");
    if name.is_empty() {
        return None;
    }
    Command::from_name(name)
}

/// Options offered by `/buttons`. The token is the opaque callback payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonChoice {
    Hi,
    Bye,
}

impl ButtonChoice {
    pub const ALL: [ButtonChoice; 2] = [ButtonChoice::Hi, ButtonChoice::Bye];

    pub fn token(self) -> &'static str {
        match self {
            ButtonChoice::Hi => "hi",
            ButtonChoice::Bye => "bye",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.token() == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_command("/start"), Some(Command::Start));
        assert_eq!(parse_command("/users"), Some(Command::Users));
        assert_eq!(parse_command("  /buttons  "), Some(Command::Buttons));
    }

    #[test]
    fn parses_bot_suffix_case_and_args() {
        assert_eq!(parse_command("/start@my_reg_bot"), Some(Command::Start));
        assert_eq!(parse_command("/USERS"), Some(Command::Users));
        assert_eq!(parse_command("/start hello there"), Some(Command::Start));
    }

    #[test]
    fn rejects_unknown_and_plain_text() {
        assert_eq!(parse_command("/help"), None);
        assert_eq!(parse_command("/"), None);
        assert_eq!(parse_command("/@bot"), None);
        assert_eq!(parse_command("start"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn command_table_names_round_trip() {
        for (cmd, name, desc) in Command::ALL {
            assert_eq!(cmd.name(), name);
            assert!(!desc.is_empty());
            assert_eq!(Command::from_name(name), Some(cmd));
        }
    }

    #[test]
    fn button_tokens() {
        assert_eq!(ButtonChoice::from_token("hi"), Some(ButtonChoice::Hi));
        assert_eq!(ButtonChoice::from_token("bye"), Some(ButtonChoice::Bye));
        assert_eq!(ButtonChoice::from_token("HI"), None);
        assert_eq!(ButtonChoice::from_token(""), None);
    }
}

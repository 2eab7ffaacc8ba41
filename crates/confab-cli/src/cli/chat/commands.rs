//! Slash command parsing for the chat loop.

use console::style;

/// Commands available inside the chat loop.
#[derive(Debug, PartialEq, Eq)]
pub enum ChatCommand {
    Help,
    /// Show the conversation list (refreshes it first).
    Chats,
    /// Switch to the numbered conversation from the list.
    Switch(usize),
    /// Start a new conversation and select it.
    New,
    /// Re-fetch the current conversation's history.
    Refresh,
    Logout,
    Exit,
    Unknown(String),
}

/// Parse a slash command. Returns None for ordinary chat text.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let input = input.trim();
    if !input.starts_with('/') {
        return None;
    }
    let mut parts = input.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or("");
    let arg = parts.next().map(str::trim);

    Some(match name {
        "/help" => ChatCommand::Help,
        "/chats" => ChatCommand::Chats,
        "/switch" => match arg.and_then(|a| a.parse::<usize>().ok()) {
            Some(n) if n >= 1 => ChatCommand::Switch(n),
            _ => ChatCommand::Unknown("/switch (expected a chat number)".to_string()),
        },
        "/new" => ChatCommand::New,
        "/refresh" => ChatCommand::Refresh,
        "/logout" => ChatCommand::Logout,
        "/exit" | "/quit" => ChatCommand::Exit,
        other => ChatCommand::Unknown(other.to_string()),
    })
}

pub fn print_help() {
    println!();
    println!("  {}", style("Commands").bold());
    println!("  /chats         list your chats");
    println!("  /switch <n>    open chat number n from the list");
    println!("  /new           start a new chat");
    println!("  /refresh       re-fetch the current chat's messages");
    println!("  /logout        sign out and return to the menu");
    println!("  /exit          quit");
    println!("  /help          show this help");
    println!();
    println!("  Anything else is sent to the bot.");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(parse("hello there"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_known_commands() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/new"), Some(ChatCommand::New));
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse("  /logout  "), Some(ChatCommand::Logout));
    }

    #[test]
    fn test_switch_with_number() {
        assert_eq!(parse("/switch 3"), Some(ChatCommand::Switch(3)));
    }

    #[test]
    fn test_switch_without_number_is_unknown() {
        assert!(matches!(parse("/switch"), Some(ChatCommand::Unknown(_))));
        assert!(matches!(parse("/switch zero"), Some(ChatCommand::Unknown(_))));
        assert!(matches!(parse("/switch 0"), Some(ChatCommand::Unknown(_))));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse("/frobnicate"),
            Some(ChatCommand::Unknown("/frobnicate".to_string()))
        );
    }
}

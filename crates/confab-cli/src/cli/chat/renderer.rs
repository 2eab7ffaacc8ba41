//! Message and list rendering for the chat loop.
//!
//! Bot-authored bodies are rendered as markdown through termimad; they
//! are never interpreted as raw terminal escapes or HTML. User bodies
//! are printed verbatim. Treating server-provided bot content as
//! markdown (not markup) is a deliberate choice -- see DESIGN.md.

use console::style;
use termimad::MadSkin;
use uuid::Uuid;

use confab_types::conversation::Conversation;
use confab_types::message::Message;

/// Renders messages and conversation lists.
pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    pub fn new() -> Self {
        Self {
            skin: MadSkin::default(),
        }
    }

    /// Print one message with its author label.
    pub fn print_message(&self, message: &Message) {
        if message.is_bot {
            let rendered = self.skin.text(&message.body, None).to_string();
            println!("  {} {}", style("Bot >").cyan().bold(), rendered.trim_end());
        } else {
            println!("  {} {}", style("You >").green().bold(), message.body);
        }
    }

    /// Print a full history, oldest first.
    pub fn print_history(&self, messages: &[Message]) {
        if messages.is_empty() {
            println!("  {}", style("No messages yet. Say hello!").dim());
            return;
        }
        for message in messages {
            self.print_message(message);
        }
    }

    /// Print the numbered conversation list, newest first, marking the
    /// selected one.
    pub fn print_conversation_list(&self, conversations: &[Conversation], selected: Option<Uuid>) {
        println!();
        println!("  {}", style("Your Chats").bold());
        if conversations.is_empty() {
            println!("  {}", style("No chats yet. Use /new to start one.").dim());
            println!();
            return;
        }
        for (index, conversation) in conversations.iter().enumerate() {
            let label = Conversation::label(index);
            if selected == Some(conversation.id) {
                println!("  {} {}", style(">").cyan().bold(), style(label).bold());
            } else {
                println!("    {label}");
            }
        }
        println!();
    }

    /// Print the guest-mode placeholder shown instead of the list.
    pub fn print_guest_placeholder(&self) {
        println!();
        println!("  {}", style("Guest Mode").bold());
        println!(
            "  {}",
            style("Sign up to view and save your previous chats!").red().bold()
        );
        println!();
    }
}

/// One-time welcome banner.
pub fn print_welcome_banner() {
    println!();
    println!("  {}", style("Confab").bold().underlined());
    println!("  {}", style("Chatbot client -- /help for commands").dim());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_markdown_renders_to_plain_text() {
        let renderer = ChatRenderer::new();
        let rendered = renderer.skin.text("**hi there**", None).to_string();
        // Markup characters are consumed by the renderer, not echoed.
        assert!(rendered.contains("hi there"));
        assert!(!rendered.contains("**"));
    }
}

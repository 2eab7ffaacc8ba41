//! Main chat loop orchestration.
//!
//! Drives the session controller from terminal input: conversation
//! list or guest placeholder, slash commands, and the send/re-fetch
//! cycle with a spinner while the bot reply is in flight.

use console::style;
use tracing::debug;

use confab_core::auth::AuthProvider;
use confab_core::notify::NotificationSink;
use confab_types::conversation::Conversation;
use confab_types::identity::Identity;
use confab_types::message::Message;
use confab_types::notification::Notification;

use crate::cli::auth_flow;
use crate::cli::notify::TermNotifier;
use crate::state::AppState;

use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// How the chat loop ended.
pub enum LoopOutcome {
    /// User signed out; return to the auth menu.
    LoggedOut,
    /// User quit the program.
    Exit,
}

/// Run the interactive chat loop for an established identity.
pub async fn run_chat_loop(
    state: &mut AppState,
    identity: Identity,
    notifier: &TermNotifier,
) -> anyhow::Result<LoopOutcome> {
    let renderer = ChatRenderer::new();

    println!();
    println!("  {}", auth_flow::identity_banner(&identity));
    print_overview(state, &identity, &renderer).await;

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("failed to initialize input: {e}"))?;

    loop {
        match input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Goodbye.").dim());
                return Ok(LoopOutcome::Exit);
            }
            InputEvent::Interrupted => {
                println!(
                    "\n  {}",
                    style("Press Ctrl+D or /exit to quit, or keep chatting.").dim()
                );
                continue;
            }
            InputEvent::Line(text) => {
                if text.trim().is_empty() {
                    continue;
                }

                if let Some(command) = commands::parse(&text) {
                    match command {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Chats => print_overview(state, &identity, &renderer).await,
                        ChatCommand::Switch(n) => {
                            switch_conversation(state, &identity, &renderer, n).await;
                        }
                        ChatCommand::New => {
                            new_conversation(state, &identity, &renderer, notifier).await;
                        }
                        ChatCommand::Refresh => {
                            match state.controller.refresh_messages().await {
                                Ok(()) => renderer.print_history(state.controller.messages()),
                                Err(err) => {
                                    debug!(error = %err, "history refresh failed");
                                    println!(
                                        "  {}",
                                        style("Error loading messages.").red()
                                    );
                                }
                            }
                        }
                        ChatCommand::Logout => {
                            state.auth.sign_out().await;
                            state.controller.reset();
                            println!("\n  {}", style("Signed out.").dim());
                            return Ok(LoopOutcome::LoggedOut);
                        }
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Goodbye.").dim());
                            return Ok(LoopOutcome::Exit);
                        }
                        ChatCommand::Unknown(name) => {
                            println!(
                                "  {} Unknown command: {}. Type /help for available commands.",
                                style("?").yellow().bold(),
                                style(name).dim()
                            );
                        }
                    }
                    continue;
                }

                send_message(state, notifier, &renderer, text).await;
            }
        }
    }
}

/// Print the list view: conversation list for registered users, the
/// signup placeholder for guests.
async fn print_overview(state: &mut AppState, identity: &Identity, renderer: &ChatRenderer) {
    let phase = state.controller.phase(identity);
    if phase.shows_guest_placeholder() {
        renderer.print_guest_placeholder();
        return;
    }

    if let Err(err) = state.controller.refresh_conversations(identity).await {
        debug!(error = %err, "conversation list fetch failed");
        // Inline, non-fatal: any previously fetched list is still shown.
        println!("  {}", style("Error loading chats.").red());
    }
    renderer.print_conversation_list(state.controller.conversations(), state.controller.selected());
}

async fn switch_conversation(
    state: &mut AppState,
    identity: &Identity,
    renderer: &ChatRenderer,
    number: usize,
) {
    if identity.is_guest() {
        println!(
            "  {}",
            style("Guests have no saved chats to switch between.").dim()
        );
        return;
    }
    let Some(conversation) = state.controller.conversations().get(number - 1) else {
        println!(
            "  {} No such chat. Use /chats to see the list.",
            style("?").yellow().bold()
        );
        return;
    };

    let id = conversation.id;
    println!();
    println!("  {}", style(Conversation::label(number - 1)).bold());
    match state.controller.select_conversation(id).await {
        Ok(()) => renderer.print_history(state.controller.messages()),
        Err(err) => {
            debug!(error = %err, "history fetch failed");
            // Selection stands; the view shows an inline error instead
            // of stale content from another conversation.
            println!("  {}", style("Error loading messages.").red());
        }
    }
}

async fn new_conversation(
    state: &mut AppState,
    identity: &Identity,
    renderer: &ChatRenderer,
    notifier: &TermNotifier,
) {
    match state.controller.create_conversation(identity).await {
        Ok(Some(_)) => {
            let label = if identity.may_list_conversations() {
                // The new conversation was inserted at the top.
                Conversation::label(0)
            } else {
                "a new chat".to_string()
            };
            notifier.publish(Notification::info(format!("Started {label}.")));
            // Create already fetched the (empty) history.
            renderer.print_history(state.controller.messages());
        }
        Ok(None) => {
            // Suppressed: a create is already in flight, or nobody is
            // signed in. Nothing to report.
        }
        Err(err) => {
            notifier.publish(Notification::error(format!("Error creating chat: {err}")));
        }
    }
}

async fn send_message(
    state: &mut AppState,
    notifier: &TermNotifier,
    renderer: &ChatRenderer,
    text: String,
) {
    if state.controller.selected().is_none() {
        println!(
            "  {} No chat selected. Use /new to start one or /switch to open one.",
            style("?").yellow().bold()
        );
        return;
    }

    state.controller.set_draft(text);

    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("static spinner template"),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = state.controller.submit_draft().await;
    spinner.finish_and_clear();

    match result {
        Ok(Some(reply)) => {
            // The re-fetched history is the authoritative record; fall
            // back to the direct reply text if the bot row has not been
            // persisted yet. Only the newest row counts as this reply,
            // so an earlier exchange is never echoed in its place.
            match fresh_bot_reply(state.controller.messages()) {
                Some(bot_message) => renderer.print_message(bot_message),
                None => println!("  {} {}", style("Bot >").cyan().bold(), reply.reply),
            }
        }
        Ok(None) => {}
        Err(err) => {
            notifier.publish(Notification::error(format!("Failed to send message: {err}")));
        }
    }
}

/// The bot row persisted for the reply just received, i.e. the newest
/// message in the refreshed history, and only if the bot authored it.
fn fresh_bot_reply(messages: &[Message]) -> Option<&Message> {
    messages.last().filter(|m| m.is_bot)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn message(body: &str, is_bot: bool) -> Message {
        Message {
            id: Uuid::now_v7(),
            conversation_id: Uuid::now_v7(),
            body: body.to_string(),
            is_bot,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_fresh_bot_reply_is_newest_bot_row() {
        let history = vec![
            message("hi", false),
            message("Hello!", true),
            message("how are you", false),
            message("Doing well.", true),
        ];
        assert_eq!(fresh_bot_reply(&history).unwrap().body, "Doing well.");
    }

    #[test]
    fn test_fresh_bot_reply_ignores_earlier_exchange() {
        // The bot row for the latest send has not landed yet; an older
        // reply must not stand in for it.
        let history = vec![
            message("hi", false),
            message("Hello!", true),
            message("how are you", false),
        ];
        assert!(fresh_bot_reply(&history).is_none());
    }

    #[test]
    fn test_fresh_bot_reply_empty_history() {
        assert!(fresh_bot_reply(&[]).is_none());
    }
}

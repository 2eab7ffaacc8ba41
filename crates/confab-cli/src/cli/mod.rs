//! CLI definitions and the interactive session driver for `confab`.
//!
//! Running `confab` with no subcommand starts the interactive session:
//! an auth menu, then the chat loop. The session alternates between the
//! two until the user exits; logging out returns to the auth menu.

pub mod auth_flow;
pub mod chat;
pub mod notify;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use confab_core::auth::AuthProvider;

use crate::state::AppState;

use chat::loop_runner::{LoopOutcome, run_chat_loop};
use notify::TermNotifier;

/// Terminal chat client with server-side bot replies.
#[derive(Parser)]
#[command(name = "confab", version, about, long_about = None)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Run the interactive session until the user exits.
pub async fn run_session(mut state: AppState) -> anyhow::Result<()> {
    let notifier = TermNotifier::new();
    chat::renderer::print_welcome_banner();

    loop {
        let Some(identity) = auth_flow::run_auth_menu(&state.auth, &notifier).await? else {
            return Ok(());
        };

        match run_chat_loop(&mut state, identity, &notifier).await? {
            LoopOutcome::LoggedOut => {
                // Selection and caches were already reset; back to the
                // auth menu.
                continue;
            }
            LoopOutcome::Exit => {
                state.auth.sign_out().await;
                return Ok(());
            }
        }
    }
}

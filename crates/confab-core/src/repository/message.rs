//! MessageRepository trait definition.

use confab_types::error::{FetchError, SendError};
use confab_types::message::{BotReply, Message};
use uuid::Uuid;

/// Repository trait for message history and sending.
///
/// History is always fetched fresh -- switching conversations or
/// completing a send must reflect the latest server state, never a
/// stale cached view, so implementations must not cache across calls.
pub trait MessageRepository: Send + Sync {
    /// List messages in a conversation, ordered by created_at ASC.
    fn list_messages(
        &self,
        conversation_id: Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, FetchError>> + Send;

    /// Send a user message and obtain the bot's reply.
    ///
    /// Precondition: `body` trimmed is non-empty. The session controller
    /// enforces this by silently dropping empty submissions before any
    /// request is made.
    fn send_message(
        &self,
        conversation_id: Uuid,
        body: &str,
    ) -> impl std::future::Future<Output = Result<BotReply, SendError>> + Send;
}

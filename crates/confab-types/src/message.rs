//! Message and bot-reply types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single message within a conversation.
///
/// Messages are ordered by `created_at` ascending within a conversation.
/// User messages persist server-side at send time; bot messages persist
/// server-side when the reply is generated and are only observed by the
/// client through a subsequent history fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub body: String,
    /// True for bot-authored messages, false for user-authored ones.
    pub is_bot: bool,
    pub created_at: DateTime<Utc>,
}

/// The bot's reply as returned directly from a send mutation.
///
/// Carries the reply text for immediate display, but the authoritative
/// record is the re-fetched message list -- the reply row is persisted
/// server-side and picked up by the next history fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotReply {
    pub reply: String,
}

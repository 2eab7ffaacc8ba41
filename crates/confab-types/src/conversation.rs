//! Conversation type: a thread of messages owned by one identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A conversation thread owned by a single user.
///
/// Created server-side with no client-supplied fields (ownership is
/// inferred from the auth token). Immutable once created -- there is no
/// rename or delete. Listed newest-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    /// Owning user id as reported by the server.
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// Display label for a conversation at the given zero-based list
    /// position. Ids are opaque, so conversations are shown as
    /// "Chat 1", "Chat 2", ... in list order.
    pub fn label(index: usize) -> String {
        format!("Chat {}", index + 1)
    }
}

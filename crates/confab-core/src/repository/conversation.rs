//! ConversationRepository trait definition.

use confab_types::conversation::Conversation;
use confab_types::error::{CreateError, FetchError};
use uuid::Uuid;

/// Repository trait for the conversation list and conversation creation.
///
/// Implementations live in confab-infra. Callers must hold a non-absent
/// owner id before listing; the session controller skips the call
/// entirely for anonymous and guest identities.
pub trait ConversationRepository: Send + Sync {
    /// List conversations owned by a user, ordered by created_at DESC.
    fn list_conversations(
        &self,
        owner: Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Conversation>, FetchError>> + Send;

    /// Create a new conversation.
    ///
    /// No client-supplied fields: the server infers ownership from the
    /// auth token. The returned id is a candidate for immediate
    /// selection.
    fn create_conversation(
        &self,
    ) -> impl std::future::Future<Output = Result<Conversation, CreateError>> + Send;
}

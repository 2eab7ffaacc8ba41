//! Session controller: selection state and fetch orchestration.
//!
//! Owns the selected conversation id, the conversation/message caches,
//! and the draft input, and coordinates create-then-select, list
//! refresh gating, and the send/re-fetch cycle against the repository
//! traits. Generic over `ConversationRepository` and
//! `MessageRepository` so tests run against scripted in-memory fakes.

use confab_types::conversation::Conversation;
use confab_types::error::{CreateError, FetchError, SendError};
use confab_types::identity::Identity;
use confab_types::message::{BotReply, Message};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::repository::{ConversationRepository, MessageRepository};
use crate::session::state::SessionPhase;

/// Session controller for one client session.
///
/// All repository responses replace their cache wholesale -- nothing is
/// patched incrementally. Message responses carry the conversation id
/// they were requested for and are discarded when that id no longer
/// matches the current selection, so a stale fetch can never overwrite
/// the now-current conversation's history.
pub struct SessionController<C, M> {
    conversation_repo: C,
    message_repo: M,
    selected: Option<Uuid>,
    conversations: Vec<Conversation>,
    messages: Vec<Message>,
    /// Which conversation `messages` was fetched for. Tracked separately
    /// from `selected` so an applied-but-stale cache is detectable.
    messages_for: Option<Uuid>,
    draft: String,
    /// True while a create request is outstanding; the UI disables the
    /// "+ New Chat" control for exactly this window.
    creating: bool,
}

impl<C: ConversationRepository, M: MessageRepository> SessionController<C, M> {
    pub fn new(conversation_repo: C, message_repo: M) -> Self {
        Self {
            conversation_repo,
            message_repo,
            selected: None,
            conversations: Vec::new(),
            messages: Vec::new(),
            messages_for: None,
            draft: String::new(),
            creating: false,
        }
    }

    // --- Read accessors ---

    pub fn selected(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// The cached message list. Valid for the conversation returned by
    /// [`Self::messages_for`]; the UI should only render it when that
    /// matches the current selection.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn messages_for(&self) -> Option<Uuid> {
        self.messages_for
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// Derive the behavioral phase for the given identity.
    pub fn phase(&self, identity: &Identity) -> SessionPhase {
        SessionPhase::derive(identity, self.selected)
    }

    // --- Conversation list ---

    /// Refresh the conversation list for the current identity.
    ///
    /// Hard-gated to registered identities: anonymous and guest sessions
    /// never fetch the list at all. On success the cache is replaced
    /// wholesale and the selection reconciled against it; on failure the
    /// prior list is left untouched and the error returned for inline
    /// display.
    pub async fn refresh_conversations(
        &mut self,
        identity: &Identity,
    ) -> Result<(), FetchError> {
        if !identity.may_list_conversations() {
            debug!("conversation list fetch skipped for non-registered identity");
            return Ok(());
        }
        // may_list_conversations guarantees a user id here.
        let owner = identity
            .user_id()
            .ok_or_else(|| FetchError::Server("registered identity without id".to_string()))?;

        let list = self.conversation_repo.list_conversations(owner).await?;
        debug!(count = list.len(), "conversation list refreshed");
        self.conversations = list;
        self.reconcile_selection();
        Ok(())
    }

    /// Drop a registered selection that is no longer in the fetched
    /// list. Keeps the invariant that a registered selection is always a
    /// member of the conversation list or none.
    fn reconcile_selection(&mut self) {
        if let Some(selected) = self.selected
            && !self.conversations.iter().any(|c| c.id == selected)
        {
            warn!(conversation_id = %selected, "selection missing from refreshed list, clearing");
            self.selected = None;
            self.messages.clear();
            self.messages_for = None;
        }
    }

    /// Select a conversation and fetch its history.
    ///
    /// The fetch is always fresh; a fetch failure leaves the selection
    /// in place (the message view shows an inline error) and whatever
    /// cache was previously applied.
    pub async fn select_conversation(&mut self, id: Uuid) -> Result<(), FetchError> {
        self.selected = Some(id);
        self.refresh_messages().await
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Create a conversation and select it immediately.
    ///
    /// Returns `Ok(None)` when suppressed: a create is already in
    /// flight, or the identity is anonymous. On `CreateError` the
    /// current selection is untouched; the caller surfaces the error and
    /// the user may retry.
    pub async fn create_conversation(
        &mut self,
        identity: &Identity,
    ) -> Result<Option<Uuid>, CreateError> {
        if self.creating {
            debug!("create suppressed: request already in flight");
            return Ok(None);
        }
        if !identity.is_authenticated() {
            return Ok(None);
        }

        self.creating = true;
        let result = self.conversation_repo.create_conversation().await;
        self.creating = false;

        let conversation = result?;
        let id = conversation.id;
        info!(conversation_id = %id, "conversation created");

        // Guests never see a list; for registered users the new entry
        // will appear on the next list refresh.
        if identity.may_list_conversations() {
            self.conversations.insert(0, conversation);
        }

        // Auto-select, replacing any prior selection, and fetch the new
        // conversation's history like any other selection. The cache is
        // only marked fresh by an actual fetch.
        self.selected = Some(id);
        self.messages.clear();
        self.messages_for = None;
        if let Err(err) = self.refresh_messages().await {
            warn!(error = %err, "history fetch for new conversation failed");
        }
        Ok(Some(id))
    }

    // --- Message history ---

    /// Fetch the history for the current selection.
    ///
    /// Skipped (Ok) when nothing is selected. The response is applied
    /// through [`Self::apply_messages`] under the conversation id it was
    /// requested for, so a response that outlives its selection is
    /// discarded rather than rendered.
    pub async fn refresh_messages(&mut self) -> Result<(), FetchError> {
        let Some(target) = self.selected else {
            return Ok(());
        };
        let list = self.message_repo.list_messages(target).await?;
        self.apply_messages(target, list);
        Ok(())
    }

    /// Apply a message-list response fetched for `for_conversation`.
    ///
    /// Returns false (and drops the payload) when the selection has
    /// moved on since the request was issued -- the rendered list must
    /// always correspond to the most recently selected conversation.
    pub fn apply_messages(&mut self, for_conversation: Uuid, messages: Vec<Message>) -> bool {
        if self.selected != Some(for_conversation) {
            debug!(
                conversation_id = %for_conversation,
                "discarding stale message response for deselected conversation"
            );
            return false;
        }
        self.messages = messages;
        self.messages_for = Some(for_conversation);
        true
    }

    /// Send the draft to the selected conversation.
    ///
    /// Empty or whitespace-only drafts are silently dropped: no request
    /// is made and the draft is left alone. Otherwise the draft is
    /// cleared once the send resolves, success or failure -- input
    /// clearing is deliberately decoupled from delivery confirmation.
    /// On success exactly one history re-fetch is triggered, after the
    /// reply is observed; if the selection changed while the send was in
    /// flight, the re-fetch is dropped (the later selection wins).
    pub async fn submit_draft(&mut self) -> Result<Option<BotReply>, SendError> {
        let body = self.draft.trim().to_string();
        if body.is_empty() {
            return Ok(None);
        }
        let Some(target) = self.selected else {
            return Ok(None);
        };

        let result = self.message_repo.send_message(target, &body).await;
        self.draft.clear();

        let reply = result?;
        debug!(conversation_id = %target, "bot reply received");

        if self.selected == Some(target) {
            // The reply row is already persisted server-side; the
            // re-fetched list is the authoritative record.
            if let Err(err) = self.refresh_messages().await {
                warn!(error = %err, "post-send history refresh failed");
            }
        } else {
            debug!(conversation_id = %target, "selection changed mid-send, skipping re-fetch");
        }
        Ok(Some(reply))
    }

    /// Reset all session-local state on sign-out.
    pub fn reset(&mut self) {
        self.selected = None;
        self.conversations.clear();
        self.messages.clear();
        self.messages_for = None;
        self.draft.clear();
        self.creating = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use confab_types::error::{CreateError, FetchError, SendError};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted conversation repository: pops pre-loaded results.
    #[derive(Default)]
    struct FakeConversationRepo {
        list_results: Mutex<VecDeque<Result<Vec<Conversation>, FetchError>>>,
        create_results: Mutex<VecDeque<Result<Conversation, CreateError>>>,
        list_calls: AtomicUsize,
        create_calls: AtomicUsize,
    }

    impl FakeConversationRepo {
        fn push_list(&self, result: Result<Vec<Conversation>, FetchError>) {
            self.list_results.lock().unwrap().push_back(result);
        }

        fn push_create(&self, result: Result<Conversation, CreateError>) {
            self.create_results.lock().unwrap().push_back(result);
        }
    }

    impl ConversationRepository for &FakeConversationRepo {
        async fn list_conversations(
            &self,
            _owner: Uuid,
        ) -> Result<Vec<Conversation>, FetchError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.list_results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn create_conversation(&self) -> Result<Conversation, CreateError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.create_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted create_conversation call")
        }
    }

    /// Scripted message repository.
    #[derive(Default)]
    struct FakeMessageRepo {
        list_results: Mutex<VecDeque<Result<Vec<Message>, FetchError>>>,
        send_results: Mutex<VecDeque<Result<BotReply, SendError>>>,
        list_calls: AtomicUsize,
        sent_bodies: Mutex<Vec<(Uuid, String)>>,
    }

    impl FakeMessageRepo {
        fn push_list(&self, result: Result<Vec<Message>, FetchError>) {
            self.list_results.lock().unwrap().push_back(result);
        }

        fn push_send(&self, result: Result<BotReply, SendError>) {
            self.send_results.lock().unwrap().push_back(result);
        }
    }

    impl MessageRepository for &FakeMessageRepo {
        async fn list_messages(&self, _conversation_id: Uuid) -> Result<Vec<Message>, FetchError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.list_results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn send_message(
            &self,
            conversation_id: Uuid,
            body: &str,
        ) -> Result<BotReply, SendError> {
            self.sent_bodies
                .lock()
                .unwrap()
                .push((conversation_id, body.to_string()));
            self.send_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted send_message call")
        }
    }

    fn registered() -> Identity {
        Identity::Registered {
            user_id: Uuid::now_v7(),
            email: "alice@example.com".to_string(),
        }
    }

    fn guest() -> Identity {
        Identity::Guest {
            user_id: Uuid::now_v7(),
        }
    }

    fn conversation(owner: Uuid) -> Conversation {
        Conversation {
            id: Uuid::now_v7(),
            owner_id: owner,
            created_at: Utc::now(),
        }
    }

    fn message(conversation_id: Uuid, body: &str, is_bot: bool) -> Message {
        Message {
            id: Uuid::now_v7(),
            conversation_id,
            body: body.to_string(),
            is_bot,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_anonymous_and_guest_never_fetch_list() {
        let convs = FakeConversationRepo::default();
        let msgs = FakeMessageRepo::default();
        let mut ctrl = SessionController::new(&convs, &msgs);

        ctrl.refresh_conversations(&Identity::Anonymous).await.unwrap();
        ctrl.refresh_conversations(&guest()).await.unwrap();
        assert_eq!(convs.list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_error_preserves_prior_list() {
        let convs = FakeConversationRepo::default();
        let msgs = FakeMessageRepo::default();
        let identity = registered();
        let owner = identity.user_id().unwrap();
        convs.push_list(Ok(vec![conversation(owner), conversation(owner)]));
        convs.push_list(Err(FetchError::Transport("connection refused".to_string())));

        let mut ctrl = SessionController::new(&convs, &msgs);
        ctrl.refresh_conversations(&identity).await.unwrap();
        assert_eq!(ctrl.conversations().len(), 2);

        let err = ctrl.refresh_conversations(&identity).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        // Prior list untouched -- no silent clearing.
        assert_eq!(ctrl.conversations().len(), 2);
    }

    /// Empty list, create, auto-select, history fetched.
    #[tokio::test]
    async fn test_create_auto_selects_and_fetches_history() {
        let convs = FakeConversationRepo::default();
        let msgs = FakeMessageRepo::default();
        let identity = registered();
        convs.push_list(Ok(Vec::new()));
        let created = conversation(identity.user_id().unwrap());
        let created_id = created.id;
        convs.push_create(Ok(created));

        let mut ctrl = SessionController::new(&convs, &msgs);
        ctrl.refresh_conversations(&identity).await.unwrap();
        assert!(ctrl.conversations().is_empty());
        assert_eq!(ctrl.phase(&identity), SessionPhase::RegisteredNoSelection);

        msgs.push_list(Ok(Vec::new()));
        let id = ctrl.create_conversation(&identity).await.unwrap().unwrap();
        assert_eq!(id, created_id);
        assert_eq!(ctrl.selected(), Some(created_id));
        assert_eq!(ctrl.phase(&identity), SessionPhase::RegisteredSelected);
        // New conversation appears in the list without a re-fetch.
        assert_eq!(ctrl.conversations().len(), 1);
        // Create itself issues the history fetch; the caller does not.
        assert_eq!(msgs.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(ctrl.messages_for(), Some(created_id));
    }

    #[tokio::test]
    async fn test_create_caches_fetched_history() {
        let convs = FakeConversationRepo::default();
        let msgs = FakeMessageRepo::default();
        let identity = registered();
        let created = conversation(identity.user_id().unwrap());
        let created_id = created.id;
        convs.push_create(Ok(created));
        msgs.push_list(Ok(vec![message(created_id, "Hello!", true)]));

        let mut ctrl = SessionController::new(&convs, &msgs);
        ctrl.create_conversation(&identity).await.unwrap().unwrap();
        assert_eq!(ctrl.messages().len(), 1);
        assert_eq!(ctrl.messages_for(), Some(created_id));
    }

    #[tokio::test]
    async fn test_create_history_fetch_failure_is_non_fatal() {
        let convs = FakeConversationRepo::default();
        let msgs = FakeMessageRepo::default();
        let identity = registered();
        let created = conversation(identity.user_id().unwrap());
        let created_id = created.id;
        convs.push_create(Ok(created));
        msgs.push_list(Err(FetchError::Transport("connection refused".to_string())));

        let mut ctrl = SessionController::new(&convs, &msgs);
        let id = ctrl.create_conversation(&identity).await.unwrap().unwrap();
        assert_eq!(id, created_id);
        assert_eq!(ctrl.selected(), Some(created_id));
        // The cache is not claimed fresh when the fetch failed.
        assert_eq!(ctrl.messages_for(), None);
    }

    #[tokio::test]
    async fn test_create_failure_leaves_selection_unchanged() {
        let convs = FakeConversationRepo::default();
        let msgs = FakeMessageRepo::default();
        let identity = registered();
        let owner = identity.user_id().unwrap();
        let existing = conversation(owner);
        let existing_id = existing.id;
        convs.push_list(Ok(vec![existing]));
        convs.push_create(Err(CreateError::Server("insert failed".to_string())));

        let mut ctrl = SessionController::new(&convs, &msgs);
        ctrl.refresh_conversations(&identity).await.unwrap();
        msgs.push_list(Ok(Vec::new()));
        ctrl.select_conversation(existing_id).await.unwrap();

        let err = ctrl.create_conversation(&identity).await.unwrap_err();
        assert!(matches!(err, CreateError::Server(_)));
        assert_eq!(ctrl.selected(), Some(existing_id));
        assert!(!ctrl.is_creating());
    }

    #[tokio::test]
    async fn test_create_replaces_prior_selection() {
        let convs = FakeConversationRepo::default();
        let msgs = FakeMessageRepo::default();
        let identity = registered();
        let owner = identity.user_id().unwrap();
        let first = conversation(owner);
        let first_id = first.id;
        convs.push_list(Ok(vec![first]));
        let second = conversation(owner);
        let second_id = second.id;
        convs.push_create(Ok(second));

        let mut ctrl = SessionController::new(&convs, &msgs);
        ctrl.refresh_conversations(&identity).await.unwrap();
        msgs.push_list(Ok(Vec::new()));
        ctrl.select_conversation(first_id).await.unwrap();

        let id = ctrl.create_conversation(&identity).await.unwrap().unwrap();
        assert_eq!(id, second_id);
        assert_eq!(ctrl.selected(), Some(second_id));
    }

    /// A guest creates a conversation; the list is never fetched.
    #[tokio::test]
    async fn test_guest_create_selects_without_listing() {
        let convs = FakeConversationRepo::default();
        let msgs = FakeMessageRepo::default();
        let identity = guest();
        let created = conversation(identity.user_id().unwrap());
        let created_id = created.id;
        convs.push_create(Ok(created));

        let mut ctrl = SessionController::new(&convs, &msgs);
        let id = ctrl.create_conversation(&identity).await.unwrap().unwrap();
        assert_eq!(id, created_id);
        assert_eq!(ctrl.phase(&identity), SessionPhase::GuestSelected);
        assert!(ctrl.phase(&identity).shows_guest_placeholder());
        // Guest conversation is ephemeral: never inserted into a list,
        // and no list fetch was ever issued.
        assert!(ctrl.conversations().is_empty());
        assert_eq!(convs.list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_anonymous_cannot_create() {
        let convs = FakeConversationRepo::default();
        let msgs = FakeMessageRepo::default();
        let mut ctrl = SessionController::new(&convs, &msgs);

        let result = ctrl.create_conversation(&Identity::Anonymous).await.unwrap();
        assert!(result.is_none());
        assert_eq!(convs.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_stale_message_response_discarded() {
        let convs = FakeConversationRepo::default();
        let msgs = FakeMessageRepo::default();
        let mut ctrl = SessionController::new(&convs, &msgs);

        let old = Uuid::now_v7();
        let current = Uuid::now_v7();
        msgs.push_list(Ok(Vec::new()));
        ctrl.select_conversation(current).await.unwrap();

        // A fetch issued for `old` resolves after `current` was selected.
        let stale = vec![message(old, "stale", false)];
        assert!(!ctrl.apply_messages(old, stale));
        assert!(ctrl.messages().is_empty());
        assert_eq!(ctrl.messages_for(), Some(current));

        // A response for the current selection applies normally.
        let fresh = vec![message(current, "fresh", false)];
        assert!(ctrl.apply_messages(current, fresh));
        assert_eq!(ctrl.messages().len(), 1);
        assert_eq!(ctrl.messages()[0].body, "fresh");
    }

    #[tokio::test]
    async fn test_empty_draft_is_silently_dropped() {
        let convs = FakeConversationRepo::default();
        let msgs = FakeMessageRepo::default();
        let mut ctrl = SessionController::new(&convs, &msgs);
        msgs.push_list(Ok(Vec::new()));
        ctrl.select_conversation(Uuid::now_v7()).await.unwrap();

        for draft in ["", "   ", "\t\n"] {
            ctrl.set_draft(draft);
            let result = ctrl.submit_draft().await.unwrap();
            assert!(result.is_none());
            // No request made, draft left alone.
            assert_eq!(ctrl.draft(), draft);
        }
        assert!(msgs.sent_bodies.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_without_selection_is_dropped() {
        let convs = FakeConversationRepo::default();
        let msgs = FakeMessageRepo::default();
        let mut ctrl = SessionController::new(&convs, &msgs);
        ctrl.set_draft("hello");
        let result = ctrl.submit_draft().await.unwrap();
        assert!(result.is_none());
        assert!(msgs.sent_bodies.lock().unwrap().is_empty());
    }

    /// Scenario C: send succeeds, draft cleared, exactly one re-fetch.
    #[tokio::test]
    async fn test_send_clears_draft_and_refetches_once() {
        let convs = FakeConversationRepo::default();
        let msgs = FakeMessageRepo::default();
        let mut ctrl = SessionController::new(&convs, &msgs);

        let conv_id = Uuid::now_v7();
        msgs.push_list(Ok(Vec::new()));
        ctrl.select_conversation(conv_id).await.unwrap();

        msgs.push_send(Ok(BotReply {
            reply: "hi there".to_string(),
        }));
        msgs.push_list(Ok(vec![
            message(conv_id, "hello", false),
            message(conv_id, "hi there", true),
        ]));

        ctrl.set_draft("hello");
        let reply = ctrl.submit_draft().await.unwrap().unwrap();
        assert_eq!(reply.reply, "hi there");
        assert_eq!(ctrl.draft(), "");

        // One fetch at selection, exactly one more after the send.
        assert_eq!(msgs.list_calls.load(Ordering::SeqCst), 2);
        assert_eq!(ctrl.messages().len(), 2);
        assert!(!ctrl.messages()[0].is_bot);
        assert!(ctrl.messages()[1].is_bot);
    }

    #[tokio::test]
    async fn test_send_trims_body() {
        let convs = FakeConversationRepo::default();
        let msgs = FakeMessageRepo::default();
        let mut ctrl = SessionController::new(&convs, &msgs);
        let conv_id = Uuid::now_v7();
        msgs.push_list(Ok(Vec::new()));
        ctrl.select_conversation(conv_id).await.unwrap();

        msgs.push_send(Ok(BotReply {
            reply: "ok".to_string(),
        }));
        msgs.push_list(Ok(Vec::new()));
        ctrl.set_draft("  hello  ");
        ctrl.submit_draft().await.unwrap();

        let sent = msgs.sent_bodies.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], (conv_id, "hello".to_string()));
    }

    #[tokio::test]
    async fn test_send_failure_still_clears_draft_and_skips_refetch() {
        let convs = FakeConversationRepo::default();
        let msgs = FakeMessageRepo::default();
        let mut ctrl = SessionController::new(&convs, &msgs);
        msgs.push_list(Ok(Vec::new()));
        ctrl.select_conversation(Uuid::now_v7()).await.unwrap();
        let fetches_before = msgs.list_calls.load(Ordering::SeqCst);

        msgs.push_send(Err(SendError::Transport("timeout".to_string())));
        ctrl.set_draft("hello");
        let err = ctrl.submit_draft().await.unwrap_err();
        assert!(matches!(err, SendError::Transport(_)));

        // Reference behavior: the draft is cleared regardless of outcome.
        assert_eq!(ctrl.draft(), "");
        // And no re-fetch happened for a failed send.
        assert_eq!(msgs.list_calls.load(Ordering::SeqCst), fetches_before);
    }

    #[tokio::test]
    async fn test_post_send_fetch_failure_is_non_fatal() {
        let convs = FakeConversationRepo::default();
        let msgs = FakeMessageRepo::default();
        let mut ctrl = SessionController::new(&convs, &msgs);
        let conv_id = Uuid::now_v7();
        msgs.push_list(Ok(vec![message(conv_id, "earlier", false)]));
        ctrl.select_conversation(conv_id).await.unwrap();

        msgs.push_send(Ok(BotReply {
            reply: "hi".to_string(),
        }));
        msgs.push_list(Err(FetchError::Transport("flaky".to_string())));
        ctrl.set_draft("hello");
        let reply = ctrl.submit_draft().await.unwrap();
        assert!(reply.is_some());
        // Prior history preserved when the post-send refresh fails.
        assert_eq!(ctrl.messages().len(), 1);
        assert_eq!(ctrl.messages()[0].body, "earlier");
    }

    #[tokio::test]
    async fn test_reconcile_clears_selection_missing_from_list() {
        let convs = FakeConversationRepo::default();
        let msgs = FakeMessageRepo::default();
        let identity = registered();
        let owner = identity.user_id().unwrap();
        let kept = conversation(owner);
        let kept_id = kept.id;
        let dropped = conversation(owner);
        let dropped_id = dropped.id;
        convs.push_list(Ok(vec![kept.clone(), dropped]));
        // Second refresh no longer contains the selected conversation.
        convs.push_list(Ok(vec![kept]));

        let mut ctrl = SessionController::new(&convs, &msgs);
        ctrl.refresh_conversations(&identity).await.unwrap();
        msgs.push_list(Ok(vec![message(dropped_id, "hi", false)]));
        ctrl.select_conversation(dropped_id).await.unwrap();

        ctrl.refresh_conversations(&identity).await.unwrap();
        assert_eq!(ctrl.selected(), None);
        assert!(ctrl.messages().is_empty());

        // A selection still present survives the refresh.
        convs.push_list(Ok(vec![conversation(owner), {
            let mut c = conversation(owner);
            c.id = kept_id;
            c
        }]));
        msgs.push_list(Ok(Vec::new()));
        ctrl.select_conversation(kept_id).await.unwrap();
        ctrl.refresh_conversations(&identity).await.unwrap();
        assert_eq!(ctrl.selected(), Some(kept_id));
    }

    #[tokio::test]
    async fn test_reset_clears_all_session_state() {
        let convs = FakeConversationRepo::default();
        let msgs = FakeMessageRepo::default();
        let identity = registered();
        convs.push_list(Ok(vec![conversation(identity.user_id().unwrap())]));

        let mut ctrl = SessionController::new(&convs, &msgs);
        ctrl.refresh_conversations(&identity).await.unwrap();
        let conv_id = ctrl.conversations()[0].id;
        msgs.push_list(Ok(vec![message(conv_id, "hi", false)]));
        ctrl.select_conversation(conv_id).await.unwrap();
        ctrl.set_draft("unsent");

        ctrl.reset();
        assert_eq!(ctrl.selected(), None);
        assert!(ctrl.conversations().is_empty());
        assert!(ctrl.messages().is_empty());
        assert_eq!(ctrl.messages_for(), None);
        assert_eq!(ctrl.draft(), "");
        assert_eq!(ctrl.phase(&Identity::Anonymous), SessionPhase::Unauthenticated);
    }
}

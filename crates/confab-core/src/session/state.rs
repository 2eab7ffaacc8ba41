//! Session phase: the behavioral state derived from identity and selection.
//!
//! The phase is never stored -- it is recomputed from the current
//! `Identity` and the selected conversation id whenever the UI needs to
//! decide what to render. Keeping it derived makes an inconsistent
//! combination (e.g. a selection without an identity) unrepresentable in
//! the rendering path.

use confab_types::identity::Identity;
use uuid::Uuid;

/// The five behavioral states of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No conversation data shown.
    Unauthenticated,
    /// Guest identity, nothing selected: the list view is replaced by a
    /// signup placeholder.
    GuestNoSelection,
    /// Guest identity with a locally held conversation id (from a
    /// just-created conversation). The message view is shown, but the
    /// conversation vanishes on reload since it is never listed.
    GuestSelected,
    /// Registered identity, list fetched and shown, no selection.
    RegisteredNoSelection,
    /// Registered identity, list shown, one conversation's messages
    /// shown.
    RegisteredSelected,
}

impl SessionPhase {
    /// Derive the phase from the current identity and selection.
    pub fn derive(identity: &Identity, selected: Option<Uuid>) -> Self {
        match (identity, selected) {
            (Identity::Anonymous, _) => SessionPhase::Unauthenticated,
            (Identity::Guest { .. }, None) => SessionPhase::GuestNoSelection,
            (Identity::Guest { .. }, Some(_)) => SessionPhase::GuestSelected,
            (Identity::Registered { .. }, None) => SessionPhase::RegisteredNoSelection,
            (Identity::Registered { .. }, Some(_)) => SessionPhase::RegisteredSelected,
        }
    }

    /// Whether the conversation list should be rendered in this phase.
    pub fn shows_conversation_list(&self) -> bool {
        matches!(
            self,
            SessionPhase::RegisteredNoSelection | SessionPhase::RegisteredSelected
        )
    }

    /// Whether the guest signup placeholder should be rendered.
    pub fn shows_guest_placeholder(&self) -> bool {
        matches!(
            self,
            SessionPhase::GuestNoSelection | SessionPhase::GuestSelected
        )
    }

    /// Whether a message view is open.
    pub fn has_selection(&self) -> bool {
        matches!(
            self,
            SessionPhase::GuestSelected | SessionPhase::RegisteredSelected
        )
    }
}

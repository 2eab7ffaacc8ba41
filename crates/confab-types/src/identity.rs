//! Identity classification for the chat client.
//!
//! The backend distinguishes three kinds of actors: nobody signed in,
//! the shared demo guest account, and an ordinary registered user.
//! Conversation persistence is gated on this classification, so the
//! check lives in exactly one place instead of being re-derived at
//! every call site.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Email address of the shared demonstration account.
///
/// A sign-in with this address is classified as [`Identity::Guest`]:
/// conversations it creates are ephemeral and never listed.
pub const GUEST_EMAIL: &str = "guest@demo.com";

/// Password of the shared demonstration account (published on purpose).
pub const GUEST_PASSWORD: &str = "guest123";

/// Raw authentication state as reported by the auth backend.
///
/// This is the unclassified shape: an optional user id and an optional
/// email. [`Identity::classify`] turns it into exactly one variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Option<Uuid>,
    pub email: Option<String>,
}

/// The actor driving the current session.
///
/// Exactly one of three variants; produced by [`Identity::classify`] on
/// every auth state change (sign-in, sign-up, sign-out). The session
/// controller only ever reads this value, it never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Identity {
    /// Nobody is signed in.
    Anonymous,
    /// The shared demo account. Conversations are ephemeral: the client
    /// never fetches a conversation list for a guest.
    Guest { user_id: Uuid },
    /// Any other authenticated user.
    Registered { user_id: Uuid, email: String },
}

impl Identity {
    /// Classify a raw auth payload into an identity variant.
    ///
    /// No id yields `Anonymous` regardless of email. An id with the
    /// reserved guest email yields `Guest`; any other id yields
    /// `Registered` (a missing email is kept as an empty string, which
    /// some backends report for OAuth users).
    pub fn classify(user: &AuthUser) -> Self {
        let Some(id) = user.id else {
            return Identity::Anonymous;
        };
        match user.email.as_deref() {
            Some(email) if email.eq_ignore_ascii_case(GUEST_EMAIL) => {
                Identity::Guest { user_id: id }
            }
            Some(email) => Identity::Registered {
                user_id: id,
                email: email.to_string(),
            },
            None => Identity::Registered {
                user_id: id,
                email: String::new(),
            },
        }
    }

    /// The stable user id, if any actor is signed in.
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Identity::Anonymous => None,
            Identity::Guest { user_id } | Identity::Registered { user_id, .. } => Some(*user_id),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Identity::Guest { .. })
    }

    /// Whether any actor (guest or registered) is signed in.
    pub fn is_authenticated(&self) -> bool {
        !self.is_anonymous()
    }

    /// Whether the conversation list may be fetched for this identity.
    ///
    /// Hard rule: only `Registered`. Guests hold no stable owner the
    /// client trusts to re-query, so their list is never requested --
    /// this is not the same as rendering an empty list.
    pub fn may_list_conversations(&self) -> bool {
        matches!(self, Identity::Registered { .. })
    }
}

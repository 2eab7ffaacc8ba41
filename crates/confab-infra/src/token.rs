//! In-process token store shared between the auth and GraphQL clients.
//!
//! Written by the auth client on sign-in/sign-out, read by the GraphQL
//! client for the bearer header and by `current_identity()`. Nothing is
//! persisted to disk: closing the client signs the user out.

use std::sync::{Arc, RwLock};

use confab_types::identity::{AuthUser, Identity};
use uuid::Uuid;

/// An authenticated backend session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub user_id: Uuid,
    pub email: Option<String>,
}

/// Shared, cloneable handle to the current auth session.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<AuthSession>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored session (sign-in).
    pub fn set(&self, session: AuthSession) {
        *self.inner.write().expect("token store lock poisoned") = Some(session);
    }

    /// Discard the stored session (sign-out).
    pub fn clear(&self) {
        *self.inner.write().expect("token store lock poisoned") = None;
    }

    /// The current access token, if signed in.
    pub fn access_token(&self) -> Option<String> {
        self.inner
            .read()
            .expect("token store lock poisoned")
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    /// Project the stored session into an [`Identity`].
    pub fn identity(&self) -> Identity {
        let guard = self.inner.read().expect("token store lock poisoned");
        match guard.as_ref() {
            None => Identity::Anonymous,
            Some(session) => Identity::classify(&AuthUser {
                id: Some(session.user_id),
                email: session.email.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_types::identity::GUEST_EMAIL;

    #[test]
    fn test_empty_store_is_anonymous() {
        let store = TokenStore::new();
        assert_eq!(store.identity(), Identity::Anonymous);
        assert!(store.access_token().is_none());
    }

    #[test]
    fn test_set_then_clear() {
        let store = TokenStore::new();
        let user_id = Uuid::now_v7();
        store.set(AuthSession {
            access_token: "tok".to_string(),
            user_id,
            email: Some("alice@example.com".to_string()),
        });
        assert_eq!(store.access_token().as_deref(), Some("tok"));
        assert_eq!(store.identity().user_id(), Some(user_id));

        store.clear();
        assert_eq!(store.identity(), Identity::Anonymous);
    }

    #[test]
    fn test_guest_session_classifies_as_guest() {
        let store = TokenStore::new();
        store.set(AuthSession {
            access_token: "tok".to_string(),
            user_id: Uuid::now_v7(),
            email: Some(GUEST_EMAIL.to_string()),
        });
        assert!(store.identity().is_guest());
    }

    #[test]
    fn test_clones_share_state() {
        let store = TokenStore::new();
        let other = store.clone();
        store.set(AuthSession {
            access_token: "tok".to_string(),
            user_id: Uuid::now_v7(),
            email: None,
        });
        assert!(other.identity().is_authenticated());
    }
}

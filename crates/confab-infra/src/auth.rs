//! HttpAuthClient -- concrete [`AuthProvider`] over the hosted auth API.
//!
//! Talks to the email/password endpoints (`/signin/email-password`,
//! `/signup/email-password`, `/signout`) and keeps the resulting
//! session in the shared [`TokenStore`]. Guest login is an ordinary
//! sign-in with the published demo credentials; the classification into
//! a guest identity happens in confab-types, not here.

use std::time::Duration;

use confab_core::auth::AuthProvider;
use confab_types::error::AuthError;
use confab_types::identity::Identity;
use serde::Deserialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::token::{AuthSession, TokenStore};

/// Auth client for the hosted email/password API.
pub struct HttpAuthClient {
    client: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    session: Option<SessionPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionPayload {
    access_token: String,
    user: UserPayload,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: Uuid,
    email: Option<String>,
}

/// Error body returned by the auth service on a rejected request.
#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl HttpAuthClient {
    /// Create a new auth client against the given base URL (no trailing
    /// slash), storing sessions in `tokens`.
    pub fn new(base_url: String, tokens: TokenStore) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");
        Self {
            client,
            base_url,
            tokens,
        }
    }

    async fn post_credentials(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<reqwest::Response, AuthError> {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))
    }

    /// Extract the rejection message from an error response body.
    async fn rejection(response: reqwest::Response) -> AuthError {
        let status = response.status();
        match response.json::<AuthErrorBody>().await {
            Ok(body) => {
                let message = body
                    .message
                    .or(body.error)
                    .unwrap_or_else(|| format!("request rejected with status {status}"));
                AuthError::from_rejection(message)
            }
            Err(_) => AuthError::Rejected(format!("request rejected with status {status}")),
        }
    }
}

impl AuthProvider for HttpAuthClient {
    fn current_identity(&self) -> Identity {
        self.tokens.identity()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let response = self
            .post_credentials("/signin/email-password", email, password)
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let body: SignInResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Transport(format!("malformed sign-in response: {e}")))?;
        let session = body
            .session
            .ok_or_else(|| AuthError::Rejected("sign-in returned no session".to_string()))?;

        debug!(user_id = %session.user.id, "signed in");
        self.tokens.set(AuthSession {
            access_token: session.access_token,
            user_id: session.user.id,
            email: session.user.email,
        });
        Ok(self.tokens.identity())
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let response = self
            .post_credentials("/signup/email-password", email, password)
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        // The backend requires email confirmation; a successful sign-up
        // does not open a session.
        debug!("sign-up accepted, confirmation pending");
        Ok(())
    }

    async fn sign_out(&self) {
        // Capture the token before clearing local state, so the backend
        // call can still name the session it is ending. Without a token
        // there is no server-side session and no request to make.
        let token = self.tokens.access_token();
        self.tokens.clear();
        let Some(token) = token else {
            return;
        };

        // Best effort; a failure only gets logged.
        let result = self
            .client
            .post(format!("{}/signout", self.base_url))
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await;
        if let Err(err) = result {
            warn!(error = %err, "backend sign-out failed, local session already cleared");
        }
    }
}

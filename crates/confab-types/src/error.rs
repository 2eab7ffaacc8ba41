use thiserror::Error;

/// Errors from sign-in and sign-up attempts.
///
/// Non-fatal: the user retries by re-submitting the form. A backend
/// rejection whose message mentions "already registered" is mapped to
/// the distinct [`AuthError::EmailAlreadyRegistered`] variant so the UI
/// can show a tailored notice.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email already registered")]
    EmailAlreadyRegistered,

    #[error("{0}")]
    Rejected(String),

    #[error("auth transport error: {0}")]
    Transport(String),
}

impl AuthError {
    /// Map a backend rejection message to the right variant.
    pub fn from_rejection(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.to_lowercase().contains("already registered") {
            AuthError::EmailAlreadyRegistered
        } else {
            AuthError::Rejected(message)
        }
    }
}

/// Errors from list fetches (conversations or messages).
///
/// Non-fatal: the caller shows an inline error and keeps any previously
/// fetched data untouched -- a failed refresh never clears a good list.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server error: {0}")]
    Server(String),
}

/// Errors from conversation creation.
///
/// Non-fatal and retryable; the current selection is never changed by a
/// failed create.
#[derive(Debug, Error)]
pub enum CreateError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server error: {0}")]
    Server(String),
}

/// Errors from sending a message.
///
/// Non-fatal; surfaced through the notification channel. The draft is
/// cleared regardless of outcome (see the session controller).
#[derive(Debug, Error)]
pub enum SendError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server error: {0}")]
    Server(String),
}

//! Transient user-facing notifications.
//!
//! At most one notification is visible at a time: publishing a new one
//! replaces whatever was showing (last write wins). Notifications stay
//! until dismissed or replaced; nothing auto-expires here -- timing is a
//! presentation concern.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Info => write!(f, "info"),
            NotificationKind::Error => write!(f, "error"),
        }
    }
}

/// A transient success/error notice shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// Holder for the single visible notification.
///
/// Replace-on-publish, explicit dismiss. Owned by whatever renders the
/// notification area; the session controller publishes through a sink
/// trait and never touches the slot directly.
#[derive(Debug, Default)]
pub struct NotificationSlot {
    current: Option<Notification>,
}

impl NotificationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notification, replacing any currently visible one.
    pub fn publish(&mut self, notification: Notification) {
        self.current = Some(notification);
    }

    /// Dismiss the visible notification, if any.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn visible(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Take the visible notification, leaving the slot empty.
    pub fn take(&mut self) -> Option<Notification> {
        self.current.take()
    }
}

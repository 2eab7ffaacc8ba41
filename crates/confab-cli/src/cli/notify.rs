//! Terminal notification sink.
//!
//! Prints notices as styled lines and keeps the last one in a
//! [`NotificationSlot`] so the usual last-write-wins semantics hold:
//! at most one notification is "current" at a time.

use std::sync::Mutex;

use console::style;

use confab_core::notify::NotificationSink;
use confab_types::notification::{Notification, NotificationKind, NotificationSlot};

/// Notification sink printing to the terminal.
pub struct TermNotifier {
    slot: Mutex<NotificationSlot>,
}

impl TermNotifier {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(NotificationSlot::new()),
        }
    }

    /// The currently held notification message, if any.
    pub fn current(&self) -> Option<Notification> {
        self.slot
            .lock()
            .expect("notifier lock poisoned")
            .visible()
            .cloned()
    }
}

impl NotificationSink for TermNotifier {
    fn publish(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Info => {
                println!("  {} {}", style("*").cyan().bold(), notification.message);
            }
            NotificationKind::Error => {
                eprintln!(
                    "  {} {}",
                    style("!").red().bold(),
                    style(&notification.message).red()
                );
            }
        }
        self.slot
            .lock()
            .expect("notifier lock poisoned")
            .publish(notification);
    }
}

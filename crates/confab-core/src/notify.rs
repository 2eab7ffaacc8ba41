//! NotificationSink trait definition.

use confab_types::notification::Notification;

/// Sink for transient success/error feedback.
///
/// At most one notification is visible at a time; publishing replaces
/// the current one (last write wins). The slot semantics live in
/// [`confab_types::notification::NotificationSlot`]; this trait is the
/// write side handed to code that needs to surface a notice.
pub trait NotificationSink: Send + Sync {
    fn publish(&self, notification: Notification);
}

use super::{SharedState, lock_state};
use crate::model::{Notification, Severity};
use std::sync::atomic::{AtomicU64, Ordering};

/// Puts notifications into the alert region of an `AppState`.
///
/// Ids come from a counter owned by the notifier, so they never repeat for
/// the lifetime of the notifier even after notifications are dismissed.
pub struct Notifier {
    next_id: AtomicU64,
    region: SharedState,
}

impl Notifier {
    pub fn new(region: SharedState) -> Self {
        Self {
            next_id: AtomicU64::new(0),
            region,
        }
    }

    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> NotificationHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let notification = Notification::new(id, message, severity);
        log::info!(
            "[{}] #{} {}",
            severity.as_str(),
            id,
            notification.message
        );
        lock_state(&self.region).notifications.push(notification);
        NotificationHandle {
            id,
            region: self.region.clone(),
        }
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationHandle {
        self.notify(message, Severity::Success)
    }

    pub fn warning(&self, message: impl Into<String>) -> NotificationHandle {
        self.notify(message, Severity::Warning)
    }

    pub fn danger(&self, message: impl Into<String>) -> NotificationHandle {
        self.notify(message, Severity::Danger)
    }
}

/// Refers to one notification in the alert region.
#[derive(Clone)]
pub struct NotificationHandle {
    id: u64,
    region: SharedState,
}

impl NotificationHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Removes the notification. A second call does nothing and returns `false`.
    pub fn dismiss(&self) -> bool {
        lock_state(&self.region).dismiss_notification(self.id)
    }

    pub fn is_dismissed(&self) -> bool {
        !lock_state(&self.region)
            .notifications
            .iter()
            .any(|n| n.id == self.id)
    }
}

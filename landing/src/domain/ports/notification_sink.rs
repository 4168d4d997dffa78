//! Driven port for user-facing notifications (toasts).

use crate::domain::NotificationKind;

/// Fire-and-forget notification capability.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send + Sync {
    /// Show `message` with the given severity.
    fn notify(&self, kind: NotificationKind, message: &str);
}

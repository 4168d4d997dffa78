//! Notification sink and router that write to the tracing subscriber.
//!
//! Used by the command-line driver, where there is no page to render toasts
//! or route changes on.

use tracing::{error, info, warn};

use crate::domain::NotificationKind;
use crate::domain::ports::{NotificationSink, Router};

/// Logs each notification at a level matching its kind.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Success => info!(kind = kind.as_str(), text = message, "notification"),
            NotificationKind::Warning => warn!(kind = kind.as_str(), text = message, "notification"),
            NotificationKind::Error => error!(kind = kind.as_str(), text = message, "notification"),
        }
    }
}

/// Logs each navigation request.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRouter;

impl Router for TracingRouter {
    fn navigate_to(&self, route: &str) {
        info!(route, "navigate");
    }
}

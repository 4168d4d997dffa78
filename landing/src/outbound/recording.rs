//! Notification sink and router that remember what they were asked to do.

use std::sync::{Mutex, PoisonError};

use crate::domain::ports::{NotificationSink, Router};
use crate::domain::{Notification, NotificationKind};

/// Sink that stores every notification in order.
#[derive(Debug, Default)]
pub struct RecordingNotificationSink {
    entries: Mutex<Vec<Notification>>,
}

impl RecordingNotificationSink {
    /// Notifications received so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recent notification, if any.
    pub fn last(&self) -> Option<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl NotificationSink for RecordingNotificationSink {
    fn notify(&self, kind: NotificationKind, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification::new(kind, message));
    }
}

/// Router that stores every requested route in order.
#[derive(Debug, Default)]
pub struct RecordingRouter {
    routes: Mutex<Vec<String>>,
}

impl RecordingRouter {
    /// Routes navigated to so far.
    pub fn routes(&self) -> Vec<String> {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Router for RecordingRouter {
    fn navigate_to(&self, route: &str) {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route.to_owned());
    }
}

//! User-visible notifications (snackbar-style messages).
//!
//! Controllers never show anything themselves. They queue a `Notification` in
//! their `Outbox` and the presentation layer drains it; nothing is ever read
//! back from the notification surface.

use std::time::Duration;

/// A fire-and-forget message with an optional action label and an
/// auto-dismiss duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub action: Option<String>,
    pub duration: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            action: None,
            duration,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// Queue of notifications waiting to be shown.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    queued: Vec<Notification>,
}

impl Outbox {
    pub fn push(&mut self, notification: Notification) {
        self.queued.push(notification);
    }

    /// Hand every queued notification to the caller, oldest first.
    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.queued)
    }
}

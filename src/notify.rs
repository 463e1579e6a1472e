//! # Notifications
//!
//! Transient user-facing messages ("toasts"). Producers publish on a
//! broadcast channel; any number of views subscribe. Publishing with no
//! subscriber is not an error, the message is simply dropped.

use atelier_framework::ApiError;
use tokio::sync::broadcast;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    /// The session expired; the view should send the user to the login flow.
    LoginRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn publish(&self, level: NotificationLevel, message: impl Into<String>) {
        let notification = Notification {
            level,
            message: message.into(),
        };
        debug!(?notification.level, %notification.message, "Notify");
        let _ = self.sender.send(notification);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(NotificationLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(NotificationLevel::Error, message);
    }

    /// Reports a failed request: authentication failures ask for a login,
    /// anything else is shown as an error prefixed with `context`.
    pub fn api_error(&self, context: &str, error: &ApiError) {
        if error.requires_login() {
            self.publish(NotificationLevel::LoginRequired, "Please sign in again");
        } else {
            self.error(format!("{context}: {error}"));
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(64)
    }
}

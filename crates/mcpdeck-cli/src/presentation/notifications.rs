//! Terminal rendering of controller notifications.

use mcpdeck_core::{Notification, NotificationLevel, Notifier};
use tracing::debug;

/// Prints notifications to stderr so they do not mix with command output.
///
/// Debug-level notifications go to the log instead.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    pub const fn new() -> Self {
        Self
    }
}

/// One-line terminal form of a notification.
pub fn render(notification: &Notification) -> String {
    let prefix = match notification.level() {
        NotificationLevel::Debug => "·",
        NotificationLevel::Success => "✓",
        NotificationLevel::Info => "•",
        NotificationLevel::Warning => "⚠",
        NotificationLevel::Error => "✗",
    };
    format!("{prefix} {}", notification.message())
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        if notification.level() == NotificationLevel::Debug {
            debug!(text = %notification.message(), "Notification");
        } else {
            eprintln!("{}", render(&notification));
        }
    }
}

//! Notification sink.

use crate::events::Notification;

/// Trait for surfacing notifications to the user.
///
/// # Implementations
///
/// - `NoopNotifier` - For tests and contexts without a user-facing surface
/// - Adapter-specific implementations (terminal output, toast bridge, etc.)
pub trait Notifier: Send + Sync {
    /// Surface a notification. Must not block.
    fn notify(&self, notification: Notification);
}

/// A notifier that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl NoopNotifier {
    pub const fn new() -> Self {
        Self
    }
}

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: Notification) {}
}

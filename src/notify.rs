//! User-visible notifications.
//!
//! List controllers report the outcome of fetches and mutations through a
//! [`Notifier`]. A console binds it to its toast component; tests use
//! [`RecordingNotifier`]; [`TracingNotifier`] writes to the log.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// Severity of a [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A mutation or action succeeded.
    Success,
    /// Informational.
    Info,
    /// Something failed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Info => write!(f, "info"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub severity: Severity,
    /// Human-readable text.
    pub message: String,
}

impl Notification {
    /// A success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    /// An informational notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    /// An error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Returns `true` for error notifications.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// A sink for notifications.
///
/// Called outside the controller's state lock, so implementations may read
/// the controller's snapshot.
pub trait Notifier: Send + Sync {
    /// Delivers one notification.
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// Forwards notifications to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Error => tracing::warn!(message = %notification.message, "notification"),
            Severity::Success | Severity::Info => {
                tracing::info!(message = %notification.message, "notification")
            }
        }
    }
}

/// Keeps every notification in memory.
///
/// Clones share the same buffer, so a test can keep one handle and give
/// another to a controller.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    inner: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything recorded so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.inner.lock().clone()
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.inner.lock())
    }

    /// Returns the number of notifications with `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.inner
            .lock()
            .iter()
            .filter(|n| n.severity == severity)
            .count()
    }

    /// Returns the number of error notifications.
    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Returns the number of success notifications.
    pub fn successes(&self) -> usize {
        self.count(Severity::Success)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.inner.lock().push(notification);
    }
}

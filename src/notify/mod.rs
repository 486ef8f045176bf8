//! Notification delivery.
//!
//! Notifications are fire-and-forget text messages addressed to a
//! username. The console implementation prints them; the mock records
//! them for tests.

use std::cell::RefCell;

// ============================================================================
// Notifier
// ============================================================================

/// Delivers a text message to a named recipient.
///
/// There is no acknowledgment contract; delivery failures are not
/// observable by the caller.
pub trait Notifier {
    /// Delivers `message` to `recipient`.
    fn deliver(&self, recipient: &str, message: &str);
}

// ============================================================================
// ConsoleNotifier
// ============================================================================

/// Prints notifications to the console.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn deliver(&self, recipient: &str, message: &str) {
        tracing::debug!(recipient, message, "delivering notification");
        println!("\nNotification to {recipient}: {message}");
    }
}

// ============================================================================
// MockNotifier
// ============================================================================

/// Records delivered notifications for assertions in tests.
#[derive(Debug, Default)]
pub struct MockNotifier {
    sent: RefCell<Vec<(String, String)>>,
}

impl MockNotifier {
    /// Creates an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// The (recipient, message) pairs delivered so far.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.borrow().clone()
    }

    /// Number of notifications delivered.
    pub fn sent_count(&self) -> usize {
        self.sent.borrow().len()
    }
}

impl Notifier for MockNotifier {
    fn deliver(&self, recipient: &str, message: &str) {
        self.sent
            .borrow_mut()
            .push((recipient.to_string(), message.to_string()));
    }
}

// ============================================================================
// Tests
// ============================================================================

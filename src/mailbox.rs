//! Single-slot mailbox between background tasks and the UI thread
//!
//! Holds at most one message. Offering into a full slot replaces the unread
//! message, so only the latest result is ever delivered.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Capacity-1 handoff buffer with replace-with-latest semantics
///
/// Cloning yields another handle to the same slot. The lock is only held for
/// the duration of a single swap, so neither side ever waits on the other's
/// work.
#[derive(Debug)]
pub struct Mailbox<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T> Clone for Mailbox<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Store `message`, discarding any message not yet taken
    ///
    /// Returns `true` if an unread message was replaced.
    pub fn offer(&self, message: T) -> bool {
        let replaced = self.lock().replace(message).is_some();
        if replaced {
            tracing::debug!("Mailbox full, dropped stale message");
        }
        replaced
    }

    /// Take the pending message, leaving the slot empty
    pub fn try_take(&self) -> Option<T> {
        self.lock().take()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    // A panic elsewhere while holding the lock cannot leave the Option in a
    // torn state, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Option<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Core notification data structure.
//!
//! A notification is a text payload with its own identity, so two toasts
//! carrying the same text can still be expired independently.

use super::timers::TimerHandle;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    message: String,
    created_at: Instant,
    removal: Option<TimerHandle>,
}

impl Notification {
    /// Creates a notification stamped with `created_at`.
    pub fn new(message: impl Into<String>, created_at: Instant) -> Self {
        Self {
            id: NotificationId::new(),
            message: message.into(),
            created_at,
            removal: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Timer scheduled to remove this notification, once it is shown.
    #[must_use]
    pub fn removal_timer(&self) -> Option<TimerHandle> {
        self.removal
    }

    pub(super) fn set_removal_timer(&mut self, handle: TimerHandle) {
        self.removal = Some(handle);
    }

    /// Returns the age of this notification at `now`.
    #[must_use]
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` listens for `"notification"` events on an [`EventBus`],
//! appends each payload to the visible list and schedules its removal after
//! the display duration. Every shown notification carries the handle of its
//! removal timer; the handles are cancelled, together with the list, when the
//! manager is deactivated or dropped.
//!
//! Reads never show a notification past its deadline, even if [`Manager::tick`]
//! has not run yet.

use super::notification::{Notification, NotificationId};
use super::timers::TimerQueue;
use crate::clock::{Clock, SystemClock};
use crate::error::{Result, SubscriberError};
use crate::event_bus::{EventBus, Subscription};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Event name the manager subscribes to.
pub const NOTIFICATION_EVENT: &str = "notification";

#[derive(Debug, Default)]
struct State {
    /// Visible notifications in arrival order.
    visible: Vec<Notification>,
    timers: TimerQueue,
}

impl State {
    fn append(&mut self, message: String, now: Instant, ttl: Duration) -> NotificationId {
        let mut notification = Notification::new(message, now);
        let id = notification.id();
        notification.set_removal_timer(self.timers.schedule(now + ttl, id));
        log::debug!("notification {id:?} shown: {}", notification.message());
        self.visible.push(notification);
        id
    }

    fn expire(&mut self, now: Instant) -> usize {
        let mut removed = 0;
        for id in self.timers.take_due(now) {
            if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
                self.visible.remove(pos);
                removed += 1;
                log::debug!("notification {id:?} expired");
            }
        }
        removed
    }

    /// Index of the first notification still inside its display window.
    ///
    /// The ttl is fixed and arrivals are stamped with a monotonic clock, so
    /// overdue entries always form a prefix of the list.
    fn first_live(&self, now: Instant, ttl: Duration) -> usize {
        self.visible.partition_point(|n| n.created_at() + ttl <= now)
    }

    /// Cancels the removal timer of every visible notification and empties the list.
    fn teardown(&mut self) -> usize {
        let mut cancelled = 0;
        for notification in self.visible.drain(..) {
            if let Some(handle) = notification.removal_timer() {
                if self.timers.cancel(handle) {
                    cancelled += 1;
                }
            }
        }
        debug_assert!(self.timers.is_empty(), "timer left without a notification");
        cancelled
    }
}

fn append_to(
    state: &RefCell<State>,
    message: String,
    now: Instant,
    ttl: Duration,
) -> std::result::Result<NotificationId, SubscriberError> {
    let mut guard = state
        .try_borrow_mut()
        .map_err(|_| SubscriberError::new("notification list is busy"))?;
    Ok(guard.append(message, now, ttl))
}

/// Owns the visible notifications and their removal timers.
pub struct Manager {
    state: Rc<RefCell<State>>,
    clock: Rc<dyn Clock>,
    display_duration: Duration,
    subscription: Option<Subscription<String>>,
}

impl Manager {
    /// Creates an inactive manager driven by the system clock.
    #[must_use]
    pub fn new(display_duration: Duration) -> Self {
        Self::with_clock(display_duration, Rc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(display_duration: Duration, clock: Rc<dyn Clock>) -> Self {
        Self {
            state: Rc::new(RefCell::new(State::default())),
            clock,
            display_duration,
            subscription: None,
        }
    }

    /// Subscribes to [`NOTIFICATION_EVENT`] on `bus`.
    ///
    /// Calling this again with the same bus keeps the existing subscription,
    /// so the manager never holds more than one. Activating on a different
    /// bus moves the subscription there; visible notifications stay.
    pub fn activate(&mut self, bus: &EventBus<String>) -> Result<()> {
        if let Some(current) = &self.subscription {
            if current.is_active() && current.belongs_to(bus) {
                log::debug!("notification manager already active");
                return Ok(());
            }
        }

        let state = Rc::downgrade(&self.state);
        let clock = Rc::clone(&self.clock);
        let ttl = self.display_duration;
        let subscription = bus.subscribe(NOTIFICATION_EVENT, move |message: &String| {
            let state = state
                .upgrade()
                .ok_or_else(|| SubscriberError::new("notification manager is gone"))?;
            append_to(&state, message.clone(), clock.now(), ttl).map(|_| ())
        })?;

        if let Some(previous) = self.subscription.replace(subscription) {
            if !previous.belongs_to(bus) {
                log::debug!("notification manager moved to another bus");
            }
        }
        Ok(())
    }

    /// Unsubscribes, cancels every pending removal and discards the visible list.
    pub fn deactivate(&mut self) {
        let was_subscribed = self.subscription.take().is_some();
        // `&mut self` rules out outstanding `visible()` borrows.
        let cancelled = self.state.borrow_mut().teardown();
        if was_subscribed || cancelled > 0 {
            log::debug!("notification manager deactivated, {cancelled} timer(s) cancelled");
        }
    }

    /// Whether the manager currently holds a live subscription.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    /// Shows a notification without going through the bus.
    ///
    /// Fails like the bus callback does if the visible list is borrowed
    /// through [`Manager::visible`] at the time of the call.
    pub fn push(
        &self,
        message: impl Into<String>,
    ) -> std::result::Result<NotificationId, SubscriberError> {
        append_to(
            &self.state,
            message.into(),
            self.clock.now(),
            self.display_duration,
        )
    }

    /// Removes every notification whose timer is due. Returns how many were removed.
    ///
    /// Should be called periodically (e.g., every 100ms) while
    /// [`Manager::has_notifications`] is true. If the list is borrowed the
    /// removal is left to the next tick; reads already hide overdue entries.
    pub fn tick(&self) -> usize {
        let now = self.clock.now();
        match self.state.try_borrow_mut() {
            Ok(mut state) => state.expire(now),
            Err(_) => {
                log::trace!("notification list busy, expiry deferred");
                0
            }
        }
    }

    /// Returns the notifications still inside their display window, in arrival order.
    pub fn visible(&self) -> Ref<'_, [Notification]> {
        let now = self.clock.now();
        let ttl = self.display_duration;
        Ref::map(self.state.borrow(), |state| {
            &state.visible[state.first_live(now, ttl)..]
        })
    }

    /// Returns the visible payloads in arrival order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.visible()
            .iter()
            .map(|n| n.message().to_string())
            .collect()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible().len()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible().is_empty()
    }

    /// When the next notification is due to expire.
    #[must_use]
    pub fn next_expiry(&self) -> Option<Instant> {
        self.state.borrow().timers.next_deadline()
    }

    #[must_use]
    pub fn display_duration(&self) -> Duration {
        self.display_duration
    }
}

impl Drop for Manager {
    fn drop(&mut self) {
        self.deactivate();
    }
}

impl fmt::Debug for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("visible", &self.visible_count())
            .field("pending_timers", &self.pending_timers())
            .field("display_duration", &self.display_duration)
            .field("active", &self.is_active())
            .finish()
    }
}

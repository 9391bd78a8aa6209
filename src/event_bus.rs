// SPDX-License-Identifier: MPL-2.0
//! In-memory publish/subscribe registry.
//!
//! Design principles:
//! - Owned instance, passed by reference (no process-wide registry)
//! - Synchronous dispatch in registration order
//! - Scoped subscriptions: dropping the [`Subscription`] guard unregisters
//! - Single-threaded (`Rc<RefCell<_>>`), matching the UI update loop
//!
//! The bus never keeps payloads. Publishing on an event nobody listens to is
//! a no-op.
//!
//! # Usage
//!
//! ```
//! use iced_toasts::event_bus::EventBus;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let bus: EventBus<String> = EventBus::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let sink = Rc::clone(&seen);
//! let _subscription = bus
//!     .subscribe("greeting", move |payload: &String| {
//!         sink.borrow_mut().push(payload.clone());
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! assert_eq!(bus.publish("greeting", &"hello".to_string()).unwrap(), 1);
//! assert_eq!(seen.borrow().as_slice(), ["hello".to_string()]);
//! ```

use crate::error::{DispatchError, Error, Result, SubscriberError};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Callback invoked with a borrowed payload.
pub type Callback<P> = Rc<dyn Fn(&P) -> std::result::Result<(), SubscriberError>>;

/// How `publish` reacts when a subscriber fails.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchPolicy {
    /// Keep delivering to the remaining subscribers, then report every failure.
    #[default]
    Isolate,
    /// Stop at the first failure.
    Abort,
}

/// Identifier of a single registration, unique per bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

struct Entry<P> {
    id: SubscriberId,
    callback: Callback<P>,
}

struct Registry<P> {
    topics: HashMap<String, Vec<Entry<P>>>,
    next_id: u64,
}

impl<P> Registry<P> {
    fn remove(&mut self, event: &str, id: SubscriberId) -> bool {
        let Some(entries) = self.topics.get_mut(event) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        let removed = entries.len() < before;
        if entries.is_empty() {
            self.topics.remove(event);
        }
        removed
    }

    fn contains(&self, event: &str, id: SubscriberId) -> bool {
        self.topics
            .get(event)
            .is_some_and(|entries| entries.iter().any(|entry| entry.id == id))
    }
}

/// Publish/subscribe registry keyed by event name.
pub struct EventBus<P> {
    registry: Rc<RefCell<Registry<P>>>,
    policy: DispatchPolicy,
}

impl<P: 'static> EventBus<P> {
    /// Creates an empty bus with the default [`DispatchPolicy`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(DispatchPolicy::default())
    }

    #[must_use]
    pub fn with_policy(policy: DispatchPolicy) -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                topics: HashMap::new(),
                next_id: 0,
            })),
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Registers `callback` for every future `publish` on `event`.
    ///
    /// The registration lives as long as the returned guard. Callbacks added
    /// while a publish is in progress are first invoked by the next publish.
    pub fn subscribe<F>(&self, event: &str, callback: F) -> Result<Subscription<P>>
    where
        F: Fn(&P) -> std::result::Result<(), SubscriberError> + 'static,
    {
        if event.trim().is_empty() {
            return Err(Error::InvalidSubscription(
                "event name must not be empty".to_string(),
            ));
        }

        let mut registry = self.registry.borrow_mut();
        let id = SubscriberId(registry.next_id);
        registry.next_id += 1;
        registry
            .topics
            .entry(event.to_string())
            .or_default()
            .push(Entry {
                id,
                callback: Rc::new(callback),
            });
        log::debug!("subscribed {id:?} to '{event}'");

        Ok(Subscription {
            registry: Rc::downgrade(&self.registry),
            event: event.to_string(),
            id,
        })
    }

    /// Invokes every callback registered for `event`, in registration order.
    ///
    /// Returns the number of callbacks that completed successfully. Failures
    /// are handled according to the bus [`DispatchPolicy`].
    pub fn publish(&self, event: &str, payload: &P) -> Result<usize> {
        // Snapshot so callbacks may subscribe, unsubscribe or publish re-entrantly.
        let callbacks: Vec<(SubscriberId, Callback<P>)> = {
            let registry = self.registry.borrow();
            match registry.topics.get(event) {
                Some(entries) => entries
                    .iter()
                    .map(|entry| (entry.id, Rc::clone(&entry.callback)))
                    .collect(),
                None => {
                    log::trace!("publish on '{event}' with no subscribers");
                    return Ok(0);
                }
            }
        };

        log::trace!("publishing '{event}' to {} subscriber(s)", callbacks.len());

        let mut delivered = 0;
        let mut failures = Vec::new();
        for (id, callback) in callbacks {
            match callback(payload) {
                Ok(()) => delivered += 1,
                Err(err) => {
                    log::warn!("subscriber {id:?} failed on '{event}': {err}");
                    failures.push(err);
                    if self.policy == DispatchPolicy::Abort {
                        break;
                    }
                }
            }
        }

        if failures.is_empty() {
            Ok(delivered)
        } else {
            Err(Error::Dispatch(DispatchError {
                event: event.to_string(),
                delivered,
                failures,
            }))
        }
    }

    /// Number of live registrations for `event`.
    #[must_use]
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.registry
            .borrow()
            .topics
            .get(event)
            .map_or(0, Vec::len)
    }

    /// Number of event names with at least one registration.
    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.registry.borrow().topics.len()
    }

    /// Removes every registration. Outstanding guards become inert.
    pub fn clear(&self) {
        let mut registry = self.registry.borrow_mut();
        let count: usize = registry.topics.values().map(Vec::len).sum();
        registry.topics.clear();
        log::debug!("cleared {count} subscription(s)");
    }
}

impl<P: 'static> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("EventBus")
            .field("topics", &registry.topics.keys().collect::<Vec<_>>())
            .field("policy", &self.policy)
            .finish()
    }
}

/// Scoped registration returned by [`EventBus::subscribe`].
///
/// Unregisters on drop. Holds only a weak reference, so it never keeps the
/// bus alive.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription<P> {
    registry: Weak<RefCell<Registry<P>>>,
    event: String,
    id: SubscriberId,
}

impl<P> Subscription<P> {
    #[must_use]
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Whether the registration is still present on a live bus.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().contains(&self.event, self.id))
    }

    /// Whether this registration was made on `bus`.
    #[must_use]
    pub fn belongs_to(&self, bus: &EventBus<P>) -> bool {
        Weak::ptr_eq(&self.registry, &Rc::downgrade(&bus.registry))
    }

    /// Unregisters now. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {}
}

impl<P> Drop for Subscription<P> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.borrow_mut().remove(&self.event, self.id) {
                log::debug!("unsubscribed {:?} from '{}'", self.id, self.event);
            }
        }
    }
}

impl<P> fmt::Debug for Subscription<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .field("id", &self.id)
            .finish()
    }
}

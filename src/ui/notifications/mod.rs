// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Notifications arrive as `"notification"` events on the application's
//! [`EventBus`](crate::event_bus::EventBus), stay visible for a fixed
//! duration (3s by default) and then disappear on their own.
//!
//! # Components
//!
//! - [`Notification`] - a message with a unique [`NotificationId`]
//! - [`TimerQueue`] - cancellable removal timers ([`TimerHandle`])
//! - [`Manager`] - owns the visible list and its lifecycle
//! - [`Toast`] - widget component for rendering notifications
//!
//! # Usage
//!
//! ```
//! use iced_toasts::event_bus::EventBus;
//! use iced_toasts::ui::notifications::{Manager, NOTIFICATION_EVENT};
//! use std::time::Duration;
//!
//! let bus = EventBus::new();
//! let mut manager = Manager::new(Duration::from_secs(3));
//! manager.activate(&bus).unwrap();
//!
//! bus.publish(NOTIFICATION_EVENT, &"Button clicked!".to_string()).unwrap();
//! assert_eq!(manager.messages(), vec!["Button clicked!"]);
//! ```

mod manager;
mod notification;
mod timers;
mod toast;

pub use manager::{Manager, NOTIFICATION_EVENT};
pub use notification::{Notification, NotificationId};
pub use timers::{TimerHandle, TimerQueue};
pub use toast::Toast;

// SPDX-License-Identifier: MPL-2.0
//! `iced_toasts` is a small Iced demo of toast notifications driven by an
//! in-memory event bus.
//!
//! A button publishes a `"notification"` event, the notification manager
//! shows it as a toast and removes it after a fixed delay, and a shared value
//! is handed to the view through a reader/writer pair.

pub mod app;
pub mod clock;
pub mod error;
pub mod event_bus;
pub mod ui;

// SPDX-License-Identifier: MPL-2.0
//! Time-based subscriptions for the application.

use super::Message;
use iced::{time, Subscription};
use std::time::Duration;

/// Interval at which pending toasts are checked for expiry.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Creates a periodic tick subscription for notification auto-dismiss.
///
/// Idle once no removal is pending, so an empty window does not wake up.
pub fn create_tick_subscription(has_pending_removals: bool) -> Subscription<Message> {
    if has_pending_removals {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

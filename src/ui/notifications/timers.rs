// SPDX-License-Identifier: MPL-2.0
//! Cancellable removal timers.
//!
//! Each scheduled removal is an entry with a deadline and a [`TimerHandle`].
//! Nothing fires on its own: the owner calls [`TimerQueue::take_due`] with the
//! current instant and applies the returned targets.

use super::notification::NotificationId;
use std::time::Instant;

/// Handle to a scheduled removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Scheduled {
    handle: TimerHandle,
    deadline: Instant,
    target: NotificationId,
}

/// Pending removals, kept in firing order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    // Sorted by (deadline, handle); equal deadlines fire in scheduling order.
    pending: Vec<Scheduled>,
    next_handle: u64,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules removal of `target` at `deadline`.
    pub fn schedule(&mut self, deadline: Instant, target: NotificationId) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        let index = self
            .pending
            .partition_point(|entry| entry.deadline <= deadline);
        self.pending.insert(
            index,
            Scheduled {
                handle,
                deadline,
                target,
            },
        );
        handle
    }

    /// Cancels a pending timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        if let Some(pos) = self.pending.iter().position(|entry| entry.handle == handle) {
            self.pending.remove(pos);
            true
        } else {
            false
        }
    }

    /// Removes and returns the targets of every timer due at `now`, in firing order.
    pub fn take_due(&mut self, now: Instant) -> Vec<NotificationId> {
        let due = self.pending.partition_point(|entry| entry.deadline <= now);
        self.pending
            .drain(..due)
            .map(|entry| entry.target)
            .collect()
    }

    /// Deadline of the next timer to fire.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.first().map(|entry| entry.deadline)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn take_due_returns_only_expired_targets() {
        let mut queue = TimerQueue::new();
        let start = Instant::now();
        let early = NotificationId::new();
        let late = NotificationId::new();

        queue.schedule(start + Duration::from_secs(1), early);
        queue.schedule(start + Duration::from_secs(3), late);

        assert!(queue.take_due(start).is_empty());
        assert_eq!(queue.take_due(start + Duration::from_secs(1)), vec![early]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.take_due(start + Duration::from_secs(5)), vec![late]);
        assert!(queue.is_empty());
    }

    #[test]
    fn equal_deadlines_fire_in_scheduling_order() {
        let mut queue = TimerQueue::new();
        let deadline = Instant::now();
        let ids: Vec<_> = (0..4).map(|_| NotificationId::new()).collect();
        for id in &ids {
            queue.schedule(deadline, *id);
        }

        assert_eq!(queue.take_due(deadline), ids);
    }

    #[test]
    fn out_of_order_schedules_are_sorted() {
        let mut queue = TimerQueue::new();
        let start = Instant::now();
        let later = NotificationId::new();
        let sooner = NotificationId::new();

        queue.schedule(start + Duration::from_secs(2), later);
        queue.schedule(start + Duration::from_secs(1), sooner);

        assert_eq!(queue.next_deadline(), Some(start + Duration::from_secs(1)));
        assert_eq!(
            queue.take_due(start + Duration::from_secs(2)),
            vec![sooner, later]
        );
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let start = Instant::now();
        let handle = queue.schedule(start, NotificationId::new());

        assert!(queue.cancel(handle));
        assert!(!queue.cancel(handle));
        assert!(queue.take_due(start + Duration::from_secs(10)).is_empty());
    }
}

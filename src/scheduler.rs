//! # Reminder Scheduling
//!
//! The planner decides *when* the next reminder should fire; actually firing
//! it is an external concern. This module defines the seam: a one-shot
//! scheduler that accepts "wake me after N minutes" and "cancel the pending
//! wake-up" requests. The planner always cancels before scheduling, so an
//! implementation holds at most one pending request.
//!
//! Any timer can sit behind the trait — an OS alarm service, a cron entry,
//! or the in-process [`PendingReminder`] the `watch` command uses, which
//! simply records the offset for a sleep loop to consume.

/// One-shot wake-up registration.
///
/// Implementations are expected to be idempotent: cancelling with nothing
/// pending is a no-op, and scheduling replaces nothing because the planner
/// cancels first.
pub trait ReminderScheduler {
    /// Drop the pending wake-up, if any.
    fn cancel(&mut self);

    /// Request a single wake-up after `minutes` (monotonic minutes from
    /// now, not a wall-clock time, so clock changes do not shift it).
    fn schedule_once_after(&mut self, minutes: i32);
}

/// In-process scheduler that records the single pending offset.
///
/// This is the concrete timer for the CLI: after `evaluate()` the binary
/// asks [`take`](PendingReminder::take) how long to sleep before
/// re-evaluating.
#[derive(Clone, Copy, Debug, Default)]
pub struct PendingReminder {
    pending_minutes: Option<i32>,
}

impl PendingReminder {
    pub fn new() -> Self {
        PendingReminder::default()
    }

    /// Offset of the pending wake-up, if one is scheduled.
    pub fn pending_minutes(&self) -> Option<i32> {
        self.pending_minutes
    }

    /// Consume the pending wake-up, leaving nothing scheduled.
    pub fn take(&mut self) -> Option<i32> {
        self.pending_minutes.take()
    }
}

impl ReminderScheduler for PendingReminder {
    fn cancel(&mut self) {
        self.pending_minutes = None;
    }

    fn schedule_once_after(&mut self, minutes: i32) {
        self.pending_minutes = Some(minutes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_replaces_pending_offset() {
        let mut timer = PendingReminder::new();
        assert_eq!(timer.pending_minutes(), None);

        timer.schedule_once_after(30);
        assert_eq!(timer.pending_minutes(), Some(30));

        timer.schedule_once_after(5);
        assert_eq!(timer.pending_minutes(), Some(5));
    }

    #[test]
    fn cancel_clears_pending_offset() {
        let mut timer = PendingReminder::new();
        timer.schedule_once_after(30);
        timer.cancel();
        assert_eq!(timer.pending_minutes(), None);

        // Cancelling with nothing pending is a no-op
        timer.cancel();
        assert_eq!(timer.pending_minutes(), None);
    }

    #[test]
    fn take_consumes_the_wakeup() {
        let mut timer = PendingReminder::new();
        timer.schedule_once_after(12);
        assert_eq!(timer.take(), Some(12));
        assert_eq!(timer.take(), None);
    }
}

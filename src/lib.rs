//! # Hydration Tracker Core Library
//!
//! This library models a daily hydration-tracking scheduler. Given a planned
//! drinking window, a daily consumption goal, and how much has been consumed
//! so far, it computes a running *deficit* — how far behind the ideal
//! drinking pace the user is — and decides when the next reminder should
//! fire.
//!
//! ## Design Philosophy
//!
//! ### Pure, Synchronous Core
//! - **No ambient state**: the planner takes its [`clock::Clock`] and
//!   [`scheduler::ReminderScheduler`] collaborators at construction time.
//!   There is no global instance and no internal locking; callers that share
//!   a planner across threads must serialize access themselves.
//! - **Deterministic math**: the deficit is a pure function of current state
//!   and the current minute. Calling it twice without a state or time change
//!   yields identical results.
//! - **Safe degradation**: degenerate configurations (empty or inverted plan
//!   window, zero daily goal) short-circuit to "no deficit, nothing
//!   scheduled" instead of dividing by zero.
//!
//! ### Temporal Model
//! All times are minute-resolution times of day. The plan window spans from
//! a start to an end time within one day, and elapsed time is measured in
//! signed minutes from the window start:
//! - **Negative**: the window has not started yet
//! - **0..=range**: inside the window, deficit accrues linearly
//! - **> range**: the window is over for today, no reminders
//!
//! Day rollover is a caller responsibility: the planner never resets itself,
//! it only exposes [`planner::HydrationPlanner::reset`].
//!
//! ### Data Flow
//! 1. **Load**: state file → planner fields → recompute deficit
//! 2. **Mutate**: drinks and plan edits update fields, rotating `prev_*`
//! 3. **Evaluate**: recompute deficit → cancel pending reminder → schedule
//!    the next one at the minute the deficit will reach 250 ml
//! 4. **Store**: window/goal/consumption back to the state file
//!
//! ## Core Types
//!
//! The library exports two value types used throughout:
//! - [`TimeOfDay`]: an hour/minute pair
//! - [`PlanWindow`]: the tracked portion of the day, with the signed
//!   minute arithmetic everything else is built on

use serde::{Deserialize, Serialize};

// Module declarations
pub mod clock;
pub mod config;
pub mod planner;
pub mod report;
pub mod scheduler;
pub mod storage;

/// A minute-resolution time of day.
///
/// Fields are plain `i32` rather than a calendar type because every
/// computation in the crate works on signed minute offsets which may leave
/// the 0..24h range (e.g. "minutes since window start" is negative before
/// the window opens). No range validation is performed.
///
/// # Example
/// ```
/// use hydration_lib::TimeOfDay;
///
/// let half_past_two = TimeOfDay::new(14, 30);
/// assert_eq!(half_past_two.hour, 14);
/// assert_eq!(half_past_two.minute, 30);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    /// Hour of day, nominally 0-23
    pub hour: i32,
    /// Minute of hour, nominally 0-59
    pub minute: i32,
}

impl TimeOfDay {
    pub fn new(hour: i32, minute: i32) -> Self {
        TimeOfDay { hour, minute }
    }
}

/// The portion of the day during which hydration is tracked against the
/// daily goal.
///
/// The window is conceptually `from..to` within a single day. Nothing
/// enforces `to > from`: a misconfigured window simply yields a zero or
/// negative [`range_minutes`](PlanWindow::range_minutes), which downstream
/// code treats as "never schedule anything".
///
/// # Example
/// ```
/// use hydration_lib::{PlanWindow, TimeOfDay};
///
/// // The default tracked day: 08:00 to 21:00
/// let window = PlanWindow::new(TimeOfDay::new(8, 0), TimeOfDay::new(21, 0));
/// assert_eq!(window.range_minutes(), 780);
///
/// // 14:30 is 390 minutes in, exactly halfway
/// assert_eq!(window.elapsed_minutes(TimeOfDay::new(14, 30)), 390);
///
/// // Before the window opens the elapsed time is negative
/// assert_eq!(window.elapsed_minutes(TimeOfDay::new(7, 0)), -60);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanWindow {
    /// Start of the tracked window
    pub from: TimeOfDay,
    /// End of the tracked window
    pub to: TimeOfDay,
}

impl PlanWindow {
    pub fn new(from: TimeOfDay, to: TimeOfDay) -> Self {
        PlanWindow { from, to }
    }

    /// Total length of the window in minutes.
    ///
    /// May be zero or negative for misconfigured windows.
    pub fn range_minutes(&self) -> i32 {
        60 * (self.to.hour - self.from.hour) - self.from.minute + self.to.minute
    }

    /// Signed minutes between the window start and `now`.
    ///
    /// Negative before the window opens, greater than
    /// [`range_minutes`](PlanWindow::range_minutes) after it closes.
    pub fn elapsed_minutes(&self, now: TimeOfDay) -> i32 {
        60 * (now.hour - self.from.hour) - self.from.minute + now.minute
    }
}

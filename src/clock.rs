//! # Wall-Clock Access
//!
//! The planner only ever needs the current hour and minute, so the clock is
//! a one-method trait. Injecting it keeps every deficit and scheduling
//! computation testable at any simulated time of day.

use crate::TimeOfDay;
use chrono::{Local, Timelike};

/// Source of the current time of day.
pub trait Clock {
    /// Current local hour-of-day and minute.
    fn now(&self) -> TimeOfDay;
}

/// Production clock backed by the local system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimeOfDay {
        let now = Local::now();
        TimeOfDay::new(now.hour() as i32, now.minute() as i32)
    }
}

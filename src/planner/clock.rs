//! Wall-clock abstraction
//!
//! Completion timestamps combine the menu's calendar date with the
//! current time of day, so the clock is kept behind a trait to make
//! that rule testable.

use chrono::{Local, NaiveDateTime};

/// Source of the current local date and time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

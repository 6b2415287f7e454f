//! Time source for day-dependent logic
//!
//! The featured rotation reads "today" through [`Clock`] so that it stays a
//! pure function of the performer set and a date.

use chrono::{Days, NaiveDate};
use std::sync::Mutex;

/// Supplies the current calendar date
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock date in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        setlist_common::time::today_utc()
    }
}

/// Manually controlled date, for tests and replays
#[derive(Debug)]
pub struct FixedClock {
    today: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        *self.today.lock().unwrap_or_else(|e| e.into_inner()) = today;
    }

    /// Move the date forward by whole days
    pub fn advance_days(&self, days: u64) {
        let mut today = self.today.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(next) = today.checked_add_days(Days::new(days)) {
            *today = next;
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap_or_else(|e| e.into_inner())
    }
}

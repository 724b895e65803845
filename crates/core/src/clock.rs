// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable date handling
//!
//! Editability and streak decisions both hinge on "today". Every
//! component takes the clock as a collaborator instead of reading
//! wall-clock time, so midnight rollover is testable.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};

use crate::date::EntryDate;

/// A clock that provides today's calendar date and the current instant
pub trait Clock: Clone + Send + Sync {
    /// Today as a calendar date, in the daemon's single time zone
    fn today(&self) -> EntryDate;

    /// The current instant, for created/updated timestamps
    fn now(&self) -> DateTime<Utc>;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> EntryDate {
        EntryDate::new(Local::now().date_naive())
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fake clock for testing with a controllable date
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<NaiveDate>>,
}

impl FakeClock {
    /// Create a fake clock pinned to the given date
    pub fn at(date: EntryDate) -> Self {
        Self {
            current: Arc::new(Mutex::new(date.as_naive())),
        }
    }

    /// Advance the clock by the given number of days
    pub fn advance_days(&self, days: u64) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = *current + chrono::Days::new(days);
    }

    /// Set the clock to a specific date
    pub fn set(&self, date: EntryDate) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = date.as_naive();
    }
}

impl Clock for FakeClock {
    fn today(&self) -> EntryDate {
        EntryDate::new(*self.current.lock().unwrap_or_else(|e| e.into_inner()))
    }

    fn now(&self) -> DateTime<Utc> {
        // Noon on the fake date, so timestamps stay inside the day
        let date = *self.current.lock().unwrap_or_else(|e| e.into_inner());
        Utc.with_ymd_and_hms(date.year(), date.month(), date.day(), 12, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Calendar dates for diary entries
//!
//! Entries are keyed by plain calendar dates with no timezone
//! component, serialized as `YYYY-MM-DD`. Zero-padded ISO dates order
//! lexicographically and chronologically at once, which the streak
//! engine relies on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The calendar date a diary entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryDate(NaiveDate);

/// Errors parsing an entry date
#[derive(Debug, Error)]
pub enum DateError {
    #[error("invalid date {0:?} (expected YYYY-MM-DD)")]
    Invalid(String),
}

impl EntryDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Construct from year/month/day, `None` for out-of-range parts
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The day before this one
    ///
    /// `None` only at the lower bound of the calendar, which no real
    /// diary entry reaches.
    pub fn previous(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for EntryDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| DateError::Invalid(s.to_string()))?;
        // parse_from_str accepts unpadded fields like "2024-1-10";
        // only the canonical zero-padded form is a valid entry date
        if parsed.format("%Y-%m-%d").to_string() != s {
            return Err(DateError::Invalid(s.to_string()));
        }
        Ok(Self(parsed))
    }
}

impl fmt::Display for EntryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
#[path = "date_tests.rs"]
mod tests;

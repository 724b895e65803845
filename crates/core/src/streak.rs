// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Streak engine
//!
//! A streak counts consecutive calendar days, ending at the most
//! recent entry, on which the user wrote something. The record is
//! advanced exactly once per successful entry creation, never on
//! update; the one-entry-per-day invariant guarantees at most one
//! advance per user per day.

use serde::{Deserialize, Serialize};

use crate::date::EntryDate;
use crate::entry::UserId;

/// Per-user streak counters
///
/// Invariant: `longest_streak >= current_streak`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub user_id: UserId,
    /// Consecutive days with an entry, ending at `last_entry_date`
    pub current_streak: u32,
    /// Longest streak ever observed, monotonically non-decreasing
    pub longest_streak: u32,
    /// Date the streak was last advanced for
    pub last_entry_date: EntryDate,
}

impl StreakRecord {
    /// Record for a user's first-ever entry
    pub fn first(user_id: UserId, entry_date: EntryDate) -> Self {
        Self {
            user_id,
            current_streak: 1,
            longest_streak: 1,
            last_entry_date: entry_date,
        }
    }

    /// Compute the record after a new entry on `entry_date`
    ///
    /// - No prior record: a fresh record at 1/1.
    /// - Prior entry was exactly yesterday: increment, raising the
    ///   longest streak if overtaken.
    /// - Prior entry was older than yesterday: reset to 1, longest
    ///   untouched.
    /// - Prior entry is on or after `entry_date`: no change. The
    ///   uniqueness invariant makes this unreachable through the entry
    ///   service, but the engine stays total over its inputs.
    pub fn advance(
        prior: Option<&StreakRecord>,
        user_id: &UserId,
        entry_date: EntryDate,
    ) -> StreakRecord {
        let Some(prior) = prior else {
            return StreakRecord::first(user_id.clone(), entry_date);
        };

        let yesterday = entry_date.previous();

        if Some(prior.last_entry_date) == yesterday {
            let current = prior.current_streak + 1;
            StreakRecord {
                user_id: user_id.clone(),
                current_streak: current,
                longest_streak: prior.longest_streak.max(current),
                last_entry_date: entry_date,
            }
        } else if yesterday.is_some_and(|y| prior.last_entry_date < y) {
            StreakRecord {
                user_id: user_id.clone(),
                current_streak: 1,
                longest_streak: prior.longest_streak,
                last_entry_date: entry_date,
            }
        } else {
            // last_entry_date >= entry_date: today already counted,
            // or a future-dated record we refuse to rewind
            prior.clone()
        }
    }
}

#[cfg(test)]
#[path = "streak_tests.rs"]
mod tests;

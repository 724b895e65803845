// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operations for the write-ahead log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date::EntryDate;
use crate::entry::{DiaryEntry, UserId};
use crate::streak::StreakRecord;

/// Operations that can be persisted to the WAL
///
/// The entry id is carried inside `EntryCreate` so replay reproduces
/// store-assigned ids exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Insert a new diary entry
    EntryCreate { entry: DiaryEntry },

    /// Overwrite title/content of an existing entry
    EntryUpdate {
        user_id: UserId,
        entry_date: EntryDate,
        title: String,
        content: String,
        updated_at: DateTime<Utc>,
    },

    /// Replace the streak record for a user
    StreakPut { record: StreakRecord },
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;

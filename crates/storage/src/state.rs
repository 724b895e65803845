// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized state from WAL replay

use std::collections::{BTreeMap, HashMap};

use jot_core::{DiaryEntry, EntryDate, EntryId, Operation, StreakRecord, UserId};

/// Materialized diary state built from WAL operations
///
/// Per-user entries live in a `BTreeMap` keyed by entry date, which
/// gives the one-entry-per-day occupancy check and date-ordered
/// listing in one structure.
#[derive(Debug, Default)]
pub struct DiaryState {
    entries: HashMap<UserId, BTreeMap<EntryDate, DiaryEntry>>,
    streaks: HashMap<UserId, StreakRecord>,
    next_entry_id: u64,
}

impl DiaryState {
    /// Whether a user already has an entry for this date
    pub fn has_entry(&self, user_id: &UserId, entry_date: EntryDate) -> bool {
        self.entries
            .get(user_id)
            .is_some_and(|per_user| per_user.contains_key(&entry_date))
    }

    /// Get one entry by owner and date
    pub fn entry(&self, user_id: &UserId, entry_date: EntryDate) -> Option<&DiaryEntry> {
        self.entries.get(user_id)?.get(&entry_date)
    }

    /// All entries for a user, ordered by entry date
    pub fn entries(&self, user_id: &UserId) -> impl Iterator<Item = &DiaryEntry> {
        self.entries
            .get(user_id)
            .into_iter()
            .flat_map(|per_user| per_user.values())
    }

    /// The user's streak record, if any
    pub fn streak(&self, user_id: &UserId) -> Option<&StreakRecord> {
        self.streaks.get(user_id)
    }

    /// The id the next inserted entry will receive
    pub fn next_entry_id(&self) -> EntryId {
        EntryId(self.next_entry_id + 1)
    }

    /// Total number of entries across all users
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Number of users with at least one entry
    pub fn user_count(&self) -> usize {
        self.entries.len()
    }

    /// Apply an operation to update the state
    ///
    /// Apply is last-writer-wins and never fails: validity (duplicate
    /// dates, missing update targets) is checked before an operation
    /// is logged, so on replay every logged operation is good.
    pub fn apply(&mut self, op: &Operation) {
        match op {
            Operation::EntryCreate { entry } => {
                self.next_entry_id = self.next_entry_id.max(entry.id.0);
                self.entries
                    .entry(entry.user_id.clone())
                    .or_default()
                    .insert(entry.entry_date, entry.clone());
            }

            Operation::EntryUpdate {
                user_id,
                entry_date,
                title,
                content,
                updated_at,
            } => {
                if let Some(entry) = self
                    .entries
                    .get_mut(user_id)
                    .and_then(|per_user| per_user.get_mut(entry_date))
                {
                    entry.title = title.clone();
                    entry.content = content.clone();
                    entry.updated_at = *updated_at;
                }
            }

            Operation::StreakPut { record } => {
                self.streaks.insert(record.user_id.clone(), record.clone());
            }
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;

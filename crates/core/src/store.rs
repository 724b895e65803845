// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence contract for entries and streaks
//!
//! The store is the single writer's view of the diary: point lookups
//! and upserts keyed by `(user, date)` for entries and by user for
//! streak records. `insert_entry` must reject a duplicate
//! `(user, date)` atomically with respect to the occupancy check;
//! both implementations do the check and the insert under one
//! `&mut self` call.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::date::EntryDate;
use crate::entry::{DiaryEntry, EntryId, UserId};
use crate::streak::StreakRecord;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("an entry already exists for {user_id} on {entry_date}")]
    Duplicate {
        user_id: UserId,
        entry_date: EntryDate,
    },

    #[error("no entry for {user_id} on {entry_date}")]
    NotFound {
        user_id: UserId,
        entry_date: EntryDate,
    },

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Fields for an entry about to be inserted; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub user_id: UserId,
    pub entry_date: EntryDate,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Storage interface for diary entries and streak records
pub trait EntryStore {
    /// Insert a new entry, assigning its id
    ///
    /// Fails with [`StoreError::Duplicate`] if an entry already exists
    /// for the `(user, date)` pair.
    fn insert_entry(&mut self, new: NewEntry) -> Result<DiaryEntry, StoreError>;

    /// Look up one entry by owner and date
    fn entry(&self, user_id: &UserId, entry_date: EntryDate)
        -> Result<Option<DiaryEntry>, StoreError>;

    /// Overwrite title/content of an existing entry
    fn update_entry(
        &mut self,
        user_id: &UserId,
        entry_date: EntryDate,
        title: String,
        content: String,
        updated_at: DateTime<Utc>,
    ) -> Result<DiaryEntry, StoreError>;

    /// All entries for a user, optionally filtered to one date,
    /// ordered by entry date
    fn entries(
        &self,
        user_id: &UserId,
        entry_date: Option<EntryDate>,
    ) -> Result<Vec<DiaryEntry>, StoreError>;

    /// The user's streak record, if any
    fn streak(&self, user_id: &UserId) -> Result<Option<StreakRecord>, StoreError>;

    /// Replace the user's streak record
    fn put_streak(&mut self, record: StreakRecord) -> Result<(), StoreError>;
}

/// In-memory store for tests and the service's unit coverage
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<UserId, BTreeMap<EntryDate, DiaryEntry>>,
    streaks: HashMap<UserId, StreakRecord>,
    next_entry_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryStore for MemoryStore {
    fn insert_entry(&mut self, new: NewEntry) -> Result<DiaryEntry, StoreError> {
        let per_user = self.entries.entry(new.user_id.clone()).or_default();
        if per_user.contains_key(&new.entry_date) {
            return Err(StoreError::Duplicate {
                user_id: new.user_id,
                entry_date: new.entry_date,
            });
        }

        self.next_entry_id += 1;
        let entry = DiaryEntry {
            id: EntryId(self.next_entry_id),
            user_id: new.user_id,
            title: new.title,
            content: new.content,
            entry_date: new.entry_date,
            created_at: new.created_at,
            updated_at: new.created_at,
        };
        per_user.insert(new.entry_date, entry.clone());
        Ok(entry)
    }

    fn entry(
        &self,
        user_id: &UserId,
        entry_date: EntryDate,
    ) -> Result<Option<DiaryEntry>, StoreError> {
        Ok(self
            .entries
            .get(user_id)
            .and_then(|per_user| per_user.get(&entry_date))
            .cloned())
    }

    fn update_entry(
        &mut self,
        user_id: &UserId,
        entry_date: EntryDate,
        title: String,
        content: String,
        updated_at: DateTime<Utc>,
    ) -> Result<DiaryEntry, StoreError> {
        let entry = self
            .entries
            .get_mut(user_id)
            .and_then(|per_user| per_user.get_mut(&entry_date))
            .ok_or_else(|| StoreError::NotFound {
                user_id: user_id.clone(),
                entry_date,
            })?;

        entry.title = title;
        entry.content = content;
        entry.updated_at = updated_at;
        Ok(entry.clone())
    }

    fn entries(
        &self,
        user_id: &UserId,
        entry_date: Option<EntryDate>,
    ) -> Result<Vec<DiaryEntry>, StoreError> {
        let Some(per_user) = self.entries.get(user_id) else {
            return Ok(Vec::new());
        };

        Ok(match entry_date {
            Some(date) => per_user.get(&date).cloned().into_iter().collect(),
            None => per_user.values().cloned().collect(),
        })
    }

    fn streak(&self, user_id: &UserId) -> Result<Option<StreakRecord>, StoreError> {
        Ok(self.streaks.get(user_id).cloned())
    }

    fn put_streak(&mut self, record: StreakRecord) -> Result<(), StoreError> {
        self.streaks.insert(record.user_id.clone(), record);
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

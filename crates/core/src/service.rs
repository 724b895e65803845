// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entry service
//!
//! Orchestrates creates, updates, and reads against the store,
//! enforcing one-entry-per-day uniqueness (via the store's atomic
//! insert) and delegating to the editability policy and the streak
//! engine. Per (user, date) an entry moves `absent →
//! present-editable → present-locked`; the last transition happens by
//! the clock alone.

use thiserror::Error;

use crate::clock::Clock;
use crate::date::EntryDate;
use crate::entry::{DiaryEntry, DraftError, EntryDraft, UserId};
use crate::policy::can_edit;
use crate::store::{EntryStore, NewEntry, StoreError};
use crate::streak::StreakRecord;

/// Errors surfaced by entry operations
///
/// Each variant is a distinct, user-interpretable outcome; nothing is
/// swallowed or retried here.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// An entry already exists for this date; do not retry as-is
    #[error("an entry already exists for {0}")]
    Conflict(EntryDate),

    /// Update target does not exist
    #[error("no entry found for {0}")]
    NotFound(EntryDate),

    /// Edit window closed: the entry's day has passed
    #[error("the entry for {0} can no longer be edited")]
    Forbidden(EntryDate),

    /// Draft failed validation
    #[error(transparent)]
    InvalidDraft(#[from] DraftError),

    /// Entries can only be written for today or the past
    #[error("cannot write an entry for the future date {0}")]
    FutureDate(EntryDate),

    /// Storage failure; logged at the boundary, safe to retry later
    #[error("storage error: {0}")]
    Storage(StoreError),
}

/// Orchestrates entry creation, editing, and reads
pub struct EntryService<S: EntryStore, C: Clock> {
    store: S,
    clock: C,
}

impl<S: EntryStore, C: Clock> EntryService<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Create the entry for `entry_date` (default: today)
    ///
    /// On success the streak record has been advanced and persisted.
    /// Fails with [`ServiceError::Conflict`] when an entry already
    /// exists for the date; the streak is untouched in that case.
    pub fn create(
        &mut self,
        user_id: &UserId,
        draft: EntryDraft,
        entry_date: Option<EntryDate>,
    ) -> Result<DiaryEntry, ServiceError> {
        draft.validate()?;

        let today = self.clock.today();
        let entry_date = entry_date.unwrap_or(today);
        if entry_date > today {
            return Err(ServiceError::FutureDate(entry_date));
        }

        let entry = self
            .store
            .insert_entry(NewEntry {
                user_id: user_id.clone(),
                entry_date,
                title: draft.title,
                content: draft.content,
                created_at: self.clock.now(),
            })
            .map_err(|e| match e {
                StoreError::Duplicate { entry_date, .. } => ServiceError::Conflict(entry_date),
                other => ServiceError::Storage(other),
            })?;

        // Streak persistence is best-effort ordered after the insert;
        // a crash in between leaves the streak stale, not the diary.
        let prior = self.store.streak(user_id).map_err(ServiceError::Storage)?;
        let record = StreakRecord::advance(prior.as_ref(), user_id, entry_date);
        self.store.put_streak(record).map_err(ServiceError::Storage)?;

        Ok(entry)
    }

    /// Overwrite the entry for `entry_date`, if it is still editable
    ///
    /// Never touches the streak engine.
    pub fn update(
        &mut self,
        user_id: &UserId,
        entry_date: EntryDate,
        draft: EntryDraft,
    ) -> Result<DiaryEntry, ServiceError> {
        draft.validate()?;

        let existing = self
            .store
            .entry(user_id, entry_date)
            .map_err(ServiceError::Storage)?;
        if existing.is_none() {
            return Err(ServiceError::NotFound(entry_date));
        }

        if !can_edit(user_id, entry_date, &self.clock) {
            return Err(ServiceError::Forbidden(entry_date));
        }

        self.store
            .update_entry(
                user_id,
                entry_date,
                draft.title,
                draft.content,
                self.clock.now(),
            )
            .map_err(|e| match e {
                StoreError::NotFound { entry_date, .. } => ServiceError::NotFound(entry_date),
                other => ServiceError::Storage(other),
            })
    }

    /// All entries for the user, optionally filtered to one date,
    /// ordered by entry date
    pub fn list(
        &self,
        user_id: &UserId,
        entry_date: Option<EntryDate>,
    ) -> Result<Vec<DiaryEntry>, ServiceError> {
        self.store
            .entries(user_id, entry_date)
            .map_err(ServiceError::Storage)
    }

    /// The user's streak record; `None` before the first entry
    pub fn streak(&self, user_id: &UserId) -> Result<Option<StreakRecord>, ServiceError> {
        self.store.streak(user_id).map_err(ServiceError::Storage)
    }

    /// Whether the user's entry for `entry_date` is currently editable
    pub fn editable(&self, user_id: &UserId, entry_date: EntryDate) -> bool {
        can_edit(user_id, entry_date, &self.clock)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;

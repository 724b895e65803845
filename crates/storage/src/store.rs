// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable entry store: WAL plus materialized state
//!
//! Every mutation is validated against the in-memory state, appended
//! to the WAL, and only then applied. The occupancy check and the
//! insert happen inside one `&mut self` call, which the daemon's
//! single-threaded request loop serializes; two racing creates for
//! the same (user, date) cannot both pass the check.

use std::path::Path;

use chrono::{DateTime, Utc};
use jot_core::{
    DiaryEntry, EntryDate, EntryStore, NewEntry, Operation, StoreError, StreakRecord, UserId,
};

use crate::state::DiaryState;
use crate::wal::{Wal, WalError};

/// WAL-backed implementation of [`EntryStore`]
pub struct DiaryStore {
    wal: Wal,
    state: DiaryState,
}

impl DiaryStore {
    /// Open the store, replaying any existing WAL
    pub fn open(wal_path: &Path) -> Result<Self, WalError> {
        let (wal, ops) = Wal::open(wal_path)?;
        let mut state = DiaryState::default();
        for op in &ops {
            state.apply(op);
        }
        Ok(Self { wal, state })
    }

    pub fn state(&self) -> &DiaryState {
        &self.state
    }

    fn log(&mut self, op: Operation) -> Result<(), StoreError> {
        self.wal
            .append(&op)
            .map_err(|e: WalError| StoreError::Backend(e.to_string()))?;
        self.state.apply(&op);
        Ok(())
    }
}

impl EntryStore for DiaryStore {
    fn insert_entry(&mut self, new: NewEntry) -> Result<DiaryEntry, StoreError> {
        if self.state.has_entry(&new.user_id, new.entry_date) {
            return Err(StoreError::Duplicate {
                user_id: new.user_id,
                entry_date: new.entry_date,
            });
        }

        let entry = DiaryEntry {
            id: self.state.next_entry_id(),
            user_id: new.user_id,
            title: new.title,
            content: new.content,
            entry_date: new.entry_date,
            created_at: new.created_at,
            updated_at: new.created_at,
        };
        self.log(Operation::EntryCreate {
            entry: entry.clone(),
        })?;
        Ok(entry)
    }

    fn entry(
        &self,
        user_id: &UserId,
        entry_date: EntryDate,
    ) -> Result<Option<DiaryEntry>, StoreError> {
        Ok(self.state.entry(user_id, entry_date).cloned())
    }

    fn update_entry(
        &mut self,
        user_id: &UserId,
        entry_date: EntryDate,
        title: String,
        content: String,
        updated_at: DateTime<Utc>,
    ) -> Result<DiaryEntry, StoreError> {
        if !self.state.has_entry(user_id, entry_date) {
            return Err(StoreError::NotFound {
                user_id: user_id.clone(),
                entry_date,
            });
        }

        self.log(Operation::EntryUpdate {
            user_id: user_id.clone(),
            entry_date,
            title,
            content,
            updated_at,
        })?;

        self.state
            .entry(user_id, entry_date)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                user_id: user_id.clone(),
                entry_date,
            })
    }

    fn entries(
        &self,
        user_id: &UserId,
        entry_date: Option<EntryDate>,
    ) -> Result<Vec<DiaryEntry>, StoreError> {
        Ok(match entry_date {
            Some(date) => self.state.entry(user_id, date).cloned().into_iter().collect(),
            None => self.state.entries(user_id).cloned().collect(),
        })
    }

    fn streak(&self, user_id: &UserId) -> Result<Option<StreakRecord>, StoreError> {
        Ok(self.state.streak(user_id).cloned())
    }

    fn put_streak(&mut self, record: StreakRecord) -> Result<(), StoreError> {
        self.log(Operation::StreakPut { record })
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

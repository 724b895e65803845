// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diary entry records and drafts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::date::EntryDate;

/// Unique identifier for a user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a diary entry, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One diary record for one user on one calendar date
///
/// At most one entry exists per `(user_id, entry_date)` pair; the
/// store enforces this on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: EntryId,
    pub user_id: UserId,
    pub title: String,
    /// Markdown body
    pub content: String,
    pub entry_date: EntryDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Title and content for a new or edited entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub title: String,
    pub content: String,
}

/// Validation errors for drafts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("content must not be empty")]
    EmptyContent,
}

impl EntryDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Check the non-empty invariants (whitespace-only counts as empty)
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        if self.content.trim().is_empty() {
            return Err(DraftError::EmptyContent);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;

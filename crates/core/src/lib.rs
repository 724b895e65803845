// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! jot-core: Core library for the jot diary daemon
//!
//! This crate provides:
//! - Calendar-date types and an injectable clock
//! - The streak engine and editability policy
//! - The entry service orchestrating creates/updates against a store
//! - Collaborator traits for persistence and authentication
//! - WAL operations persisted by jot-storage

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod auth;
pub mod clock;
pub mod date;
pub mod entry;
pub mod operation;
pub mod policy;
pub mod service;
pub mod store;
pub mod streak;

// Re-exports
pub use auth::{Authenticator, StaticAuthenticator};
pub use clock::{Clock, FakeClock, SystemClock};
pub use date::{DateError, EntryDate};
pub use entry::{DiaryEntry, DraftError, EntryDraft, EntryId, UserId};
pub use operation::Operation;
pub use policy::can_edit;
pub use service::{EntryService, ServiceError};
pub use store::{EntryStore, MemoryStore, NewEntry, StoreError};
pub use streak::StreakRecord;

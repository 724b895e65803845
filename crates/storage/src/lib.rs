// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! jot-storage: durable persistence for the jot daemon
//!
//! Entries and streak records live in a write-ahead log of
//! [`jot_core::Operation`]s. On startup the log is replayed into a
//! [`DiaryState`]; at runtime [`DiaryStore`] appends each operation
//! before applying it, so the state on disk is never behind the state
//! in memory.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

mod state;
mod store;
mod wal;

pub use state::DiaryState;
pub use store::DiaryStore;
pub use wal::{Wal, WalError};

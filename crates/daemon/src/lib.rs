// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! jot-daemon library surface
//!
//! The CLI links against this crate for the wire protocol and the
//! daemon's path conventions; the `jotd` binary lives in `main.rs`.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod lifecycle;
pub mod protocol;
pub mod server;
pub mod tokens;

pub use protocol::{
    EntryDetail, ErrorKind, Query, Request, Response, StreakSummary, DEFAULT_TIMEOUT,
    PROTOCOL_VERSION,
};

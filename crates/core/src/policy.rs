// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Editability policy
//!
//! Entries are editable only on the calendar day they were written.
//! The transition to locked happens purely by the clock rolling past
//! midnight, not by any explicit action.

use crate::clock::Clock;
use crate::date::EntryDate;
use crate::entry::UserId;

/// Whether an entry for `entry_date` may still be modified
///
/// Precondition: the caller has already established that the entry
/// belongs to `user_id`. The entry service resolves entries by
/// `(user, date)`, so an entry it passes in is always the caller's
/// own; the parameter is kept so the policy can start discriminating
/// on ownership without changing its signature.
pub fn can_edit(_user_id: &UserId, entry_date: EntryDate, clock: &impl Clock) -> bool {
    entry_date == clock.today()
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;

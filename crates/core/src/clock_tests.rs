// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn date(s: &str) -> EntryDate {
    s.parse().unwrap()
}

#[test]
fn fake_clock_reports_pinned_date() {
    let clock = FakeClock::at(date("2024-01-10"));
    assert_eq!(clock.today(), date("2024-01-10"));
}

#[test]
fn fake_clock_advances_days() {
    let clock = FakeClock::at(date("2024-01-10"));
    clock.advance_days(1);
    assert_eq!(clock.today(), date("2024-01-11"));

    clock.advance_days(30);
    assert_eq!(clock.today(), date("2024-02-10"));
}

#[test]
fn fake_clock_set_overrides_date() {
    let clock = FakeClock::at(date("2024-01-10"));
    clock.set(date("2030-06-01"));
    assert_eq!(clock.today(), date("2030-06-01"));
}

#[test]
fn fake_clock_clones_share_state() {
    let clock = FakeClock::at(date("2024-01-10"));
    let other = clock.clone();
    clock.advance_days(1);
    assert_eq!(other.today(), date("2024-01-11"));
}

#[test]
fn fake_clock_timestamp_falls_on_fake_date() {
    let clock = FakeClock::at(date("2024-01-10"));
    assert_eq!(clock.now().date_naive(), date("2024-01-10").as_naive());
}

#[test]
fn system_clock_today_matches_now() {
    let clock = SystemClock;
    // today() is derived from the local date; it must be a valid date
    let today = clock.today();
    assert!(today.previous().is_some());
}

//! Entry creation specs
//!
//! One entry per user per calendar day; content comes from a flag or
//! stdin; past dates may be backfilled, future dates never.

use crate::prelude::*;

#[test]
fn write_saves_todays_entry() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "First entry", "-m", "dear diary"])
        .passes()
        .stdout_has("Saved entry for");
}

#[test]
fn write_reports_streak() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "First entry", "-m", "dear diary"])
        .passes()
        .stdout_has("Streak: 1 day");
}

#[test]
fn write_reads_content_from_stdin() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "From stdin"])
        .stdin("today I piped my diary\n")
        .passes()
        .stdout_has("Saved entry for");

    home.jot()
        .args(&["list"])
        .passes()
        .stdout_has("From stdin");
}

#[test]
fn second_write_same_day_conflicts() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "First", "-m", "one"])
        .passes();

    home.jot()
        .args(&["write", "-t", "Second", "-m", "two"])
        .fails()
        .stderr_has("already exists");
}

#[test]
fn conflict_leaves_streak_untouched() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "First", "-m", "one"])
        .passes();
    home.jot()
        .args(&["write", "-t", "Second", "-m", "two"])
        .fails();

    home.jot()
        .args(&["streak"])
        .passes()
        .stdout_has("Current streak: 1 day");
}

#[test]
fn write_backfills_past_date() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "Old news", "-m", "body", "--date", "2020-01-01"])
        .passes()
        .stdout_has("Saved entry for 2020-01-01");
}

#[test]
fn write_rejects_future_date() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "Prophecy", "-m", "body", "--date", "2999-01-01"])
        .fails()
        .stderr_has("future");
}

#[test]
fn users_are_isolated() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "Alice only", "-m", "secret"])
        .passes();

    home.jot()
        .args(&["list"])
        .env("JOT_TOKEN", BOB_TOKEN)
        .passes()
        .stdout_has("No entries")
        .stdout_lacks("Alice only");
}

//! Writing streak specs
//!
//! The streak counts consecutive calendar days with an entry; the
//! longest streak never decreases.

use crate::prelude::*;

#[test]
fn streak_is_zero_before_first_entry() {
    let home = Home::new();

    home.jot()
        .args(&["streak"])
        .passes()
        .stdout_has("Current streak: 0 days")
        .stdout_has("Last entry: -");
}

#[test]
fn first_entry_starts_streak_of_one() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "Day one", "-m", "body"])
        .passes();

    home.jot()
        .args(&["streak"])
        .passes()
        .stdout_has("Current streak: 1 day")
        .stdout_has("Longest streak: 1 day");
}

#[test]
fn consecutive_days_increment_streak() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "Yesterday", "-m", "body", "--date", &days_ago(1)])
        .passes();
    home.jot()
        .args(&["write", "-t", "Today", "-m", "body"])
        .passes();

    home.jot()
        .args(&["streak"])
        .passes()
        .stdout_has("Current streak: 2 days")
        .stdout_has("Longest streak: 2 days");
}

#[test]
fn gap_resets_current_but_keeps_longest() {
    let home = Home::new();

    // Two consecutive days, then a gap before today
    home.jot()
        .args(&["write", "-t", "a", "-m", "body", "--date", &days_ago(5)])
        .passes();
    home.jot()
        .args(&["write", "-t", "b", "-m", "body", "--date", &days_ago(4)])
        .passes();
    home.jot()
        .args(&["write", "-t", "c", "-m", "body"])
        .passes();

    home.jot()
        .args(&["streak"])
        .passes()
        .stdout_has("Current streak: 1 day")
        .stdout_has("Longest streak: 2 days");
}

#[test]
fn streak_json_includes_counters() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "Day one", "-m", "body"])
        .passes();

    let spec = home.jot().args(&["streak", "--format", "json"]).passes();
    let streak: serde_json::Value = serde_json::from_str(spec.stdout()).unwrap();

    assert_eq!(streak["current_streak"], 1);
    assert_eq!(streak["longest_streak"], 1);
    assert!(streak["last_entry_date"].is_string());
}

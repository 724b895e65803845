//! Entry listing specs

use crate::prelude::*;

#[test]
fn list_empty_diary() {
    let home = Home::new();

    home.jot().args(&["list"]).passes().stdout_has("No entries");
}

#[test]
fn list_orders_entries_by_date() {
    let home = Home::new();

    // Backfilled out of order; listing is date-ascending
    home.jot()
        .args(&["write", "-t", "newer", "-m", "b", "--date", "2020-01-02"])
        .passes();
    home.jot()
        .args(&["write", "-t", "older", "-m", "a", "--date", "2020-01-01"])
        .passes();

    let spec = home.jot().args(&["list"]).passes();
    similar_asserts::assert_eq!(
        spec.stdout(),
        "DATE         TITLE\n2020-01-01   older\n2020-01-02   newer\n"
    );
}

#[test]
fn list_filters_by_date() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "older", "-m", "a", "--date", "2020-01-01"])
        .passes();
    home.jot()
        .args(&["write", "-t", "newer", "-m", "b", "--date", "2020-01-02"])
        .passes();

    home.jot()
        .args(&["list", "--date", "2020-01-01"])
        .passes()
        .stdout_has("older")
        .stdout_lacks("newer");
}

#[test]
fn list_json_includes_entry_fields() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "Json me", "-m", "body", "--date", "2020-01-01"])
        .passes();

    let spec = home.jot().args(&["list", "--format", "json"]).passes();
    let entries: serde_json::Value = serde_json::from_str(spec.stdout()).unwrap();

    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["date"], "2020-01-01");
    assert_eq!(entries[0]["title"], "Json me");
    assert_eq!(entries[0]["content"], "body");
    assert!(entries[0]["created_at"].is_string());
}

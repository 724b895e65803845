//! CLI error surface specs
//!
//! Every failure is a distinct, user-interpretable outcome with a
//! non-zero exit code.

use crate::prelude::*;

#[test]
fn unknown_subcommand_fails() {
    let home = Home::new();

    home.jot().args(&["frobnicate"]).fails();
}

#[test]
fn missing_token_is_reported() {
    let home = Home::new();

    // Empty env token and no token file in config
    home.jot()
        .args(&["list"])
        .env("JOT_TOKEN", "")
        .fails()
        .stderr_has("No token found");
}

#[test]
fn unknown_token_is_rejected() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "Hi", "-m", "body"])
        .env("JOT_TOKEN", "not-a-real-token")
        .fails()
        .stderr_has("unauthenticated");
}

#[test]
fn malformed_date_is_rejected() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "Hi", "-m", "body", "--date", "tomorrow-ish"])
        .fails()
        .stderr_has("invalid date");
}

#[test]
fn empty_title_is_rejected() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "   ", "-m", "body"])
        .fails()
        .stderr_has("title must not be empty");
}

#[test]
fn empty_content_is_rejected() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "Hi", "-m", ""])
        .fails()
        .stderr_has("content must not be empty");
}

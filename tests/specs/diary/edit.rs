//! Entry editing specs
//!
//! An entry is editable on its own calendar day only.

use crate::prelude::*;

#[test]
fn edit_overwrites_todays_entry() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "Draft", "-m", "first pass"])
        .passes();

    home.jot()
        .args(&["edit", "-t", "Final", "-m", "second pass"])
        .passes()
        .stdout_has("Updated entry for");

    home.jot()
        .args(&["list"])
        .passes()
        .stdout_has("Final")
        .stdout_lacks("Draft");
}

#[test]
fn edit_without_entry_is_not_found() {
    let home = Home::new();

    home.jot()
        .args(&["edit", "-t", "Ghost", "-m", "body"])
        .fails()
        .stderr_has("no entry found");
}

#[test]
fn edit_past_entry_is_forbidden() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "Old", "-m", "body", "--date", "2020-01-01"])
        .passes();

    home.jot()
        .args(&["edit", "2020-01-01", "-t", "Rewrite", "-m", "history"])
        .fails()
        .stderr_has("no longer be edited");
}

#[test]
fn edit_reads_content_from_stdin() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "Draft", "-m", "first pass"])
        .passes();

    home.jot()
        .args(&["edit", "-t", "Final"])
        .stdin("revised body\n")
        .passes()
        .stdout_has("Updated entry for");
}

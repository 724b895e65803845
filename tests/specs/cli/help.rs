//! CLI help and version specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    let home = Home::new();

    home.jot()
        .args(&["--help"])
        .passes()
        .stdout_has("write")
        .stdout_has("edit")
        .stdout_has("list")
        .stdout_has("streak")
        .stdout_has("daemon");
}

#[test]
fn version_prints_crate_version() {
    let home = Home::new();

    home.jot()
        .args(&["--version"])
        .passes()
        .stdout_has("jot");
}

#[test]
fn write_help_shows_date_flag() {
    let home = Home::new();

    home.jot()
        .args(&["write", "--help"])
        .passes()
        .stdout_has("--date")
        .stdout_has("--title");
}

#[test]
fn completions_generate_for_bash() {
    let home = Home::new();

    home.jot()
        .args(&["completions", "bash"])
        .passes()
        .stdout_has("jot");
}

//! Daemon lifecycle specs
//!
//! Verify daemon start/stop/status lifecycle and persistence across
//! restarts.

use crate::prelude::*;

#[test]
fn daemon_status_reports_not_running() {
    let home = Home::new();

    home.jot()
        .args(&["daemon", "status"])
        .passes()
        .stdout_has("Daemon not running");
}

#[test]
fn daemon_start_reports_success() {
    let home = Home::new();

    home.jot()
        .args(&["daemon", "start"])
        .passes()
        .stdout_has("Daemon running");
}

#[test]
fn daemon_status_shows_uptime_after_start() {
    let home = Home::new();
    home.jot().args(&["daemon", "start"]).passes();

    home.jot()
        .args(&["daemon", "status"])
        .passes()
        .stdout_has("Uptime:")
        .stdout_has("Entries:");
}

#[test]
fn daemon_stop_reports_success() {
    let home = Home::new();
    home.jot().args(&["daemon", "start"]).passes();

    home.jot()
        .args(&["daemon", "stop"])
        .passes()
        .stdout_has("Daemon stopped");
}

#[test]
fn daemon_status_reports_not_running_after_stop() {
    let home = Home::new();
    home.jot().args(&["daemon", "start"]).passes();
    home.jot().args(&["daemon", "stop"]).passes();

    home.jot()
        .args(&["daemon", "status"])
        .passes()
        .stdout_has("Daemon not running");
}

#[test]
fn daemon_stop_when_not_running_is_harmless() {
    let home = Home::new();

    home.jot()
        .args(&["daemon", "stop"])
        .passes()
        .stdout_has("Daemon not running");
}

#[test]
fn daemon_creates_pid_and_version_files() {
    let home = Home::new();
    home.jot().args(&["daemon", "start"]).passes();

    let state_dir = home.state_path().join("jot");

    let has_files = wait_for(SPEC_WAIT_MAX_MS, || {
        state_dir.join("daemon.pid").exists() && state_dir.join("daemon.version").exists()
    });
    assert!(has_files, "daemon.pid and daemon.version should exist");
}

#[test]
fn daemon_creates_socket_file() {
    let home = Home::new();
    home.jot().args(&["daemon", "start"]).passes();

    let socket = home.socket_path().join("jot.sock");
    let has_socket = wait_for(SPEC_WAIT_MAX_MS, || socket.exists());
    assert!(has_socket, "daemon socket file should exist");
}

#[test]
fn entries_survive_daemon_restart() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "Persistent", "-m", "still here"])
        .passes();

    home.jot().args(&["daemon", "stop"]).passes();

    // The next command auto-starts a fresh daemon, which must replay
    // the log back into the same state.
    home.jot()
        .args(&["list"])
        .passes()
        .stdout_has("Persistent");
}

#[test]
fn streak_survives_daemon_restart() {
    let home = Home::new();

    home.jot()
        .args(&["write", "-t", "Day one", "-m", "body"])
        .passes();
    home.jot().args(&["daemon", "stop"]).passes();

    home.jot()
        .args(&["streak"])
        .passes()
        .stdout_has("Current streak: 1 day");
}

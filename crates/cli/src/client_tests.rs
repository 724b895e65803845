// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for daemon client behavior.

use super::{ClientError, DaemonClient};
use std::fs;
use tempfile::tempdir;

/// Verify that connect() does not delete state files when daemon is not running.
///
/// This is a regression test for a race condition where connect() would call
/// cleanup_stale_pid() during startup polling, deleting the pid file before
/// the daemon finished initializing.
#[test]
fn connect_does_not_delete_pid_file() {
    // Set up isolated state and socket directories
    let state_home = tempdir().unwrap();
    let socket_dir = tempdir().unwrap();
    std::env::set_var("XDG_STATE_HOME", state_home.path());
    std::env::set_var("JOT_SOCKET_DIR", socket_dir.path());

    // Create a pid file (simulating daemon mid-startup)
    let state_dir = super::state_dir().unwrap();
    fs::create_dir_all(&state_dir).unwrap();
    let pid_path = state_dir.join("daemon.pid");
    fs::write(&pid_path, "12345\n").unwrap();

    // connect() should fail (no socket) but NOT delete the pid file
    let result = DaemonClient::connect();
    assert!(matches!(result, Err(ClientError::DaemonNotRunning)));

    // Pid file should still exist
    assert!(pid_path.exists(), "connect() must not delete pid file");
}

#[test]
fn token_resolution_prefers_env_var() {
    std::env::set_var("JOT_TOKEN", "tok-from-env");
    let token = super::resolve_token().unwrap();
    assert_eq!(token, "tok-from-env");
    std::env::remove_var("JOT_TOKEN");
}

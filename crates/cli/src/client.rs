// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon client for CLI commands

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

use jot_daemon::protocol::{self, ProtocolError};
use jot_daemon::{EntryDetail, ErrorKind, Query, Request, Response, StreakSummary};
use thiserror::Error;
use tokio::net::UnixStream;

// Timeout configuration (env vars in milliseconds)
fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Timeout for IPC requests (hello, status, entry operations, shutdown)
pub fn timeout_ipc() -> Duration {
    parse_duration_ms("JOT_TIMEOUT_IPC_MS").unwrap_or(Duration::from_secs(5))
}

/// Timeout for waiting for daemon to start
pub fn timeout_connect() -> Duration {
    parse_duration_ms("JOT_TIMEOUT_CONNECT_MS").unwrap_or(Duration::from_secs(5))
}

/// Timeout for waiting for process to exit
pub fn timeout_exit() -> Duration {
    parse_duration_ms("JOT_TIMEOUT_EXIT_MS").unwrap_or(Duration::from_secs(2))
}

/// Polling interval for retries
pub fn poll_interval() -> Duration {
    parse_duration_ms("JOT_POLL_INTERVAL_MS").unwrap_or(Duration::from_millis(50))
}

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Daemon not running")]
    DaemonNotRunning,

    #[error("Failed to start daemon: {0}")]
    DaemonStartFailed(String),

    #[error("Connection timeout waiting for daemon to start")]
    DaemonStartTimeout,

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("{kind}: {message}")]
    Rejected { kind: ErrorKind, message: String },

    #[error("Unexpected response from daemon")]
    UnexpectedResponse,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("No token found; set JOT_TOKEN or write one to {0}")]
    NoToken(PathBuf),
}

/// Daemon client
pub struct DaemonClient {
    socket_path: PathBuf,
}

impl DaemonClient {
    /// Connect to daemon, auto-starting if not running
    pub async fn connect_or_start() -> Result<Self, ClientError> {
        // Check version file before connecting - restart daemon if version mismatch
        if let Ok(state) = state_dir() {
            let version_path = state.join("daemon.version");
            if let Ok(daemon_version) = std::fs::read_to_string(&version_path) {
                let cli_version = env!("CARGO_PKG_VERSION");
                if daemon_version.trim() != cli_version {
                    // Version mismatch - stop old daemon first
                    let _ = daemon_stop().await;
                }
            }
        }

        match Self::connect() {
            Ok(client) => Ok(client),
            Err(ClientError::DaemonNotRunning) => {
                // Start daemon in background
                let child = start_daemon_background()?;
                // Wait for socket with retry, watching for early exit
                Self::connect_with_retry(timeout_connect(), child).await
            }
            Err(e) => Err(wrap_with_startup_error(e)),
        }
    }

    /// Connect to existing daemon (no auto-start)
    pub fn connect() -> Result<Self, ClientError> {
        let socket_path = socket_path();

        if !socket_path.exists() {
            return Err(ClientError::DaemonNotRunning);
        }

        Ok(Self { socket_path })
    }

    async fn connect_with_retry(
        timeout: Duration,
        mut child: std::process::Child,
    ) -> Result<Self, ClientError> {
        let start = Instant::now();
        while start.elapsed() < timeout {
            // Check if daemon process exited early (startup failure)
            match child.try_wait() {
                Ok(Some(status)) => {
                    // Process exited - startup failed
                    // Poll for startup error in log (filesystem may need to sync)
                    let poll_start = Instant::now();
                    while poll_start.elapsed() < timeout_exit() {
                        if let Some(err) = read_startup_error() {
                            return Err(ClientError::DaemonStartFailed(err));
                        }
                        tokio::time::sleep(poll_interval()).await;
                    }
                    // No error found in log, return generic failure
                    return Err(ClientError::DaemonStartFailed(format!(
                        "exited with {}",
                        status
                    )));
                }
                Ok(None) => {
                    // Still running, try to connect
                }
                Err(_) => {
                    // Error checking status, assume still running
                }
            }

            match Self::connect() {
                Ok(client) => return Ok(client),
                Err(ClientError::DaemonNotRunning) => {
                    tokio::time::sleep(poll_interval()).await;
                }
                Err(e) => return Err(wrap_with_startup_error(e)),
            }
        }

        // Timeout - check log for startup errors
        Err(wrap_with_startup_error(ClientError::DaemonStartTimeout))
    }

    /// Send a request and receive a response with specific timeouts
    async fn send_with_timeout(
        &self,
        request: Request,
        read_timeout: Duration,
        write_timeout: Duration,
    ) -> Result<Response, ClientError> {
        let stream = UnixStream::connect(&self.socket_path).await?;
        let (mut reader, mut writer) = stream.into_split();

        // Encode and send request with write timeout
        let data = protocol::encode(&request)?;
        tokio::time::timeout(write_timeout, protocol::write_message(&mut writer, &data))
            .await
            .map_err(|_| ProtocolError::Timeout)??;

        // Read response with read timeout
        let response_bytes =
            tokio::time::timeout(read_timeout, protocol::read_message(&mut reader))
                .await
                .map_err(|_| ProtocolError::Timeout)??;

        let response: Response = protocol::decode(&response_bytes)?;
        Ok(response)
    }

    /// Send a request and receive a response
    pub async fn send(&self, request: Request) -> Result<Response, ClientError> {
        self.send_with_timeout(request, timeout_ipc(), timeout_ipc())
            .await
    }

    /// Create the entry for a date (default: today)
    pub async fn create_entry(
        &self,
        token: &str,
        title: &str,
        content: &str,
        date: Option<String>,
    ) -> Result<EntryDetail, ClientError> {
        match self
            .send(Request::CreateEntry {
                token: token.to_string(),
                title: title.to_string(),
                content: content.to_string(),
                date,
            })
            .await?
        {
            Response::Entry { entry } => Ok(entry),
            Response::Error { kind, message } => Err(ClientError::Rejected { kind, message }),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Overwrite the entry for a date, if it is still editable
    pub async fn update_entry(
        &self,
        token: &str,
        date: &str,
        title: &str,
        content: &str,
    ) -> Result<EntryDetail, ClientError> {
        match self
            .send(Request::UpdateEntry {
                token: token.to_string(),
                date: date.to_string(),
                title: title.to_string(),
                content: content.to_string(),
            })
            .await?
        {
            Response::Entry { entry } => Ok(entry),
            Response::Error { kind, message } => Err(ClientError::Rejected { kind, message }),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Query for entries, optionally filtered to one date
    pub async fn list_entries(
        &self,
        token: &str,
        date: Option<String>,
    ) -> Result<Vec<EntryDetail>, ClientError> {
        match self
            .send(Request::Query {
                token: token.to_string(),
                query: Query::ListEntries { date },
            })
            .await?
        {
            Response::Entries { entries } => Ok(entries),
            Response::Error { kind, message } => Err(ClientError::Rejected { kind, message }),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Query for the authenticated user's streak
    pub async fn streak(&self, token: &str) -> Result<StreakSummary, ClientError> {
        match self
            .send(Request::Query {
                token: token.to_string(),
                query: Query::GetStreak,
            })
            .await?
        {
            Response::Streak { streak } => Ok(streak),
            Response::Error { kind, message } => Err(ClientError::Rejected { kind, message }),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Get daemon status
    pub async fn status(&self) -> Result<(u64, usize, usize), ClientError> {
        match self.send(Request::Status).await? {
            Response::Status {
                uptime_secs,
                users,
                entries,
            } => Ok((uptime_secs, users, entries)),
            Response::Error { kind, message } => Err(ClientError::Rejected { kind, message }),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Request daemon shutdown
    pub async fn shutdown(&self) -> Result<(), ClientError> {
        match self.send(Request::Shutdown).await? {
            Response::Ok | Response::ShuttingDown => Ok(()),
            Response::Error { kind, message } => Err(ClientError::Rejected { kind, message }),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Get daemon version via Hello handshake
    pub async fn hello(&self) -> Result<String, ClientError> {
        match self
            .send(Request::Hello {
                version: env!("CARGO_PKG_VERSION").to_string(),
            })
            .await?
        {
            Response::Hello { version } => Ok(version),
            Response::Error { kind, message } => Err(ClientError::Rejected { kind, message }),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }
}

/// Resolve the caller's token: `JOT_TOKEN`, else the token file
pub fn resolve_token() -> Result<String, ClientError> {
    if let Ok(token) = std::env::var("JOT_TOKEN") {
        let token = token.trim().to_string();
        if !token.is_empty() {
            return Ok(token);
        }
    }

    let token_path = config_dir()?.join("token");
    match std::fs::read_to_string(&token_path) {
        Ok(content) => {
            let token = content.trim().to_string();
            if token.is_empty() {
                Err(ClientError::NoToken(token_path))
            } else {
                Ok(token)
            }
        }
        Err(_) => Err(ClientError::NoToken(token_path)),
    }
}

/// Start the daemon in the background, returning the child process handle
fn start_daemon_background() -> Result<std::process::Child, ClientError> {
    // Find the jotd binary - look in cargo target dir or PATH
    let jotd_path = find_jotd_binary();

    Command::new(&jotd_path)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map_err(|e| ClientError::DaemonStartFailed(e.to_string()))
}

/// Stop the daemon (graceful first, then forceful)
/// Returns true if daemon was stopped, false if it wasn't running
pub async fn daemon_stop() -> Result<bool, ClientError> {
    let client = match DaemonClient::connect() {
        Ok(c) => c,
        Err(ClientError::DaemonNotRunning) => {
            // Clean up any stale files
            if let Ok(state) = state_dir() {
                cleanup_stale_pid(&state);
            }
            return Ok(false);
        }
        Err(e) => return Err(e),
    };

    // Try graceful shutdown (timeout handled by send())
    let shutdown_result = client.shutdown().await;

    if let Some(pid) = read_daemon_pid()? {
        if shutdown_result.is_ok() {
            // Graceful shutdown succeeded, wait for process to exit
            wait_for_exit(pid, timeout_exit()).await;
        }

        // Force kill if still running
        if process_exists(pid) {
            force_kill_daemon(pid);
            wait_for_exit(pid, timeout_exit()).await;
        }
    }

    // Clean up stale files
    let state = state_dir()?;
    cleanup_stale_pid(&state);

    Ok(true)
}

/// Wait for a process to exit
async fn wait_for_exit(pid: u32, timeout: Duration) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if !process_exists(pid) {
            return true;
        }
        tokio::time::sleep(poll_interval()).await;
    }
    false
}

/// Find the jotd binary
fn find_jotd_binary() -> PathBuf {
    // Explicit override (used by tests to ensure correct binary)
    if let Ok(path) = std::env::var("JOT_DAEMON_BINARY") {
        return PathBuf::from(path);
    }

    // First check if we're running from cargo (development)
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let dev_path = PathBuf::from(manifest_dir)
            .parent()
            .and_then(|p| p.parent())
            .map(|p| p.join("target/debug/jotd"));
        if let Some(path) = dev_path {
            if path.exists() {
                return path;
            }
        }
    }

    // Check current executable's directory
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let sibling = dir.join("jotd");
            if sibling.exists() {
                return sibling;
            }
        }
    }

    // Fall back to PATH lookup
    PathBuf::from("jotd")
}

/// The daemon socket path
///
/// Uses a short path under /tmp to avoid SUN_LEN limit (104 bytes on
/// macOS). The socket is separate from state_dir which can be longer.
fn socket_path() -> PathBuf {
    socket_dir().join("jot.sock")
}

/// Get the socket directory for jot
///
/// Uses /tmp/jot by default to keep paths short (macOS SUN_LEN = 104).
/// Can be overridden with JOT_SOCKET_DIR for testing.
fn socket_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("JOT_SOCKET_DIR") {
        return PathBuf::from(dir);
    }
    PathBuf::from("/tmp/jot")
}

/// Get the state directory for jot (where logs, pid, version files live)
pub fn state_dir() -> Result<PathBuf, ClientError> {
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("jot"));
    }

    let home = std::env::var("HOME").map_err(|_| ClientError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/jot"))
}

/// Get the config directory for jot (token file)
fn config_dir() -> Result<PathBuf, ClientError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("jot"));
    }

    let home = std::env::var("HOME").map_err(|_| ClientError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".config/jot"))
}

/// Clean up orphaned PID file during shutdown.
///
/// Called by daemon_stop when the daemon is not running or after stopping it.
fn cleanup_stale_pid(state_dir: &Path) {
    let pid_path = state_dir.join("daemon.pid");
    if pid_path.exists() {
        let _ = std::fs::remove_file(&pid_path);
    }
}

/// Get the PID from the daemon PID file, if it exists
pub fn read_daemon_pid() -> Result<Option<u32>, ClientError> {
    let pid_path = state_dir()?.join("daemon.pid");

    if !pid_path.exists() {
        return Ok(None);
    }

    match std::fs::read_to_string(&pid_path) {
        Ok(content) => {
            let pid = content.trim().parse::<u32>().ok();
            Ok(pid)
        }
        Err(_) => Ok(None),
    }
}

/// Check if a process with the given PID exists
pub fn process_exists(pid: u32) -> bool {
    // Use kill -0 to check if process exists without sending a signal
    Command::new("kill")
        .args(["-0", &pid.to_string()])
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Force kill a daemon process
pub fn force_kill_daemon(pid: u32) -> bool {
    Command::new("kill")
        .args(["-9", &pid.to_string()])
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Startup marker prefix that daemon writes to log before anything else.
/// Full format: "--- jotd: starting (pid: 12345) ---"
const STARTUP_MARKER_PREFIX: &str = "--- jotd: starting (pid: ";

/// Read daemon log from startup marker, looking for errors.
/// Returns the error message if found, None otherwise.
pub fn read_startup_error() -> Option<String> {
    let log_path = state_dir().ok()?.join("daemon.log");

    let content = std::fs::read_to_string(&log_path).ok()?;

    // Find the last startup marker
    let start_pos = content.rfind(STARTUP_MARKER_PREFIX)?;
    let startup_log = &content[start_pos..];

    // Look for ERROR lines
    let errors: Vec<&str> = startup_log
        .lines()
        .filter(|line| line.contains(" ERROR ") || line.contains("Failed to start"))
        .collect();

    if errors.is_empty() {
        return None;
    }

    // Extract just the error messages (strip timestamp/level prefix)
    let error_messages: Vec<String> = errors
        .iter()
        .filter_map(|line| {
            // Format: "timestamp LEVEL target: message"
            // Find the message part after the last colon-space
            line.split_once(": ").map(|(_, msg)| msg.to_string())
        })
        .collect();

    if error_messages.is_empty() {
        Some(errors.join("\n"))
    } else {
        Some(error_messages.join("\n"))
    }
}

/// Wrap an error with startup log info if available.
/// If the daemon log contains errors, return DaemonStartFailed with that info.
/// Otherwise, return the original error.
fn wrap_with_startup_error(err: ClientError) -> ClientError {
    // Don't double-wrap
    if matches!(err, ClientError::DaemonStartFailed(_)) {
        return err;
    }

    if let Some(startup_error) = read_startup_error() {
        ClientError::DaemonStartFailed(startup_error)
    } else {
        err
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

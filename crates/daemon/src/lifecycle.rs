// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, shutdown, recovery.

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use fs2::FileExt;
use jot_core::{EntryService, StaticAuthenticator, SystemClock};
use jot_storage::DiaryStore;
use thiserror::Error;
use tokio::net::UnixListener;
use tracing::info;

use crate::tokens;

/// Entry service with the daemon's concrete store and clock
pub type DaemonService = EntryService<DiaryStore, SystemClock>;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to Unix socket
    pub socket_path: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to version file
    pub version_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
    /// Path to the WAL
    pub wal_path: PathBuf,
    /// Path to the token file
    pub tokens_path: PathBuf,
}

impl Config {
    /// Resolve paths from the environment
    pub fn load() -> Result<Self, LifecycleError> {
        let state = state_dir()?;
        let config = config_dir()?;
        let socket = socket_dir();

        Ok(Self {
            socket_path: socket.join("jot.sock"),
            lock_path: state.join("daemon.pid"),
            version_path: state.join("daemon.version"),
            log_path: state.join("daemon.log"),
            wal_path: state.join("wal").join("diary.wal"),
            tokens_path: config.join("tokens.toml"),
        })
    }
}

/// Daemon state during operation
pub struct DaemonState {
    /// Configuration
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    /// Unix socket listener
    pub listener: UnixListener,
    /// Entry service over the WAL-backed store
    pub service: DaemonService,
    /// Token table loaded at startup
    pub auth: StaticAuthenticator,
    /// When daemon started
    pub start_time: Instant,
    /// Shutdown requested flag
    pub shutdown_requested: bool,
}

impl DaemonState {
    /// Shutdown the daemon gracefully
    pub fn shutdown(&mut self) -> Result<(), LifecycleError> {
        info!("Shutting down daemon...");

        for path in [
            &self.config.socket_path,
            &self.config.lock_path,
            &self.config.version_path,
        ] {
            if path.exists() {
                if let Err(e) = std::fs::remove_file(path) {
                    tracing::warn!("Failed to remove {}: {}", path.display(), e);
                }
            }
        }

        // Lock released when self.lock_file is dropped

        info!("Daemon shutdown complete");
        Ok(())
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Failed to bind socket at {0}: {1}")]
    BindFailed(PathBuf, std::io::Error),

    #[error("WAL error: {0}")]
    Wal(#[from] jot_storage::WalError),

    #[error("Token file error: {0}")]
    Tokens(#[from] tokens::TokenError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the daemon
pub fn startup(config: &Config) -> Result<DaemonState, LifecycleError> {
    match startup_inner(config) {
        Ok(state) => Ok(state),
        Err(e) => {
            // Clean up any resources created before failure
            cleanup_on_failure(config);
            Err(e)
        }
    }
}

/// Inner startup logic - cleanup_on_failure called if this fails
fn startup_inner(config: &Config) -> Result<DaemonState, LifecycleError> {
    // 1. Create directories for lock, socket, and WAL
    for path in [&config.lock_path, &config.socket_path, &config.wal_path] {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // 2. Acquire lock file FIRST - prevents races
    let lock_file = File::create(&config.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;

    // Write PID to lock file
    use std::io::Write;
    let mut lock_file = lock_file;
    writeln!(lock_file, "{}", std::process::id())?;
    let lock_file = lock_file; // Reborrow as immutable

    // 3. Write version file
    std::fs::write(&config.version_path, env!("CARGO_PKG_VERSION"))?;

    // 4. Load tokens BEFORE binding socket (fail fast on a bad file)
    let auth = tokens::load(&config.tokens_path)?;
    if auth.is_empty() {
        tracing::warn!(
            "No tokens loaded from {}; all requests will be rejected",
            config.tokens_path.display()
        );
    }

    // 5. Replay the WAL into the store
    let store = DiaryStore::open(&config.wal_path)?;
    info!(
        "Loaded state: {} entries across {} users",
        store.state().entry_count(),
        store.state().user_count()
    );

    let service = EntryService::new(store, SystemClock);

    // 6. Remove stale socket and bind (LAST - only after all validation passes)
    if config.socket_path.exists() {
        std::fs::remove_file(&config.socket_path)?;
    }
    let listener = UnixListener::bind(&config.socket_path)
        .map_err(|e| LifecycleError::BindFailed(config.socket_path.clone(), e))?;

    info!("Daemon started, tokens loaded: {}", auth.len());

    Ok(DaemonState {
        config: config.clone(),
        lock_file,
        listener,
        service,
        auth,
        start_time: Instant::now(),
        shutdown_requested: false,
    })
}

/// Clean up resources on startup failure
fn cleanup_on_failure(config: &Config) {
    for path in [
        &config.socket_path,
        &config.version_path,
        &config.lock_path,
    ] {
        if path.exists() {
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Get the state directory for jot
pub fn state_dir() -> Result<PathBuf, LifecycleError> {
    // Use XDG_STATE_HOME or default to ~/.local/state
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("jot"));
    }

    let home = std::env::var("HOME").map_err(|_| LifecycleError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/jot"))
}

/// Get the config directory for jot
pub fn config_dir() -> Result<PathBuf, LifecycleError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("jot"));
    }

    let home = std::env::var("HOME").map_err(|_| LifecycleError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".config/jot"))
}

/// Get the socket directory for jot
///
/// Uses /tmp/jot by default to keep paths short (macOS SUN_LEN = 104).
/// Can be overridden with JOT_SOCKET_DIR for testing.
pub fn socket_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("JOT_SOCKET_DIR") {
        return PathBuf::from(dir);
    }
    PathBuf::from("/tmp/jot")
}

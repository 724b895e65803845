//! Shared helpers for behavioral specs.
//!
//! Every spec gets an isolated [`Home`]: state, config, and socket
//! directories under one tempdir, a provisioned token file, and a
//! daemon binary override so the CLI always spawns the jotd built by
//! this workspace. Dropping the home stops any daemon it started.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use predicates::prelude::*;

/// Upper bound for polling loops in specs
pub const SPEC_WAIT_MAX_MS: u64 = 5000;

/// Token provisioned for the default spec user
pub const ALICE_TOKEN: &str = "alice-token";
/// Token provisioned for the second spec user
pub const BOB_TOKEN: &str = "bob-token";

/// An isolated per-spec home directory
pub struct Home {
    root: tempfile::TempDir,
}

impl Home {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let home = Self { root };

        let config = home.config_path().join("jot");
        std::fs::create_dir_all(&config).unwrap();
        std::fs::write(
            config.join("tokens.toml"),
            format!(
                "[tokens]\n\"{}\" = \"alice\"\n\"{}\" = \"bob\"\n",
                ALICE_TOKEN, BOB_TOKEN
            ),
        )
        .unwrap();

        home
    }

    pub fn state_path(&self) -> PathBuf {
        self.root.path().join("state")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("config")
    }

    pub fn socket_path(&self) -> PathBuf {
        self.root.path().join("socket")
    }

    /// Command builder for the jot binary, isolated to this home
    ///
    /// The binaries are resolved from the target directory by path;
    /// `CARGO_BIN_EXE_*` is only set for the package that owns a
    /// binary, and neither jot nor jotd belongs to this one.
    pub fn jot(&self) -> Jot {
        let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin("jot"));
        cmd.env("HOME", self.root.path());
        cmd.env("XDG_STATE_HOME", self.state_path());
        cmd.env("XDG_CONFIG_HOME", self.config_path());
        cmd.env("JOT_SOCKET_DIR", self.socket_path());
        cmd.env("JOT_DAEMON_BINARY", daemon_binary());
        cmd.env("JOT_TOKEN", ALICE_TOKEN);
        // The daemon binary override must win over dev-path discovery
        cmd.env_remove("CARGO_MANIFEST_DIR");
        Jot { cmd }
    }
}

impl Drop for Home {
    fn drop(&mut self) {
        // Stop any daemon this home started; ignore failures
        let mut jot = self.jot();
        let _ = jot.cmd.args(["daemon", "stop"]).output();
    }
}

fn daemon_binary() -> PathBuf {
    assert_cmd::cargo::cargo_bin("jotd")
}

/// A jot invocation under construction
pub struct Jot {
    cmd: assert_cmd::Command,
}

impl Jot {
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.cmd.args(args);
        self
    }

    pub fn env(&mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> &mut Self {
        self.cmd.env(key, value);
        self
    }

    pub fn stdin(&mut self, input: &str) -> &mut Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    /// Run and assert a zero exit code
    pub fn passes(&mut self) -> Spec {
        let spec = self.run();
        assert!(
            spec.success,
            "expected success\nstdout:\n{}\nstderr:\n{}",
            spec.stdout, spec.stderr
        );
        spec
    }

    /// Run and assert a non-zero exit code
    pub fn fails(&mut self) -> Spec {
        let spec = self.run();
        assert!(
            !spec.success,
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            spec.stdout, spec.stderr
        );
        spec
    }

    fn run(&mut self) -> Spec {
        let output = self.cmd.output().unwrap();
        Spec {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Captured output of one jot invocation
pub struct Spec {
    success: bool,
    stdout: String,
    stderr: String,
}

impl Spec {
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stdout_has(&self, needle: &str) -> &Self {
        assert!(
            predicate::str::contains(needle).eval(&self.stdout),
            "stdout missing {:?}\nstdout:\n{}\nstderr:\n{}",
            needle,
            self.stdout,
            self.stderr
        );
        self
    }

    pub fn stdout_lacks(&self, needle: &str) -> &Self {
        assert!(
            !predicate::str::contains(needle).eval(&self.stdout),
            "stdout unexpectedly contains {:?}\nstdout:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stderr_has(&self, needle: &str) -> &Self {
        assert!(
            predicate::str::contains(needle).eval(&self.stderr),
            "stderr missing {:?}\nstdout:\n{}\nstderr:\n{}",
            needle,
            self.stdout,
            self.stderr
        );
        self
    }

    pub fn stderr_lacks(&self, needle: &str) -> &Self {
        assert!(
            !predicate::str::contains(needle).eval(&self.stderr),
            "stderr unexpectedly contains {:?}\nstderr:\n{}",
            needle,
            self.stderr
        );
        self
    }
}

/// Poll `cond` until it holds or `max_ms` elapses
pub fn wait_for(max_ms: u64, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_millis(max_ms);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    false
}

/// Local calendar date `n` days before today, as YYYY-MM-DD
pub fn days_ago(n: i64) -> String {
    (chrono::Local::now().date_naive() - chrono::Duration::days(n)).to_string()
}

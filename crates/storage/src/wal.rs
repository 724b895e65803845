// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-ahead log for durable storage

use jot_core::Operation;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur in WAL operations
#[derive(Debug, Error)]
pub enum WalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only log of diary operations, one JSON entry per line
pub struct Wal {
    file: File,
    sequence: u64,
}

impl Wal {
    /// Open or create a WAL at the given path, recovering its contents
    ///
    /// Returns the log handle plus the operations replayed from it. A
    /// partial tail line from a crash mid-append is cut from the file
    /// here; left in place, the next append would share its line with
    /// the garbage prefix and be unreadable on the following replay.
    pub fn open(path: &Path) -> Result<(Self, Vec<Operation>), WalError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let (ops, valid_len) = Self::scan(path)?;

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        if file.metadata()?.len() > valid_len {
            file.set_len(valid_len)?;
            file.sync_data()?;
        }

        let sequence = ops.len() as u64;
        Ok((Self { file, sequence }, ops))
    }

    /// Append an operation to the log, fsyncing before returning
    pub fn append(&mut self, op: &Operation) -> Result<u64, WalError> {
        self.sequence += 1;
        let record = WalRecord {
            seq: self.sequence,
            op: op.clone(),
        };
        let line = serde_json::to_string(&record)?;
        writeln!(self.file, "{}", line)?;
        self.file.sync_data()?;
        Ok(self.sequence)
    }

    /// Get the current sequence number
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Replay all operations from the log without touching the file
    ///
    /// A truncated final line (crash mid-append) is dropped; earlier
    /// corruption is an error.
    pub fn replay(path: &Path) -> Result<Vec<Operation>, WalError> {
        Ok(Self::scan(path)?.0)
    }

    /// Parse the log, returning its operations and the byte length of
    /// the valid prefix (everything up to a partial tail, if any)
    fn scan(path: &Path) -> Result<(Vec<Operation>, u64), WalError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok((Vec::new(), 0)),
            Err(e) => return Err(e.into()),
        };

        let segments: Vec<&str> = content.split_inclusive('\n').collect();
        let mut ops = Vec::new();
        let mut valid_len = 0u64;

        for (index, segment) in segments.iter().enumerate() {
            let line = segment.trim_end_matches('\n');
            if line.is_empty() {
                valid_len += segment.len() as u64;
                continue;
            }
            match serde_json::from_str::<WalRecord>(line) {
                Ok(record) => {
                    ops.push(record.op);
                    valid_len += segment.len() as u64;
                }
                // Partial tail from an interrupted append
                Err(_) if index + 1 == segments.len() => break,
                Err(e) => return Err(e.into()),
            }
        }

        Ok((ops, valid_len))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WalRecord {
    seq: u64,
    op: Operation,
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;

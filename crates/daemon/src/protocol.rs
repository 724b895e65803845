// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire protocol between the jot CLI and jotd
//!
//! Messages are JSON frames with a 4-byte big-endian length prefix,
//! one request and one response per connection.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use jot_core::{DiaryEntry, StreakRecord};

/// Protocol version exchanged in the Hello handshake
pub const PROTOCOL_VERSION: &str = "1";

/// Default timeout for reading or writing one message
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on a single frame; diary entries are text
pub const MAX_FRAME_BYTES: u32 = 1024 * 1024;

/// Protocol errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("timed out")]
    Timeout,

    #[error("connection closed")]
    ConnectionClosed,

    #[error("frame of {0} bytes exceeds limit")]
    FrameTooLarge(u32),
}

/// Requests the CLI sends to the daemon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Request {
    /// Liveness probe
    Ping,

    /// Version handshake
    Hello { version: String },

    /// Daemon status summary
    Status,

    /// Graceful shutdown
    Shutdown,

    /// Create the entry for a date (default: today)
    CreateEntry {
        token: String,
        title: String,
        content: String,
        date: Option<String>,
    },

    /// Overwrite the entry for a date, if still editable
    UpdateEntry {
        token: String,
        date: String,
        title: String,
        content: String,
    },

    /// Read-only queries
    Query { token: String, query: Query },
}

/// Read-only queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Query {
    /// Entries for the authenticated user, optionally one date
    ListEntries { date: Option<String> },

    /// The authenticated user's streak
    GetStreak,
}

/// Responses the daemon sends back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Response {
    Pong,
    Hello { version: String },
    Ok,
    ShuttingDown,
    Status {
        uptime_secs: u64,
        users: usize,
        entries: usize,
    },
    Entry { entry: EntryDetail },
    Entries { entries: Vec<EntryDetail> },
    Streak { streak: StreakSummary },
    Error { kind: ErrorKind, message: String },
}

/// Failure taxonomy surfaced to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No valid caller identity
    Unauthenticated,
    /// An entry already exists for the date; do not retry as-is
    Conflict,
    /// Update target absent
    NotFound,
    /// Edit window closed
    Forbidden,
    /// Malformed input (bad date string, empty draft)
    InvalidRequest,
    /// Storage or unexpected failure; safe to retry after a delay
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::Conflict => "conflict",
            ErrorKind::NotFound => "not found",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::InvalidRequest => "invalid request",
            ErrorKind::Internal => "internal",
        };
        write!(f, "{}", name)
    }
}

/// Wire form of a diary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDetail {
    pub id: u64,
    pub date: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&DiaryEntry> for EntryDetail {
    fn from(entry: &DiaryEntry) -> Self {
        Self {
            id: entry.id.0,
            date: entry.entry_date.to_string(),
            title: entry.title.clone(),
            content: entry.content.clone(),
            created_at: entry.created_at.to_rfc3339(),
            updated_at: entry.updated_at.to_rfc3339(),
        }
    }
}

/// Wire form of a streak, zero-valued when no record exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_entry_date: Option<String>,
}

impl StreakSummary {
    /// The default before a user's first entry
    pub fn zero() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_entry_date: None,
        }
    }
}

impl From<&StreakRecord> for StreakSummary {
    fn from(record: &StreakRecord) -> Self {
        Self {
            current_streak: record.current_streak,
            longest_streak: record.longest_streak,
            last_entry_date: Some(record.last_entry_date.to_string()),
        }
    }
}

/// Encode a message as raw JSON (no length prefix)
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ProtocolError> {
    Ok(serde_json::to_vec(value)?)
}

/// Decode a message from raw JSON
pub fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T, ProtocolError> {
    Ok(serde_json::from_slice(data)?)
}

/// Write a length-prefixed frame
pub async fn write_message<W>(writer: &mut W, data: &[u8]) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let len = u32::try_from(data.len()).map_err(|_| ProtocolError::FrameTooLarge(u32::MAX))?;
    if len > MAX_FRAME_BYTES {
        return Err(ProtocolError::FrameTooLarge(len));
    }
    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(data).await?;
    writer.flush().await?;
    Ok(())
}

/// Read a length-prefixed frame
pub async fn read_message<R>(reader: &mut R) -> Result<Vec<u8>, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let mut len_bytes = [0u8; 4];
    reader.read_exact(&mut len_bytes).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            ProtocolError::ConnectionClosed
        } else {
            ProtocolError::Io(e)
        }
    })?;

    let len = u32::from_be_bytes(len_bytes);
    if len > MAX_FRAME_BYTES {
        return Err(ProtocolError::FrameTooLarge(len));
    }

    let mut data = vec![0u8; len as usize];
    reader.read_exact(&mut data).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            ProtocolError::ConnectionClosed
        } else {
            ProtocolError::Io(e)
        }
    })?;
    Ok(data)
}

/// Read one request with a timeout
pub async fn read_request<R>(reader: &mut R, timeout: Duration) -> Result<Request, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let data = tokio::time::timeout(timeout, read_message(reader))
        .await
        .map_err(|_| ProtocolError::Timeout)??;
    decode(&data)
}

/// Write one response with a timeout
pub async fn write_response<W>(
    writer: &mut W,
    response: &Response,
    timeout: Duration,
) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let data = encode(response)?;
    tokio::time::timeout(timeout, write_message(writer, &data))
        .await
        .map_err(|_| ProtocolError::Timeout)?
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;

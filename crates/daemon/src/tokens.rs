// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token file loading
//!
//! Credential management is delegated: an operator provisions access
//! tokens out of band and lists them in `tokens.toml`. The daemon
//! only ever maps a presented token to a user id.
//!
//! ```toml
//! [tokens]
//! "6f1c-alice-token" = "alice"
//! "9a42-bob-token" = "bob"
//! ```

use std::collections::HashMap;
use std::path::Path;

use jot_core::{StaticAuthenticator, UserId};
use serde::Deserialize;
use thiserror::Error;

/// Errors loading the token file
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid token file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize)]
struct TokenFile {
    #[serde(default)]
    tokens: HashMap<String, String>,
}

/// Load an authenticator from a token file
///
/// A missing file yields an empty authenticator: the daemon runs but
/// rejects every request as unauthenticated until tokens exist.
pub fn load(path: &Path) -> Result<StaticAuthenticator, TokenError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(StaticAuthenticator::new())
        }
        Err(e) => {
            return Err(TokenError::Io {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    let file: TokenFile = toml::from_str(&content).map_err(|e| TokenError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(file
        .tokens
        .into_iter()
        .map(|(token, user)| (token, UserId(user)))
        .collect())
}

#[cfg(test)]
#[path = "tokens_tests.rs"]
mod tests;

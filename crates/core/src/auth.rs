// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Authentication collaborator
//!
//! Credential management is delegated: the daemon hands inbound
//! credentials to an [`Authenticator`] and gets back a user identity
//! or nothing. The core never makes authorization decisions; an
//! unauthenticated request is rejected at the boundary before any
//! service call.

use std::collections::HashMap;

use crate::entry::UserId;

/// Maps inbound credentials to an authenticated user identity
pub trait Authenticator: Send + Sync {
    /// The user the token belongs to, or `None` for unknown tokens
    fn authenticate(&self, token: &str) -> Option<UserId>;
}

/// Authenticator over a fixed token table
///
/// The daemon builds one from its token file; tests build one inline.
#[derive(Debug, Default)]
pub struct StaticAuthenticator {
    tokens: HashMap<String, UserId>,
}

impl StaticAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token for a user
    pub fn insert(&mut self, token: impl Into<String>, user_id: UserId) {
        self.tokens.insert(token.into(), user_id);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl FromIterator<(String, UserId)> for StaticAuthenticator {
    fn from_iter<T: IntoIterator<Item = (String, UserId)>>(iter: T) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl Authenticator for StaticAuthenticator {
    fn authenticate(&self, token: &str) -> Option<UserId> {
        self.tokens.get(token).cloned()
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;

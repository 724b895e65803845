// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod daemon;
pub mod edit;
pub mod list;
pub mod streak;
pub mod write;

use std::io::Read;

use anyhow::Result;

/// Entry content from `-m`, or stdin when the flag is absent
pub fn read_content(message: Option<String>) -> Result<String> {
    match message {
        Some(content) => Ok(content),
        None => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}

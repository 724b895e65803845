// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell completion generation for the jot CLI.
//!
//! Generates shell completions for bash, zsh, fish, and powershell.
//! Install completions using:
//!
//! ```bash
//! # Bash
//! jot completions bash > ~/.local/share/bash-completion/completions/jot
//!
//! # Zsh
//! jot completions zsh > ~/.zfunc/_jot
//!
//! # Fish
//! jot completions fish > ~/.config/fish/completions/jot.fish
//!
//! # PowerShell
//! jot completions powershell > $PROFILE.CurrentUserAllHosts
//! ```

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

/// Generate shell completions and write to stdout.
pub fn generate_completions<C: CommandFactory>(shell: Shell) {
    let mut cmd = C::command();
    generate(shell, &mut cmd, "jot", &mut io::stdout());
}

/// Arguments for the completions command.
#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

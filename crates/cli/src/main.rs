// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! jot - personal diary CLI

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod commands;
mod completions;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{daemon, edit, list, streak, write};

use crate::client::{resolve_token, DaemonClient};

#[derive(Parser)]
#[command(
    name = "jot",
    version,
    about = "Personal diary - one entry per day, streaks included"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a diary entry
    Write(write::WriteArgs),
    /// Edit an entry (same-day only)
    Edit(edit::EditArgs),
    /// List entries
    List(list::ListArgs),
    /// Show the writing streak
    Streak(streak::StreakArgs),
    /// Show daemon status
    Status,
    /// Daemon management
    Daemon(daemon::DaemonArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Commands that don't need an authenticated client connection
    let command = match cli.command {
        Commands::Completions(args) => {
            completions::generate_completions::<Cli>(args.shell);
            return Ok(());
        }
        Commands::Daemon(args) => return daemon::handle(args).await,
        other => other,
    };

    // All other commands go through the daemon
    let token = resolve_token()?;
    let client = DaemonClient::connect_or_start().await?;

    match command {
        Commands::Write(args) => write::handle(&client, &token, args).await?,
        Commands::Edit(args) => edit::handle(&client, &token, args).await?,
        Commands::List(args) => list::handle(&client, &token, args).await?,
        Commands::Streak(args) => streak::handle(&client, &token, args).await?,

        Commands::Status => {
            let (uptime_secs, users, entries) = client.status().await?;
            println!("Daemon running");
            println!("  Uptime: {}s", uptime_secs);
            println!("  Users: {}", users);
            println!("  Entries: {}", entries);
        }

        Commands::Daemon(_) | Commands::Completions(_) => unreachable!(),
    }

    Ok(())
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon management commands

use anyhow::Result;
use clap::Subcommand;

use crate::client::{self, DaemonClient};

#[derive(clap::Args)]
pub struct DaemonArgs {
    #[command(subcommand)]
    pub command: DaemonCommand,
}

#[derive(Subcommand)]
pub enum DaemonCommand {
    /// Start the daemon if it is not already running
    Start,
    /// Stop the daemon (graceful, then forceful)
    Stop,
    /// Show daemon status
    Status,
}

pub async fn handle(args: DaemonArgs) -> Result<()> {
    match args.command {
        DaemonCommand::Start => {
            let client = DaemonClient::connect_or_start().await?;
            let version = client.hello().await?;
            println!("Daemon running (version {})", version);
        }

        DaemonCommand::Stop => {
            if client::daemon_stop().await? {
                println!("Daemon stopped");
            } else {
                println!("Daemon not running");
            }
        }

        DaemonCommand::Status => match DaemonClient::connect() {
            Ok(client) => {
                let (uptime_secs, users, entries) = client.status().await?;
                println!("Daemon running");
                println!("  Uptime: {}s", uptime_secs);
                println!("  Users: {}", users);
                println!("  Entries: {}", entries);
            }
            Err(client::ClientError::DaemonNotRunning) => {
                println!("Daemon not running");
            }
            Err(e) => return Err(e.into()),
        },
    }

    Ok(())
}
